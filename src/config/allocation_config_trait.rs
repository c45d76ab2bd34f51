// ==========================================
// 班次产能排产系统 - 分配配置读取 Trait
// ==========================================
// 职责: 定义导入/筛选/分配/导出所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::column_mapping::{CapacityColumns, ColumnMapping, LedgerColumns, OrderColumns};
use crate::config::error::ConfigResult;
use crate::domain::types::JoinKeyMode;

// ==========================================
// AllocationConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 JSON 配置文件的 key/value 读取）
pub trait AllocationConfigReader: Send + Sync {
    // ===== 列名映射 =====

    /// 订单表列名（含别名）
    ///
    /// # 默认值
    /// - QTY|Qty, ANET|A Net, Style, Asst, Zone, Issue date|Issue Date, Group, Color, Size
    fn get_order_columns(&self) -> ConfigResult<OrderColumns>;

    /// 产能表列名（含别名）
    ///
    /// # 默认值
    /// - linkk, Zone, Style, Capacity|Cap_per_shift
    fn get_capacity_columns(&self) -> ConfigResult<CapacityColumns>;

    /// 台账输出列名
    fn get_ledger_columns(&self) -> ConfigResult<LedgerColumns>;

    /// 完整列名映射
    fn get_column_mapping(&self) -> ConfigResult<ColumnMapping> {
        Ok(ColumnMapping {
            orders: self.get_order_columns()?,
            capacity: self.get_capacity_columns()?,
            ledger: self.get_ledger_columns()?,
        })
    }

    // ===== 筛选 =====

    /// 下单日期列是否必填（缺失列报 SchemaError,缺失值的行被剔除）
    ///
    /// # 默认值
    /// - true
    fn get_require_issue_date(&self) -> ConfigResult<bool>;

    // ===== 分配 =====

    /// 订单与产能的关联键模式
    ///
    /// # 默认值
    /// - COMPOSITE
    fn get_join_key_mode(&self) -> ConfigResult<JoinKeyMode>;

    // ===== 导出 =====

    /// 订单表含 Group/Color/Size 列时,台账是否追加透传列
    ///
    /// # 默认值
    /// - true
    fn get_include_passthrough(&self) -> ConfigResult<bool>;

    /// 台账文件是否写入 UTF-8 BOM（供表格软件识别非 ASCII 文本）
    ///
    /// # 默认值
    /// - true
    fn get_write_bom(&self) -> ConfigResult<bool>;

    // ===== 其他 =====

    /// 界面语言（"zh-CN" 或 "en"）
    fn get_locale(&self) -> ConfigResult<String>;

    /// 生效配置快照（JSON）,写入运行报告
    fn get_config_snapshot(&self) -> ConfigResult<String>;
}
