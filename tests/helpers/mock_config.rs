// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use shift_capacity_aps::config::{
    AllocationConfigReader, CapacityColumns, ConfigResult, LedgerColumns, OrderColumns,
};
use shift_capacity_aps::domain::types::JoinKeyMode;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub order_columns: OrderColumns,
    pub capacity_columns: CapacityColumns,
    pub ledger_columns: LedgerColumns,
    pub require_issue_date: bool,
    pub join_key_mode: JoinKeyMode,
    pub include_passthrough: bool,
    pub write_bom: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            order_columns: OrderColumns::default(),
            capacity_columns: CapacityColumns::default(),
            ledger_columns: LedgerColumns::default(),
            require_issue_date: true,
            join_key_mode: JoinKeyMode::Composite,
            include_passthrough: true,
            write_bom: true,
        }
    }

    /// 拼接关联键模式
    pub fn concatenated() -> Self {
        let mut config = Self::default();
        config.join_key_mode = JoinKeyMode::Concatenated;
        config
    }

    /// 下单日期非必填
    pub fn without_issue_date() -> Self {
        let mut config = Self::default();
        config.require_issue_date = false;
        config
    }
}

impl AllocationConfigReader for MockConfig {
    fn get_order_columns(&self) -> ConfigResult<OrderColumns> {
        Ok(self.order_columns.clone())
    }

    fn get_capacity_columns(&self) -> ConfigResult<CapacityColumns> {
        Ok(self.capacity_columns.clone())
    }

    fn get_ledger_columns(&self) -> ConfigResult<LedgerColumns> {
        Ok(self.ledger_columns.clone())
    }

    fn get_require_issue_date(&self) -> ConfigResult<bool> {
        Ok(self.require_issue_date)
    }

    fn get_join_key_mode(&self) -> ConfigResult<JoinKeyMode> {
        Ok(self.join_key_mode)
    }

    fn get_include_passthrough(&self) -> ConfigResult<bool> {
        Ok(self.include_passthrough)
    }

    fn get_write_bom(&self) -> ConfigResult<bool> {
        Ok(self.write_bom)
    }

    fn get_locale(&self) -> ConfigResult<String> {
        Ok("zh-CN".to_string())
    }

    fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(format!(
            r#"{{"allocation.join_key_mode":"{}","filter.require_issue_date":"{}"}}"#,
            self.join_key_mode, self.require_issue_date
        ))
    }
}
