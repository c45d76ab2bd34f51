// ==========================================
// 班次产能排产系统 - 核心库
// ==========================================
// 职责: 订单筛选 + 按区域的两班次贪心产能分配
// 技术栈: Rust（同步批处理,单次运行,无持久化）
// 数据流: 订单表 → 筛选 → 关联产能 → 班次分配 → 台账
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 筛选与分配规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 台账写出
pub mod export;

// 配置层 - 列名映射与开关
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{IssueDate, JoinKeyMode, Shift};

// 领域实体
pub use domain::{
    AllocationLedger, AllocationRecord, AllocationSummary, CapacityEntry, ProductionOrder,
    RawOrderRecord, ShiftBins, SkipReason, UnmatchedOrder,
};

// 引擎
pub use engine::{
    AllocationError, AllocationPipeline, AllocationResult, CapacityIndex, FilterReport,
    OrderFilter, PipelineResult, ShiftAllocator,
};

// API
pub use api::{AllocationApi, ApiError, ApiResult, RunReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "班次产能排产系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
