// ==========================================
// 班次产能排产系统 - 配置层
// ==========================================
// 职责: 列名映射、筛选/分配/导出开关,支持文件覆写与命令行覆写
// 存储: JSON 配置文件（扁平 key/value 或嵌套对象）
// ==========================================

pub mod allocation_config_trait;
pub mod column_mapping;
pub mod config_manager;
pub mod error;

// 重导出核心配置管理器
pub use allocation_config_trait::AllocationConfigReader;
pub use column_mapping::{CapacityColumns, ColumnAliases, ColumnMapping, LedgerColumns, OrderColumns};
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
