// ==========================================
// 班次产能排产系统 - API 层
// ==========================================
// 职责: 提供面向宿主（命令行/上层应用）的业务接口
// ==========================================

pub mod allocation_api;
pub mod error;

// 重导出核心类型
pub use allocation_api::{default_report_path, AllocationApi, RunOutcome, RunReport};
pub use error::{ApiError, ApiResult};
