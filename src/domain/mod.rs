// ==========================================
// 班次产能排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值类型、产能状态机
// 红线: 不含文件读写逻辑,不含引擎编排逻辑
// ==========================================

pub mod allocation;
pub mod capacity;
pub mod order;
pub mod types;

// 重导出核心类型
pub use allocation::{
    AllocationLedger, AllocationRecord, AllocationSummary, SkipReason, UnmatchedOrder,
};
pub use capacity::{CapacityEntry, JoinKey, ShiftBins};
pub use order::{ProductionOrder, RawOrderRecord};
pub use types::{IssueDate, JoinKeyMode, Shift};
