// ==========================================
// 班次产能排产系统 - 引擎层
// ==========================================
// 职责: 订单筛选、产能关联、班次分配及流程编排
// 红线: 引擎不做文件读写以外的 I/O,所有跳过的订单都必须给出原因
// ==========================================

pub mod capacity_join;
pub mod error;
pub mod orchestrator;
pub mod order_filter;
pub mod shift_allocator;

// 重导出核心引擎
pub use capacity_join::{CapacityIndex, CapacityLookup};
pub use error::{AllocationError, AllocationResult};
pub use orchestrator::{AllocationPipeline, FilteredOrders, PipelineResult};
pub use order_filter::{FilterReport, OrderFilter};
pub use shift_allocator::{AllocationOutcome, ShiftAllocator};
