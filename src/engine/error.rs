// ==========================================
// 班次产能排产系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 关联与分配阶段的任何失败都会中止整次运行（不重试）
// ==========================================

use crate::config::error::ConfigError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum AllocationError {
    // ===== 上游错误 =====
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // ===== 数据错误 =====
    /// 产能表中同一关联键出现多次（左连接会重复分配订单）
    #[error("产能表关联键重复: {key}（第 {first_row} 行与第 {second_row} 行）")]
    DuplicateCapacityKey {
        key: String,
        first_row: usize,
        second_row: usize,
    },

    /// 已知产能 ≤ 0 或非有限值,但订单仍有数量待分配
    #[error("单班产能必须为正数: zone={zone}, row={row}, capacity={capacity}")]
    NonPositiveCapacity {
        zone: String,
        row: usize,
        capacity: f64,
    },
}

impl AllocationError {
    /// 是否属于表结构错误（缺列）
    pub fn is_schema_error(&self) -> bool {
        matches!(self, AllocationError::Import(e) if e.is_schema_error())
    }
}

/// Result 类型别名
pub type AllocationResult<T> = Result<T, AllocationError>;
