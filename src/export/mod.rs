// ==========================================
// 班次产能排产系统 - 导出层
// ==========================================
// 职责: 分配台账写出（CSV）
// ==========================================

pub mod error;
pub mod ledger_writer;

pub use error::{ExportError, ExportResult};
pub use ledger_writer::{format_quantity, LedgerWriter};
