// ==========================================
// 班次产能排产系统 - 导入层
// ==========================================
// 职责: 订单表与产能表的读取、列名解析、数值强制转换
// 支持: CSV, Excel (.xlsx/.xls)
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod raw_table;
pub mod schema_validator;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{
    CapacityFieldMapper, CoercionLoss, MappedCapacity, MappedOrders, OrderFieldMapper,
};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use raw_table::{RawRow, RawTable, TableKind};
pub use schema_validator::SchemaValidator;

// 重导出 Trait 接口
pub use importer_trait::{Coerced, DataCleaner, FileParser};
