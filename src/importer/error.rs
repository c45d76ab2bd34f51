// ==========================================
// 班次产能排产系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::importer::raw_table::TableKind;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 (SchemaError) =====
    #[error("{table} 缺少必需列 {column}（可接受的列名: {accepted}）")]
    MissingColumn {
        table: TableKind,
        column: String,
        accepted: String,
    },

    #[error("{table} 缺少关联列: 需要 {link_key} 列,或同时具备 {zone} 与 {style} 列")]
    MissingJoinColumns {
        table: TableKind,
        link_key: String,
        zone: String,
        style: String,
    },
}

impl ImportError {
    /// 是否属于表结构错误（缺列）
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            ImportError::MissingColumn { .. } | ImportError::MissingJoinColumns { .. }
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
