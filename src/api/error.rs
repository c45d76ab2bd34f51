// ==========================================
// 班次产能排产系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,把导入/引擎/配置/导出错误转换为本地化的用户消息
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::AllocationError;
use crate::export::error::ExportError;
use crate::i18n::t_with_args;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    /// 缺少必需列（中止,不做任何分配）
    #[error("{0}")]
    SchemaError(String),

    #[error("{0}")]
    FileNotFound(String),

    #[error("{0}")]
    ImportError(String),

    // ==========================================
    // 数据/分配错误
    // ==========================================
    /// 重复产能键、非正产能等数据错误
    #[error("{0}")]
    DataError(String),

    // ==========================================
    // 配置/导出错误
    // ==========================================
    #[error("{0}")]
    ConfigError(String),

    #[error("{0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否属于表结构错误
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ApiError::SchemaError(_))
    }
}

// ==========================================
// 从下层错误转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => {
                ApiError::FileNotFound(t_with_args("import.file_not_found", &[("path", path.as_str())]))
            }
            e if e.is_schema_error() => ApiError::SchemaError(t_with_args(
                "api.schema_error",
                &[("detail", e.to_string().as_str())],
            )),
            e => ApiError::ImportError(t_with_args(
                "api.import_error",
                &[("detail", e.to_string().as_str())],
            )),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(t_with_args(
            "api.config_error",
            &[("detail", err.to_string().as_str())],
        ))
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(t_with_args(
            "api.export_error",
            &[("detail", err.to_string().as_str())],
        ))
    }
}

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::Import(e) => e.into(),
            AllocationError::Config(e) => e.into(),
            e @ (AllocationError::DuplicateCapacityKey { .. }
            | AllocationError::NonPositiveCapacity { .. }) => ApiError::DataError(t_with_args(
                "api.data_error",
                &[("detail", e.to_string().as_str())],
            )),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::raw_table::TableKind;

    #[test]
    fn test_schema_error_conversion() {
        let err: ApiError = AllocationError::Import(ImportError::MissingColumn {
            table: TableKind::Orders,
            column: "QTY".to_string(),
            accepted: "QTY|Qty".to_string(),
        })
        .into();

        assert!(err.is_schema_error());
        assert!(err.to_string().contains("QTY"));
    }

    #[test]
    fn test_data_error_conversion() {
        let err: ApiError = AllocationError::NonPositiveCapacity {
            zone: "Z1".to_string(),
            row: 3,
            capacity: 0.0,
        }
        .into();

        assert!(matches!(err, ApiError::DataError(ref msg) if msg.contains("Z1")));
    }
}
