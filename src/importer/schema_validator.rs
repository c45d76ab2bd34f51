// ==========================================
// 班次产能排产系统 - 表结构校验器
// ==========================================
// 职责: 必需列检查（SchemaError）,把逻辑字段解析为实际列名
// 红线: 缺列必须在筛选/分配开始前中止
// ==========================================

use crate::config::column_mapping::ColumnAliases;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_table::{RawTable, TableKind};

pub struct SchemaValidator;

impl SchemaValidator {
    /// 解析必需列,缺失时报 MissingColumn（以主列名命名）
    pub fn require(
        &self,
        table: &RawTable,
        kind: TableKind,
        aliases: &ColumnAliases,
    ) -> ImportResult<String> {
        aliases
            .resolve(&table.headers)
            .map(str::to_string)
            .ok_or_else(|| {
                tracing::error!(
                    table = %kind,
                    column = aliases.primary(),
                    headers = ?table.headers,
                    "缺少必需列"
                );
                ImportError::MissingColumn {
                    table: kind,
                    column: aliases.primary().to_string(),
                    accepted: aliases.joined(),
                }
            })
    }

    /// 解析可选列
    pub fn optional(&self, table: &RawTable, aliases: &ColumnAliases) -> Option<String> {
        aliases.resolve(&table.headers).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_resolves_alias() {
        let table = RawTable::new(vec!["Zone".to_string(), "Qty".to_string()]);
        let column = SchemaValidator
            .require(&table, TableKind::Orders, &ColumnAliases::new(["QTY", "Qty"]))
            .unwrap();
        assert_eq!(column, "Qty");
    }

    #[test]
    fn test_require_missing_names_primary_column() {
        let table = RawTable::new(vec!["Zone".to_string()]);
        let err = SchemaValidator
            .require(&table, TableKind::Orders, &ColumnAliases::new(["ANET", "A Net"]))
            .unwrap_err();

        assert!(err.is_schema_error());
        match err {
            ImportError::MissingColumn { table, column, accepted } => {
                assert_eq!(table, TableKind::Orders);
                assert_eq!(column, "ANET");
                assert_eq!(accepted, "ANET|A Net");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
