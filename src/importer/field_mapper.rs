// ==========================================
// 班次产能排产系统 - 字段映射器实现
// ==========================================
// 职责: 源列 → 标准字段映射 + 类型强制转换
// 规则: 列名通过 ColumnMapping 解析（支持别名）,缺少必需列报 SchemaError
//       数值无法解析时记为缺失（不是 0）,并累计 CoercionLoss
// ==========================================

use crate::config::column_mapping::{CapacityColumns, OrderColumns};
use crate::domain::capacity::CapacityEntry;
use crate::domain::order::RawOrderRecord;
use crate::domain::types::JoinKeyMode;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{Coerced, DataCleaner as _};
use crate::importer::raw_table::{RawRow, RawTable, TableKind};
use crate::importer::schema_validator::SchemaValidator;
use serde::{Deserialize, Serialize};

// ==========================================
// CoercionLoss - 强制转换损失统计
// ==========================================
// 仅统计非空但无法解析的单元格（空单元格不计入）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionLoss {
    pub quantity: usize,
    pub net_amount: usize,
    pub issue_date: usize,
}

impl CoercionLoss {
    pub fn total(&self) -> usize {
        self.quantity + self.net_amount + self.issue_date
    }
}

/// 订单表映射结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedOrders {
    pub records: Vec<RawOrderRecord>,
    pub coercion_loss: CoercionLoss,
    /// 订单表是否包含任一透传列（Group/Color/Size）
    pub passthrough_columns: bool,
}

/// 产能表映射结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedCapacity {
    pub entries: Vec<CapacityEntry>,
    pub skipped_rows: usize,     // 区域、款式、linkk 全空的行
    pub invalid_capacity: usize, // 产能值非空但无法解析
}

/// 已解析的订单列名
struct ResolvedOrderColumns {
    quantity: String,
    net_amount: String,
    style: String,
    assortment: String,
    zone: String,
    issue_date: Option<String>,
    group: Option<String>,
    color: Option<String>,
    size: Option<String>,
}

// ==========================================
// OrderFieldMapper - 订单表字段映射
// ==========================================
pub struct OrderFieldMapper {
    columns: OrderColumns,
    require_issue_date: bool,
}

impl OrderFieldMapper {
    pub fn new(columns: OrderColumns, require_issue_date: bool) -> Self {
        Self {
            columns,
            require_issue_date,
        }
    }

    fn resolve(&self, table: &RawTable) -> ImportResult<ResolvedOrderColumns> {
        let validator = SchemaValidator;
        let kind = TableKind::Orders;

        let issue_date = if self.require_issue_date {
            Some(validator.require(table, kind, &self.columns.issue_date)?)
        } else {
            validator.optional(table, &self.columns.issue_date)
        };

        Ok(ResolvedOrderColumns {
            net_amount: validator.require(table, kind, &self.columns.net_amount)?,
            quantity: validator.require(table, kind, &self.columns.quantity)?,
            style: validator.require(table, kind, &self.columns.style)?,
            assortment: validator.require(table, kind, &self.columns.assortment)?,
            zone: validator.require(table, kind, &self.columns.zone)?,
            issue_date,
            group: validator.optional(table, &self.columns.group),
            color: validator.optional(table, &self.columns.color),
            size: validator.optional(table, &self.columns.size),
        })
    }

    /// 映射整张订单表
    ///
    /// # 错误
    /// - MissingColumn: 缺少数量/预付款/款式/配码/区域列,或要求下单日期时缺少该列
    pub fn map_table(&self, table: &RawTable) -> ImportResult<MappedOrders> {
        let resolved = self.resolve(table)?;
        let cleaner = DataCleaner;
        let mut loss = CoercionLoss::default();
        let mut records = Vec::with_capacity(table.len());

        for row in &table.rows {
            let quantity = cleaner.coerce_number(row.get(&resolved.quantity));
            let net_amount = cleaner.coerce_number(row.get(&resolved.net_amount));
            let issue_date = match resolved.issue_date.as_deref() {
                Some(column) => cleaner.coerce_issue_date(row.get(column)),
                None => Coerced::Empty,
            };

            if quantity.is_invalid() {
                loss.quantity += 1;
            }
            if net_amount.is_invalid() {
                loss.net_amount += 1;
            }
            if issue_date.is_invalid() {
                loss.issue_date += 1;
            }

            records.push(RawOrderRecord {
                zone: text(&cleaner, row, Some(resolved.zone.as_str())),
                style: text(&cleaner, row, Some(resolved.style.as_str())),
                assortment: text(&cleaner, row, Some(resolved.assortment.as_str())),
                quantity: quantity.value(),
                net_amount: net_amount.value(),
                issue_date: issue_date.value(),
                group: text(&cleaner, row, resolved.group.as_deref()),
                color: text(&cleaner, row, resolved.color.as_deref()),
                size: text(&cleaner, row, resolved.size.as_deref()),
                row_number: row.row_number,
            });
        }

        if loss.total() > 0 {
            tracing::warn!(
                quantity = loss.quantity,
                net_amount = loss.net_amount,
                issue_date = loss.issue_date,
                "订单表存在无法解析的数值,已按缺失处理"
            );
        }

        Ok(MappedOrders {
            records,
            coercion_loss: loss,
            passthrough_columns: resolved.group.is_some()
                || resolved.color.is_some()
                || resolved.size.is_some(),
        })
    }
}

// ==========================================
// CapacityFieldMapper - 产能表字段映射
// ==========================================
pub struct CapacityFieldMapper {
    columns: CapacityColumns,
    mode: JoinKeyMode,
}

impl CapacityFieldMapper {
    pub fn new(columns: CapacityColumns, mode: JoinKeyMode) -> Self {
        Self { columns, mode }
    }

    /// 映射整张产能表
    ///
    /// # 必需列
    /// - Composite: 区域、款式、产能
    /// - Concatenated: 产能,以及 linkk 或（区域 + 款式）
    pub fn map_table(&self, table: &RawTable) -> ImportResult<MappedCapacity> {
        let validator = SchemaValidator;
        let kind = TableKind::Capacity;

        let capacity_col = validator.require(table, kind, &self.columns.capacity)?;
        let link_col = validator.optional(table, &self.columns.link_key);

        let (zone_col, style_col) = match self.mode {
            JoinKeyMode::Composite => (
                Some(validator.require(table, kind, &self.columns.zone)?),
                Some(validator.require(table, kind, &self.columns.style)?),
            ),
            JoinKeyMode::Concatenated => {
                let zone = validator.optional(table, &self.columns.zone);
                let style = validator.optional(table, &self.columns.style);
                if link_col.is_none() && (zone.is_none() || style.is_none()) {
                    return Err(ImportError::MissingJoinColumns {
                        table: kind,
                        link_key: self.columns.link_key.primary().to_string(),
                        zone: self.columns.zone.primary().to_string(),
                        style: self.columns.style.primary().to_string(),
                    });
                }
                (zone, style)
            }
        };

        let cleaner = DataCleaner;
        let mut mapped = MappedCapacity::default();

        for row in &table.rows {
            let zone = text(&cleaner, row, zone_col.as_deref()).unwrap_or_default();
            let style = text(&cleaner, row, style_col.as_deref()).unwrap_or_default();
            let link_key = text(&cleaner, row, link_col.as_deref());

            if zone.is_empty() && style.is_empty() && link_key.is_none() {
                mapped.skipped_rows += 1;
                continue;
            }

            let capacity = cleaner.coerce_number(row.get(&capacity_col));
            if capacity.is_invalid() {
                mapped.invalid_capacity += 1;
            }

            mapped.entries.push(CapacityEntry {
                link_key,
                zone,
                style,
                capacity_per_shift: capacity.value(),
                row_number: row.row_number,
            });
        }

        if mapped.skipped_rows > 0 {
            tracing::warn!(skipped = mapped.skipped_rows, "产能表存在无关联键的行,已跳过");
        }
        if mapped.invalid_capacity > 0 {
            tracing::warn!(invalid = mapped.invalid_capacity, "产能表存在无法解析的产能值");
        }

        Ok(mapped)
    }
}

fn text(cleaner: &DataCleaner, row: &RawRow, column: Option<&str>) -> Option<String> {
    column.and_then(|c| cleaner.clean_text(row.get(c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut table = RawTable::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.push_row(*row);
        }
        table
    }

    #[test]
    fn test_order_mapping_with_aliases_and_loss() {
        let orders = table(
            &["Zone", "Style", "Asst", "Qty", "A Net", "Issue Date"],
            &[
                &["Z1", "S1", "AS", "250", "0", "2025-01-20"],
                &["Z1", "S2", "AS", "abc", "", "soon"],
            ],
        );

        let mapped = OrderFieldMapper::new(OrderColumns::default(), true)
            .map_table(&orders)
            .unwrap();

        assert_eq!(mapped.records.len(), 2);
        assert_eq!(mapped.records[0].quantity, Some(250.0));
        assert_eq!(mapped.records[0].net_amount, Some(0.0));
        assert!(mapped.records[0].issue_date.is_some());
        assert_eq!(mapped.records[1].quantity, None);
        assert_eq!(mapped.records[1].net_amount, None);
        assert_eq!(
            mapped.coercion_loss,
            CoercionLoss {
                quantity: 1,
                net_amount: 0,
                issue_date: 1
            }
        );
        assert!(!mapped.passthrough_columns);
    }

    #[test]
    fn test_order_mapping_missing_issue_date_column() {
        let orders = table(&["Zone", "Style", "Asst", "QTY", "ANET"], &[]);

        let err = OrderFieldMapper::new(OrderColumns::default(), true)
            .map_table(&orders)
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { ref column, .. } if column == "Issue date"));

        let mapped = OrderFieldMapper::new(OrderColumns::default(), false)
            .map_table(&orders)
            .unwrap();
        assert!(mapped.records.is_empty());
    }

    #[test]
    fn test_order_mapping_passthrough_detected() {
        let orders = table(
            &["Zone", "Style", "Asst", "QTY", "ANET", "Issue date", "Color"],
            &[&["Z1", "S1", "AS", "10", "0", "1", "Red"]],
        );
        let mapped = OrderFieldMapper::new(OrderColumns::default(), true)
            .map_table(&orders)
            .unwrap();
        assert!(mapped.passthrough_columns);
        assert_eq!(mapped.records[0].color.as_deref(), Some("Red"));
        assert_eq!(mapped.records[0].group, None);
    }

    #[test]
    fn test_capacity_mapping_composite_requires_zone_and_style() {
        let capacity = table(&["linkk", "Capacity"], &[&["Z1S1", "100"]]);
        let err = CapacityFieldMapper::new(CapacityColumns::default(), JoinKeyMode::Composite)
            .map_table(&capacity)
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { ref column, .. } if column == "Zone"));

        let mapped = CapacityFieldMapper::new(CapacityColumns::default(), JoinKeyMode::Concatenated)
            .map_table(&capacity)
            .unwrap();
        assert_eq!(mapped.entries.len(), 1);
        assert_eq!(mapped.entries[0].link_key.as_deref(), Some("Z1S1"));
    }

    #[test]
    fn test_capacity_mapping_concatenated_missing_join_columns() {
        let capacity = table(&["Zone", "Capacity"], &[]);
        let err = CapacityFieldMapper::new(CapacityColumns::default(), JoinKeyMode::Concatenated)
            .map_table(&capacity)
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingJoinColumns { .. }));
    }

    #[test]
    fn test_capacity_mapping_invalid_and_blank_keys() {
        let capacity = table(
            &["Zone", "Style", "Cap_per_shift"],
            &[&["Z1", "S1", "n/a"], &["", "", "50"], &["Z2", "S2", "80"]],
        );
        let mapped = CapacityFieldMapper::new(CapacityColumns::default(), JoinKeyMode::Composite)
            .map_table(&capacity)
            .unwrap();

        assert_eq!(mapped.entries.len(), 2);
        assert_eq!(mapped.entries[0].capacity_per_shift, None);
        assert_eq!(mapped.entries[1].capacity_per_shift, Some(80.0));
        assert_eq!(mapped.skipped_rows, 1);
        assert_eq!(mapped.invalid_capacity, 1);
    }
}
