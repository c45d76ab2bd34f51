// ==========================================
// 班次产能排产系统 - 订单筛选引擎
// ==========================================
// 红线: 未付足预付款的订单不得进入分配
// ==========================================
// 职责: 数量/日期缺失剔除 + 预付款准入判定 + 生成拼接关联键
// 输入: RawOrderRecord（已强制转换）
// 输出: ProductionOrder（保持源顺序）+ FilterReport
// ==========================================

use crate::domain::order::{ProductionOrder, RawOrderRecord};
use crate::importer::field_mapper::{CoercionLoss, MappedOrders};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// FilterReport - 筛选统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    pub total_rows: usize,
    pub kept: usize,
    pub dropped_quantity_missing: usize,
    pub dropped_quantity_zero: usize,
    pub dropped_issue_date_missing: usize,
    pub dropped_ineligible: usize, // 预付款不足（含预付款缺失）
    pub coercion_loss: CoercionLoss,
}

impl FilterReport {
    pub fn dropped(&self) -> usize {
        self.total_rows - self.kept
    }
}

/// 单行筛选结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Keep,
    QuantityMissing,
    QuantityZero,
    IssueDateMissing,
    Ineligible,
}

// ==========================================
// OrderFilter - 订单筛选引擎
// ==========================================
// 无状态,重复筛选结果不变
#[derive(Debug, Clone, Copy)]
pub struct OrderFilter {
    require_issue_date: bool,
}

impl OrderFilter {
    pub fn new(require_issue_date: bool) -> Self {
        Self { require_issue_date }
    }

    /// 预付款准入判定
    ///
    /// 规则: net_amount == 0 或 net_amount >= quantity / 3（精确比较,无容差）
    /// 预付款缺失时两个条件都不成立
    pub fn is_eligible(quantity: f64, net_amount: Option<f64>) -> bool {
        match net_amount {
            Some(net) => net == 0.0 || net >= quantity / 3.0,
            None => false,
        }
    }

    fn verdict(&self, record: &RawOrderRecord) -> Verdict {
        let Some(quantity) = record.quantity else {
            return Verdict::QuantityMissing;
        };
        if self.require_issue_date && record.issue_date.is_none() {
            return Verdict::IssueDateMissing;
        }
        if quantity == 0.0 {
            return Verdict::QuantityZero;
        }
        if !Self::is_eligible(quantity, record.net_amount) {
            return Verdict::Ineligible;
        }
        Verdict::Keep
    }

    /// 筛选订单
    ///
    /// # 返回
    /// (通过筛选的订单（源顺序）, 筛选统计)
    #[instrument(skip(self, records), fields(total = records.len()))]
    pub fn filter(&self, records: Vec<RawOrderRecord>) -> (Vec<ProductionOrder>, FilterReport) {
        let mut report = FilterReport {
            total_rows: records.len(),
            ..FilterReport::default()
        };
        let mut kept = Vec::new();

        for record in records {
            match self.verdict(&record) {
                Verdict::QuantityMissing => report.dropped_quantity_missing += 1,
                Verdict::QuantityZero => report.dropped_quantity_zero += 1,
                Verdict::IssueDateMissing => report.dropped_issue_date_missing += 1,
                Verdict::Ineligible => report.dropped_ineligible += 1,
                Verdict::Keep => kept.push(Self::into_order(record)),
            }
        }
        report.kept = kept.len();

        tracing::info!(
            kept = report.kept,
            quantity_missing = report.dropped_quantity_missing,
            quantity_zero = report.dropped_quantity_zero,
            issue_date_missing = report.dropped_issue_date_missing,
            ineligible = report.dropped_ineligible,
            "订单筛选完成"
        );

        (kept, report)
    }

    /// 筛选映射结果,并带上强制转换损失统计
    pub fn filter_mapped(&self, mapped: MappedOrders) -> (Vec<ProductionOrder>, FilterReport) {
        let (orders, mut report) = self.filter(mapped.records);
        report.coercion_loss = mapped.coercion_loss;
        (orders, report)
    }

    fn into_order(record: RawOrderRecord) -> ProductionOrder {
        let link_key =
            ProductionOrder::concat_link_key(record.zone.as_deref(), record.style.as_deref());
        ProductionOrder {
            row_number: record.row_number,
            zone: record.zone,
            style: record.style,
            assortment: record.assortment,
            quantity: record.quantity.unwrap_or_default(),
            net_amount: record.net_amount.unwrap_or_default(),
            issue_date: record.issue_date,
            link_key,
            group: record.group,
            color: record.color,
            size: record.size,
        }
    }
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::IssueDate;

    fn raw(row: usize, quantity: Option<f64>, net: Option<f64>, date: Option<f64>) -> RawOrderRecord {
        RawOrderRecord {
            zone: Some("Z1".to_string()),
            style: Some("S1".to_string()),
            assortment: Some("AS".to_string()),
            quantity,
            net_amount: net,
            issue_date: date.map(IssueDate::new),
            group: None,
            color: None,
            size: None,
            row_number: row,
        }
    }

    #[test]
    fn test_is_eligible() {
        assert!(OrderFilter::is_eligible(10.0, Some(0.0)));
        assert!(!OrderFilter::is_eligible(10.0, Some(2.0)));
        assert!(OrderFilter::is_eligible(9.0, Some(3.0)));
        assert!(!OrderFilter::is_eligible(10.0, None));
        // 负数量: 任意非负预付款都满足 >= q/3
        assert!(OrderFilter::is_eligible(-6.0, Some(1.0)));
    }

    #[test]
    fn test_filter_counts_each_reason() {
        let filter = OrderFilter::new(true);
        let records = vec![
            raw(1, Some(10.0), Some(0.0), Some(1.0)),
            raw(2, Some(10.0), Some(2.0), Some(1.0)),
            raw(3, None, Some(0.0), Some(1.0)),
            raw(4, Some(0.0), Some(0.0), Some(1.0)),
            raw(5, Some(10.0), Some(0.0), None),
            raw(6, Some(10.0), None, Some(1.0)),
        ];

        let (orders, report) = filter.filter(records);

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].row_number, 1);
        assert_eq!(orders[0].link_key, "Z1S1");
        assert_eq!(report.total_rows, 6);
        assert_eq!(report.kept, 1);
        assert_eq!(report.dropped_quantity_missing, 1);
        assert_eq!(report.dropped_quantity_zero, 1);
        assert_eq!(report.dropped_issue_date_missing, 1);
        assert_eq!(report.dropped_ineligible, 2);
        assert_eq!(report.dropped(), 5);
    }

    #[test]
    fn test_issue_date_optional_when_not_required() {
        let (orders, report) = OrderFilter::new(false).filter(vec![raw(1, Some(5.0), Some(0.0), None)]);
        assert_eq!(orders.len(), 1);
        assert_eq!(report.dropped_issue_date_missing, 0);
    }
}
