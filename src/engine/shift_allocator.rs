// ==========================================
// 班次产能排产系统 - 班次分配引擎
// ==========================================
// 红线: 产能约束优先于订单顺序,单条记录不得超过当班剩余产能
// ==========================================
// 职责: 按区域分组,按下单日期顺序贪心填充 A/B 两个班次
// 输入: 已筛选订单 + 产能索引
// 输出: 分配台账（区域升序,区域内按下单日期）+ 分配汇总
// ==========================================

use crate::domain::allocation::{
    AllocationLedger, AllocationRecord, AllocationSummary, SkipReason, UnmatchedOrder,
};
use crate::domain::capacity::ShiftBins;
use crate::domain::order::ProductionOrder;
use crate::domain::types::Shift;
use crate::engine::capacity_join::{warn_link_key_collisions, CapacityIndex, CapacityLookup};
use crate::engine::error::{AllocationError, AllocationResult};
use std::collections::BTreeMap;
use tracing::instrument;

/// 分配结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationOutcome {
    pub ledger: AllocationLedger,
    pub summary: AllocationSummary,
}

// ==========================================
// ShiftAllocator - 班次分配引擎
// ==========================================
// 无状态引擎；每个区域的班次状态只在一次 allocate 调用内存在
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftAllocator;

impl ShiftAllocator {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 分配全部订单
    ///
    /// 规则:
    /// 1) 区域为空的订单不属于任何分区,跳过并告警
    /// 2) 区域按字符串升序处理,区域内按下单日期升序（相同日期保持源顺序）
    /// 3) 产能未知的订单跳过并告警,不改变区域状态
    /// 4) 两个班次均为 0 时按本单产能重置（不换天）
    /// 5) 先 A 后 B,仍有剩余则换天并按本单产能补满
    ///
    /// # 错误
    /// - NonPositiveCapacity: 结转产能用尽后订单仍有数量,而本单产能 ≤ 0 或非有限值（无法换天补满）
    #[instrument(skip(self, orders, capacity), fields(
        orders_count = orders.len(),
        capacity_entries = capacity.len(),
        mode = %capacity.mode()
    ))]
    pub fn allocate(
        &self,
        orders: &[ProductionOrder],
        capacity: &CapacityIndex,
    ) -> AllocationResult<AllocationOutcome> {
        warn_link_key_collisions(orders, capacity.mode());

        let mut summary = AllocationSummary {
            filtered_quantity: orders
                .iter()
                .map(|o| o.quantity)
                .filter(|q| *q > 0.0)
                .sum(),
            ..AllocationSummary::default()
        };

        // 1. 按区域分组（BTreeMap 保证区域升序）
        let mut zones: BTreeMap<&str, Vec<&ProductionOrder>> = BTreeMap::new();
        for order in orders {
            match order.zone.as_deref() {
                Some(zone) => zones.entry(zone).or_default().push(order),
                None => {
                    tracing::warn!(
                        row = order.row_number,
                        style = order.style_str(),
                        quantity = order.quantity,
                        "订单区域为空,已跳过"
                    );
                    summary
                        .unmatched
                        .push(Self::unmatched(order, SkipReason::MissingZone));
                }
            }
        }
        summary.zone_count = zones.len();

        // 2. 逐区域填充
        let mut ledger = AllocationLedger::new();
        for (zone, mut zone_orders) in zones {
            // 稳定排序: 相同下单日期保持源顺序,缺失日期排在最后
            zone_orders.sort_by_key(|o| (o.issue_date.is_none(), o.issue_date));

            let before = ledger.len();
            let last_day = self.fill_zone(zone, &zone_orders, capacity, &mut ledger, &mut summary)?;
            if ledger.len() > before {
                summary.days_by_zone.insert(zone.to_string(), last_day);
            }
        }

        summary.record_count = ledger.len();
        summary.allocated_quantity = ledger.total_allocated();

        if summary.has_capacity_gaps() {
            tracing::warn!(
                unmatched = summary.unmatched.len(),
                unmatched_quantity = summary.unmatched_quantity(),
                allocated = summary.allocated_quantity,
                filtered = summary.filtered_quantity,
                "存在产能缺失的订单,分配总量小于筛选总量"
            );
        }
        tracing::info!(
            records = summary.record_count,
            zones = summary.zone_count,
            allocated = summary.allocated_quantity,
            "班次分配完成"
        );

        Ok(AllocationOutcome { ledger, summary })
    }

    /// 单区域填充,返回区域最后占用的天数
    fn fill_zone(
        &self,
        zone: &str,
        orders: &[&ProductionOrder],
        capacity: &CapacityIndex,
        ledger: &mut AllocationLedger,
        summary: &mut AllocationSummary,
    ) -> AllocationResult<u32> {
        let mut bins = ShiftBins::new();
        let mut last_capacity: Option<f64> = None;

        for order in orders {
            let cap = match capacity.lookup(order) {
                CapacityLookup::Known(cap) => cap,
                CapacityLookup::Unknown(reason) => {
                    tracing::warn!(
                        zone,
                        link_key = %order.link_key,
                        row = order.row_number,
                        reason = %reason,
                        "订单无可用产能,已跳过"
                    );
                    summary.unmatched.push(Self::unmatched(order, reason));
                    continue;
                }
            };

            // 两个班次均空时按本单产能重置,与数量正负无关
            bins = bins.open_for_order(cap);
            if order.quantity <= 0.0 {
                summary.non_positive_quantity_rows += 1;
                tracing::debug!(
                    zone,
                    row = order.row_number,
                    quantity = order.quantity,
                    "订单数量非正,不产生分配记录"
                );
                continue;
            }

            if let Some(previous) = last_capacity {
                if previous != cap {
                    tracing::debug!(
                        zone,
                        row = order.row_number,
                        previous,
                        current = cap,
                        "区域内单班产能变化,后续补满按当前订单产能"
                    );
                }
            }
            last_capacity = Some(cap);

            self.place_order(zone, order, cap, &mut bins, ledger)?;
        }

        Ok(bins.day())
    }

    /// 把一张订单的数量全部放入班次,必要时换天
    ///
    /// 先消耗区域内结转的剩余产能；只有需要换天时才用到本单产能,
    /// 此时本单产能 ≤ 0 或非有限值则无法补满,返回 NonPositiveCapacity
    fn place_order(
        &self,
        zone: &str,
        order: &ProductionOrder,
        cap: f64,
        bins: &mut ShiftBins,
        ledger: &mut AllocationLedger,
    ) -> AllocationResult<()> {
        let mut remaining = order.quantity;

        loop {
            for shift in Shift::ORDERED {
                if remaining <= 0.0 {
                    break;
                }
                let day = bins.day();
                let allocated = bins.take(shift, remaining);
                if allocated > 0.0 {
                    remaining -= allocated;
                    ledger.push(Self::record(order, cap, day, shift, allocated));
                }
            }

            if remaining <= 0.0 {
                return Ok(());
            }
            if !(cap.is_finite() && cap > 0.0) {
                return Err(AllocationError::NonPositiveCapacity {
                    zone: zone.to_string(),
                    row: order.row_number,
                    capacity: cap,
                });
            }
            bins.advance_day(cap);
        }
    }

    fn record(
        order: &ProductionOrder,
        cap: f64,
        day: u32,
        shift: Shift,
        allocated: f64,
    ) -> AllocationRecord {
        AllocationRecord {
            zone: order.zone_str().to_string(),
            assortment: order.assortment_str().to_string(),
            style: order.style_str().to_string(),
            capacity_per_shift: cap,
            day,
            shift,
            allocated_quantity: allocated,
            link_key: order.link_key.clone(),
            group: order.group.clone(),
            color: order.color.clone(),
            size: order.size.clone(),
            original_quantity: order.quantity,
            row_number: order.row_number,
            issue_date: order.issue_date,
        }
    }

    fn unmatched(order: &ProductionOrder, reason: SkipReason) -> UnmatchedOrder {
        UnmatchedOrder {
            row_number: order.row_number,
            zone: order.zone.clone(),
            style: order.style.clone(),
            link_key: order.link_key.clone(),
            quantity: order.quantity,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capacity::CapacityEntry;
    use crate::domain::types::{IssueDate, JoinKeyMode};

    fn order(row: usize, zone: &str, style: &str, quantity: f64, date: f64) -> ProductionOrder {
        ProductionOrder {
            row_number: row,
            zone: Some(zone.to_string()),
            style: Some(style.to_string()),
            assortment: Some("AS".to_string()),
            quantity,
            net_amount: 0.0,
            issue_date: Some(IssueDate::new(date)),
            link_key: ProductionOrder::concat_link_key(Some(zone), Some(style)),
            group: None,
            color: None,
            size: None,
        }
    }

    fn index(entries: &[(&str, &str, f64)]) -> CapacityIndex {
        let entries = entries
            .iter()
            .enumerate()
            .map(|(i, (zone, style, cap))| CapacityEntry {
                link_key: None,
                zone: zone.to_string(),
                style: style.to_string(),
                capacity_per_shift: Some(*cap),
                row_number: i + 1,
            })
            .collect();
        CapacityIndex::build(entries, JoinKeyMode::Composite).unwrap()
    }

    fn slots(outcome: &AllocationOutcome) -> Vec<(u32, Shift, f64)> {
        outcome
            .ledger
            .iter()
            .map(|r| (r.day, r.shift, r.allocated_quantity))
            .collect()
    }

    #[test]
    fn test_single_order_rolls_to_next_day() {
        let outcome = ShiftAllocator::new()
            .allocate(&[order(1, "Z1", "S1", 250.0, 1.0)], &index(&[("Z1", "S1", 100.0)]))
            .unwrap();

        assert_eq!(
            slots(&outcome),
            vec![(1, Shift::A, 100.0), (1, Shift::B, 100.0), (2, Shift::A, 50.0)]
        );
        assert_eq!(outcome.summary.days_by_zone.get("Z1"), Some(&2));
    }

    #[test]
    fn test_state_carries_across_orders() {
        let orders = [order(1, "Z1", "S1", 150.0, 1.0), order(2, "Z1", "S1", 100.0, 2.0)];
        let outcome = ShiftAllocator::new()
            .allocate(&orders, &index(&[("Z1", "S1", 100.0)]))
            .unwrap();

        assert_eq!(
            slots(&outcome),
            vec![
                (1, Shift::A, 100.0),
                (1, Shift::B, 50.0),
                (1, Shift::B, 50.0),
                (2, Shift::A, 50.0)
            ]
        );
    }

    #[test]
    fn test_exact_fill_resets_without_day_increment() {
        // 第一单恰好用完当天两个班次,第二单仍从第 1 天开始
        let orders = [order(1, "Z1", "S1", 200.0, 1.0), order(2, "Z1", "S1", 30.0, 2.0)];
        let outcome = ShiftAllocator::new()
            .allocate(&orders, &index(&[("Z1", "S1", 100.0)]))
            .unwrap();

        assert_eq!(
            slots(&outcome),
            vec![(1, Shift::A, 100.0), (1, Shift::B, 100.0), (1, Shift::A, 30.0)]
        );
    }

    #[test]
    fn test_zones_sorted_and_independent() {
        let orders = [order(1, "Z2", "S1", 10.0, 1.0), order(2, "Z1", "S1", 10.0, 5.0)];
        let outcome = ShiftAllocator::new()
            .allocate(&orders, &index(&[("Z1", "S1", 100.0), ("Z2", "S1", 100.0)]))
            .unwrap();

        let zones: Vec<&str> = outcome.ledger.iter().map(|r| r.zone.as_str()).collect();
        assert_eq!(zones, vec!["Z1", "Z2"]);
        assert!(outcome.ledger.iter().all(|r| r.day == 1 && r.shift == Shift::A));
        assert_eq!(outcome.summary.zone_count, 2);
    }

    #[test]
    fn test_missing_capacity_skipped_without_state_change() {
        let orders = [
            order(1, "Z1", "S1", 50.0, 1.0),
            order(2, "Z1", "UNKNOWN", 999.0, 2.0),
            order(3, "Z1", "S1", 60.0, 3.0),
        ];
        let outcome = ShiftAllocator::new()
            .allocate(&orders, &index(&[("Z1", "S1", 100.0)]))
            .unwrap();

        assert_eq!(
            slots(&outcome),
            vec![(1, Shift::A, 50.0), (1, Shift::A, 50.0), (1, Shift::B, 10.0)]
        );
        assert_eq!(outcome.summary.unmatched.len(), 1);
        assert_eq!(outcome.summary.unmatched[0].reason, SkipReason::NoCapacityEntry);
        assert!(outcome.summary.allocated_quantity < outcome.summary.filtered_quantity);
    }

    #[test]
    fn test_non_positive_capacity_aborts() {
        let err = ShiftAllocator::new()
            .allocate(&[order(7, "Z1", "S1", 10.0, 1.0)], &index(&[("Z1", "S1", 0.0)]))
            .unwrap_err();
        assert!(matches!(err, AllocationError::NonPositiveCapacity { row: 7, .. }));
    }

    #[test]
    fn test_zero_capacity_row_uses_carried_capacity() {
        let orders = [order(1, "Z1", "S1", 50.0, 1.0), order(2, "Z1", "S2", 30.0, 2.0)];
        let outcome = ShiftAllocator::new()
            .allocate(&orders, &index(&[("Z1", "S1", 100.0), ("Z1", "S2", 0.0)]))
            .unwrap();

        assert_eq!(slots(&outcome), vec![(1, Shift::A, 50.0), (1, Shift::A, 30.0)]);
        assert_eq!(outcome.ledger.records()[1].capacity_per_shift, 0.0);
    }

    #[test]
    fn test_zero_capacity_row_aborts_when_carry_runs_out() {
        let orders = [order(1, "Z1", "S1", 50.0, 1.0), order(2, "Z1", "S2", 200.0, 2.0)];
        let err = ShiftAllocator::new()
            .allocate(&orders, &index(&[("Z1", "S1", 100.0), ("Z1", "S2", 0.0)]))
            .unwrap_err();
        assert!(matches!(err, AllocationError::NonPositiveCapacity { row: 2, .. }));
    }

    #[test]
    fn test_negative_quantity_places_nothing() {
        let outcome = ShiftAllocator::new()
            .allocate(&[order(1, "Z1", "S1", -5.0, 1.0)], &index(&[("Z1", "S1", 0.0)]))
            .unwrap();
        assert!(outcome.ledger.is_empty());
        assert_eq!(outcome.summary.non_positive_quantity_rows, 1);
        assert!(outcome.summary.days_by_zone.is_empty());
    }
}
