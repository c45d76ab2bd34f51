// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use shift_capacity_aps::domain::capacity::CapacityEntry;
use shift_capacity_aps::domain::order::{ProductionOrder, RawOrderRecord};
use shift_capacity_aps::domain::types::{IssueDate, JoinKeyMode};
use shift_capacity_aps::engine::CapacityIndex;
use shift_capacity_aps::importer::RawTable;

// ==========================================
// 订单构建器
// ==========================================

pub struct OrderBuilder {
    row_number: usize,
    zone: Option<String>,
    style: Option<String>,
    assortment: Option<String>,
    quantity: Option<f64>,
    net_amount: Option<f64>,
    issue_date: Option<f64>,
    color: Option<String>,
}

impl OrderBuilder {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            zone: Some("Z1".to_string()),
            style: Some("ST01".to_string()),
            assortment: Some("AS1".to_string()),
            quantity: Some(100.0),
            net_amount: Some(0.0),
            issue_date: Some(row_number as f64),
            color: None,
        }
    }

    pub fn zone(mut self, zone: &str) -> Self {
        self.zone = Some(zone.to_string());
        self
    }

    pub fn no_zone(mut self) -> Self {
        self.zone = None;
        self
    }

    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn no_quantity(mut self) -> Self {
        self.quantity = None;
        self
    }

    pub fn net_amount(mut self, net_amount: f64) -> Self {
        self.net_amount = Some(net_amount);
        self
    }

    pub fn issue_date(mut self, ordinal: f64) -> Self {
        self.issue_date = Some(ordinal);
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// 构建筛选前的原始记录
    pub fn build_raw(self) -> RawOrderRecord {
        RawOrderRecord {
            zone: self.zone,
            style: self.style,
            assortment: self.assortment,
            quantity: self.quantity,
            net_amount: self.net_amount,
            issue_date: self.issue_date.map(IssueDate::new),
            group: None,
            color: self.color,
            size: None,
            row_number: self.row_number,
        }
    }

    /// 构建已筛选订单（不经过筛选规则）
    pub fn build(self) -> ProductionOrder {
        let link_key = ProductionOrder::concat_link_key(self.zone.as_deref(), self.style.as_deref());
        ProductionOrder {
            row_number: self.row_number,
            zone: self.zone,
            style: self.style,
            assortment: self.assortment,
            quantity: self.quantity.unwrap_or_default(),
            net_amount: self.net_amount.unwrap_or_default(),
            issue_date: self.issue_date.map(IssueDate::new),
            link_key,
            group: None,
            color: self.color,
            size: None,
        }
    }
}

// ==========================================
// 产能表构建
// ==========================================

pub fn capacity_entry(zone: &str, style: &str, capacity: f64, row_number: usize) -> CapacityEntry {
    CapacityEntry {
        link_key: Some(format!("{}{}", zone, style)),
        zone: zone.to_string(),
        style: style.to_string(),
        capacity_per_shift: Some(capacity),
        row_number,
    }
}

/// 由 (区域, 款式, 单班产能) 构建复合键索引
pub fn capacity_index(entries: &[(&str, &str, f64)]) -> CapacityIndex {
    let entries = entries
        .iter()
        .enumerate()
        .map(|(i, (zone, style, cap))| capacity_entry(zone, style, *cap, i + 1))
        .collect();
    CapacityIndex::build(entries, JoinKeyMode::Composite).unwrap()
}

// ==========================================
// 原始表构建
// ==========================================

pub fn raw_table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    let mut table = RawTable::new(headers.iter().map(|h| h.to_string()).collect());
    for row in rows {
        table.push_row(*row);
    }
    table
}
