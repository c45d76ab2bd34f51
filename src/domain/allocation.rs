// ==========================================
// 班次产能排产系统 - 分配台账领域模型
// ==========================================
// 职责: 分配记录、分配台账（只追加）、未匹配订单、分配汇总
// ==========================================

use crate::domain::types::{IssueDate, Shift};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ==========================================
// AllocationRecord - 分配记录
// ==========================================
// 一次班次填充事件对应一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    // ===== 台账输出列 =====
    pub zone: String,
    pub assortment: String,
    pub style: String,
    pub capacity_per_shift: f64,
    pub day: u32,
    pub shift: Shift,
    pub allocated_quantity: f64,
    pub link_key: String,

    // ===== 透传字段 =====
    pub group: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub original_quantity: f64,

    // ===== 溯源 =====
    pub row_number: usize,
    pub issue_date: Option<IssueDate>,
}

// ==========================================
// AllocationLedger - 分配台账
// ==========================================
// 运行期间只追加,结束后整体输出
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationLedger {
    records: Vec<AllocationRecord>,
}

impl AllocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AllocationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AllocationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocationRecord> {
        self.records.iter()
    }

    /// 台账分配总量
    pub fn total_allocated(&self) -> f64 {
        self.records.iter().map(|r| r.allocated_quantity).sum()
    }

    /// 按源行号汇总分配量
    pub fn allocated_by_row(&self) -> HashMap<usize, f64> {
        let mut totals: HashMap<usize, f64> = HashMap::new();
        for record in &self.records {
            *totals.entry(record.row_number).or_insert(0.0) += record.allocated_quantity;
        }
        totals
    }
}

// ==========================================
// SkipReason - 订单未进入台账的原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    NoCapacityEntry,    // 产能表中无对应条目
    CapacityNotNumeric, // 产能值无法解析
    MissingZone,        // 区域为空,不属于任何分区
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCapacityEntry => write!(f, "NO_CAPACITY_ENTRY"),
            SkipReason::CapacityNotNumeric => write!(f, "CAPACITY_NOT_NUMERIC"),
            SkipReason::MissingZone => write!(f, "MISSING_ZONE"),
        }
    }
}

// ==========================================
// UnmatchedOrder - 被跳过的订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedOrder {
    pub row_number: usize,
    pub zone: Option<String>,
    pub style: Option<String>,
    pub link_key: String,
    pub quantity: f64,
    pub reason: SkipReason,
}

// ==========================================
// AllocationSummary - 分配汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub record_count: usize,
    pub zone_count: usize,
    pub days_by_zone: BTreeMap<String, u32>, // 各区域最后占用到第几天
    pub filtered_quantity: f64,              // 进入分配器的订单数量合计
    pub allocated_quantity: f64,             // 台账分配总量
    pub unmatched: Vec<UnmatchedOrder>,
    pub non_positive_quantity_rows: usize, // 数量 < 0 的订单（通过筛选但不产生记录）
}

impl AllocationSummary {
    /// 是否存在产能缺口告警
    pub fn has_capacity_gaps(&self) -> bool {
        self.unmatched
            .iter()
            .any(|u| u.reason != SkipReason::MissingZone)
    }

    pub fn unmatched_quantity(&self) -> f64 {
        self.unmatched.iter().map(|u| u.quantity).sum()
    }
}
