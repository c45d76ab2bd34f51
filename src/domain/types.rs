// ==========================================
// 班次产能排产系统 - 领域类型定义
// ==========================================
// 职责: 班次、关联键模式、下单日期序数等基础值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// 班次 (Shift)
// ==========================================
// 每天两个班次,A 班先于 B 班填充
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    A, // 早班
    B, // 晚班
}

impl Shift {
    /// 一天内的填充顺序
    pub const ORDERED: [Shift; 2] = [Shift::A, Shift::B];
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::A => write!(f, "A"),
            Shift::B => write!(f, "B"),
        }
    }
}

// ==========================================
// 关联键模式 (Join Key Mode)
// ==========================================
// Composite: (区域, 款式) 二元组,不会串键
// Concatenated: 区域与款式直接拼接的字符串,与旧版 linkk 列一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinKeyMode {
    Composite,
    Concatenated,
}

impl JoinKeyMode {
    /// 从配置字符串解析（大小写不敏感）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "COMPOSITE" => Some(JoinKeyMode::Composite),
            "CONCATENATED" | "CONCAT" => Some(JoinKeyMode::Concatenated),
            _ => None,
        }
    }
}

impl Default for JoinKeyMode {
    fn default() -> Self {
        JoinKeyMode::Composite
    }
}

impl fmt::Display for JoinKeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKeyMode::Composite => write!(f, "COMPOSITE"),
            JoinKeyMode::Concatenated => write!(f, "CONCATENATED"),
        }
    }
}

// ==========================================
// 下单日期序数 (Issue Date)
// ==========================================
// 数值列直接使用其数值（合法的 8 位 YYYYMMDD 除外）；日期列折算为公元纪年日序数。
// 排序使用 f64::total_cmp,保证全序（NaN 在导入阶段已被剔除）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueDate(f64);

impl IssueDate {
    pub fn new(ordinal: f64) -> Self {
        Self(ordinal)
    }

    pub fn ordinal(&self) -> f64 {
        self.0
    }
}

impl PartialEq for IssueDate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IssueDate {}

impl PartialOrd for IssueDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IssueDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for IssueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
