// ==========================================
// 班次产能排产系统 - 产能领域模型
// ==========================================
// 职责: 产能表条目、关联键、每区域的两班次产能状态机
// 红线: 产能约束优先于订单顺序,单班次分配量不得超过剩余产能
// ==========================================

use crate::domain::types::{JoinKeyMode, Shift};
use serde::{Deserialize, Serialize};

// ==========================================
// CapacityEntry - 产能表条目
// ==========================================
// 每个 (区域, 款式) 一条,运行期间只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityEntry {
    pub link_key: Option<String>,        // 源文件 linkk 列（可缺省）
    pub zone: String,                    // 区域
    pub style: String,                   // 款式
    pub capacity_per_shift: Option<f64>, // 单班产能；无法解析时为 None
    pub row_number: usize,
}

impl CapacityEntry {
    /// 按关联模式生成关联键
    pub fn join_key(&self, mode: JoinKeyMode) -> JoinKey {
        match mode {
            JoinKeyMode::Composite => JoinKey::composite(&self.zone, &self.style),
            JoinKeyMode::Concatenated => match self.link_key.as_deref() {
                Some(key) if !key.is_empty() => JoinKey::Concatenated(key.to_string()),
                _ => JoinKey::Concatenated(format!("{}{}", self.zone, self.style)),
            },
        }
    }
}

// ==========================================
// JoinKey - 订单与产能的关联键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JoinKey {
    Composite { zone: String, style: String },
    Concatenated(String),
}

impl JoinKey {
    pub fn composite(zone: &str, style: &str) -> Self {
        JoinKey::Composite {
            zone: zone.to_string(),
            style: style.to_string(),
        }
    }
}

impl std::fmt::Display for JoinKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinKey::Composite { zone, style } => write!(f, "{}|{}", zone, style),
            JoinKey::Concatenated(key) => write!(f, "{}", key),
        }
    }
}

// ==========================================
// ShiftBins - 单区域两班次产能状态机
// ==========================================
// 状态:
// - Fresh(day): 两个班次剩余产能均为 0,下一张订单开始时按其单班产能重置（不换天）
// - PartiallyFilled(a, b, day): 至少一个班次仍有剩余产能
//
// 转换:
// - open_for_order: Fresh(d) → PartiallyFilled(cap, cap, d)（cap ≤ 0 时仍为 Fresh）；其他状态不变
// - take: 从指定班次扣减,两个班次都扣完后回到 Fresh(d)
// - advance_day: 任意状态 → PartiallyFilled(cap, cap, d + 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftBins {
    Fresh {
        day: u32,
    },
    PartiallyFilled {
        remaining_a: f64,
        remaining_b: f64,
        day: u32,
    },
}

impl ShiftBins {
    /// 每个区域从第 1 天、两班次均为 0 开始
    pub fn new() -> Self {
        ShiftBins::Fresh { day: 1 }
    }

    pub fn day(&self) -> u32 {
        match *self {
            ShiftBins::Fresh { day } => day,
            ShiftBins::PartiallyFilled { day, .. } => day,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, ShiftBins::Fresh { .. })
    }

    /// 指定班次的剩余产能
    pub fn remaining(&self, shift: Shift) -> f64 {
        match (*self, shift) {
            (ShiftBins::Fresh { .. }, _) => 0.0,
            (ShiftBins::PartiallyFilled { remaining_a, .. }, Shift::A) => remaining_a,
            (ShiftBins::PartiallyFilled { remaining_b, .. }, Shift::B) => remaining_b,
        }
    }

    /// 订单开始时的重置转换（仅 Fresh 状态生效,不换天）
    ///
    /// 非正产能重置后两个班次仍为空,状态保持 Fresh
    pub fn open_for_order(self, capacity_per_shift: f64) -> Self {
        match self {
            ShiftBins::Fresh { day } if capacity_per_shift > 0.0 => ShiftBins::PartiallyFilled {
                remaining_a: capacity_per_shift,
                remaining_b: capacity_per_shift,
                day,
            },
            other => other,
        }
    }

    /// 从指定班次取出至多 quantity,返回实际分配量（班次无余量时为 0）
    pub fn take(&mut self, shift: Shift, quantity: f64) -> f64 {
        let ShiftBins::PartiallyFilled {
            mut remaining_a,
            mut remaining_b,
            day,
        } = *self
        else {
            return 0.0;
        };

        let slot = match shift {
            Shift::A => &mut remaining_a,
            Shift::B => &mut remaining_b,
        };
        if *slot <= 0.0 || quantity <= 0.0 {
            return 0.0;
        }
        let allocated = quantity.min(*slot);
        *slot -= allocated;

        *self = if remaining_a == 0.0 && remaining_b == 0.0 {
            ShiftBins::Fresh { day }
        } else {
            ShiftBins::PartiallyFilled {
                remaining_a,
                remaining_b,
                day,
            }
        };
        allocated
    }

    /// 当天两班次用尽,进入下一天并按当前订单的单班产能补满
    pub fn advance_day(&mut self, capacity_per_shift: f64) {
        *self = ShiftBins::PartiallyFilled {
            remaining_a: capacity_per_shift,
            remaining_b: capacity_per_shift,
            day: self.day() + 1,
        };
    }
}

impl Default for ShiftBins {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_opens_with_capacity() {
        let bins = ShiftBins::new().open_for_order(100.0);
        assert_eq!(bins.day(), 1);
        assert_eq!(bins.remaining(Shift::A), 100.0);
        assert_eq!(bins.remaining(Shift::B), 100.0);
    }

    #[test]
    fn test_open_does_not_reset_partial_state() {
        let mut bins = ShiftBins::new().open_for_order(100.0);
        bins.take(Shift::A, 40.0);
        let bins = bins.open_for_order(500.0);
        assert_eq!(bins.remaining(Shift::A), 60.0);
        assert_eq!(bins.remaining(Shift::B), 100.0);
    }

    #[test]
    fn test_open_with_zero_capacity_stays_fresh() {
        let bins = ShiftBins::new().open_for_order(0.0);
        assert!(bins.is_fresh());

        // 空班次在下一张订单时仍可按其产能重置
        let bins = bins.open_for_order(40.0);
        assert_eq!(bins.remaining(Shift::A), 40.0);
        assert_eq!(bins.day(), 1);
    }

    #[test]
    fn test_take_exhausting_both_returns_to_fresh_same_day() {
        let mut bins = ShiftBins::new().open_for_order(10.0);
        assert_eq!(bins.take(Shift::A, 25.0), 10.0);
        assert_eq!(bins.take(Shift::B, 15.0), 10.0);
        assert!(bins.is_fresh());
        assert_eq!(bins.day(), 1);
    }

    #[test]
    fn test_take_from_empty_shift() {
        let mut bins = ShiftBins::new();
        assert_eq!(bins.take(Shift::A, 5.0), 0.0);

        let mut bins = ShiftBins::new().open_for_order(10.0);
        bins.take(Shift::A, 10.0);
        assert_eq!(bins.take(Shift::A, 5.0), 0.0);
        assert_eq!(bins.remaining(Shift::B), 10.0);
    }

    #[test]
    fn test_advance_day_refills() {
        let mut bins = ShiftBins::new().open_for_order(10.0);
        bins.take(Shift::A, 10.0);
        bins.take(Shift::B, 10.0);
        bins.advance_day(30.0);
        assert_eq!(bins.day(), 2);
        assert_eq!(bins.remaining(Shift::A), 30.0);
        assert_eq!(bins.remaining(Shift::B), 30.0);
    }

    #[test]
    fn test_join_key_concatenated_prefers_source_column() {
        let entry = CapacityEntry {
            link_key: Some("LEGACY".to_string()),
            zone: "Z1".to_string(),
            style: "S1".to_string(),
            capacity_per_shift: Some(10.0),
            row_number: 1,
        };
        assert_eq!(
            entry.join_key(JoinKeyMode::Concatenated),
            JoinKey::Concatenated("LEGACY".to_string())
        );
        assert_eq!(entry.join_key(JoinKeyMode::Composite), JoinKey::composite("Z1", "S1"));
    }
}
