// ==========================================
// 班次产能排产系统 - 产能关联索引
// ==========================================
// 职责: 订单 → 单班产能的左连接
// 规则: 同一关联键重复出现视为数据错误（中止）
//       不同 (区域, 款式) 拼出同一 linkk 时告警
// ==========================================

use crate::domain::allocation::SkipReason;
use crate::domain::capacity::{CapacityEntry, JoinKey};
use crate::domain::order::ProductionOrder;
use crate::domain::types::JoinKeyMode;
use crate::engine::error::{AllocationError, AllocationResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// 关联结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacityLookup {
    Known(f64),
    Unknown(SkipReason),
}

// ==========================================
// CapacityIndex - 产能关联索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CapacityIndex {
    mode: JoinKeyMode,
    entries: HashMap<JoinKey, CapacityEntry>,
}

impl CapacityIndex {
    /// 构建索引
    ///
    /// # 错误
    /// - DuplicateCapacityKey: 同一关联键出现在两行
    pub fn build(entries: Vec<CapacityEntry>, mode: JoinKeyMode) -> AllocationResult<Self> {
        let mut index: HashMap<JoinKey, CapacityEntry> = HashMap::with_capacity(entries.len());

        for entry in entries {
            let key = entry.join_key(mode);
            if let Some(existing) = index.get(&key) {
                return Err(AllocationError::DuplicateCapacityKey {
                    key: key.to_string(),
                    first_row: existing.row_number,
                    second_row: entry.row_number,
                });
            }
            index.insert(key, entry);
        }

        tracing::debug!(entries = index.len(), mode = %mode, "产能索引已构建");
        Ok(Self {
            mode,
            entries: index,
        })
    }

    pub fn mode(&self) -> JoinKeyMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 订单侧关联键
    pub fn key_for(&self, order: &ProductionOrder) -> JoinKey {
        match self.mode {
            JoinKeyMode::Composite => JoinKey::composite(order.zone_str(), order.style_str()),
            JoinKeyMode::Concatenated => JoinKey::Concatenated(order.link_key.clone()),
        }
    }

    /// 查询订单的单班产能
    pub fn lookup(&self, order: &ProductionOrder) -> CapacityLookup {
        match self.entries.get(&self.key_for(order)) {
            None => CapacityLookup::Unknown(SkipReason::NoCapacityEntry),
            Some(entry) => match entry.capacity_per_shift {
                Some(capacity) => CapacityLookup::Known(capacity),
                None => CapacityLookup::Unknown(SkipReason::CapacityNotNumeric),
            },
        }
    }
}

/// 找出拼接后相同、但 (区域, 款式) 不同的 linkk
///
/// 返回 linkk → 参与碰撞的 (区域, 款式) 集合（按字符串排序）
pub fn link_key_collisions(orders: &[ProductionOrder]) -> BTreeMap<String, BTreeSet<(String, String)>> {
    let mut pairs: BTreeMap<String, BTreeSet<(String, String)>> = BTreeMap::new();
    for order in orders {
        pairs
            .entry(order.link_key.clone())
            .or_default()
            .insert((order.zone_str().to_string(), order.style_str().to_string()));
    }
    pairs.retain(|_, set| set.len() > 1);
    pairs
}

/// 记录 linkk 碰撞告警
pub fn warn_link_key_collisions(orders: &[ProductionOrder], mode: JoinKeyMode) {
    for (link_key, pairs) in link_key_collisions(orders) {
        match mode {
            JoinKeyMode::Concatenated => tracing::warn!(
                link_key = %link_key,
                pairs = ?pairs,
                "拼接关联键碰撞: 不同 (区域, 款式) 将共用同一产能条目"
            ),
            JoinKeyMode::Composite => tracing::warn!(
                link_key = %link_key,
                pairs = ?pairs,
                "输出 linkk 列存在歧义: 不同 (区域, 款式) 拼接结果相同"
            ),
        }
    }
}
