// ==========================================
// 班次产能排产系统 - 生产订单领域模型
// ==========================================
// 职责: 订单原始记录（强制转换后）与通过筛选的生产订单
// 用途: 导入层写入,引擎层只读
// ==========================================

use crate::domain::types::IssueDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawOrderRecord - 订单原始记录
// ==========================================
// 字段映射 + 数值强制转换之后、筛选之前的中间结构体。
// 无法解析的数值记为 None（不是 0）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrderRecord {
    // ===== 订单维度 =====
    pub zone: Option<String>,       // 区域
    pub style: Option<String>,      // 款式
    pub assortment: Option<String>, // 配码 (Asst)

    // ===== 数值字段 =====
    pub quantity: Option<f64>,      // 数量 (QTY)
    pub net_amount: Option<f64>,    // 预付款 (ANET)
    pub issue_date: Option<IssueDate>, // 下单日期序数

    // ===== 透传字段 =====
    pub group: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,

    // ===== 元信息 =====
    pub row_number: usize, // 源文件数据行号（从 1 开始）
}

// ==========================================
// ProductionOrder - 已筛选生产订单
// ==========================================
// 不变量: quantity != 0,且 net_amount == 0 或 net_amount >= quantity / 3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub row_number: usize,
    pub zone: Option<String>,
    pub style: Option<String>,
    pub assortment: Option<String>,
    pub quantity: f64,
    pub net_amount: f64,
    pub issue_date: Option<IssueDate>,

    /// 区域与款式直接拼接（无分隔符）,仅用于输出 linkk 列与拼接模式关联
    pub link_key: String,

    pub group: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl ProductionOrder {
    /// 区域与款式直接拼接
    ///
    /// 注意: 不同的 (区域, 款式) 可能拼出同一个字符串,例如 ("Z1", "0A") 与 ("Z10", "A")。
    pub fn concat_link_key(zone: Option<&str>, style: Option<&str>) -> String {
        format!("{}{}", zone.unwrap_or(""), style.unwrap_or(""))
    }

    pub fn zone_str(&self) -> &str {
        self.zone.as_deref().unwrap_or("")
    }

    pub fn style_str(&self) -> &str {
        self.style.as_deref().unwrap_or("")
    }

    pub fn assortment_str(&self) -> &str {
        self.assortment.as_deref().unwrap_or("")
    }

    /// 还原为原始记录（用于重复筛选）
    pub fn to_raw(&self) -> RawOrderRecord {
        RawOrderRecord {
            zone: self.zone.clone(),
            style: self.style.clone(),
            assortment: self.assortment.clone(),
            quantity: Some(self.quantity),
            net_amount: Some(self.net_amount),
            issue_date: self.issue_date,
            group: self.group.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
            row_number: self.row_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_link_key() {
        assert_eq!(ProductionOrder::concat_link_key(Some("Z1"), Some("ST01")), "Z1ST01");
        assert_eq!(ProductionOrder::concat_link_key(None, Some("ST01")), "ST01");
    }

    #[test]
    fn test_concat_link_key_collision() {
        // 拼接键的已知碰撞
        assert_eq!(
            ProductionOrder::concat_link_key(Some("Z1"), Some("0A")),
            ProductionOrder::concat_link_key(Some("Z10"), Some("A"))
        );
    }
}
