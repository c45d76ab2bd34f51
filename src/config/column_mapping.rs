// ==========================================
// 班次产能排产系统 - 列名映射
// ==========================================
// 职责: 逻辑字段 → 源文件列名（可多个别名）/ 输出列名
// 说明: 不同部署版本的列名大小写不一致（QTY/Qty, Allocated_QTY/Allocated_Qty）,
//       统一由配置决定,不在代码里分支
// ==========================================

use serde::{Deserialize, Serialize};

/// 别名在配置中的分隔符
pub const ALIAS_SEPARATOR: char = '|';

// ==========================================
// ColumnAliases - 单个逻辑字段的候选列名
// ==========================================
// 按顺序匹配,第一个存在于表头的列名生效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAliases(Vec<String>);

impl ColumnAliases {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// 从 "QTY|Qty" 形式解析；全部为空时返回 None
    pub fn parse(value: &str) -> Option<Self> {
        let names: Vec<String> = value
            .split(ALIAS_SEPARATOR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(Self(names))
        }
    }

    /// 主列名（报错时使用）
    pub fn primary(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or("")
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// 在表头中查找第一个匹配的列名
    pub fn resolve<'a>(&self, headers: &'a [String]) -> Option<&'a str> {
        self.0
            .iter()
            .find_map(|alias| headers.iter().find(|h| *h == alias))
            .map(String::as_str)
    }

    pub fn joined(&self) -> String {
        self.0.join(&ALIAS_SEPARATOR.to_string())
    }
}

// ==========================================
// OrderColumns - 订单表列名
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderColumns {
    pub quantity: ColumnAliases,
    pub net_amount: ColumnAliases,
    pub style: ColumnAliases,
    pub assortment: ColumnAliases,
    pub zone: ColumnAliases,
    pub issue_date: ColumnAliases,
    pub group: ColumnAliases,
    pub color: ColumnAliases,
    pub size: ColumnAliases,
}

impl Default for OrderColumns {
    fn default() -> Self {
        Self {
            quantity: ColumnAliases::new(["QTY", "Qty"]),
            net_amount: ColumnAliases::new(["ANET", "A Net"]),
            style: ColumnAliases::new(["Style"]),
            assortment: ColumnAliases::new(["Asst"]),
            zone: ColumnAliases::new(["Zone"]),
            issue_date: ColumnAliases::new(["Issue date", "Issue Date"]),
            group: ColumnAliases::new(["Group"]),
            color: ColumnAliases::new(["Color"]),
            size: ColumnAliases::new(["Size"]),
        }
    }
}

// ==========================================
// CapacityColumns - 产能表列名
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityColumns {
    pub link_key: ColumnAliases,
    pub zone: ColumnAliases,
    pub style: ColumnAliases,
    pub capacity: ColumnAliases,
}

impl Default for CapacityColumns {
    fn default() -> Self {
        Self {
            link_key: ColumnAliases::new(["linkk"]),
            zone: ColumnAliases::new(["Zone"]),
            style: ColumnAliases::new(["Style"]),
            capacity: ColumnAliases::new(["Capacity", "Cap_per_shift"]),
        }
    }
}

// ==========================================
// LedgerColumns - 台账输出列名
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerColumns {
    pub zone: String,
    pub assortment: String,
    pub style: String,
    pub capacity: String,
    pub day: String,
    pub shift: String,
    pub allocated: String,
    pub link_key: String,
    pub group: String,
    pub color: String,
    pub size: String,
    pub original_quantity: String,
}

impl LedgerColumns {
    /// 基础 8 列
    pub fn base_headers(&self) -> Vec<&str> {
        vec![
            self.zone.as_str(),
            self.assortment.as_str(),
            self.style.as_str(),
            self.capacity.as_str(),
            self.day.as_str(),
            self.shift.as_str(),
            self.allocated.as_str(),
            self.link_key.as_str(),
        ]
    }

    /// 透传扩展列
    pub fn passthrough_headers(&self) -> Vec<&str> {
        vec![
            self.group.as_str(),
            self.color.as_str(),
            self.size.as_str(),
            self.original_quantity.as_str(),
        ]
    }
}

impl Default for LedgerColumns {
    fn default() -> Self {
        Self {
            zone: "Zone".to_string(),
            assortment: "Asst".to_string(),
            style: "Style".to_string(),
            capacity: "Cap_per_shift".to_string(),
            day: "Day".to_string(),
            shift: "Shift".to_string(),
            allocated: "Allocated_QTY".to_string(),
            link_key: "linkk".to_string(),
            group: "Group".to_string(),
            color: "Color".to_string(),
            size: "Size".to_string(),
            original_quantity: "Original_QTY".to_string(),
        }
    }
}

// ==========================================
// ColumnMapping - 全部列名映射
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub orders: OrderColumns,
    pub capacity: CapacityColumns,
    pub ledger: LedgerColumns,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_first_matching_alias() {
        let aliases = ColumnAliases::new(["QTY", "Qty"]);
        assert_eq!(aliases.resolve(&headers(&["Zone", "Qty"])), Some("Qty"));
        assert_eq!(aliases.resolve(&headers(&["QTY", "Qty"])), Some("QTY"));
        assert_eq!(aliases.resolve(&headers(&["qty"])), None);
    }

    #[test]
    fn test_parse_aliases() {
        let aliases = ColumnAliases::parse(" QTY | Qty ||").unwrap();
        assert_eq!(aliases.names(), &["QTY".to_string(), "Qty".to_string()]);
        assert_eq!(aliases.primary(), "QTY");
        assert_eq!(aliases.joined(), "QTY|Qty");
        assert!(ColumnAliases::parse(" | ").is_none());
    }

    #[test]
    fn test_default_ledger_headers() {
        let columns = LedgerColumns::default();
        assert_eq!(
            columns.base_headers(),
            vec!["Zone", "Asst", "Style", "Cap_per_shift", "Day", "Shift", "Allocated_QTY", "linkk"]
        );
        assert_eq!(
            columns.passthrough_headers(),
            vec!["Group", "Color", "Size", "Original_QTY"]
        );
    }
}
