// ==========================================
// 班次产能排产系统 - 原始表结构
// ==========================================
// 职责: 文件解析结果（表头 + 行记录）,与文件格式无关
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// TableKind - 输入表类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableKind {
    Orders,   // 生产订单表
    Capacity, // 产能表
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Orders => write!(f, "订单表"),
            TableKind::Capacity => write!(f, "产能表"),
        }
    }
}

// ==========================================
// RawRow - 原始行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub row_number: usize, // 数据行号（表头之后从 1 开始,含被跳过的空行）
    pub values: HashMap<String, String>,
}

impl RawRow {
    /// 读取单元格（列不存在时为 None）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按表头顺序追加一行（测试与内存数据源使用）
    pub fn push_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let row_number = self.rows.last().map(|r| r.row_number + 1).unwrap_or(1);
        let values = self
            .headers
            .iter()
            .zip(cells.iter())
            .map(|(h, v)| (h.clone(), v.as_ref().trim().to_string()))
            .collect();
        self.rows.push(RawRow { row_number, values });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_numbers_and_lookup() {
        let mut table = RawTable::new(vec!["Zone".to_string(), "QTY".to_string()]);
        table.push_row(&["Z1", " 10 "]);
        table.push_row(&["Z2", "20"]);

        assert_eq!(table.len(), 2);
        assert!(table.has_column("QTY"));
        assert_eq!(table.rows[1].row_number, 2);
        assert_eq!(table.rows[0].get("QTY"), Some("10"));
        assert_eq!(table.rows[0].get("ANET"), None);
    }
}
