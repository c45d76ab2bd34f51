// ==========================================
// 班次产能排产系统 - 导入接口 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 阶段: 文件解析 → 数据清洗/强制转换 → 字段映射
// ==========================================

use crate::domain::types::IssueDate;
use crate::importer::error::ImportResult;
use crate::importer::raw_table::RawTable;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表（表头 + 行记录）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawTable): 原始表,完全空白的行已跳过
    /// - Err: 文件读取错误、格式错误
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// Coerced - 单元格强制转换结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    Empty,    // 空单元格
    Value(T), // 转换成功
    Invalid,  // 非空但无法转换（计入 CoercionLoss）
}

impl<T> Coerced<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Coerced::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Coerced::Invalid)
    }
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 1）
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 数值强制转换
    ///
    /// # 规则
    /// - 空白 → Empty
    /// - 可解析且有限 → Value
    /// - 其他（含 NaN/inf）→ Invalid
    fn coerce_number(&self, value: Option<&str>) -> Coerced<f64>;

    /// 下单日期强制转换
    ///
    /// # 规则
    /// - 数值 → 原值作为序数
    /// - 日期/日期时间 → 公元纪年日序数（时间折算为小数部分）
    fn coerce_issue_date(&self, value: Option<&str>) -> Coerced<IssueDate>;
}
