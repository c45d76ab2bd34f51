// ==========================================
// 班次产能排产系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值与日期强制转换
// 说明: 无法转换的值记为缺失（不是 0）,由筛选阶段剔除
// ==========================================

use crate::domain::types::IssueDate;
use crate::importer::importer_trait::{Coerced, DataCleaner as DataCleanerTrait};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// 可接受的日期格式（纯数字的 YYYYMMDD 见 compact_date）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];

/// 可接受的日期时间格式
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// 8 位整数按 YYYYMMDD 解释,合法日期返回 Some
///
/// 与文本日期统一为公元日序,同一列混用两种写法时排序一致
fn compact_date(value: f64) -> Option<NaiveDate> {
    if value.fract() != 0.0 || !(10_000_101.0..=99_991_231.0).contains(&value) {
        return None;
    }
    let n = value as i64;
    let year = i32::try_from(n / 10_000).ok()?;
    let month = u32::try_from(n / 100 % 100).ok()?;
    let day = u32::try_from(n % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn coerce_number(&self, value: Option<&str>) -> Coerced<f64> {
        let Some(raw) = self.normalize_null(value) else {
            return Coerced::Empty;
        };
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Coerced::Value(v),
            _ => Coerced::Invalid,
        }
    }

    fn coerce_issue_date(&self, value: Option<&str>) -> Coerced<IssueDate> {
        let Some(raw) = self.normalize_null(value) else {
            return Coerced::Empty;
        };

        if let Ok(v) = raw.parse::<f64>() {
            if !v.is_finite() {
                return Coerced::Invalid;
            }
            return match compact_date(v) {
                Some(date) => Coerced::Value(IssueDate::new(f64::from(date.num_days_from_ce()))),
                None => Coerced::Value(IssueDate::new(v)),
            };
        }

        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&raw, fmt).ok())
        {
            return Coerced::Value(IssueDate::new(f64::from(date.num_days_from_ce())));
        }

        if let Some(dt) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        {
            let day = f64::from(dt.date().num_days_from_ce());
            let fraction = f64::from(dt.time().num_seconds_from_midnight()) / 86_400.0;
            return Coerced::Value(IssueDate::new(day + fraction));
        }

        Coerced::Invalid
    }
}

impl DataCleaner {
    /// 清洗文本字段（TRIM）
    pub fn clean_text(&self, value: Option<&str>) -> Option<String> {
        self.normalize_null(value)
    }
}
