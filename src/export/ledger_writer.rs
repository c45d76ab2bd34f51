// ==========================================
// 班次产能排产系统 - 台账写出器
// ==========================================
// 职责: 分配台账 → CSV（列名可配置,可选 UTF-8 BOM 与透传列）
// 规则: 整数值不带小数部分输出,行顺序与台账一致
// ==========================================

use crate::config::column_mapping::LedgerColumns;
use crate::domain::allocation::{AllocationLedger, AllocationRecord};
use crate::export::error::{ExportError, ExportResult};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 超过该量级的浮点数不再按整数输出
const INTEGRAL_LIMIT: f64 = 1e15;

/// 数值格式化: 整数不带小数部分,其余按最短往返表示
pub fn format_quantity(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_LIMIT {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ==========================================
// LedgerWriter - 台账写出器
// ==========================================
#[derive(Debug, Clone)]
pub struct LedgerWriter {
    columns: LedgerColumns,
    include_passthrough: bool,
    write_bom: bool,
}

impl LedgerWriter {
    /// # 参数
    /// - columns: 输出列名
    /// - include_passthrough: 是否追加 Group/Color/Size/Original_QTY 列
    /// - write_bom: 是否在文件头写入 UTF-8 BOM
    pub fn new(columns: LedgerColumns, include_passthrough: bool, write_bom: bool) -> Self {
        Self {
            columns,
            include_passthrough,
            write_bom,
        }
    }

    /// 表头
    pub fn headers(&self) -> Vec<&str> {
        let mut headers = self.columns.base_headers();
        if self.include_passthrough {
            headers.extend(self.columns.passthrough_headers());
        }
        headers
    }

    fn row(&self, record: &AllocationRecord) -> Vec<String> {
        let mut row = vec![
            record.zone.clone(),
            record.assortment.clone(),
            record.style.clone(),
            format_quantity(record.capacity_per_shift),
            record.day.to_string(),
            record.shift.to_string(),
            format_quantity(record.allocated_quantity),
            record.link_key.clone(),
        ];
        if self.include_passthrough {
            row.push(record.group.clone().unwrap_or_default());
            row.push(record.color.clone().unwrap_or_default());
            row.push(record.size.clone().unwrap_or_default());
            row.push(format_quantity(record.original_quantity));
        }
        row
    }

    /// 写入任意 Writer,返回写出的数据行数
    pub fn write<W: Write>(&self, ledger: &AllocationLedger, mut writer: W) -> ExportResult<usize> {
        if self.write_bom {
            writer.write_all(UTF8_BOM)?;
        }

        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for record in ledger.iter() {
            csv_writer.write_record(self.row(record))?;
        }
        csv_writer.flush()?;

        Ok(ledger.len())
    }

    /// 写入文件（覆盖已有文件）
    pub fn write_to_path(&self, ledger: &AllocationLedger, path: &Path) -> ExportResult<usize> {
        let file = File::create(path).map_err(|source| ExportError::FileWrite {
            path: path.display().to_string(),
            source,
        })?;
        let rows = self.write(ledger, BufWriter::new(file))?;
        tracing::info!(path = %path.display(), rows, "台账已写出");
        Ok(rows)
    }
}
