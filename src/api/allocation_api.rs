// ==========================================
// 班次产能排产系统 - 分配API
// ==========================================
// 职责: 封装 文件读取 → 筛选 → 分配 → 台账写出 → 运行报告 的完整流程,供宿主调用
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AllocationConfigReader;
use crate::domain::allocation::AllocationSummary;
use crate::domain::types::JoinKeyMode;
use crate::engine::{AllocationPipeline, FilterReport, PipelineResult};
use crate::export::error::ExportError;
use crate::export::LedgerWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 运行报告（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// 运行ID
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 关联键模式
    pub join_key_mode: JoinKeyMode,
    /// 筛选统计（含强制转换损失）
    pub filter_report: FilterReport,
    /// 分配汇总（含未匹配订单）
    pub summary: AllocationSummary,
    /// 产能表中无关联键被跳过的行
    pub capacity_skipped_rows: usize,
    /// 台账输出路径（未写出时为空）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<String>,
    /// 台账行数
    pub ledger_rows: usize,
    /// 生效配置快照
    pub config: serde_json::Value,
}

/// 一次完整运行的返回
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: PipelineResult,
    pub report: RunReport,
}

/// 分配API
pub struct AllocationApi<C>
where
    C: AllocationConfigReader,
{
    config: Arc<C>,
    pipeline: AllocationPipeline<C>,
}

impl<C> AllocationApi<C>
where
    C: AllocationConfigReader,
{
    /// 创建新的AllocationApi实例
    pub fn new(config: Arc<C>) -> Self {
        Self {
            pipeline: AllocationPipeline::new(config.clone()),
            config,
        }
    }

    /// 读取两张输入表并完成筛选与分配
    ///
    /// # 参数
    /// - orders_path: 订单表（.csv/.xlsx/.xls）
    /// - capacity_path: 产能表（.csv/.xlsx/.xls）
    ///
    /// # 返回
    /// - Ok(PipelineResult): 台账与统计
    /// - Err(ApiError): 缺列、文件、数据错误（不产生任何输出）
    pub fn run_files(&self, orders_path: &Path, capacity_path: &Path) -> ApiResult<PipelineResult> {
        Ok(self.pipeline.run_files(orders_path, capacity_path)?)
    }

    /// 写出台账 CSV
    ///
    /// 订单表没有任何透传列时,即使配置开启也只输出基础 8 列
    pub fn export_ledger(&self, result: &PipelineResult, output_path: &Path) -> ApiResult<usize> {
        let include_passthrough =
            self.config.get_include_passthrough()? && result.passthrough_columns;
        let writer = LedgerWriter::new(
            self.config.get_ledger_columns()?,
            include_passthrough,
            self.config.get_write_bom()?,
        );
        Ok(writer.write_to_path(&result.ledger, output_path)?)
    }

    /// 构建运行报告
    pub fn build_run_report(
        &self,
        result: &PipelineResult,
        ledger_path: Option<&Path>,
    ) -> ApiResult<RunReport> {
        let snapshot = self.config.get_config_snapshot()?;
        let config: serde_json::Value = serde_json::from_str(&snapshot)
            .map_err(|e| ApiError::InvalidInput(format!("配置快照不是合法 JSON: {}", e)))?;

        Ok(RunReport {
            run_id: result.run_id,
            started_at: result.started_at,
            finished_at: result.finished_at,
            join_key_mode: result.join_key_mode,
            filter_report: result.filter_report.clone(),
            summary: result.summary.clone(),
            capacity_skipped_rows: result.capacity_skipped_rows,
            ledger_path: ledger_path.map(|p| p.display().to_string()),
            ledger_rows: result.ledger.len(),
            config,
        })
    }

    /// 写出运行报告（格式化 JSON）
    pub fn write_run_report(&self, report: &RunReport, path: &Path) -> ApiResult<()> {
        let file = File::create(path).map_err(|source| ExportError::FileWrite {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), report).map_err(ExportError::from)?;
        info!(path = %path.display(), run_id = %report.run_id, "运行报告已写出");
        Ok(())
    }

    /// 完整运行: 分配 → 写台账 → （可选）写运行报告
    pub fn run_and_export(
        &self,
        orders_path: &Path,
        capacity_path: &Path,
        output_path: &Path,
        report_path: Option<&Path>,
    ) -> ApiResult<RunOutcome> {
        let result = self.run_files(orders_path, capacity_path)?;
        self.export_ledger(&result, output_path)?;

        let report = self.build_run_report(&result, Some(output_path))?;
        if let Some(path) = report_path {
            self.write_run_report(&report, path)?;
        }

        Ok(RunOutcome { result, report })
    }
}

/// 报告默认路径: 与台账同目录,扩展名改为 .report.json
pub fn default_report_path(output_path: &Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "ledger".to_string());
    output_path.with_file_name(format!("{}.report.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_path() {
        assert_eq!(
            default_report_path(Path::new("/tmp/out/calculated.csv")),
            PathBuf::from("/tmp/out/calculated.report.json")
        );
    }
}
