// ==========================================
// 班次产能排产系统 - 引擎编排器
// ==========================================
// 用途: 协调 导入映射 → 订单筛选 → 产能关联 → 班次分配 的执行顺序
// 红线: 两张表的缺列检查都在筛选之前完成
// ==========================================

use crate::config::AllocationConfigReader;
use crate::domain::allocation::{AllocationLedger, AllocationSummary};
use crate::domain::order::ProductionOrder;
use crate::domain::types::JoinKeyMode;
use crate::engine::capacity_join::CapacityIndex;
use crate::engine::error::AllocationResult;
use crate::engine::order_filter::{FilterReport, OrderFilter};
use crate::engine::shift_allocator::ShiftAllocator;
use crate::importer::field_mapper::{CapacityFieldMapper, MappedCapacity, OrderFieldMapper};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::raw_table::RawTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// PipelineResult - 单次运行结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub join_key_mode: JoinKeyMode,

    // 筛选输出
    pub filter_report: FilterReport,

    // 分配输出
    pub summary: AllocationSummary,
    pub ledger: AllocationLedger,

    /// 订单表是否包含透传列（决定台账是否追加扩展列）
    pub passthrough_columns: bool,
    /// 产能表中无关联键被跳过的行
    pub capacity_skipped_rows: usize,
}

/// 筛选阶段输出
#[derive(Debug, Clone)]
pub struct FilteredOrders {
    pub orders: Vec<ProductionOrder>,
    pub report: FilterReport,
    pub passthrough_columns: bool,
}

// ==========================================
// AllocationPipeline - 引擎编排器
// ==========================================
pub struct AllocationPipeline<C>
where
    C: AllocationConfigReader,
{
    config: Arc<C>,
    allocator: ShiftAllocator,
}

impl<C> AllocationPipeline<C>
where
    C: AllocationConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            allocator: ShiftAllocator::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 订单表: 列名解析 + 强制转换 + 筛选
    pub fn filter_orders(&self, orders: &RawTable) -> AllocationResult<FilteredOrders> {
        let mapper = OrderFieldMapper::new(
            self.config.get_order_columns()?,
            self.config.get_require_issue_date()?,
        );
        let mapped = mapper.map_table(orders)?;
        let passthrough_columns = mapped.passthrough_columns;

        let filter = OrderFilter::new(self.config.get_require_issue_date()?);
        let (orders, report) = filter.filter_mapped(mapped);

        Ok(FilteredOrders {
            orders,
            report,
            passthrough_columns,
        })
    }

    /// 产能表: 列名解析 + 强制转换
    pub fn map_capacity(&self, capacity: &RawTable) -> AllocationResult<MappedCapacity> {
        let mapper = CapacityFieldMapper::new(
            self.config.get_capacity_columns()?,
            self.config.get_join_key_mode()?,
        );
        Ok(mapper.map_table(capacity)?)
    }

    /// 执行完整流程（内存表）
    ///
    /// # 流程
    /// 1. 订单表与产能表列名解析（缺列立即中止）
    /// 2. 订单筛选
    /// 3. 构建产能索引（重复关联键中止）
    /// 4. 按区域贪心分配
    #[instrument(skip(self, orders, capacity), fields(
        order_rows = orders.len(),
        capacity_rows = capacity.len()
    ))]
    pub fn run_tables(
        &self,
        orders: &RawTable,
        capacity: &RawTable,
    ) -> AllocationResult<PipelineResult> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mode = self.config.get_join_key_mode()?;
        info!(%run_id, %mode, "开始班次分配");

        // 产能表先映射,保证两张表的缺列都在筛选前报告
        let mapped_capacity = self.map_capacity(capacity)?;
        let filtered = self.filter_orders(orders)?;
        debug!(
            kept = filtered.orders.len(),
            capacity_entries = mapped_capacity.entries.len(),
            "筛选完成,开始关联产能"
        );

        let index = CapacityIndex::build(mapped_capacity.entries, mode)?;
        let outcome = self.allocator.allocate(&filtered.orders, &index)?;

        let finished_at = Utc::now();
        info!(
            %run_id,
            records = outcome.ledger.len(),
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "班次分配结束"
        );

        Ok(PipelineResult {
            run_id,
            started_at,
            finished_at,
            join_key_mode: mode,
            filter_report: filtered.report,
            summary: outcome.summary,
            ledger: outcome.ledger,
            passthrough_columns: filtered.passthrough_columns,
            capacity_skipped_rows: mapped_capacity.skipped_rows,
        })
    }

    /// 执行完整流程（文件路径,支持 .csv/.xlsx/.xls）
    pub fn run_files(
        &self,
        orders_path: &Path,
        capacity_path: &Path,
    ) -> AllocationResult<PipelineResult> {
        let parser = UniversalFileParser;
        let orders = parser.parse(orders_path)?;
        let capacity = parser.parse(capacity_path)?;
        info!(
            orders = %orders_path.display(),
            capacity = %capacity_path.display(),
            "输入文件读取完成"
        );
        self.run_tables(&orders, &capacity)
    }
}
