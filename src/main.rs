// ==========================================
// 班次产能排产系统 - 命令行入口
// ==========================================
// 用法: shift-capacity-aps --orders <订单表> --capacity <产能表> [--output <台账>]
// 退出码: 0 成功；1 失败（缺列/文件/数据错误时不写出任何台账）
// ==========================================

use anyhow::Context;
use clap::Parser;
use shift_capacity_aps::api::{default_report_path, AllocationApi};
use shift_capacity_aps::config::{config_keys, AllocationConfigReader, ConfigManager};
use shift_capacity_aps::export::format_quantity;
use shift_capacity_aps::i18n::{set_locale, t_with_args};
use shift_capacity_aps::logging;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "shift-capacity-aps")]
#[command(version, about = "班次产能排产 - 按区域把订单数量贪心分配到每日 A/B 班次")]
struct Cli {
    /// 订单表（.csv/.xlsx/.xls）
    #[arg(long, default_value = "production_data_master.csv")]
    orders: PathBuf,

    /// 产能表（.csv/.xlsx/.xls）
    #[arg(long, default_value = "capacity_data.csv")]
    capacity: PathBuf,

    /// 台账输出路径
    #[arg(short, long, default_value = "calculated_production_capacity.csv")]
    output: PathBuf,

    /// 配置文件（JSON）
    #[arg(short, long, env = "SHIFT_APS_CONFIG")]
    config: Option<PathBuf>,

    /// 写出运行报告（不带路径时写到台账旁边的 <台账名>.report.json）
    #[arg(long, num_args = 0..=1)]
    report: Option<Option<PathBuf>>,

    /// 关联键模式: composite / concatenated（覆盖配置文件）
    #[arg(long)]
    join_key_mode: Option<String>,

    /// 界面语言: zh-CN / en（覆盖配置文件）
    #[arg(long, env = "SHIFT_APS_LOCALE")]
    locale: Option<String>,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(
        version = shift_capacity_aps::VERSION,
        "{} 启动",
        shift_capacity_aps::APP_NAME
    );

    // 配置: 文件 → 命令行覆写
    let mut config = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(mode) = &cli.join_key_mode {
        config.set(config_keys::JOIN_KEY_MODE, mode.as_str());
    }
    if let Some(locale) = &cli.locale {
        config.set(config_keys::LOCALE, locale.as_str());
    }
    set_locale(&config.get_locale()?);

    let report_path = cli
        .report
        .as_ref()
        .map(|p| p.clone().unwrap_or_else(|| default_report_path(&cli.output)));

    println!(
        "{}",
        t_with_args(
            "cli.run_started",
            &[
                ("orders", cli.orders.display().to_string().as_str()),
                ("capacity", cli.capacity.display().to_string().as_str()),
            ],
        )
    );

    let api = AllocationApi::new(Arc::new(config));
    let outcome = api.run_and_export(
        &cli.orders,
        &cli.capacity,
        &cli.output,
        report_path.as_deref(),
    )?;

    let summary = &outcome.result.summary;
    println!(
        "{}",
        t_with_args(
            "cli.run_finished",
            &[
                ("records", summary.record_count.to_string().as_str()),
                ("zones", summary.zone_count.to_string().as_str()),
                ("output", cli.output.display().to_string().as_str()),
            ],
        )
    );
    println!(
        "{}",
        t_with_args(
            "cli.quantity_summary",
            &[
                ("filtered", format_quantity(summary.filtered_quantity).as_str()),
                ("allocated", format_quantity(summary.allocated_quantity).as_str()),
            ],
        )
    );
    if summary.has_capacity_gaps() {
        println!(
            "{}",
            t_with_args(
                "cli.capacity_gap",
                &[
                    ("count", summary.unmatched.len().to_string().as_str()),
                    ("quantity", format_quantity(summary.unmatched_quantity()).as_str()),
                ],
            )
        );
    }
    if let Some(path) = &report_path {
        println!(
            "{}",
            t_with_args("cli.report_written", &[("path", path.display().to_string().as_str())])
        );
    }

    Ok(())
}
