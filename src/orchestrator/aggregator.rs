//! 结果聚合器 - 编排层
//!
//! 消费与任务一一对应的结果序列：
//! - 失败逐个告警（带任务归属），绝不中止运行
//! - 成功表按列并集拼接成合并表（不同样本的反应集合不同）
//! - 合并表以带日期的确定性文件名持久化，不同日期的运行不会互相覆盖
//! - 某类表零成功时告警并跳过持久化，运行正常结束

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::table::DataTable;
use crate::models::task::{BuildOutcome, BuildTask, TradeoffOutcome, TradeoffTask};
use crate::workflow::TaskCtx;

/// 构建管线统计
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    pub built: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

impl BuildStats {
    /// 成功数（新构建 + 幂等跳过都算成功）
    pub fn succeeded(&self) -> usize {
        self.built + self.skipped
    }
}

/// 分析管线统计
#[derive(Debug, Default, Clone, Copy)]
pub struct TradeoffStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 汇总构建结果，逐失败告警
pub fn summarize_build(
    paired: &[(TaskCtx, BuildTask)],
    results: &[Option<BuildOutcome>],
) -> BuildStats {
    let mut stats = BuildStats {
        total: paired.len(),
        ..Default::default()
    };

    // 结果与任务按索引对应，与完成顺序无关
    for ((ctx, _task), outcome) in paired.iter().zip(results) {
        match outcome {
            Some(BuildOutcome::Built) => stats.built += 1,
            Some(BuildOutcome::Skipped) => stats.skipped += 1,
            Some(BuildOutcome::Failed { cause }) => {
                warn!("⚠️ 样本 {} 构建失败: {}", ctx.sample_id, cause);
                stats.failed += 1;
            }
            None => {
                warn!("⚠️ 样本 {} 的任务丢失（工作任务崩溃）", ctx.sample_id);
                stats.failed += 1;
            }
        }
    }

    info!(
        "✓ 构建汇总: 新建 {} / 跳过 {} / 失败 {}",
        stats.built, stats.skipped, stats.failed
    );
    stats
}

/// 聚合分析结果并持久化合并表
pub fn aggregate_tradeoff(
    paired: &[(TaskCtx, TradeoffTask)],
    results: Vec<Option<TradeoffOutcome>>,
    config: &Config,
) -> Result<TradeoffStats> {
    let mut stats = TradeoffStats {
        total: paired.len(),
        ..Default::default()
    };
    let mut all_rates = Vec::new();
    let mut all_fluxes = Vec::new();

    for ((_ctx, task), outcome) in paired.iter().zip(results) {
        match outcome {
            Some(TradeoffOutcome::Success(tables)) => {
                all_rates.push(tables.rates);
                all_fluxes.push(tables.fluxes);
                stats.success += 1;
            }
            Some(TradeoffOutcome::Failed { cause }) => {
                warn!("⚠️ 样本 {} 存在问题: {}", task.id, cause);
                stats.failed += 1;
            }
            None => {
                warn!("⚠️ 样本 {} 的任务丢失（工作任务崩溃）", task.id);
                stats.failed += 1;
            }
        }
    }

    let today = chrono::Local::now().date_naive();
    persist_table("growth_rates", all_rates, today, config)?;
    persist_table("fluxes", all_fluxes, today, config)?;

    Ok(stats)
}

/// 拼接并持久化一类合并表；空表告警并跳过
fn persist_table(
    kind: &str,
    tables: Vec<DataTable>,
    date: NaiveDate,
    config: &Config,
) -> Result<()> {
    if tables.is_empty() {
        warn!("⚠️ 没有收集到 {} 数据，跳过持久化", kind);
        return Ok(());
    }

    let combined = DataTable::concat(tables);
    let path = result_path(&config.results_dir, date, &config.result_label, kind, &fraction_label(config));
    combined.write_csv(&path)?;
    info!("💾 已保存 {} → {} ({} 行)", kind, path.display(), combined.n_rows());
    Ok(())
}

/// 聚合结果的确定性路径：{date}_{label}_{kind}_tradeoff{frac}.csv
///
/// 同一天同配置 → 同一路径；不同日期 → 不同路径，不会静默覆盖历史结果。
pub fn result_path(
    results_dir: &str,
    date: NaiveDate,
    label: &str,
    kind: &str,
    fraction_label: &str,
) -> PathBuf {
    PathBuf::from(results_dir).join(format!(
        "{}_{}_{}_tradeoff{}.csv",
        date.format("%Y%m%d"),
        label,
        kind,
        fraction_label
    ))
}

/// 文件名中的 tradeoff 分数段（多个分数用 '-' 连接）
fn fraction_label(config: &Config) -> String {
    config
        .tradeoffs
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
