//! Tradeoff 模拟流程 - 流程层
//!
//! 单个制品 × 单个 fraction 的模拟：
//! 1. 加载制品
//! 2. 用制品自身的丰度表重建 taxa 元数据（防御性重同步）
//! 3. 运行协作 tradeoff 模拟
//! 4. 生成生长速率表（追加 community 汇总行）和全反应通量表
//! 5. 两张表都打上 sample / condition / tradeoff 标记列
//!
//! 任何失败（文件缺失 / 优化不可行 / 制品损坏）都转成
//! TradeoffOutcome::Failed，批次继续。

use tracing::{error, info};

use crate::engine::{cooperative_tradeoff, CommunityModel, Solution, Tolerances, MEDIUM_TAXON};
use crate::error::AppResult;
use crate::logger::truncate_text;
use crate::models::table::{fmt_num, row_of, DataTable};
use crate::models::task::{SampleTables, TradeoffOutcome, TradeoffTask};
use crate::workflow::task_ctx::TaskCtx;

/// 执行单个 tradeoff 模拟任务
pub fn run_tradeoff_task(task: &TradeoffTask, ctx: &TaskCtx) -> TradeoffOutcome {
    info!(
        "{} 🧪 加载群落 {}（fraction={}）",
        ctx, task.id, task.fraction
    );

    match simulate(task) {
        Ok(tables) => {
            info!("{} ✓ 模拟完成", ctx);
            TradeoffOutcome::Success(tables)
        }
        Err(e) => {
            let cause = truncate_text(&format!("{:#}", anyhow::Error::from(e)), 300);
            error!(
                "{} ❌ 样本 {} 模拟失败: {}",
                ctx,
                task.artifact_path.display(),
                cause
            );
            TradeoffOutcome::Failed { cause }
        }
    }
}

/// 加载制品并运行模拟，生成打好标记的两张表
fn simulate(task: &TradeoffTask) -> AppResult<SampleTables> {
    let mut model = CommunityModel::load(&task.artifact_path)?;

    // 防御性重同步：旧制品的 taxa_ids 元数据可能过期
    model.resync_taxa();

    let solution = cooperative_tradeoff(&model, task.fraction, Tolerances::default())?;

    let mut rates = rates_table(&solution);
    let mut fluxes = fluxes_table(&solution);

    for table in [&mut rates, &mut fluxes] {
        table.tag("sample", &task.id.sample);
        table.tag("condition", &task.id.condition);
        table.tag("tradeoff", &fmt_num(task.fraction));
    }

    Ok(SampleTables { rates, fluxes })
}

/// 每物种生长速率/丰度表，末尾追加 community 汇总行
///
/// community 行：生长速率 = 目标值；丰度 = 各成员丰度之和，
/// 不包含 "medium" 伪成员行。
fn rates_table(solution: &Solution) -> DataTable {
    let mut table = DataTable::new();
    let mut abundance_sum = 0.0;

    for member in &solution.members {
        if member.taxon == MEDIUM_TAXON {
            continue;
        }
        abundance_sum += member.abundance;
        table.push_row(row_of(&[
            ("taxon", member.taxon.clone()),
            ("growth_rate", fmt_num(member.growth_rate)),
            ("abundance", fmt_num(member.abundance)),
        ]));
    }

    table.push_row(row_of(&[
        ("taxon", "community".to_string()),
        ("growth_rate", fmt_num(solution.growth_rate)),
        ("abundance", fmt_num(abundance_sum)),
    ]));

    table
}

/// 全反应通量表：每成员一行，列为反应ID
fn fluxes_table(solution: &Solution) -> DataTable {
    let mut table = DataTable::new();
    for (taxon, taxon_fluxes) in &solution.fluxes {
        let mut row = row_of(&[("taxon", taxon.clone())]);
        for (reaction, flux) in taxon_fluxes {
            row.insert(reaction.clone(), fmt_num(*flux));
        }
        table.push_row(row);
    }
    table
}
