//! 群落模型构建流程 - 流程层
//!
//! 单个样本的构建状态机：
//!
//! ```text
//! CHECK_EXISTING ──制品已存在──▶ SKIP（幂等成功，断点续跑契约）
//!       │
//!       ▼
//!     BUILD（构建群落模型 + 培养基交集）
//!       │
//!       ▼
//!     PERSIST（序列化到确定性路径）──▶ DONE
//!
//! BUILD / PERSIST 的任何错误 ──▶ FAILED（吸收态，返回 Failure，批次继续）
//! ```
//!
//! 本函数永远不向工作池抛错，所有失败都转成 BuildOutcome::Failed。

use std::time::Instant;
use tracing::{error, info};

use crate::error::{AppResult, TaskError};
use crate::logger::truncate_text;
use crate::models::task::{BuildOutcome, BuildTask};
use crate::workflow::task_ctx::TaskCtx;

use crate::engine::CommunityModel;

/// 执行单个样本的构建任务
pub fn run_build_task(task: &BuildTask, ctx: &TaskCtx) -> BuildOutcome {
    // ========== CHECK_EXISTING ==========
    // 制品存在即跳过：重跑不会重做已完成的工作，也不会报错
    if task.out_path.exists() {
        info!("{} ⏭️ 制品已存在，跳过", ctx);
        return BuildOutcome::Skipped;
    }

    info!("{} 🔨 开始构建群落模型", ctx);
    let t0 = Instant::now();

    match build_and_persist(task, ctx) {
        Ok(()) => {
            let dt = t0.elapsed().as_secs_f64();
            info!(
                "{} ✓ 已保存 → {} ({:.1}s)",
                ctx,
                task.out_path.display(),
                dt
            );
            BuildOutcome::Built
        }
        Err(e) => {
            // 失败只影响本样本：记录样本ID + 截断的错误链，批次继续
            let cause = truncate_text(&format!("{:#}", anyhow::Error::from(e)), 300);
            error!("{} ❌ 构建失败: {}", ctx, cause);
            BuildOutcome::Failed { cause }
        }
    }
}

/// BUILD + PERSIST：构建群落模型、求培养基交集并持久化
fn build_and_persist(task: &BuildTask, ctx: &TaskCtx) -> AppResult<()> {
    if task.rows.is_empty() {
        return Err(TaskError::EmptyTaxonomySubset {
            sample_id: task.sample_id.clone(),
        }
        .into());
    }

    // BUILD：逐物种加载模型文件并合并
    let mut model = CommunityModel::build(&task.sample_id, &task.rows)?;

    // 培养基与模型交换反应求交集，只保留模型中存在的条目
    let (filtered, matched) = task.medium.intersect(model.exchange_ids());
    info!(
        "{} {}/{} 个培养基反应在模型中找到",
        ctx,
        matched,
        task.medium.len()
    );
    model.medium = filtered;

    // PERSIST：写入确定性路径
    model.save(&task.out_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpeciesModel;
    use crate::models::kingdom::Kingdom;
    use crate::models::taxonomy::AbundanceRow;
    use crate::models::Medium;
    use indexmap::IndexMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    fn write_species(dir: &Path, name: &str, exchanges: &[&str]) -> PathBuf {
        let model = SpeciesModel {
            id: name.to_string(),
            reactions: exchanges.iter().map(|s| s.to_string()).collect(),
            exchanges: exchanges.iter().map(|s| s.to_string()).collect(),
        };
        let path = dir.join(format!("{}.json", name));
        std::fs::write(&path, serde_json::to_string(&model).unwrap()).unwrap();
        path
    }

    fn medium(entries: &[(&str, f64)]) -> Arc<Medium> {
        let fluxes: IndexMap<String, f64> =
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        Arc::new(Medium::new(fluxes))
    }

    fn build_task(dir: &Path, sample: &str, rows: Vec<AbundanceRow>, m: Arc<Medium>) -> BuildTask {
        BuildTask {
            sample_id: sample.to_string(),
            rows,
            medium: m,
            out_path: dir.join(format!("{}_test.json", sample)),
        }
    }

    fn row(sample: &str, species: &str, paths: Vec<PathBuf>) -> AbundanceRow {
        AbundanceRow {
            sample_id: sample.to_string(),
            species_id: species.to_string(),
            kingdom: Kingdom::Bacteria,
            relative_abundance: 0.5,
            file_paths: paths,
        }
    }

    #[test]
    fn test_build_then_skip_is_idempotent() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let p = write_species(dir.path(), "sp1", &["EX_glc", "EX_o2"]);
        let task = build_task(
            dir.path(),
            "S1",
            vec![row("S1", "sp1", vec![p])],
            medium(&[("EX_glc", 10.0), ("EX_x", 1.0)]),
        );
        let ctx = TaskCtx::new("S1".to_string(), 1, 1);

        assert_eq!(run_build_task(&task, &ctx), BuildOutcome::Built);
        let first_content = std::fs::read(&task.out_path).expect("读制品失败");

        // 第二次运行必须跳过且不重写文件
        assert_eq!(run_build_task(&task, &ctx), BuildOutcome::Skipped);
        let second_content = std::fs::read(&task.out_path).expect("读制品失败");
        assert_eq!(first_content, second_content);
    }

    #[test]
    fn test_persisted_medium_is_subset_of_exchanges() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let p = write_species(dir.path(), "sp1", &["EX_glc"]);
        let task = build_task(
            dir.path(),
            "S1",
            vec![row("S1", "sp1", vec![p])],
            medium(&[("EX_glc", 10.0), ("EX_absent", 3.0)]),
        );
        let ctx = TaskCtx::new("S1".to_string(), 1, 1);

        assert_eq!(run_build_task(&task, &ctx), BuildOutcome::Built);

        let model = CommunityModel::load(&task.out_path).expect("加载制品失败");
        // 持久化培养基的键是模型交换反应的子集
        for id in model.medium.reaction_ids() {
            assert!(model.exchanges.contains(id));
        }
        // 被丢弃的条目不在模型反应集合中
        assert!(!model.medium.contains("EX_absent"));
        assert!(!model.exchanges.contains(&"EX_absent".to_string()));
    }

    #[test]
    fn test_missing_species_file_is_contained_failure() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let task = build_task(
            dir.path(),
            "S1",
            vec![row("S1", "sp1", vec![PathBuf::from("/no/such.json")])],
            medium(&[("EX_glc", 10.0)]),
        );
        let ctx = TaskCtx::new("S1".to_string(), 1, 1);

        // 失败被包含在结果值中，不 panic、不抛错
        match run_build_task(&task, &ctx) {
            BuildOutcome::Failed { cause } => assert!(!cause.is_empty()),
            other => panic!("结果不符: {:?}", other),
        }
        assert!(!task.out_path.exists());
    }
}
