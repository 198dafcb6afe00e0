//! 任务构建器 - 编排层
//!
//! 把输入数据变成任务描述符：
//! - 构建任务：taxonomy 按 sample_id 稳定分组，一组一个任务
//! - 分析任务：扫描制品目录 × tradeoff 分数列表
//!
//! 输出路径是确定性推导的（{sample_id}_{config_label}.json），
//! 同样的输入重跑产生同样的目标路径，这是断点续跑的基础。

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::medium::Medium;
use crate::models::task::{ArtifactId, BuildTask, TradeoffTask, ARTIFACT_EXT};
use crate::models::taxonomy::Taxonomy;

/// 从 taxonomy 构建每样本一个的构建任务
pub fn build_tasks(taxonomy: &Taxonomy, medium: Arc<Medium>, config: &Config) -> Vec<BuildTask> {
    let label = config.config_label();
    let groups = taxonomy.group_by_sample();

    let tasks: Vec<BuildTask> = groups
        .into_iter()
        .map(|(sample_id, rows)| {
            let out_path = Path::new(&config.out_dir)
                .join(format!("{}_{}.{}", sample_id, label, ARTIFACT_EXT));
            BuildTask {
                sample_id,
                rows,
                medium: Arc::clone(&medium),
                out_path,
            }
        })
        .collect();

    info!(
        "✓ 共 {} 个样本，taxonomy {} 行",
        tasks.len(),
        taxonomy.len()
    );
    tasks
}

/// 扫描制品目录，生成制品 × fraction 的分析任务
///
/// 文件名必须通过 {sample}_{condition}.json 正则校验，
/// 不符合约定的文件被显式拒绝并告警，不会静默进入批次。
pub fn tradeoff_tasks(config: &Config) -> Result<Vec<TradeoffTask>> {
    let dir = Path::new(&config.out_dir);
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("无法读取制品目录: {}", config.out_dir))?;

    let mut artifacts = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some(ARTIFACT_EXT) {
            continue;
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match ArtifactId::parse(&file_name) {
            Ok(id) => artifacts.push((id, path)),
            Err(e) => warn!("⚠️ 拒绝制品文件: {}", e),
        }
    }

    let tasks: Vec<TradeoffTask> = artifacts
        .into_iter()
        .flat_map(|(id, path)| {
            config.tradeoffs.iter().map(move |fraction| TradeoffTask {
                id: id.clone(),
                artifact_path: path.clone(),
                fraction: *fraction,
            })
        })
        .collect();

    info!(
        "✓ 共 {} 个分析任务（{} 个 tradeoff 分数）",
        tasks.len(),
        config.tradeoffs.len()
    );
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::kingdom::Kingdom;
    use crate::models::taxonomy::AbundanceRow;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn row(sample: &str, species: &str) -> AbundanceRow {
        AbundanceRow {
            sample_id: sample.to_string(),
            species_id: species.to_string(),
            kingdom: Kingdom::Bacteria,
            relative_abundance: 0.1,
            file_paths: vec![PathBuf::from("/db/a.json")],
        }
    }

    #[test]
    fn test_build_tasks_one_per_sample_deterministic_path() {
        let taxonomy = Taxonomy::new(vec![row("S1", "sp1"), row("S2", "sp2"), row("S1", "sp3")]);
        let medium = Arc::new(Medium::new(IndexMap::new()));
        let config = Config {
            out_dir: "/out".to_string(),
            prefixes: vec!["0.1cal".to_string(), "0.3prob".to_string()],
            ..Config::default()
        };

        let tasks = build_tasks(&taxonomy, medium, &config);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].sample_id, "S1");
        assert_eq!(tasks[0].rows.len(), 2);
        // 多前缀用 '-' 连接
        assert_eq!(
            tasks[0].out_path,
            PathBuf::from("/out/S1_0.1cal-0.3prob.json")
        );

        // 同样输入重新构建产生同样的路径
        let medium2 = Arc::new(Medium::new(IndexMap::new()));
        let tasks2 = build_tasks(&taxonomy, medium2, &config);
        assert_eq!(tasks[0].out_path, tasks2[0].out_path);
    }

    #[test]
    fn test_tradeoff_tasks_rejects_invalid_names() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        std::fs::write(dir.path().join("S1_0.1cal.json"), "{}").unwrap();
        std::fs::write(dir.path().join("S2_0.1cal.json"), "{}").unwrap();
        // 命名不符合约定：缺少条件段 / 多余下划线 / 非制品扩展名
        std::fs::write(dir.path().join("S3.json"), "{}").unwrap();
        std::fs::write(dir.path().join("S4_a_b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let config = Config {
            out_dir: dir.path().to_string_lossy().to_string(),
            tradeoffs: vec![0.5, 0.8],
            ..Config::default()
        };

        let mut tasks = tradeoff_tasks(&config).expect("扫描失败");
        tasks.sort_by(|a, b| a.id.sample.cmp(&b.id.sample));

        // 2 个有效制品 × 2 个分数
        assert_eq!(tasks.len(), 4);
        assert!(tasks.iter().all(|t| t.id.sample == "S1" || t.id.sample == "S2"));
    }
}
