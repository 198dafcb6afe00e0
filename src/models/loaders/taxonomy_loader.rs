//! Taxonomy 表加载器
//!
//! 读取丰度表 CSV，按阈值过滤，并把每行的文件引用字段
//! 通过 Kingdom 对应的模型库目录解析为绝对路径。
//!
//! 丢弃规则：
//! - 相对丰度 <= 阈值：直接过滤（不属于数据质量问题，不告警）
//! - Kingdom 未识别 / 文件引用字段为空：丢弃该行，逐行记录原因，
//!   最后汇总告警丢弃总数（不是失败）
//!
//! 路径是否真实存在不在此处校验，缺失文件在构建阶段作为单样本失败浮现。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::DataError;
use crate::models::kingdom::Kingdom;
use crate::models::taxonomy::{AbundanceRow, Taxonomy};

/// CSV 原始记录
#[derive(Debug, serde::Deserialize)]
struct RawRecord {
    sample_id: String,
    species_id: String,
    #[serde(rename = "Kingdom")]
    kingdom: String,
    relative: f64,
    /// 以 '|' 分隔的模型文件引用
    file: String,
}

/// 加载并解析 taxonomy 表
pub fn load_taxonomy(path: &str, config: &Config) -> Result<Taxonomy> {
    if !Path::new(path).exists() {
        anyhow::bail!(DataError::TableNotFound {
            path: path.to_string()
        });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::CsvReadFailed {
        path: path.to_string(),
        source: e,
    })?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    let mut total = 0usize;

    for record in reader.deserialize() {
        let record: RawRecord = record.with_context(|| format!("taxonomy表解析失败: {}", path))?;
        total += 1;

        // 阈值过滤：严格大于
        if record.relative <= config.abundance_threshold {
            continue;
        }

        match resolve_row(&record, config) {
            Ok(row) => rows.push(row),
            Err(e) => {
                // 显式记录每一条被丢弃的行，不做静默丢弃
                warn!("⚠️ 丢弃taxonomy行: {}", e);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!("⚠️ 共丢弃 {} 行（Kingdom未识别或文件引用无效）", dropped);
    }
    info!("✓ taxonomy加载完成: {} 行有效 / {} 行原始", rows.len(), total);

    Ok(Taxonomy::new(rows))
}

/// 把一条原始记录解析为 AbundanceRow
fn resolve_row(record: &RawRecord, config: &Config) -> Result<AbundanceRow, DataError> {
    let kingdom = Kingdom::parse(&record.kingdom, &record.sample_id, &record.species_id)?;

    let base_dir = kingdom.base_dir(config);
    let file_paths: Vec<PathBuf> = record
        .file
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| Path::new(base_dir).join(name))
        .collect();

    if file_paths.is_empty() {
        return Err(DataError::MalformedFileField {
            sample_id: record.sample_id.clone(),
            species_id: record.species_id.clone(),
        });
    }

    Ok(AbundanceRow {
        sample_id: record.sample_id.clone(),
        species_id: record.species_id.clone(),
        kingdom,
        relative_abundance: record.relative,
        file_paths,
    })
}
