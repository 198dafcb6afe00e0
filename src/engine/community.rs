//! 群落代谢模型
//!
//! 由一个样本的 taxonomy 子集构建：逐物种加载模型文件，
//! 合并交换反应集合，套用过滤后的培养基。
//! 序列化为 JSON 制品，制品存在即是断点续跑的信号。

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineError;
use crate::models::medium::Medium;
use crate::models::taxonomy::AbundanceRow;

use super::species::SpeciesModel;

/// 群落中的一个成员物种
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxon {
    /// 物种ID
    pub species_id: String,
    /// 相对丰度
    pub abundance: f64,
    /// 该物种自己的交换反应ID
    pub exchanges: Vec<String>,
}

/// 群落代谢模型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityModel {
    /// 模型ID（等于样本ID）
    pub id: String,
    /// 成员物种（丰度表）
    pub taxa: Vec<Taxon>,
    /// 物种ID列表元数据
    ///
    /// 旧制品中可能与 taxa 不同步，加载后必须 resync_taxa() 重建。
    pub taxa_ids: Vec<String>,
    /// 群落级交换反应ID（各成员的并集）
    pub exchanges: Vec<String>,
    /// 全部反应ID（各成员的并集）
    pub reactions: Vec<String>,
    /// 过滤后的培养基（键是 exchanges 的子集）
    pub medium: Medium,
}

impl CommunityModel {
    /// 从一个样本的 taxonomy 子集构建群落模型
    ///
    /// 逐行加载物种模型文件（一行可能对应多个菌株文件），
    /// 任何文件缺失或解析失败都会返回错误，由上层转成单样本失败。
    pub fn build(sample_id: &str, rows: &[AbundanceRow]) -> Result<Self, EngineError> {
        let mut taxa = Vec::with_capacity(rows.len());
        let mut all_exchanges: IndexSet<String> = IndexSet::new();
        let mut all_reactions: IndexSet<String> = IndexSet::new();

        for row in rows {
            let mut exchanges: IndexSet<String> = IndexSet::new();
            for path in &row.file_paths {
                let species = SpeciesModel::load(path)?;
                exchanges.extend(species.exchanges.iter().cloned());
                all_reactions.extend(species.reactions.iter().cloned());
            }
            all_exchanges.extend(exchanges.iter().cloned());

            taxa.push(Taxon {
                species_id: row.species_id.clone(),
                abundance: row.relative_abundance,
                exchanges: exchanges.into_iter().collect(),
            });
        }

        let taxa_ids = taxa.iter().map(|t| t.species_id.clone()).collect();

        Ok(Self {
            id: sample_id.to_string(),
            taxa,
            taxa_ids,
            exchanges: all_exchanges.into_iter().collect(),
            reactions: all_reactions.into_iter().collect(),
            medium: Medium::default(),
        })
    }

    /// 群落级交换反应ID
    pub fn exchange_ids(&self) -> &[String] {
        &self.exchanges
    }

    /// 成员丰度表：(species_id, abundance)
    pub fn abundances(&self) -> Vec<(String, f64)> {
        self.taxa
            .iter()
            .map(|t| (t.species_id.clone(), t.abundance))
            .collect()
    }

    /// 用自身丰度表重建 taxa_ids 元数据
    ///
    /// 防御性重同步：旧制品的元数据可能过期。
    pub fn resync_taxa(&mut self) {
        self.taxa_ids = self.taxa.iter().map(|t| t.species_id.clone()).collect();
    }

    /// 序列化到制品文件
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| EngineError::ArtifactWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        std::fs::write(path, content).map_err(|e| EngineError::ArtifactWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// 从制品文件反序列化
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::ArtifactInvalid {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| EngineError::ArtifactInvalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
