//! 物种基因组尺度模型（GSMM）文件
//!
//! 每个物种一个 JSON 文件，来自 AGORA / CarveFungi 模型库。
//! 这里只关心构建群落模型所需的反应ID集合，不解析化学计量细节。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineError;

/// 物种模型文件内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesModel {
    /// 模型ID
    pub id: String,
    /// 全部反应ID
    pub reactions: Vec<String>,
    /// 交换反应ID（reactions 的子集）
    pub exchanges: Vec<String>,
}

impl SpeciesModel {
    /// 从 JSON 文件加载物种模型
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::SpeciesModelLoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        serde_json::from_str(&content).map_err(|e| EngineError::SpeciesModelLoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
