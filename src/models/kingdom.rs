//! Kingdom 分类枚举
//!
//! 每个分类对应一个模型库根目录，未识别的分类返回显式错误而不是静默丢弃。

use crate::config::Config;
use crate::error::DataError;

/// Kingdom 分类枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Kingdom {
    /// 细菌（AGORA 模型库）
    Bacteria,
    /// 真菌（CarveFungi 模型库）
    Fungi,
}

impl Kingdom {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Kingdom::Bacteria => "Bacteria",
            Kingdom::Fungi => "Fungi",
        }
    }

    /// 尝试从字符串解析分类（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Bacteria" => Some(Kingdom::Bacteria),
            "Fungi" => Some(Kingdom::Fungi),
            _ => None,
        }
    }

    /// 解析分类，未识别时返回显式错误（带行上下文）
    pub fn parse(s: &str, sample_id: &str, species_id: &str) -> Result<Self, DataError> {
        Self::from_str(s).ok_or_else(|| DataError::UnknownKingdom {
            kingdom: s.to_string(),
            sample_id: sample_id.to_string(),
            species_id: species_id.to_string(),
        })
    }

    /// 获取该分类对应的模型库根目录
    pub fn base_dir<'a>(self, config: &'a Config) -> &'a str {
        match self {
            Kingdom::Bacteria => &config.bacteria_dir,
            Kingdom::Fungi => &config.fungi_dir,
        }
    }
}

impl std::fmt::Display for Kingdom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
