//! 培养基表加载器
//!
//! 读取 reaction → flux 的 CSV，加载一次，之后只读共享。

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::Path;
use tracing::info;

use crate::error::DataError;
use crate::models::medium::Medium;

/// CSV 原始记录
#[derive(Debug, serde::Deserialize)]
struct RawRecord {
    reaction: String,
    flux: f64,
}

/// 加载培养基表
pub fn load_medium(path: &str) -> Result<Medium> {
    if !Path::new(path).exists() {
        anyhow::bail!(DataError::TableNotFound {
            path: path.to_string()
        });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::CsvReadFailed {
        path: path.to_string(),
        source: e,
    })?;

    let mut fluxes = IndexMap::new();
    for record in reader.deserialize() {
        let record: RawRecord =
            record.with_context(|| format!("培养基表解析失败: {}", path))?;
        fluxes.insert(record.reaction, record.flux);
    }

    info!("✓ 培养基加载完成: {} 个交换反应", fluxes.len());
    Ok(Medium::new(fluxes))
}
