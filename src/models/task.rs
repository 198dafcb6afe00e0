//! 任务描述符与任务结果
//!
//! 每个任务描述符由 TaskBuilder 创建一次、由对应 Flow 消费一次，创建后不再修改。
//! 任务函数永远返回 TaskResult，错误绝不跨越工作池边界。

use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::TaskError;
use crate::models::medium::Medium;
use crate::models::table::DataTable;
use crate::models::taxonomy::AbundanceRow;

/// 模型制品扩展名
pub const ARTIFACT_EXT: &str = "json";

/// 构建任务：一个样本的群落模型构建
#[derive(Debug, Clone)]
pub struct BuildTask {
    /// 样本ID
    pub sample_id: String,
    /// 属于该样本的 taxonomy 行
    pub rows: Vec<AbundanceRow>,
    /// 共享只读培养基
    pub medium: Arc<Medium>,
    /// 确定性输出路径：{out_dir}/{sample_id}_{config_label}.json
    pub out_path: PathBuf,
}

/// 模型制品身份：{sample}_{condition}.json
///
/// 从文件名恢复时必须通过正则校验，不符合约定的文件名显式拒绝。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactId {
    /// 样本ID
    pub sample: String,
    /// 构建条件标签（构建时的 config_label）
    pub condition: String,
}

impl ArtifactId {
    /// 从制品文件名解析身份
    pub fn parse(file_name: &str) -> Result<Self, TaskError> {
        // 样本和条件都不允许包含 '_'，否则身份无法唯一恢复
        let pattern = Regex::new(r"^([^_]+)_([^_]+)\.json$").expect("制品文件名正则无效");
        let caps = pattern
            .captures(file_name)
            .ok_or_else(|| TaskError::ArtifactNameInvalid {
                file_name: file_name.to_string(),
            })?;
        Ok(Self {
            sample: caps[1].to_string(),
            condition: caps[2].to_string(),
        })
    }

    /// 生成制品文件名
    pub fn file_name(&self) -> String {
        format!("{}_{}.{}", self.sample, self.condition, ARTIFACT_EXT)
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.sample, self.condition)
    }
}

/// 分析任务：一个制品 × 一个 tradeoff 分数
#[derive(Debug, Clone)]
pub struct TradeoffTask {
    /// 制品身份（从文件名校验恢复）
    pub id: ArtifactId,
    /// 制品文件路径
    pub artifact_path: PathBuf,
    /// tradeoff 分数
    pub fraction: f64,
}

/// 构建任务的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// 新构建并持久化
    Built,
    /// 制品已存在，跳过（幂等恢复）
    Skipped,
    /// 构建失败（原因已截断）
    Failed { cause: String },
}

/// 分析任务的结果表格
#[derive(Debug, Clone)]
pub struct SampleTables {
    /// 每物种生长速率/丰度表（含 community 汇总行）
    pub rates: DataTable,
    /// 全反应通量表
    pub fluxes: DataTable,
}

/// 分析任务的结果
#[derive(Debug, Clone)]
pub enum TradeoffOutcome {
    /// 模拟成功
    Success(SampleTables),
    /// 模拟失败（原因已截断）
    Failed { cause: String },
}
