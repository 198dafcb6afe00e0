//! 应用程序错误类型
//!
//! 按层划分错误：数据层 / 引擎层 / 任务层 / 配置层。
//! 单个样本的错误只会变成 TaskResult::Failure，绝不跨越线程池边界。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据读取/解析错误
    #[error("数据错误: {0}")]
    Data(#[from] DataError),
    /// 模型引擎错误
    #[error("引擎错误: {0}")]
    Engine(#[from] EngineError),
    /// 任务级错误
    #[error("任务错误: {0}")]
    Task(#[from] TaskError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 数据读取/解析错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 表格文件不存在
    #[error("表格文件不存在: {path}")]
    TableNotFound { path: String },
    /// CSV 读取失败
    #[error("CSV读取失败 ({path}): {source}")]
    CsvReadFailed {
        path: String,
        #[source]
        source: csv::Error,
    },
    /// 未识别的 Kingdom 分类
    #[error("未识别的Kingdom分类: {kingdom} (样本: {sample_id}, 物种: {species_id})")]
    UnknownKingdom {
        kingdom: String,
        sample_id: String,
        species_id: String,
    },
    /// 模型文件引用字段为空或格式错误
    #[error("模型文件引用字段无效 (样本: {sample_id}, 物种: {species_id})")]
    MalformedFileField {
        sample_id: String,
        species_id: String,
    },
}

/// 模型引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    /// 物种模型文件读取失败
    #[error("物种模型文件读取失败 ({path}): {reason}")]
    SpeciesModelLoadFailed { path: String, reason: String },
    /// 模型制品读取/解析失败
    #[error("模型制品无效 ({path}): {reason}")]
    ArtifactInvalid { path: String, reason: String },
    /// 模型制品写入失败
    #[error("模型制品写入失败 ({path}): {reason}")]
    ArtifactWriteFailed { path: String, reason: String },
    /// 优化不可行（空群落或空培养基）
    #[error("优化不可行 (模型: {model_id}): {reason}")]
    Infeasible { model_id: String, reason: String },
}

/// 任务级错误
#[derive(Debug, Error)]
pub enum TaskError {
    /// 制品文件名不符合 {sample}_{condition}.json 约定
    #[error("制品文件名不符合命名约定: {file_name}")]
    ArtifactNameInvalid { file_name: String },
    /// 任务的物种列表为空
    #[error("样本 {sample_id} 没有可用的物种行")]
    EmptyTaxonomySubset { sample_id: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未知的运行模式
    #[error("未知的运行模式: {mode} (支持 build / tradeoff)")]
    UnknownMode { mode: String },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
