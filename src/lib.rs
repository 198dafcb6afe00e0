//! # GSMM Batch
//!
//! 一个批量构建微生物群落代谢模型并运行 tradeoff 模拟的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - taxonomy / 培养基 / 结果表格 / 任务描述符
//! - 加载一次后只读共享，工作任务之间没有共享可变状态
//!
//! ### ② 引擎层（Engine）
//! - `engine/` - 群落模型的构建、序列化和 tradeoff 模拟
//! - 对上层只暴露文件级契约，制品存在即是断点续跑的信号
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个样本任务"的完整处理流程
//! - `build_flow` - 构建状态机（CHECK_EXISTING → SKIP | BUILD → PERSIST）
//! - `tradeoff_flow` - 模拟流程（加载 → 重同步 → 求解 → 打标记）
//! - 失败全部转成结果值，绝不跨越工作池边界
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/task_builder` - 任务构造（分组 / 扫描 / 校验）
//! - `orchestrator/batch_processor` - 有界工作池，分批调度
//! - `orchestrator/aggregator` - 结果分拣、列并集拼接、带日期持久化

pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    ArtifactId, BuildOutcome, BuildTask, DataTable, Kingdom, Medium, SampleTables, Taxonomy,
    TradeoffOutcome, TradeoffTask,
};
pub use orchestrator::{App, Mode};
pub use workflow::{run_build_task, run_tradeoff_task, TaskCtx};
