//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `task_builder` - 任务构建器
//! - taxonomy 按样本分组 → 构建任务
//! - 扫描制品目录 × tradeoff 分数 → 分析任务（文件名正则校验）
//!
//! ### `batch_processor` - 批量样本处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 控制并发数量（Semaphore + 分批）
//! - 结果按提交顺序收集，与任务按索引对应
//!
//! ### `aggregator` - 结果聚合器
//! - 成功/失败分拣，逐失败告警
//! - 列并集拼接，带日期的确定性持久化
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Task>)
//!     ↓
//! workflow::build_flow / tradeoff_flow (处理单个 Task)
//!     ↓
//! engine (群落模型构建 / 模拟)
//!     ↓
//! models (taxonomy / medium / table)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：task_builder 管任务构造，batch_processor 管调度，aggregator 管汇总
//! 2. **失败隔离**：单个样本的失败不会中止批次
//! 3. **无业务逻辑**：只做调度和统计，不做模型层面的判断

pub mod aggregator;
pub mod batch_processor;
pub mod task_builder;

// 重新导出主要类型
pub use aggregator::{BuildStats, TradeoffStats};
pub use batch_processor::{run_pool, App, Mode};
pub use task_builder::{build_tasks, tradeoff_tasks};
