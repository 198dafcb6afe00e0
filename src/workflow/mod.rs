//! 流程层（Workflow Layer）
//!
//! 定义"一个样本任务"的完整处理流程。两个变体：
//!
//! - `build_flow` - 构建变体：CHECK_EXISTING → SKIP | BUILD → PERSIST
//! - `tradeoff_flow` - 分析变体：加载制品 → 重同步 → 模拟 → 打标记
//!
//! ## 设计原则
//!
//! 1. 流程函数永远返回结果值（Outcome），错误绝不跨越工作池边界
//! 2. 不持有共享可变状态，输入只读、输出路径互不重叠
//! 3. 失败只影响本样本，批次继续

pub mod build_flow;
pub mod task_ctx;
pub mod tradeoff_flow;

pub use build_flow::run_build_task;
pub use task_ctx::TaskCtx;
pub use tradeoff_flow::run_tradeoff_task;
