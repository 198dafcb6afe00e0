//! 任务处理上下文
//!
//! 封装"我正在处理第几个任务、哪个样本"这一信息，只用于日志归属。

use std::fmt::Display;

/// 任务处理上下文
#[derive(Debug, Clone)]
pub struct TaskCtx {
    /// 样本ID
    pub sample_id: String,
    /// 任务在批次中的索引（从1开始，仅用于日志显示）
    pub task_index: usize,
    /// 任务总数
    pub total: usize,
}

impl TaskCtx {
    pub fn new(sample_id: String, task_index: usize, total: usize) -> Self {
        Self {
            sample_id,
            task_index,
            total,
        }
    }
}

impl Display for TaskCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[任务 {}/{} 样本 {}]", self.task_index, self.total, self.sample_id)
    }
}
