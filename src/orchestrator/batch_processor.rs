//! 批量样本处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量任务的调度和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建输出目录（失败是致命的，直接中止）
//! 2. **任务加载**：taxonomy/培养基 → 构建任务；制品目录 → 分析任务
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将任务分批次处理，每批完成后再开始下一批
//! 5. **结果对齐**：按提交顺序收集结果，结果与任务按索引一一对应
//! 6. **全局统计**：汇总所有样本的处理结果
//!
//! ## 失败语义
//!
//! 任务函数只返回结果值，不抛错；工作任务 panic（JoinError）只损失
//! 该任务（记为 None，由聚合器报告缺失），批次继续。

use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::ConfigError;
use crate::models::loaders::{load_medium, load_taxonomy};
use crate::orchestrator::aggregator;
use crate::orchestrator::task_builder;
use crate::workflow::{run_build_task, run_tradeoff_task, TaskCtx};

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 构建群落模型制品
    Build,
    /// 对制品运行 tradeoff 模拟并聚合
    Tradeoff,
}

impl Mode {
    /// 从命令行参数解析运行模式
    pub fn from_arg(arg: Option<&str>) -> Result<Self, ConfigError> {
        match arg {
            None | Some("build") => Ok(Mode::Build),
            Some("tradeoff") => Ok(Mode::Tradeoff),
            Some(other) => Err(ConfigError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    ///
    /// 输出目录创建失败是致命错误：没有输出目录任何任务都无法进行。
    pub fn initialize(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.out_dir)
            .with_context(|| format!("无法创建制品输出目录: {}", config.out_dir))?;
        fs::create_dir_all(&config.results_dir)
            .with_context(|| format!("无法创建结果目录: {}", config.results_dir))?;

        log_startup(&config);
        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, mode: Mode) -> Result<()> {
        match mode {
            Mode::Build => self.run_build().await,
            Mode::Tradeoff => self.run_tradeoff().await,
        }
    }

    /// 构建管线：taxonomy → 每样本一个构建任务 → 制品文件
    async fn run_build(&self) -> Result<()> {
        let taxonomy = load_taxonomy(&self.config.taxonomy_file, &self.config)?;
        let medium = Arc::new(load_medium(&self.config.medium_file)?);

        let tasks = task_builder::build_tasks(&taxonomy, medium, &self.config);
        if tasks.is_empty() {
            warn!("⚠️ 没有可构建的样本，程序结束");
            return Ok(());
        }

        let total = tasks.len();
        let paired: Vec<(TaskCtx, _)> = tasks
            .into_iter()
            .enumerate()
            .map(|(i, t)| (TaskCtx::new(t.sample_id.clone(), i + 1, total), t))
            .collect();

        let results = run_pool(
            &paired,
            self.config.max_concurrent_samples,
            |task, ctx| run_build_task(task, ctx),
        )
        .await?;

        let stats = aggregator::summarize_build(&paired, &results);
        log_final_stats(stats.succeeded(), stats.failed, stats.total);
        Ok(())
    }

    /// 分析管线：制品 × fraction → 模拟 → 聚合表
    async fn run_tradeoff(&self) -> Result<()> {
        let start = Instant::now();

        let tasks = task_builder::tradeoff_tasks(&self.config)?;
        if tasks.is_empty() {
            warn!("⚠️ 制品目录中没有可分析的模型，程序结束");
            return Ok(());
        }

        let total = tasks.len();
        let paired: Vec<(TaskCtx, _)> = tasks
            .into_iter()
            .enumerate()
            .map(|(i, t)| (TaskCtx::new(t.id.sample.clone(), i + 1, total), t))
            .collect();

        let results = run_pool(
            &paired,
            self.config.max_concurrent_samples,
            |task, ctx| run_tradeoff_task(task, ctx),
        )
        .await?;

        let stats = aggregator::aggregate_tradeoff(&paired, results, &self.config)?;
        log_final_stats(stats.success, stats.failed, stats.total);

        info!("⏱️ 总耗时: {:.2}s", start.elapsed().as_secs_f64());
        Ok(())
    }
}

/// 有界工作池：对任务序列并行执行纯任务函数
///
/// 契约：
/// - 最多 `max_concurrent` 个任务同时在执行
/// - 返回值与输入按索引一一对应（按提交顺序收集，与完成顺序无关）
/// - 任务函数返回结果值而不是错误；panic 的任务记为 None，批次继续
pub async fn run_pool<T, R, F>(
    tasks: &[(TaskCtx, T)],
    max_concurrent: usize,
    task_fn: F,
) -> Result<Vec<Option<R>>>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(&T, &TaskCtx) -> R + Send + Sync + Clone + 'static,
{
    let max_concurrent = max_concurrent.max(1);
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let total = tasks.len();
    let total_batches = (total + max_concurrent - 1) / max_concurrent;
    let mut results = Vec::with_capacity(total);

    // 分批处理：每批完成后再开始下一批
    for batch_start in (0..total).step_by(max_concurrent) {
        let batch_end = (batch_start + max_concurrent).min(total);
        let batch_num = batch_start / max_concurrent + 1;
        log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total);

        let mut handles = Vec::new();
        for (ctx, task) in &tasks[batch_start..batch_end] {
            let permit = semaphore.clone().acquire_owned().await?;
            let task = task.clone();
            let task_ctx = ctx.clone();
            let f = task_fn.clone();

            // 任务是 CPU/文件密集型，放到阻塞线程池执行
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                f(&task, &task_ctx)
            });
            handles.push((ctx.clone(), handle));
        }

        // 按提交顺序等待，保证结果与任务按索引对应
        for (ctx, handle) in handles {
            match handle.await {
                Ok(result) => results.push(Some(result)),
                Err(e) => {
                    error!("{} ❌ 工作任务执行失败: {}", ctx, e);
                    results.push(None);
                }
            }
        }

        log_batch_complete(batch_num, batch_end - batch_start);
    }

    Ok(results)
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 群落模型批处理模式");
    info!("📊 最大并发数: {}", config.max_concurrent_samples);
    info!("📁 制品目录: {}", config.out_dir);
    info!("📁 结果目录: {}", config.results_dir);
    if config.verbose_logging {
        info!("📄 taxonomy表: {}", config.taxonomy_file);
        info!("📄 培养基表: {}", config.medium_file);
        info!("📐 丰度阈值: {}", config.abundance_threshold);
        info!("🔖 配置标签: {}", config.config_label());
        info!("🔖 tradeoff分数: {:?}", config.tradeoffs);
    }
    info!("{}", "=".repeat(60));
}

fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批任务: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(batch_num: usize, done: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: {} 个任务", batch_num, done);
    info!("{}", "─".repeat(60));
}

fn log_final_stats(success: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}
