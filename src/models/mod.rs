//! 数据模型层
//!
//! ## 模块划分
//!
//! - `kingdom` - Kingdom 分类枚举（分类 → 模型库目录）
//! - `taxonomy` - 丰度表数据模型（AbundanceRow / Taxonomy）
//! - `medium` - 培养基只读映射
//! - `table` - 结果表格（列并集拼接 / NA 填充 / CSV 输出）
//! - `task` - 任务描述符与任务结果
//! - `loaders` - CSV 加载器

pub mod kingdom;
pub mod loaders;
pub mod medium;
pub mod table;
pub mod task;
pub mod taxonomy;

// 重新导出常用类型
pub use kingdom::Kingdom;
pub use loaders::{load_medium, load_taxonomy};
pub use medium::Medium;
pub use table::DataTable;
pub use task::{ArtifactId, BuildOutcome, BuildTask, SampleTables, TradeoffOutcome, TradeoffTask};
pub use taxonomy::{AbundanceRow, Taxonomy};
