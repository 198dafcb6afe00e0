//! 模型引擎层
//!
//! 群落代谢模型的构建 / 持久化 / 模拟。对流程层只暴露文件级契约：
//! (taxonomy 子集, 培养基) → 制品文件；(制品, fraction, 容差) → 结果表。
//!
//! ## 模块划分
//!
//! - `species` - 物种 GSMM 文件（JSON）
//! - `community` - 群落模型：构建 / 序列化 / 反序列化
//! - `solver` - 协作 tradeoff 模拟

pub mod community;
pub mod solver;
pub mod species;

pub use community::{CommunityModel, Taxon};
pub use solver::{cooperative_tradeoff, Solution, Tolerances, MEDIUM_TAXON};
pub use species::SpeciesModel;
