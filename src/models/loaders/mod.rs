//! 输入表格加载器
//!
//! - `taxonomy_loader` - 丰度表：阈值过滤 + Kingdom 路径解析
//! - `medium_loader` - 培养基表：reaction → flux 只读映射

pub mod medium_loader;
pub mod taxonomy_loader;

pub use medium_loader::load_medium;
pub use taxonomy_loader::load_taxonomy;
