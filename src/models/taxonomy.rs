//! Taxonomy 数据模型
//!
//! 每行是一个（样本, 物种）的丰度记录，文件引用已解析为绝对路径。
//! 加载后不可变，所有工作任务只读共享。

use indexmap::IndexMap;
use std::path::PathBuf;

use crate::models::kingdom::Kingdom;

/// 单条丰度记录
///
/// 不变量：relative_abundance 严格大于配置阈值；file_paths 非空。
/// 路径是否存在于磁盘上不在此处校验，缺失文件在构建阶段作为单样本失败浮现。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AbundanceRow {
    /// 样本ID
    pub sample_id: String,
    /// 物种ID
    pub species_id: String,
    /// Kingdom 分类
    pub kingdom: Kingdom,
    /// 相对丰度
    pub relative_abundance: f64,
    /// 解析后的模型文件绝对路径（原始字段以 '|' 分隔）
    pub file_paths: Vec<PathBuf>,
}

/// 整张 taxonomy 表
///
/// 每次运行构建一次，之后不再修改。
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    pub rows: Vec<AbundanceRow>,
}

impl Taxonomy {
    pub fn new(rows: Vec<AbundanceRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按 sample_id 稳定分组
    ///
    /// 每个唯一样本一组，组顺序为首次出现顺序，组内保持行顺序。
    pub fn group_by_sample(&self) -> IndexMap<String, Vec<AbundanceRow>> {
        let mut groups: IndexMap<String, Vec<AbundanceRow>> = IndexMap::new();
        for row in &self.rows {
            groups
                .entry(row.sample_id.clone())
                .or_default()
                .push(row.clone());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sample: &str, species: &str) -> AbundanceRow {
        AbundanceRow {
            sample_id: sample.to_string(),
            species_id: species.to_string(),
            kingdom: Kingdom::Bacteria,
            relative_abundance: 0.1,
            file_paths: vec![PathBuf::from("/models/a.json")],
        }
    }

    #[test]
    fn test_group_by_sample_stable_order() {
        let tax = Taxonomy::new(vec![
            row("S2", "sp1"),
            row("S1", "sp2"),
            row("S2", "sp3"),
        ]);

        let groups = tax.group_by_sample();
        let keys: Vec<&String> = groups.keys().collect();

        // 首次出现顺序：S2 在 S1 之前
        assert_eq!(keys, vec!["S2", "S1"]);
        assert_eq!(groups["S2"].len(), 2);
        assert_eq!(groups["S1"].len(), 1);
        // 组内保持行顺序
        assert_eq!(groups["S2"][0].species_id, "sp1");
        assert_eq!(groups["S2"][1].species_id, "sp3");
    }
}
