//! 培养基（Medium）数据模型
//!
//! 交换反应ID → 通量上界的只读映射，加载一次后通过 Arc 在所有工作任务间共享。

use indexmap::IndexMap;

/// 培养基：交换反应ID → 通量上界
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Medium {
    fluxes: IndexMap<String, f64>,
}

impl Medium {
    pub fn new(fluxes: IndexMap<String, f64>) -> Self {
        Self { fluxes }
    }

    pub fn len(&self) -> usize {
        self.fluxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluxes.is_empty()
    }

    pub fn get(&self, reaction_id: &str) -> Option<f64> {
        self.fluxes.get(reaction_id).copied()
    }

    pub fn contains(&self, reaction_id: &str) -> bool {
        self.fluxes.contains_key(reaction_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, f64)> {
        self.fluxes.iter().map(|(k, v)| (k, *v))
    }

    pub fn reaction_ids(&self) -> impl Iterator<Item = &String> {
        self.fluxes.keys()
    }

    /// 与模型交换反应集合求交集
    ///
    /// 只保留反应ID存在于 `exchange_ids` 中的条目，其余静默丢弃
    /// （每个群落模型的反应集合不同，丢弃是预期行为）。
    /// 返回 (过滤后的培养基, 匹配条数)。
    pub fn intersect(&self, exchange_ids: &[String]) -> (Medium, usize) {
        let filtered: IndexMap<String, f64> = self
            .fluxes
            .iter()
            .filter(|(id, _)| exchange_ids.iter().any(|ex| ex == *id))
            .map(|(id, flux)| (id.clone(), *flux))
            .collect();
        let matched = filtered.len();
        (Medium { fluxes: filtered }, matched)
    }
}
