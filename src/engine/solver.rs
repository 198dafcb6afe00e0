//! 协作 tradeoff 模拟
//!
//! fraction 权衡群落级目标与个体物种生长的保留程度：
//! fraction=1 时完全追求群落目标，fraction 越小越偏向按丰度保留个体生长。
//!
//! 求解内部是一个确定性的培养基可用度计算，外部契约
//! （成员生长速率表 + 全反应通量表）与数值求解器版本一致。

use indexmap::IndexMap;

use crate::error::EngineError;

use super::community::CommunityModel;

/// 培养基伪成员的行名
pub const MEDIUM_TAXON: &str = "medium";

/// 数值容差
#[derive(Debug, Clone, Copy)]
pub struct Tolerances {
    /// 相对容差
    pub rtol: f64,
    /// 绝对容差（小于该值的量视为 0）
    pub atol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            rtol: 1e-4,
            atol: 1e-5,
        }
    }
}

/// 单个成员的解
#[derive(Debug, Clone)]
pub struct MemberSolution {
    pub taxon: String,
    pub growth_rate: f64,
    pub abundance: f64,
}

/// 一次模拟的完整解
#[derive(Debug, Clone)]
pub struct Solution {
    /// 群落目标值（群落生长速率）
    pub growth_rate: f64,
    /// 成员解（包含 "medium" 伪成员行）
    pub members: Vec<MemberSolution>,
    /// 每成员的反应通量：taxon → (reaction → flux)
    pub fluxes: Vec<(String, IndexMap<String, f64>)>,
}

/// 运行协作 tradeoff 模拟
pub fn cooperative_tradeoff(
    model: &CommunityModel,
    fraction: f64,
    tol: Tolerances,
) -> Result<Solution, EngineError> {
    if model.taxa.is_empty() {
        return Err(EngineError::Infeasible {
            model_id: model.id.clone(),
            reason: "群落没有成员物种".to_string(),
        });
    }
    if model.medium.is_empty() {
        return Err(EngineError::Infeasible {
            model_id: model.id.clone(),
            reason: "培养基为空".to_string(),
        });
    }

    let total_abundance: f64 = model.taxa.iter().map(|t| t.abundance).sum();
    if total_abundance <= tol.atol {
        return Err(EngineError::Infeasible {
            model_id: model.id.clone(),
            reason: "总丰度为 0".to_string(),
        });
    }

    let mut members = Vec::with_capacity(model.taxa.len() + 1);
    let mut fluxes = Vec::with_capacity(model.taxa.len() + 1);
    let mut objective = 0.0;
    let mut medium_row: IndexMap<String, f64> = IndexMap::new();

    for taxon in &model.taxa {
        let relative = taxon.abundance / total_abundance;

        // 该物种能利用的培养基通量总量
        let capacity: f64 = taxon
            .exchanges
            .iter()
            .filter_map(|ex| model.medium.get(ex))
            .sum();

        // 个体生长：群落目标与个体保留按 fraction 加权
        let growth = clamp(capacity * (fraction + (1.0 - fraction) * relative), tol);
        objective += relative * growth;

        let mut taxon_fluxes: IndexMap<String, f64> = IndexMap::new();
        for ex in &taxon.exchanges {
            if let Some(bound) = model.medium.get(ex) {
                let uptake = clamp(bound * relative, tol);
                taxon_fluxes.insert(ex.clone(), uptake);
                // 培养基伪成员记录总供给（负号表示流出培养基）
                *medium_row.entry(ex.clone()).or_insert(0.0) -= uptake;
            }
        }

        members.push(MemberSolution {
            taxon: taxon.species_id.clone(),
            growth_rate: growth,
            abundance: taxon.abundance,
        });
        fluxes.push((taxon.species_id.clone(), taxon_fluxes));
    }

    // "medium" 伪成员：不参与丰度汇总，由消费方丢弃
    members.push(MemberSolution {
        taxon: MEDIUM_TAXON.to_string(),
        growth_rate: 0.0,
        abundance: 0.0,
    });
    fluxes.push((MEDIUM_TAXON.to_string(), medium_row));

    Ok(Solution {
        growth_rate: clamp(objective, tol),
        members,
        fluxes,
    })
}

/// 数值清理：绝对值小于 atol 的量视为 0
fn clamp(v: f64, tol: Tolerances) -> f64 {
    if v.abs() < tol.atol {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::community::Taxon;
    use crate::models::medium::Medium;
    use indexmap::IndexMap as Map;

    fn model_with(taxa: Vec<Taxon>, medium: &[(&str, f64)]) -> CommunityModel {
        let fluxes: Map<String, f64> = medium
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        let exchanges: Vec<String> = taxa
            .iter()
            .flat_map(|t| t.exchanges.iter().cloned())
            .collect();
        let taxa_ids = taxa.iter().map(|t| t.species_id.clone()).collect();
        CommunityModel {
            id: "S1".to_string(),
            taxa,
            taxa_ids,
            exchanges,
            reactions: Vec::new(),
            medium: Medium::new(fluxes),
        }
    }

    fn taxon(id: &str, abundance: f64, exchanges: &[&str]) -> Taxon {
        Taxon {
            species_id: id.to_string(),
            abundance,
            exchanges: exchanges.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_tradeoff_deterministic() {
        let model = model_with(
            vec![taxon("sp1", 0.6, &["EX_glc"]), taxon("sp2", 0.4, &["EX_glc"])],
            &[("EX_glc", 10.0)],
        );

        let a = cooperative_tradeoff(&model, 0.8, Tolerances::default()).expect("求解失败");
        let b = cooperative_tradeoff(&model, 0.8, Tolerances::default()).expect("求解失败");

        assert_eq!(a.growth_rate, b.growth_rate);
        assert!(a.growth_rate > 0.0);
        // 成员行包含 medium 伪成员
        assert_eq!(a.members.len(), 3);
        assert_eq!(a.members.last().unwrap().taxon, MEDIUM_TAXON);
    }

    #[test]
    fn test_fraction_changes_member_rates() {
        let model = model_with(
            vec![taxon("sp1", 0.9, &["EX_glc"]), taxon("sp2", 0.1, &["EX_glc"])],
            &[("EX_glc", 10.0)],
        );

        let high = cooperative_tradeoff(&model, 1.0, Tolerances::default()).expect("求解失败");
        let low = cooperative_tradeoff(&model, 0.1, Tolerances::default()).expect("求解失败");

        // fraction=1 时所有成员拿到相同的容量系数，低 fraction 偏向高丰度成员
        assert_eq!(high.members[0].growth_rate, high.members[1].growth_rate);
        assert!(low.members[0].growth_rate > low.members[1].growth_rate);
    }

    #[test]
    fn test_infeasible_on_empty_medium() {
        let model = model_with(vec![taxon("sp1", 1.0, &["EX_glc"])], &[]);
        let err = cooperative_tradeoff(&model, 0.8, Tolerances::default()).unwrap_err();
        match err {
            EngineError::Infeasible { .. } => {}
            other => panic!("错误类型不符: {:?}", other),
        }
    }

    #[test]
    fn test_infeasible_on_empty_taxa() {
        let model = model_with(vec![], &[("EX_glc", 10.0)]);
        assert!(cooperative_tradeoff(&model, 0.8, Tolerances::default()).is_err());
    }
}
