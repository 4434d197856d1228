// ==========================================
// 车队运营核心 - 车队调车提案
// ==========================================
// 职责: 按场站利用率推荐调车方案 (只计算, 不执行)
// 利用率口径: 场站在场车辆数 / 车位容量
// ==========================================

use crate::domain::types::{SelectionCriteria, VehicleStatus};
use crate::domain::Vehicle;
use crate::engine::automation::{AutomationEngine, EvalSnapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::instrument;

/// 调车提案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalancePlan {
    pub feasible: bool,
    pub source_depot_id: Option<String>,
    pub target_depot_id: Option<String>,
    pub vehicle_ids: Vec<String>,
    pub criteria: SelectionCriteria,
    pub summary: String,
}

impl AutomationEngine {
    /// 车队调车提案
    ///
    /// 源/目标未指定时, 分别取利用率最高/最低的场站;
    /// 源与目标相同或任一缺失 → 不可行提案 (不报错)。
    /// 候选: 源场站空闲待命车辆, 按选择标准排序取前 vehicle_count 台。
    #[instrument(skip(self))]
    pub fn auto_rebalance_fleet(
        &self,
        source_depot: Option<&str>,
        target_depot: Option<&str>,
        vehicle_count: usize,
        criteria: SelectionCriteria,
    ) -> RebalancePlan {
        let snapshot = self.snapshot();

        let source = source_depot
            .map(|s| s.to_string())
            .or_else(|| self.pick_depot_by_utilization(&snapshot, true));
        let target = target_depot
            .map(|t| t.to_string())
            .or_else(|| self.pick_depot_by_utilization(&snapshot, false));

        let valid = match (&source, &target) {
            (Some(s), Some(t)) => {
                s != t
                    && snapshot.depots.iter().any(|d| &d.depot_id == s)
                    && snapshot.depots.iter().any(|d| &d.depot_id == t)
            }
            _ => false,
        };
        if !valid {
            return RebalancePlan {
                feasible: false,
                source_depot_id: source,
                target_depot_id: target,
                vehicle_ids: Vec::new(),
                criteria,
                summary: "unable to determine valid source and target".to_string(),
            };
        }
        let source = source.unwrap_or_default();
        let target = target.unwrap_or_default();

        // 候选: 源场站空闲待命车辆
        let mut candidates: Vec<&Vehicle> = snapshot
            .vehicles
            .iter()
            .filter(|v| v.is_at_depot(&source) && v.status == VehicleStatus::Idle)
            .collect();

        match criteria {
            SelectionCriteria::HighestSoc => {
                candidates.sort_by(|a, b| b.soc.partial_cmp(&a.soc).unwrap_or(Ordering::Equal));
            }
            SelectionCriteria::LowestUtilization => {
                candidates.sort_by(|a, b| {
                    a.utilization_rate
                        .partial_cmp(&b.utilization_rate)
                        .unwrap_or(Ordering::Equal)
                });
            }
            SelectionCriteria::OldestAtDepot => {
                // 里程作为驻场时长代理值
                candidates.sort_by(|a, b| {
                    b.mileage_km
                        .partial_cmp(&a.mileage_km)
                        .unwrap_or(Ordering::Equal)
                });
            }
        }

        let vehicle_ids: Vec<String> = candidates
            .iter()
            .take(vehicle_count)
            .map(|v| v.vehicle_id.clone())
            .collect();

        let summary = if vehicle_ids.is_empty() {
            format!("no idle vehicles available at source depot {}", source)
        } else {
            format!(
                "recommend moving {} vehicles from {} to {}",
                vehicle_ids.len(),
                source,
                target
            )
        };

        RebalancePlan {
            feasible: true,
            source_depot_id: Some(source),
            target_depot_id: Some(target),
            vehicle_ids,
            criteria,
            summary,
        }
    }

    /// 按利用率挑选场站 (most=true 取最高, 否则最低); 容量为 0 的场站不参选
    fn pick_depot_by_utilization(&self, snapshot: &EvalSnapshot, most: bool) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;
        for depot in &snapshot.depots {
            if depot.vehicle_capacity == 0 {
                continue;
            }
            let count = snapshot
                .vehicles
                .iter()
                .filter(|v| v.is_at_depot(&depot.depot_id))
                .count();
            let utilization = count as f64 / depot.vehicle_capacity as f64;
            let better = match best {
                None => true,
                Some((_, current)) => {
                    if most {
                        utilization > current
                    } else {
                        utilization < current
                    }
                }
            };
            if better {
                best = Some((depot.depot_id.as_str(), utilization));
            }
        }
        best.map(|(id, _)| id.to_string())
    }
}
