// ==========================================
// 车队运营核心 - 触发器匹配
// ==========================================
// 职责: 按触发器类型从评估快照筛出命中车辆
// prediction_confidence 委托风险预测引擎
// ==========================================

use crate::domain::types::{ResourceStatus, VehicleStatus};
use crate::domain::{PredictionKind, RuleTrigger, ThresholdDirection};
use crate::engine::automation::{AutomationEngine, EvalSnapshot};
use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};

impl AutomationEngine {
    /// 触发器匹配, 返回命中车辆ID (快照序)
    pub(crate) fn match_trigger(
        &self,
        trigger: &RuleTrigger,
        last_triggered_at: Option<DateTime<Utc>>,
        snapshot: &EvalSnapshot,
    ) -> Result<Vec<String>> {
        let matched = match trigger {
            RuleTrigger::SocThreshold {
                threshold,
                direction,
            } => snapshot
                .vehicles
                .iter()
                .filter(|v| match direction {
                    ThresholdDirection::Below => v.soc < *threshold,
                    ThresholdDirection::Above => v.soc > *threshold,
                })
                .map(|v| v.vehicle_id.clone())
                .collect(),

            RuleTrigger::MaintenanceDue { within_days } => {
                let today = self.clock().today();
                snapshot
                    .vehicles
                    .iter()
                    .filter(|v| {
                        v.next_maintenance_date
                            .map_or(false, |d| (d - today).num_days() <= *within_days)
                    })
                    .map(|v| v.vehicle_id.clone())
                    .collect()
            }

            RuleTrigger::PredictionConfidence {
                prediction,
                min_confidence,
            } => self.match_prediction_confidence(*prediction, *min_confidence),

            RuleTrigger::VehicleIdle => snapshot
                .vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Idle)
                .map(|v| v.vehicle_id.clone())
                .collect(),

            RuleTrigger::DepotCapacity {
                depot_id,
                threshold,
            } => self.match_depot_capacity(depot_id.as_deref(), *threshold, snapshot)?,

            RuleTrigger::Schedule { interval_minutes } => {
                let now = self.clock().now();
                let due = match last_triggered_at {
                    None => true,
                    Some(last) => now - last >= Duration::minutes(*interval_minutes),
                };
                if due {
                    snapshot
                        .vehicles
                        .iter()
                        .map(|v| v.vehicle_id.clone())
                        .collect()
                } else {
                    Vec::new()
                }
            }

            RuleTrigger::IncidentCreated => self.pending_incident_ids(),
            RuleTrigger::AnomalyDetected => self.pending_anomaly_ids(),
        };
        Ok(matched)
    }

    /// prediction_confidence: 预测整体置信度达标时, 命中预测负载中的全部车辆
    fn match_prediction_confidence(
        &self,
        prediction: PredictionKind,
        min_confidence: f64,
    ) -> Vec<String> {
        let soc_threshold = self.config().queue_soc_threshold;
        match prediction {
            PredictionKind::Charging => {
                let result = self
                    .predictor()
                    .predict_charging_needs(24.0, soc_threshold, None, None);
                if result.confidence >= min_confidence {
                    result
                        .payload
                        .iter()
                        .map(|n| n.vehicle_id.clone())
                        .collect()
                } else {
                    Vec::new()
                }
            }
            PredictionKind::Maintenance => {
                let result = self.predictor().predict_maintenance_risks(0.4, None);
                if result.confidence >= min_confidence {
                    result
                        .payload
                        .iter()
                        .map(|r| r.vehicle_id.clone())
                        .collect()
                } else {
                    Vec::new()
                }
            }
            PredictionKind::Incident => {
                let result = self.predictor().predict_incident_likelihood(None);
                if result.confidence >= min_confidence {
                    result
                        .payload
                        .iter()
                        .map(|r| r.vehicle_id.clone())
                        .collect()
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// depot_capacity: 资源占用率达标的场站, 命中该场站全部车辆
    fn match_depot_capacity(
        &self,
        depot_id: Option<&str>,
        threshold: f64,
        snapshot: &EvalSnapshot,
    ) -> Result<Vec<String>> {
        let candidate_depots: Vec<&str> = match depot_id {
            Some(id) => {
                if !snapshot.depots.iter().any(|d| d.depot_id == id) {
                    bail!("DEPOT_NOT_FOUND: {}", id);
                }
                vec![id]
            }
            None => snapshot.depots.iter().map(|d| d.depot_id.as_str()).collect(),
        };

        let mut matched = Vec::new();
        for depot in candidate_depots {
            let resources: Vec<_> = snapshot
                .resources
                .iter()
                .filter(|r| r.depot_id == depot)
                .collect();
            if resources.is_empty() {
                continue;
            }
            let occupied = resources
                .iter()
                .filter(|r| r.status != ResourceStatus::Available)
                .count();
            let occupancy = occupied as f64 / resources.len() as f64;
            if occupancy >= threshold {
                matched.extend(
                    snapshot
                        .vehicles
                        .iter()
                        .filter(|v| v.is_at_depot(depot))
                        .map(|v| v.vehicle_id.clone()),
                );
            }
        }
        Ok(matched)
    }
}
