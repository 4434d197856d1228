// ==========================================
// 车队运营核心 - 自动排队提案
// ==========================================
// 职责: 充电/维保自动排队 (只产出提案, 不调用预订)
// 红线: 无候选车辆不报错, 返回空提案 + 解释性 summary
// ==========================================

use crate::domain::types::{ChargingStrategy, Urgency, VehicleStatus};
use crate::domain::{MaintenanceCategory, Vehicle};
use crate::engine::automation::AutomationEngine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::instrument;

// ==========================================
// 提案类型
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedVehicle {
    pub vehicle_id: String,
    pub soc: f64,
    pub priority: Urgency,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedVehicle {
    pub vehicle_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingQueueProposal {
    pub strategy: ChargingStrategy,
    pub soc_threshold: f64,
    pub dry_run: bool,
    pub queued: Vec<QueuedVehicle>,
    pub skipped: Vec<SkippedVehicle>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceJob {
    pub vehicle_id: String,
    pub job_type: String,
    pub priority: Urgency,
    pub category: MaintenanceCategory,
    pub risk_score: f64,
    pub estimated_start: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceQueueProposal {
    pub risk_threshold: f64,
    pub jobs: Vec<MaintenanceJob>,
    pub summary: String,
}

/// SOC 推导排队优先级
fn queue_priority(soc: f64) -> Urgency {
    if soc < 0.10 {
        Urgency::Critical
    } else if soc < 0.20 {
        Urgency::High
    } else if soc < 0.35 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

impl AutomationEngine {
    // ==========================================
    // 充电自动排队
    // ==========================================

    /// 充电自动排队提案
    ///
    /// 资格线: soc < soc_threshold; 充电中/维修中单独上报跳过。
    /// 排序按策略; 截断到 max_concurrent, 余量按超限原因上报跳过。
    ///
    /// 本操作不调用预订; dry_run=false 的提交由调用方走 schedule_vehicle。
    #[instrument(skip(self))]
    pub fn auto_queue_charging(
        &self,
        depot_filter: Option<&str>,
        city_filter: Option<&str>,
        strategy: ChargingStrategy,
        max_concurrent: usize,
        soc_threshold: f64,
        dry_run: bool,
    ) -> ChargingQueueProposal {
        let snapshot = self.snapshot();

        let candidates: Vec<&Vehicle> = snapshot
            .vehicles
            .iter()
            .filter(|v| depot_filter.map_or(true, |d| v.is_at_depot(d)))
            .filter(|v| city_filter.map_or(true, |c| v.city == c))
            .filter(|v| v.soc < soc_threshold)
            .collect();

        let mut skipped = Vec::new();
        let mut eligible = Vec::new();
        for vehicle in candidates {
            match vehicle.status {
                VehicleStatus::Charging => skipped.push(SkippedVehicle {
                    vehicle_id: vehicle.vehicle_id.clone(),
                    reason: "already charging".to_string(),
                }),
                VehicleStatus::Maintenance => skipped.push(SkippedVehicle {
                    vehicle_id: vehicle.vehicle_id.clone(),
                    reason: "already maintenance".to_string(),
                }),
                _ => eligible.push(vehicle),
            }
        }
        let eligible_count = eligible.len();

        // 策略排序 (稳定, 并列保持快照序)
        match strategy {
            ChargingStrategy::UrgentFirst | ChargingStrategy::OffPeak => {
                eligible.sort_by(|a, b| a.soc.partial_cmp(&b.soc).unwrap_or(Ordering::Equal));
            }
            ChargingStrategy::Balanced => {
                eligible.sort_by(|a, b| {
                    (a.soc + a.utilization_rate)
                        .partial_cmp(&(b.soc + b.utilization_rate))
                        .unwrap_or(Ordering::Equal)
                });
            }
            ChargingStrategy::RevenueOptimal => {
                eligible.sort_by(|a, b| {
                    b.revenue_per_day
                        .partial_cmp(&a.revenue_per_day)
                        .unwrap_or(Ordering::Equal)
                });
            }
        }

        // 并发上限截断
        let mut queued = Vec::new();
        for (i, vehicle) in eligible.iter().enumerate() {
            if i < max_concurrent {
                queued.push(QueuedVehicle {
                    vehicle_id: vehicle.vehicle_id.clone(),
                    soc: vehicle.soc,
                    priority: queue_priority(vehicle.soc),
                    reason: format!(
                        "SOC_BELOW_THRESHOLD: soc={:.2} < {:.2}",
                        vehicle.soc, soc_threshold
                    ),
                });
            } else {
                skipped.push(SkippedVehicle {
                    vehicle_id: vehicle.vehicle_id.clone(),
                    reason: format!("exceeds concurrent limit of {}", max_concurrent),
                });
            }
        }

        let summary = if eligible_count == 0 {
            format!("no vehicles below SOC threshold {:.2}", soc_threshold)
        } else {
            format!(
                "queued {} of {} eligible vehicles (strategy={})",
                queued.len(),
                eligible_count,
                strategy
            )
        };

        ChargingQueueProposal {
            strategy,
            soc_threshold,
            dry_run,
            queued,
            skipped,
            summary,
        }
    }

    // ==========================================
    // 维保自动排队
    // ==========================================

    /// 维保自动排队提案 (委托维保风险预测)
    ///
    /// 每条风险映射一个建议工单: job_type=MAINTENANCE, 优先级取风险档位,
    /// 预计开工时点为次日。
    #[instrument(skip(self))]
    pub fn auto_queue_maintenance(
        &self,
        risk_threshold: f64,
        category_filter: Option<MaintenanceCategory>,
        depot_filter: Option<&str>,
    ) -> MaintenanceQueueProposal {
        let now = self.clock().now();
        let result = self
            .predictor()
            .predict_maintenance_risks(risk_threshold, category_filter);

        // 可选场站交集
        let depot_vehicle_ids: Option<Vec<String>> = depot_filter.map(|depot| {
            self.store().read(|s| {
                s.vehicles_at_depot(depot)
                    .iter()
                    .map(|v| v.vehicle_id.clone())
                    .collect()
            })
        });

        let jobs: Vec<MaintenanceJob> = result
            .payload
            .iter()
            .filter(|risk| {
                depot_vehicle_ids
                    .as_ref()
                    .map_or(true, |ids| ids.contains(&risk.vehicle_id))
            })
            .map(|risk| MaintenanceJob {
                vehicle_id: risk.vehicle_id.clone(),
                job_type: "MAINTENANCE".to_string(),
                priority: risk.urgency,
                category: risk.category,
                risk_score: risk.risk_score,
                estimated_start: now + Duration::days(1),
            })
            .collect();

        let summary = if jobs.is_empty() {
            format!("no vehicles at or above risk threshold {:.2}", risk_threshold)
        } else {
            format!(
                "proposed {} maintenance jobs at risk >= {:.2}",
                jobs.len(),
                risk_threshold
            )
        };

        MaintenanceQueueProposal {
            risk_threshold,
            jobs,
            summary,
        }
    }
}
