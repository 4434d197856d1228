// ==========================================
// 车队运营核心 - 维保风险预测
// ==========================================
// 职责: 四项子评分加权合成维保风险, 推导类别与故障窗口
// 权重: 里程 0.25 / 发动机小时 0.15 / 保养到期 0.35 / 运营负荷 0.25
// ==========================================

use crate::domain::types::Urgency;
use crate::domain::{
    FactorPolarity, MaintenanceCategory, MaintenanceRisk, PredictionFactor, PredictionResult,
    Vehicle,
};
use crate::engine::predictor::RiskPredictor;
use chrono::Duration;
use tracing::instrument;

// 子评分权重
const WEIGHT_MILEAGE: f64 = 0.25;
const WEIGHT_ENGINE_HOURS: f64 = 0.15;
const WEIGHT_MAINTENANCE_DUE: f64 = 0.35;
const WEIGHT_OPERATIONAL: f64 = 0.25;

/// 里程子评分: 2万/4万/6万/8万 台阶
fn mileage_risk(mileage_km: f64) -> f64 {
    if mileage_km < 20_000.0 {
        0.1
    } else if mileage_km < 40_000.0 {
        0.3
    } else if mileage_km < 60_000.0 {
        0.5
    } else if mileage_km < 80_000.0 {
        0.7
    } else {
        0.9
    }
}

/// 发动机小时子评分: 1000/2000/3000 台阶
fn engine_hours_risk(engine_hours: f64) -> f64 {
    if engine_hours < 1_000.0 {
        0.1
    } else if engine_hours < 2_000.0 {
        0.3
    } else if engine_hours < 3_000.0 {
        0.5
    } else {
        0.7
    }
}

/// 保养到期子评分: 距下次保养天数台阶; 日期未知记 0.5
fn maintenance_due_risk(days_until: Option<i64>) -> f64 {
    match days_until {
        None => 0.5,
        Some(d) if d < 0 => 1.0,
        Some(d) if d < 7 => 0.8,
        Some(d) if d < 14 => 0.5,
        Some(d) if d < 30 => 0.3,
        Some(_) => 0.1,
    }
}

/// 运营负荷子评分: 低在线率/高利用率/高维保成本逐项累加, 封顶 1.0
fn operational_risk(vehicle: &Vehicle) -> f64 {
    let mut risk: f64 = 0.0;
    if vehicle.uptime < 0.85 {
        risk += 0.3;
    }
    if vehicle.utilization_rate > 0.9 {
        risk += 0.2;
    }
    if vehicle.maintenance_cost_per_km > 0.10 {
        risk += 0.3;
    }
    risk.min(1.0)
}

impl RiskPredictor {
    /// 维保风险预测
    ///
    /// 档位: >0.8 CRITICAL / >0.6 HIGH / >0.4 MEDIUM / 其余 LOW
    /// 故障窗口: [now + 0.7D, now + 1.3D] 天, D = (1 - score) * 30 + 5
    ///
    /// # 参数
    /// - `risk_threshold`: 输出下限 (score >= threshold 才输出)
    /// - `category_filter`: 可选类别过滤
    ///
    /// # 返回
    /// 按风险降序的维保风险列表
    #[instrument(skip(self))]
    pub fn predict_maintenance_risks(
        &self,
        risk_threshold: f64,
        category_filter: Option<MaintenanceCategory>,
    ) -> PredictionResult<Vec<MaintenanceRisk>> {
        let now = self.clock().now();
        let today = self.clock().today();

        self.store().read(|s| {
            let vehicles: Vec<&Vehicle> = s.vehicles.values().collect();
            let data_points = vehicles.len();

            let mut risks = Vec::new();
            let mut above_threshold = 0usize;

            for vehicle in &vehicles {
                let m = mileage_risk(vehicle.mileage_km);
                let a = engine_hours_risk(vehicle.engine_hours);
                let days_until = vehicle
                    .next_maintenance_date
                    .map(|d| (d - today).num_days());
                let d = maintenance_due_risk(days_until);
                let o = operational_risk(vehicle);

                let score = WEIGHT_MILEAGE * m
                    + WEIGHT_ENGINE_HOURS * a
                    + WEIGHT_MAINTENANCE_DUE * d
                    + WEIGHT_OPERATIONAL * o;

                if score > 0.4 {
                    above_threshold += 1;
                }

                let urgency = if score > 0.8 {
                    Urgency::Critical
                } else if score > 0.6 {
                    Urgency::High
                } else if score > 0.4 {
                    Urgency::Medium
                } else {
                    Urgency::Low
                };

                // 类别: 取加权贡献最大的子评分 (并列取先者)
                let contributions = [
                    (MaintenanceCategory::Wear, WEIGHT_MILEAGE * m),
                    (MaintenanceCategory::Powertrain, WEIGHT_ENGINE_HOURS * a),
                    (
                        MaintenanceCategory::ScheduledService,
                        WEIGHT_MAINTENANCE_DUE * d,
                    ),
                    (MaintenanceCategory::Operational, WEIGHT_OPERATIONAL * o),
                ];
                let mut category = contributions[0].0;
                let mut best = contributions[0].1;
                for (c, v) in contributions.iter().skip(1) {
                    if *v > best {
                        category = *c;
                        best = *v;
                    }
                }

                if score < risk_threshold {
                    continue;
                }
                if let Some(filter) = category_filter {
                    if category != filter {
                        continue;
                    }
                }

                // 故障窗口
                let window_days = (1.0 - score) * 30.0 + 5.0;
                let window_start =
                    now + Duration::seconds((0.7 * window_days * 86_400.0).round() as i64);
                let window_end =
                    now + Duration::seconds((1.3 * window_days * 86_400.0).round() as i64);

                let sub_polarity = |v: f64| {
                    if v >= 0.5 {
                        FactorPolarity::Negative
                    } else {
                        FactorPolarity::Neutral
                    }
                };
                let factors = vec![
                    PredictionFactor::new("mileage", WEIGHT_MILEAGE, m, sub_polarity(m)),
                    PredictionFactor::new("engine_hours", WEIGHT_ENGINE_HOURS, a, sub_polarity(a)),
                    PredictionFactor::new(
                        "maintenance_due",
                        WEIGHT_MAINTENANCE_DUE,
                        d,
                        sub_polarity(d),
                    ),
                    PredictionFactor::new("operational", WEIGHT_OPERATIONAL, o, sub_polarity(o)),
                ];

                risks.push(MaintenanceRisk {
                    vehicle_id: vehicle.vehicle_id.clone(),
                    risk_score: score,
                    urgency,
                    category,
                    factors,
                    window_start,
                    window_end,
                });
            }

            // 风险降序 (稳定排序, 并列保持ID序)
            risks.sort_by(|x, y| {
                y.risk_score
                    .partial_cmp(&x.risk_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let high_risk_share = if vehicles.is_empty() {
                0.0
            } else {
                above_threshold as f64 / vehicles.len() as f64
            };
            let factors = vec![
                PredictionFactor::new(
                    "fleet_size",
                    0.3,
                    data_points as f64,
                    FactorPolarity::Neutral,
                ),
                PredictionFactor::new(
                    "high_risk_share",
                    0.7,
                    high_risk_share,
                    if high_risk_share > 0.3 {
                        FactorPolarity::Negative
                    } else {
                        FactorPolarity::Neutral
                    },
                ),
            ];
            let confidence = self.confidence(data_points, &factors);

            PredictionResult {
                payload: risks,
                confidence,
                factors,
                generated_at: now,
            }
        })
    }
}
