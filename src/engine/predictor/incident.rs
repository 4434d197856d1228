// ==========================================
// 车队运营核心 - 事故风险预测
// ==========================================
// 职责: 安全评分基数 + 接管率加成 + 环境/等级乘法修正
// 修正: L3 x1.2 / L5 x0.8; 恶劣天气 x1.3; 拥堵 x1.2
// ==========================================

use crate::domain::types::{AutonomyLevel, Traffic, Urgency};
use crate::domain::{FactorPolarity, IncidentRisk, PredictionFactor, PredictionResult, Vehicle};
use crate::engine::predictor::RiskPredictor;
use tracing::instrument;

impl RiskPredictor {
    /// 事故风险预测
    ///
    /// 基数 = (100 - safety_score) / 100, 加上接管率,
    /// 再按自动驾驶等级与城市环境做乘法修正, 夹取 [0, 1]。
    ///
    /// 档位: >0.6 CRITICAL / >0.4 HIGH / >0.2 MEDIUM / 其余 LOW
    /// 输出下限: risk_score > 0.1
    #[instrument(skip(self))]
    pub fn predict_incident_likelihood(
        &self,
        city_filter: Option<&str>,
    ) -> PredictionResult<Vec<IncidentRisk>> {
        let now = self.clock().now();

        self.store().read(|s| {
            let vehicles: Vec<&Vehicle> = s
                .vehicles
                .values()
                .filter(|v| city_filter.map_or(true, |c| v.city == c))
                .collect();
            let data_points = vehicles.len();

            let mut risks = Vec::new();
            let mut adverse_cities = 0usize;

            for vehicle in &vehicles {
                let conditions = s.conditions_for_city(&vehicle.city);

                let mut risk = (100.0 - vehicle.safety_score) / 100.0;
                risk += vehicle.disengagement_rate;

                risk *= match vehicle.autonomy_level {
                    AutonomyLevel::L3 => 1.2,
                    AutonomyLevel::L4 => 1.0,
                    AutonomyLevel::L5 => 0.8,
                };
                if conditions.weather.is_adverse() {
                    risk *= 1.3;
                    adverse_cities += 1;
                }
                if conditions.traffic == Traffic::Heavy {
                    risk *= 1.2;
                }
                let risk = risk.clamp(0.0, 1.0);

                if risk <= 0.1 {
                    continue;
                }

                let urgency = if risk > 0.6 {
                    Urgency::Critical
                } else if risk > 0.4 {
                    Urgency::High
                } else if risk > 0.2 {
                    Urgency::Medium
                } else {
                    Urgency::Low
                };

                risks.push(IncidentRisk {
                    vehicle_id: vehicle.vehicle_id.clone(),
                    risk_score: risk,
                    urgency,
                });
            }

            risks.sort_by(|x, y| {
                y.risk_score
                    .partial_cmp(&x.risk_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let avg_safety = if vehicles.is_empty() {
                0.0
            } else {
                vehicles.iter().map(|v| v.safety_score).sum::<f64>() / vehicles.len() as f64
            };
            let factors = vec![
                PredictionFactor::new(
                    "fleet_avg_safety_score",
                    0.6,
                    avg_safety,
                    if avg_safety < 70.0 {
                        FactorPolarity::Negative
                    } else {
                        FactorPolarity::Positive
                    },
                ),
                PredictionFactor::new(
                    "adverse_weather_exposure",
                    0.4,
                    adverse_cities as f64,
                    if adverse_cities > 0 {
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
