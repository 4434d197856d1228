// ==========================================
// 车队运营核心 - 充电需求预测
// ==========================================
// 职责: 按耗电速率外推 SOC, 给出紧急档位与建议充电时点
// 口径: 日均 12 活跃小时折算小时级耗电速率
// ==========================================

use crate::domain::types::Urgency;
use crate::domain::{ChargingNeed, FactorPolarity, PredictionFactor, PredictionResult, Vehicle};
use crate::engine::predictor::RiskPredictor;
use chrono::Duration;
use tracing::instrument;

impl RiskPredictor {
    /// 充电需求预测
    ///
    /// 档位判定 (顺序命中):
    /// - CRITICAL: 当前 SOC < 0.15 或 预测 SOC < 0.10
    /// - HIGH:     当前 SOC < 0.25 或 预测 SOC < 0.20
    /// - MEDIUM:   预测 SOC < soc_threshold
    /// - LOW:      其余
    ///
    /// # 参数
    /// - `horizon_hours`: 外推时长 (小时)
    /// - `soc_threshold`: 关注阈值 (0.0-1.0)
    /// - `city_filter` / `depot_filter`: 可选范围过滤
    ///
    /// # 返回
    /// 按紧急档位排序 (CRITICAL 在前) 的充电需求列表
    #[instrument(skip(self))]
    pub fn predict_charging_needs(
        &self,
        horizon_hours: f64,
        soc_threshold: f64,
        city_filter: Option<&str>,
        depot_filter: Option<&str>,
    ) -> PredictionResult<Vec<ChargingNeed>> {
        let now = self.clock().now();
        let target = self.config().charge_target_soc;
        let fast_power = self.config().fast_charge_power_kw;
        let active_hours = self.config().active_hours_per_day;

        self.store().read(|s| {
            // 充电中/维修中不参与预测
            let eligible: Vec<&Vehicle> = s
                .vehicles
                .values()
                .filter(|v| !v.is_exempt_from_charging())
                .filter(|v| city_filter.map_or(true, |c| v.city == c))
                .filter(|v| depot_filter.map_or(true, |d| v.is_at_depot(d)))
                .collect();
            let data_points = eligible.len();

            let mut needs = Vec::new();
            let mut critical_count = 0usize;

            for vehicle in &eligible {
                // 小时级耗电速率 = 日耗电量 / 容量 / 活跃小时
                let daily_kwh =
                    vehicle.avg_daily_distance_km / 100.0 * vehicle.energy_per_100km;
                let drain_per_hour =
                    daily_kwh / vehicle.battery_capacity_kwh / active_hours;
                let predicted_soc = (vehicle.soc - drain_per_hour * horizon_hours).max(0.0);

                let urgency = if vehicle.soc < 0.15 || predicted_soc < 0.10 {
                    Urgency::Critical
                } else if vehicle.soc < 0.25 || predicted_soc < 0.20 {
                    Urgency::High
                } else if predicted_soc < soc_threshold {
                    Urgency::Medium
                } else {
                    Urgency::Low
                };
                if urgency == Urgency::Critical {
                    critical_count += 1;
                }

                // 建议充电时点: 已跌破阈值立即充; 否则按当前速率推算跌破时刻
                let recommended_charge_at = if vehicle.soc <= soc_threshold {
                    Some(now)
                } else if drain_per_hour > 0.0 {
                    let hours_until = (vehicle.soc - soc_threshold) / drain_per_hour;
                    Some(now + Duration::seconds((hours_until * 3600.0).round() as i64))
                } else {
                    None
                };

                // 以快充功率估算充至目标所需分钟数
                let est_charge_minutes = ((target - vehicle.soc).max(0.0)
                    * vehicle.battery_capacity_kwh)
                    / fast_power
                    * 60.0;

                // 输出过滤: 预测 SOC 与阈值百分数比较, 或档位非 LOW
                if predicted_soc < soc_threshold * 100.0 || urgency != Urgency::Low {
                    needs.push(ChargingNeed {
                        vehicle_id: vehicle.vehicle_id.clone(),
                        current_soc: vehicle.soc,
                        predicted_soc,
                        urgency,
                        recommended_charge_at,
                        est_charge_minutes,
                    });
                }
            }

            // 稳定排序: CRITICAL → LOW
            needs.sort_by_key(|n| n.urgency.rank());

            let avg_soc = if eligible.is_empty() {
                0.0
            } else {
                eligible.iter().map(|v| v.soc).sum::<f64>() / eligible.len() as f64
            };
            let critical_share = if eligible.is_empty() {
                0.0
            } else {
                critical_count as f64 / eligible.len() as f64
            };

            let factors = vec![
                PredictionFactor::new(
                    "fleet_avg_soc",
                    0.5,
                    avg_soc,
                    if avg_soc < 0.3 {
                        FactorPolarity::Negative
                    } else {
                        FactorPolarity::Neutral
                    },
                ),
                PredictionFactor::new(
                    "critical_share",
                    0.3,
                    critical_share,
                    if critical_count > 0 {
                        FactorPolarity::Negative
                    } else {
                        FactorPolarity::Positive
                    },
                ),
                PredictionFactor::new("horizon_hours", 0.2, horizon_hours, FactorPolarity::Neutral),
            ];
            let confidence = self.confidence(data_points, &factors);

            PredictionResult {
                payload: needs,
                confidence,
                factors,
                generated_at: now,
            }
        })
    }
}
