// ==========================================
// 车队运营核心 - 场站需求预测
// ==========================================
// 职责: 按粒度生成逐区间需求点, 标记高峰
// 时段系数 (按区间起点小时): [06,09) x1.5 / [17,20) x1.6 / [22,06) x1.3 / 其余 x1.0
// ==========================================

use crate::domain::{
    DemandForecast, DemandPoint, FactorPolarity, PredictionFactor, PredictionResult,
};
use crate::domain::types::DemandGranularity;
use crate::engine::predictor::RiskPredictor;
use chrono::{Duration, Timelike};
use tracing::instrument;

/// 时段需求系数
fn demand_multiplier(hour: u32) -> f64 {
    match hour {
        6..=8 => 1.5,
        17..=19 => 1.6,
        22..=23 | 0..=5 => 1.3,
        _ => 1.0,
    }
}

impl RiskPredictor {
    /// 场站充电需求预测
    ///
    /// 需求基数 = 0.3 * 场站车辆数; 利用率% = 预测需求 / 充电桩数 * 100;
    /// 利用率 > 80% 的区间标记为高峰。
    /// 逐点置信度从 0.75 起, 每步 -0.02。
    ///
    /// # 边界
    /// 场站不存在 → 空预测, 置信度 0
    #[instrument(skip(self))]
    pub fn predict_depot_demand(
        &self,
        depot_id: &str,
        horizon_hours: i64,
        granularity: DemandGranularity,
    ) -> PredictionResult<DemandForecast> {
        let now = self.clock().now();
        let base_factor = self.config().demand_base_factor;
        let peak_threshold = self.config().demand_peak_threshold_pct;

        self.store().read(|s| {
            if !s.depots.contains_key(depot_id) {
                return PredictionResult {
                    payload: DemandForecast {
                        depot_id: depot_id.to_string(),
                        points: Vec::new(),
                    },
                    confidence: 0.0,
                    factors: Vec::new(),
                    generated_at: now,
                };
            }

            let vehicle_count = s.vehicles_at_depot(depot_id).len();
            let stall_count = s
                .resources_at_depot(depot_id)
                .iter()
                .filter(|r| r.kind.is_stall())
                .count();

            let base_demand = base_factor * vehicle_count as f64;
            let interval = granularity.interval_hours();
            // 覆盖整个外推窗口 (向上取整)
            let steps = ((horizon_hours + interval - 1) / interval).max(0);

            let mut points = Vec::with_capacity(steps as usize);
            for i in 0..steps {
                let interval_start = now + Duration::hours(i * interval);
                let multiplier = demand_multiplier(interval_start.hour());
                let predicted_demand = base_demand * multiplier;

                let utilization_pct = if stall_count == 0 {
                    0.0
                } else {
                    predicted_demand / stall_count as f64 * 100.0
                };

                points.push(DemandPoint {
                    interval_start,
                    predicted_demand,
                    utilization_pct,
                    is_peak: utilization_pct > peak_threshold,
                    confidence: (0.75 - 0.02 * i as f64).max(0.0),
                });
            }

            let factors = vec![
                PredictionFactor::new(
                    "depot_fleet_size",
                    0.4,
                    vehicle_count as f64,
                    FactorPolarity::Neutral,
                ),
                PredictionFactor::new(
                    "charging_capacity",
                    0.6,
                    stall_count as f64,
                    if stall_count == 0 {
                        FactorPolarity::Negative
                    } else {
                        FactorPolarity::Neutral
                    },
                ),
            ];
            let confidence = self.confidence(vehicle_count, &factors);

            PredictionResult {
                payload: DemandForecast {
                    depot_id: depot_id.to_string(),
                    points,
                },
                confidence,
                factors,
                generated_at: now,
            }
        })
    }
}
