// ==========================================
// 车队运营核心 - 车队预测汇总
// ==========================================
// 职责: 三类按车预测跑默认参数, 汇总各档位数量
// ==========================================

use crate::domain::{
    FactorPolarity, FleetPredictionSummary, PredictionFactor, PredictionResult, UrgencyCounts,
};
use crate::engine::predictor::RiskPredictor;
use tracing::instrument;

// 汇总用默认参数
const SUMMARY_HORIZON_HOURS: f64 = 24.0;
const SUMMARY_RISK_THRESHOLD: f64 = 0.4;

impl RiskPredictor {
    /// 车队预测汇总
    ///
    /// 以默认参数运行充电/维保/事故预测, 输出各档位数量与平均置信度
    #[instrument(skip(self))]
    pub fn fleet_prediction_summary(&self) -> PredictionResult<FleetPredictionSummary> {
        let now = self.clock().now();
        let soc_threshold = self.config().queue_soc_threshold;

        let charging_result =
            self.predict_charging_needs(SUMMARY_HORIZON_HOURS, soc_threshold, None, None);
        let maintenance_result = self.predict_maintenance_risks(SUMMARY_RISK_THRESHOLD, None);
        let incident_result = self.predict_incident_likelihood(None);

        let mut charging = UrgencyCounts::default();
        for need in &charging_result.payload {
            charging.add(need.urgency);
        }
        let mut maintenance = UrgencyCounts::default();
        for risk in &maintenance_result.payload {
            maintenance.add(risk.urgency);
        }
        let mut incident = UrgencyCounts::default();
        for risk in &incident_result.payload {
            incident.add(risk.urgency);
        }

        let avg_confidence = (charging_result.confidence
            + maintenance_result.confidence
            + incident_result.confidence)
            / 3.0;

        let factors = vec![
            PredictionFactor::new(
                "charging_confidence",
                1.0 / 3.0,
                charging_result.confidence,
                FactorPolarity::Neutral,
            ),
            PredictionFactor::new(
                "maintenance_confidence",
                1.0 / 3.0,
                maintenance_result.confidence,
                FactorPolarity::Neutral,
            ),
            PredictionFactor::new(
                "incident_confidence",
                1.0 / 3.0,
                incident_result.confidence,
                FactorPolarity::Neutral,
            ),
        ];

        PredictionResult {
            payload: FleetPredictionSummary {
                charging,
                maintenance,
                incident,
                avg_confidence,
            },
            confidence: avg_confidence,
            factors,
            generated_at: now,
        }
    }
}
