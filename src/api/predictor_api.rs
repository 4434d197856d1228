// ==========================================
// 车队运营核心 - 预测API
// ==========================================
// 职责: 风险预测引擎的调度集成门面 (纯只读)
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{validate_fraction, validate_horizon_hours};
use crate::domain::types::DemandGranularity;
use crate::domain::{
    ChargingNeed, DemandForecast, FleetPredictionSummary, IncidentRisk, MaintenanceCategory,
    MaintenanceRisk, PredictionResult,
};
use crate::engine::predictor::RiskPredictor;
use std::sync::Arc;

// ==========================================
// PredictorApi - 预测API
// ==========================================
pub struct PredictorApi {
    predictor: Arc<RiskPredictor>,
}

impl PredictorApi {
    pub fn new(predictor: Arc<RiskPredictor>) -> Self {
        Self { predictor }
    }

    /// 充电需求预测
    pub fn predict_charging_needs(
        &self,
        horizon_hours: i64,
        soc_threshold: f64,
        city_filter: Option<&str>,
        depot_filter: Option<&str>,
    ) -> ApiResult<PredictionResult<Vec<ChargingNeed>>> {
        let horizon = validate_horizon_hours(horizon_hours)?;
        let threshold = validate_fraction("soc_threshold", soc_threshold)?;
        Ok(self.predictor.predict_charging_needs(
            horizon as f64,
            threshold,
            city_filter,
            depot_filter,
        ))
    }

    /// 维保风险预测
    pub fn predict_maintenance_risks(
        &self,
        risk_threshold: f64,
        category_filter: Option<MaintenanceCategory>,
    ) -> ApiResult<PredictionResult<Vec<MaintenanceRisk>>> {
        let threshold = validate_fraction("risk_threshold", risk_threshold)?;
        Ok(self
            .predictor
            .predict_maintenance_risks(threshold, category_filter))
    }

    /// 事故风险预测
    pub fn predict_incident_likelihood(
        &self,
        city_filter: Option<&str>,
    ) -> PredictionResult<Vec<IncidentRisk>> {
        self.predictor.predict_incident_likelihood(city_filter)
    }

    /// 场站需求预测
    pub fn predict_depot_demand(
        &self,
        depot_id: &str,
        horizon_hours: i64,
        granularity: DemandGranularity,
    ) -> ApiResult<PredictionResult<DemandForecast>> {
        let horizon = validate_horizon_hours(horizon_hours)?;
        Ok(self
            .predictor
            .predict_depot_demand(depot_id, horizon, granularity))
    }

    /// 车队预测汇总
    pub fn fleet_prediction_summary(&self) -> PredictionResult<FleetPredictionSummary> {
        self.predictor.fleet_prediction_summary()
    }
}
