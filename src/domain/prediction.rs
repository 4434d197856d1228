// ==========================================
// 车队运营核心 - 预测结果实体
// ==========================================
// 职责: 预测结果包装 + 各预测负载类型
// 临时对象: 每次调用重算, 不落库
// ==========================================

use crate::domain::types::Urgency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 因子极性 (Factor Polarity)
// ==========================================
// Negative 因子参与置信度扣减 (每个 -0.05)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorPolarity {
    Positive,
    Negative,
    Neutral,
}

/// 具名预测因子
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFactor {
    pub name: String,
    pub weight: f64,
    pub value: f64,
    pub polarity: FactorPolarity,
}

impl PredictionFactor {
    pub fn new(name: &str, weight: f64, value: f64, polarity: FactorPolarity) -> Self {
        Self {
            name: name.to_string(),
            weight,
            value,
            polarity,
        }
    }
}

// ==========================================
// 预测结果包装 (Prediction Result)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult<T> {
    pub payload: T,
    pub confidence: f64,
    pub factors: Vec<PredictionFactor>,
    pub generated_at: DateTime<Utc>,
}

// ==========================================
// 充电需求预测 (Charging Need)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingNeed {
    pub vehicle_id: String,
    pub current_soc: f64,
    pub predicted_soc: f64,
    pub urgency: Urgency,
    /// 按当前耗电速率推算的建议开始充电时点; 速率为零且未跌破阈值时为 None
    pub recommended_charge_at: Option<DateTime<Utc>>,
    /// 以 250kW 快充估算充至 80% 所需分钟数
    pub est_charge_minutes: f64,
}

// ==========================================
// 维保风险预测 (Maintenance Risk)
// ==========================================

/// 维保类别: 由占比最高的子评分推导
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceCategory {
    Wear,             // 里程磨损
    Powertrain,       // 动力系统 (发动机小时)
    ScheduledService, // 计划保养到期
    Operational,      // 运营负荷
}

impl std::fmt::Display for MaintenanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceCategory::Wear => write!(f, "WEAR"),
            MaintenanceCategory::Powertrain => write!(f, "POWERTRAIN"),
            MaintenanceCategory::ScheduledService => write!(f, "SCHEDULED_SERVICE"),
            MaintenanceCategory::Operational => write!(f, "OPERATIONAL"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRisk {
    pub vehicle_id: String,
    pub risk_score: f64,
    pub urgency: Urgency,
    pub category: MaintenanceCategory,
    /// 四项加权子评分 (mileage/engine_hours/maintenance_due/operational)
    pub factors: Vec<PredictionFactor>,
    /// 预计故障窗口 [now + 0.7D, now + 1.3D], D=(1-score)*30+5 天
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

// ==========================================
// 事故风险预测 (Incident Risk)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRisk {
    pub vehicle_id: String,
    pub risk_score: f64,
    pub urgency: Urgency,
}

// ==========================================
// 场站需求预测 (Depot Demand)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandPoint {
    pub interval_start: DateTime<Utc>,
    pub predicted_demand: f64,
    pub utilization_pct: f64,
    pub is_peak: bool,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandForecast {
    pub depot_id: String,
    pub points: Vec<DemandPoint>,
}

// ==========================================
// 车队预测汇总 (Fleet Prediction Summary)
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrgencyCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl UrgencyCounts {
    pub fn add(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::Critical => self.critical += 1,
            Urgency::High => self.high += 1,
            Urgency::Medium => self.medium += 1,
            Urgency::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetPredictionSummary {
    pub charging: UrgencyCounts,
    pub maintenance: UrgencyCounts,
    pub incident: UrgencyCounts,
    pub avg_confidence: f64,
}
