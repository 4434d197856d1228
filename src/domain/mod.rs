// ==========================================
// 车队运营核心 - 领域层
// ==========================================
// 职责: 实体与类型定义, 不含业务规则
// ==========================================

pub mod assignment;
pub mod prediction;
pub mod resource;
pub mod rule;
pub mod types;
pub mod vehicle;

// 重导出核心实体
pub use assignment::{
    OptimizationPlan, PlanCandidate, PlanMetrics, ScheduleAssignment, UtilizationReport,
};
pub use prediction::{
    ChargingNeed, DemandForecast, DemandPoint, FactorPolarity, FleetPredictionSummary,
    IncidentRisk, MaintenanceCategory, MaintenanceRisk, PredictionFactor, PredictionResult,
    UrgencyCounts,
};
pub use resource::{CityConditions, Depot, DepotResource, ResourceKind};
pub use rule::{
    AutomationExecution, AutomationRule, CompareOp, PredictionKind, RuleAction, RuleCondition,
    RuleTrigger, ThresholdDirection,
};
pub use vehicle::Vehicle;
