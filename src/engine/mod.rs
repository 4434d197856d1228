// ==========================================
// 车队运营核心 - 引擎层
// ==========================================
// 职责: 调度/预测/自动化业务规则
// 红线: 所有规则必须输出 reason; 预订失败不抛异常
// ==========================================

pub mod automation;
pub mod error;
pub mod predictor;
pub mod scheduler;

// 重导出核心引擎
pub use automation::queueing::{
    ChargingQueueProposal, MaintenanceJob, MaintenanceQueueProposal, QueuedVehicle,
    SkippedVehicle,
};
pub use automation::rebalance::RebalancePlan;
pub use automation::AutomationEngine;
pub use error::{ScheduleError, ScheduleResult};
pub use predictor::RiskPredictor;
pub use scheduler::{PlanApplyOutcome, PlanFailure, ResourceScheduler};
