// ==========================================
// 车队运营核心 - 核心库
// ==========================================
// 技术栈: Rust (纯同步, CPU密集)
// 系统定位: 决策支持核心 (调度/预测/自动化)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 状态仓储层 - 车队快照
pub mod store;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 调度集成接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AssignmentKind, AssignmentStatus, AutonomyLevel, ChargingStrategy, DemandGranularity,
    OptimizeObjective, ResourceStatus, SelectionCriteria, Traffic, Urgency, VehicleStatus,
    Weather,
};

// 领域实体
pub use domain::{
    AutomationExecution, AutomationRule, CityConditions, Depot, DepotResource, OptimizationPlan,
    PredictionResult, ResourceKind, RuleAction, RuleCondition, RuleTrigger, ScheduleAssignment,
    UtilizationReport, Vehicle,
};

// 仓储与时钟
pub use store::{Clock, FixedClock, FleetState, FleetStore, SystemClock};

// 引擎
pub use engine::{
    AutomationEngine, ResourceScheduler, RiskPredictor, ScheduleError, ScheduleResult,
};

// API
pub use api::{ApiError, ApiResult, AutomationApi, PredictorApi, SchedulerApi};

// 配置
pub use config::OpsConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车队运营核心";

// ==========================================
// 预编译检查
// ==========================================
