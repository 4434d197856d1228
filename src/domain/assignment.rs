// ==========================================
// 车队运营核心 - 预订与优化方案实体
// ==========================================
// 职责: 资源位预订记录 + 优化方案 + 利用率报告
// 不变量: 同一资源位的非终态预订区间两两不重叠 (半开区间)
// ==========================================

use crate::domain::types::{AssignmentKind, AssignmentStatus, OptimizeObjective};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 预订记录 (Schedule Assignment)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    pub assignment_id: String,
    pub vehicle_id: String,
    pub resource_id: String,
    /// 半开区间 [start_time, end_time)
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub kind: AssignmentKind,
    pub status: AssignmentStatus,
}

impl ScheduleAssignment {
    /// 半开区间重叠判定: start < other_end && end > other_start
    ///
    /// 首尾相接 (end == other_start) 不算冲突
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end_time && end > self.start_time
    }
}

// ==========================================
// 优化方案 (Optimization Plan)
// ==========================================
// 临时对象, 不落库; 由调用方决定是否经正常预订路径提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCandidate {
    pub vehicle_id: String,
    pub resource_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: f64,
    pub kind: AssignmentKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetrics {
    pub total_charging_minutes: f64,
    pub utilization_rate: f64,
    /// 仅回显, 不影响配对策略
    pub objective: OptimizeObjective,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationPlan {
    pub depot_id: String,
    pub generated_at: DateTime<Utc>,
    pub candidates: Vec<PlanCandidate>,
    pub metrics: PlanMetrics,
}

// ==========================================
// 利用率报告 (Utilization Report)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub depot_id: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub vehicle_utilization: f64,
    pub stall_utilization: f64,
    pub bay_utilization: f64,
    /// 启发式峰值时点: window_start + 2h
    pub peak_hour: DateTime<Utc>,
    pub avg_soc: f64,
    pub recommendations: Vec<String>,
}
