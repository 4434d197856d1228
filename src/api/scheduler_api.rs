// ==========================================
// 车队运营核心 - 调度API
// ==========================================
// 职责: 资源调度引擎的调度集成门面
// 输入: 纯标识符 + ISO-8601 时间戳; 输出: 数据 + 成败判别
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{parse_timestamp, validate_horizon_minutes};
use crate::domain::types::{OptimizeObjective, ResourceStatus};
use crate::domain::{
    DepotResource, OptimizationPlan, ScheduleAssignment, UtilizationReport, Vehicle,
};
use crate::engine::scheduler::{PlanApplyOutcome, ResourceScheduler};
use std::sync::Arc;

// ==========================================
// SchedulerApi - 调度API
// ==========================================
pub struct SchedulerApi {
    scheduler: Arc<ResourceScheduler>,
}

impl SchedulerApi {
    pub fn new(scheduler: Arc<ResourceScheduler>) -> Self {
        Self { scheduler }
    }

    /// 场站资源位列表 (功率降序)
    pub fn list_resources(
        &self,
        depot_id: &str,
        status_filter: Option<ResourceStatus>,
    ) -> Vec<DepotResource> {
        self.scheduler.list_resources(depot_id, status_filter)
    }

    /// 充电排队队列 (SOC 升序)
    pub fn charging_queue(&self, depot_id: &str) -> Vec<Vehicle> {
        self.scheduler.charging_queue(depot_id)
    }

    /// 预订充电桩
    pub fn schedule_vehicle(
        &self,
        vehicle_id: &str,
        resource_id: &str,
        start_iso: &str,
        end_iso: &str,
    ) -> ApiResult<ScheduleAssignment> {
        let start = parse_timestamp("start", start_iso)?;
        let end = parse_timestamp("end", end_iso)?;
        Ok(self
            .scheduler
            .schedule_vehicle(vehicle_id, resource_id, start, end)?)
    }

    /// 预订整备位
    pub fn assign_detailing(
        &self,
        vehicle_id: &str,
        resource_id: &str,
        start_iso: &str,
        end_iso: &str,
    ) -> ApiResult<ScheduleAssignment> {
        let start = parse_timestamp("start", start_iso)?;
        let end = parse_timestamp("end", end_iso)?;
        Ok(self
            .scheduler
            .assign_detailing(vehicle_id, resource_id, start, end)?)
    }

    /// 生成充电优化方案 (提案, 不变更状态)
    pub fn optimize(
        &self,
        depot_id: &str,
        horizon_minutes: i64,
        objective: OptimizeObjective,
    ) -> ApiResult<OptimizationPlan> {
        let horizon = validate_horizon_minutes(horizon_minutes)?;
        Ok(self.scheduler.optimize(depot_id, horizon, objective))
    }

    /// 提交优化方案 (逐项走预订路径, 部分成功)
    pub fn apply_plan(&self, plan: &OptimizationPlan) -> PlanApplyOutcome {
        self.scheduler.apply_plan(plan)
    }

    /// 场站利用率报告
    pub fn utilization_report(
        &self,
        depot_id: &str,
        start_iso: &str,
        end_iso: &str,
    ) -> ApiResult<UtilizationReport> {
        let start = parse_timestamp("start", start_iso)?;
        let end = parse_timestamp("end", end_iso)?;
        Ok(self.scheduler.utilization_report(depot_id, start, end)?)
    }
}
