// ==========================================
// 车队运营核心 - 资源调度引擎
// ==========================================
// 职责: 资源位查询/充电排队/预订/贪心优化/利用率报告
// 红线: 预订是唯一变更点; 校验与变更在同一次写锁内完成
// 输入: FleetStore 快照
// 输出: 预订记录 / 优化方案 (不落地) / 报告
// ==========================================

use crate::config::OpsConfig;
use crate::domain::types::{
    AssignmentKind, AssignmentStatus, OptimizeObjective, ResourceStatus, VehicleStatus,
};
use crate::domain::{
    DepotResource, OptimizationPlan, PlanCandidate, PlanMetrics, ScheduleAssignment,
    UtilizationReport, Vehicle,
};
use crate::engine::error::{ScheduleError, ScheduleResult};
use crate::store::{Clock, FleetStore};
use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// ResourceScheduler - 资源调度引擎
// ==========================================
pub struct ResourceScheduler {
    store: Arc<FleetStore>,
    clock: Arc<dyn Clock>,
    config: OpsConfig,
}

/// 方案提交失败明细
#[derive(Debug, Clone)]
pub struct PlanFailure {
    pub vehicle_id: String,
    pub resource_id: String,
    pub error: ScheduleError,
}

/// 方案提交结果 (部分成功语义)
#[derive(Debug, Clone, Default)]
pub struct PlanApplyOutcome {
    pub applied: Vec<ScheduleAssignment>,
    pub failed: Vec<PlanFailure>,
}

impl ResourceScheduler {
    pub fn new(store: Arc<FleetStore>, clock: Arc<dyn Clock>, config: OpsConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    // ==========================================
    // 查询 (只读)
    // ==========================================

    /// 场站资源位列表
    ///
    /// 排序: 功率降序 (整备位记 0), 并列按资源位ID序
    pub fn list_resources(
        &self,
        depot_id: &str,
        status_filter: Option<ResourceStatus>,
    ) -> Vec<DepotResource> {
        self.store.read(|s| {
            let mut resources: Vec<DepotResource> = s
                .resources_at_depot(depot_id)
                .into_iter()
                .filter(|r| status_filter.map_or(true, |f| r.status == f))
                .cloned()
                .collect();
            // 稳定排序: BTreeMap 已按ID序给出, 并列不乱序
            resources.sort_by(|a, b| {
                b.power_kw()
                    .partial_cmp(&a.power_kw())
                    .unwrap_or(Ordering::Equal)
            });
            resources
        })
    }

    /// 充电排队队列
    ///
    /// 资格线: status=AVAILABLE 且 soc < 充电目标 (0.80)
    /// 排序: SOC 升序, 最缺电在前
    pub fn charging_queue(&self, depot_id: &str) -> Vec<Vehicle> {
        let target = self.config.charge_target_soc;
        self.store.read(|s| {
            let mut queue: Vec<Vehicle> = s
                .vehicles_at_depot(depot_id)
                .into_iter()
                .filter(|v| v.status == VehicleStatus::Available && v.soc < target)
                .cloned()
                .collect();
            queue.sort_by(|a, b| a.soc.partial_cmp(&b.soc).unwrap_or(Ordering::Equal));
            queue
        })
    }

    // ==========================================
    // 预订 (唯一变更点)
    // ==========================================

    /// 预订充电桩
    #[instrument(skip(self))]
    pub fn schedule_vehicle(
        &self,
        vehicle_id: &str,
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ScheduleResult<ScheduleAssignment> {
        self.book(vehicle_id, resource_id, start, end, AssignmentKind::Charging)
    }

    /// 预订整备位 (充电桩的整备位对应操作)
    #[instrument(skip(self))]
    pub fn assign_detailing(
        &self,
        vehicle_id: &str,
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ScheduleResult<ScheduleAssignment> {
        self.book(vehicle_id, resource_id, start, end, AssignmentKind::Detailing)
    }

    /// 预订通用路径
    ///
    /// 校验顺序 (失败即返回, 不产生任何变更):
    /// 1) 车辆/资源位存在
    /// 2) start < end
    /// 3) 与同资源位非终态预订无区间重叠 (半开区间)
    /// 4) 资源位类型与预订类型一致, 且 status=AVAILABLE
    ///
    /// 重叠检测先于状态检查: 已有预订压位时报 DoubleBooking,
    /// ResourceUnavailable 留给检修/类型不符等无预订记录的占位
    fn book(
        &self,
        vehicle_id: &str,
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: AssignmentKind,
    ) -> ScheduleResult<ScheduleAssignment> {
        let now = self.clock.now();

        self.store.write(|s| {
            if !s.vehicles.contains_key(vehicle_id) {
                return Err(ScheduleError::NotFound {
                    entity: "vehicle",
                    id: vehicle_id.to_string(),
                });
            }
            let resource = match s.resources.get(resource_id) {
                Some(r) => r,
                None => {
                    return Err(ScheduleError::NotFound {
                        entity: "resource",
                        id: resource_id.to_string(),
                    })
                }
            };

            if start >= end {
                return Err(ScheduleError::InvalidRange { start, end });
            }

            // 冲突检测: start < other_end && end > other_start
            if let Some(conflict) = s
                .open_assignments_for(resource_id)
                .into_iter()
                .find(|a| a.overlaps(start, end))
            {
                return Err(ScheduleError::DoubleBooking {
                    resource_id: resource_id.to_string(),
                    conflict_id: conflict.assignment_id.clone(),
                });
            }

            let kind_matches = match kind {
                AssignmentKind::Charging => resource.kind.is_stall(),
                AssignmentKind::Detailing => resource.kind.is_bay(),
            };
            if !kind_matches || !resource.is_bookable() {
                return Err(ScheduleError::ResourceUnavailable {
                    resource_id: resource_id.to_string(),
                    status: resource.status,
                });
            }

            // 校验全部通过, 执行变更
            let assignment = ScheduleAssignment {
                assignment_id: Uuid::new_v4().to_string(),
                vehicle_id: vehicle_id.to_string(),
                resource_id: resource_id.to_string(),
                start_time: start,
                end_time: end,
                kind,
                status: AssignmentStatus::Scheduled,
            };
            s.assignments.push(assignment.clone());

            if let Some(resource) = s.resources.get_mut(resource_id) {
                // 即时开始记占用, 未来开始记预留
                resource.status = if start <= now {
                    ResourceStatus::Occupied
                } else {
                    ResourceStatus::Reserved
                };
                resource.occupying_vehicle_id = Some(vehicle_id.to_string());
                resource.reserved_until = Some(end);
            }
            if let Some(vehicle) = s.vehicles.get_mut(vehicle_id) {
                vehicle.status = match kind {
                    AssignmentKind::Charging => VehicleStatus::Charging,
                    AssignmentKind::Detailing => VehicleStatus::Detailing,
                };
                vehicle.current_resource_id = Some(resource_id.to_string());
            }

            info!(
                vehicle_id,
                resource_id,
                kind = %kind,
                "BOOKING_CREATED: [{} .. {})",
                start,
                end
            );
            Ok(assignment)
        })
    }

    // ==========================================
    // 贪心优化 (只读, 产出方案)
    // ==========================================

    /// 生成充电优化方案 (不变更状态, 不调用预订)
    ///
    /// 配对: SOC 升序车辆 x 功率降序充电桩, 按位配对;
    /// 时长 = ((0.80 - soc) * 容量) / (功率/60), 封顶 horizon;
    /// 开始时刻按序号错峰 i*10 分钟。
    ///
    /// 已知限制: objective 只回显进 metrics, 不改变配对策略。
    #[instrument(skip(self))]
    pub fn optimize(
        &self,
        depot_id: &str,
        horizon_minutes: i64,
        objective: OptimizeObjective,
    ) -> OptimizationPlan {
        let now = self.clock.now();
        let target = self.config.charge_target_soc;
        let stagger = self.config.optimize_stagger_minutes;

        self.store.read(|s| {
            let mut vehicles: Vec<&Vehicle> = s
                .vehicles_at_depot(depot_id)
                .into_iter()
                .filter(|v| v.status == VehicleStatus::Available && v.soc < target)
                .collect();
            vehicles.sort_by(|a, b| a.soc.partial_cmp(&b.soc).unwrap_or(Ordering::Equal));

            let mut stalls: Vec<&DepotResource> = s
                .resources_at_depot(depot_id)
                .into_iter()
                .filter(|r| r.kind.is_stall() && r.status == ResourceStatus::Available)
                .collect();
            stalls.sort_by(|a, b| {
                b.power_kw()
                    .partial_cmp(&a.power_kw())
                    .unwrap_or(Ordering::Equal)
            });

            let pairs = vehicles.len().min(stalls.len());
            let mut candidates = Vec::with_capacity(pairs);
            let mut total_minutes = 0.0;

            for i in 0..pairs {
                let vehicle = vehicles[i];
                let stall = stalls[i];
                let power_kw = stall.power_kw();

                let mut duration_minutes =
                    ((target - vehicle.soc) * vehicle.battery_capacity_kwh) / (power_kw / 60.0);
                if duration_minutes > horizon_minutes as f64 {
                    duration_minutes = horizon_minutes as f64;
                }

                let start = now + Duration::minutes(i as i64 * stagger);
                let end = start + Duration::seconds((duration_minutes * 60.0).round() as i64);

                total_minutes += duration_minutes;
                candidates.push(PlanCandidate {
                    vehicle_id: vehicle.vehicle_id.clone(),
                    resource_id: stall.resource_id.clone(),
                    start_time: start,
                    end_time: end,
                    duration_minutes,
                    kind: AssignmentKind::Charging,
                });
            }

            let utilization_rate = if stalls.is_empty() {
                0.0
            } else {
                pairs as f64 / stalls.len() as f64
            };

            OptimizationPlan {
                depot_id: depot_id.to_string(),
                generated_at: now,
                candidates,
                metrics: PlanMetrics {
                    total_charging_minutes: total_minutes,
                    utilization_rate,
                    objective,
                },
            }
        })
    }

    /// 提交优化方案 (逐项走正常预订路径, 上报部分成功)
    pub fn apply_plan(&self, plan: &OptimizationPlan) -> PlanApplyOutcome {
        let mut outcome = PlanApplyOutcome::default();
        for candidate in &plan.candidates {
            let result = match candidate.kind {
                AssignmentKind::Charging => self.schedule_vehicle(
                    &candidate.vehicle_id,
                    &candidate.resource_id,
                    candidate.start_time,
                    candidate.end_time,
                ),
                AssignmentKind::Detailing => self.assign_detailing(
                    &candidate.vehicle_id,
                    &candidate.resource_id,
                    candidate.start_time,
                    candidate.end_time,
                ),
            };
            match result {
                Ok(assignment) => outcome.applied.push(assignment),
                Err(error) => outcome.failed.push(PlanFailure {
                    vehicle_id: candidate.vehicle_id.clone(),
                    resource_id: candidate.resource_id.clone(),
                    error,
                }),
            }
        }
        outcome
    }

    // ==========================================
    // 利用率报告 (只读)
    // ==========================================

    /// 场站利用率报告
    ///
    /// 统计口径: 与 [start, end) 相交的非终态预订
    pub fn utilization_report(
        &self,
        depot_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ScheduleResult<UtilizationReport> {
        self.store.read(|s| {
            if !s.depots.contains_key(depot_id) {
                return Err(ScheduleError::NotFound {
                    entity: "depot",
                    id: depot_id.to_string(),
                });
            }

            let resources = s.resources_at_depot(depot_id);
            let total_stalls = resources.iter().filter(|r| r.kind.is_stall()).count();
            let total_bays = resources.iter().filter(|r| r.kind.is_bay()).count();

            let depot_assignments: Vec<&ScheduleAssignment> = s
                .assignments
                .iter()
                .filter(|a| {
                    !a.status.is_terminal()
                        && a.overlaps(start, end)
                        && s.resources
                            .get(&a.resource_id)
                            .map_or(false, |r| r.depot_id == depot_id)
                })
                .collect();

            let charging_count = depot_assignments
                .iter()
                .filter(|a| a.kind == AssignmentKind::Charging)
                .count();
            let detailing_count = depot_assignments.len() - charging_count;

            let vehicles = s.vehicles_at_depot(depot_id);
            let ratio = |count: usize, total: usize| {
                if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                }
            };
            let vehicle_utilization = ratio(depot_assignments.len(), vehicles.len());
            let stall_utilization = ratio(charging_count, total_stalls);
            let bay_utilization = ratio(detailing_count, total_bays);

            let avg_soc = if vehicles.is_empty() {
                0.0
            } else {
                vehicles.iter().map(|v| v.soc).sum::<f64>() / vehicles.len() as f64
            };

            let mut recommendations = Vec::new();
            if stall_utilization < 0.70 {
                recommendations
                    .push("充电桩利用率低于70%, 建议整合充电时段或下调开放桩位".to_string());
            }
            if vehicle_utilization > 0.90 {
                recommendations
                    .push("车辆利用率高于90%, 建议增配车辆或从邻近场站调车".to_string());
            }
            if bay_utilization < 0.50 {
                recommendations
                    .push("整备位利用率低于50%, 建议安排积压的清洁整备任务".to_string());
            }

            Ok(UtilizationReport {
                depot_id: depot_id.to_string(),
                window_start: start,
                window_end: end,
                vehicle_utilization,
                stall_utilization,
                bay_utilization,
                // 启发式峰值时点
                peak_hour: start + Duration::hours(2),
                avg_soc,
                recommendations,
            })
        })
    }
}
