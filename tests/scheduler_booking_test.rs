// ==========================================
// 资源调度引擎集成测试
// ==========================================
// 职责: 预订路径/冲突检测/优化方案/利用率报告端到端验证
// ==========================================

mod helpers;

use chrono::Duration;
use fleet_ops_core::config::OpsConfig;
use fleet_ops_core::domain::types::{
    AssignmentStatus, OptimizeObjective, ResourceStatus, VehicleStatus,
};
use fleet_ops_core::engine::{ResourceScheduler, ScheduleError};
use fleet_ops_core::logging;
use fleet_ops_core::store::FixedClock;
use helpers::test_data_builder::{standard_store, t0, VehicleBuilder};
use std::sync::Arc;

fn scheduler_with(
    store: Arc<fleet_ops_core::store::FleetStore>,
) -> (Arc<FixedClock>, ResourceScheduler) {
    let clock = Arc::new(FixedClock::new(t0()));
    let scheduler = ResourceScheduler::new(store, clock.clone(), OpsConfig::default());
    (clock, scheduler)
}

#[test]
fn test_booking_scenario_stall_conflict() {
    // 场景: S1 (250kW) 空闲; V1 (SOC 0.10) 预订 [t0, t0+1h) 成功;
    //       V2 申请 [t0+30m, t0+90m) → DoubleBooking
    logging::init_test();
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.10).build());
    store.upsert_vehicle(VehicleBuilder::new("V2").soc(0.20).build());
    let (_, scheduler) = scheduler_with(store.clone());

    let ok = scheduler.schedule_vehicle("V1", "S1", t0(), t0() + Duration::hours(1));
    assert!(ok.is_ok());

    let err = scheduler
        .schedule_vehicle(
            "V2",
            "S1",
            t0() + Duration::minutes(30),
            t0() + Duration::minutes(90),
        )
        .unwrap_err();
    assert!(matches!(err, ScheduleError::DoubleBooking { .. }));

    // 失败不产生任何变更: V2 状态保持不变
    store.read(|s| {
        assert_eq!(s.vehicles["V2"].status, VehicleStatus::Available);
        assert!(s.vehicles["V2"].current_resource_id.is_none());
        assert_eq!(s.assignments.len(), 1);
    });
}

#[test]
fn test_booking_updates_vehicle_and_resource() {
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.10).build());
    let (_, scheduler) = scheduler_with(store.clone());

    let assignment = scheduler
        .schedule_vehicle("V1", "S1", t0(), t0() + Duration::hours(1))
        .unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Scheduled);

    store.read(|s| {
        assert_eq!(s.resources["S1"].status, ResourceStatus::Occupied);
        assert_eq!(s.resources["S1"].occupying_vehicle_id.as_deref(), Some("V1"));
        assert_eq!(s.vehicles["V1"].status, VehicleStatus::Charging);
        assert_eq!(s.vehicles["V1"].current_resource_id.as_deref(), Some("S1"));
    });
}

#[test]
fn test_charging_queue_ordering_property() {
    let store = standard_store();
    for (id, soc) in [("V1", 0.72), ("V2", 0.05), ("V3", 0.44), ("V4", 0.31)] {
        store.upsert_vehicle(VehicleBuilder::new(id).soc(soc).build());
    }
    // 0.80 以上不入队
    store.upsert_vehicle(VehicleBuilder::new("V5").soc(0.92).build());
    let (_, scheduler) = scheduler_with(store);

    let queue = scheduler.charging_queue("D1");
    assert_eq!(queue.len(), 4);
    for pair in queue.windows(2) {
        assert!(pair[0].soc <= pair[1].soc, "队列 SOC 必须非降");
    }
}

#[test]
fn test_optimize_then_apply_roundtrip() {
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.10).build());
    store.upsert_vehicle(VehicleBuilder::new("V2").soc(0.30).build());
    let (_, scheduler) = scheduler_with(store.clone());

    let plan = scheduler.optimize("D1", 480, OptimizeObjective::MinimizeWait);
    assert_eq!(plan.candidates.len(), 2);
    // 最缺电的 V1 配最大功率的 S1
    assert_eq!(plan.candidates[0].vehicle_id, "V1");
    assert_eq!(plan.candidates[0].resource_id, "S1");

    // 方案本身不落地
    store.read(|s| assert!(s.assignments.is_empty()));

    // 提交后逐项走预订路径
    let outcome = scheduler.apply_plan(&plan);
    assert_eq!(outcome.applied.len(), 2);
    assert!(outcome.failed.is_empty());
    store.read(|s| {
        assert_eq!(s.assignments.len(), 2);
        assert_eq!(s.vehicles["V1"].status, VehicleStatus::Charging);
    });

    // 重复提交: 资源位已被占用, 全部失败 (部分成功语义)
    let outcome = scheduler.apply_plan(&plan);
    assert!(outcome.applied.is_empty());
    assert_eq!(outcome.failed.len(), 2);
}

#[test]
fn test_utilization_report_empty_window_recommendation() {
    // 场景: 窗口内无预订 → stall_utilization=0, 低利用率建议出现
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.60).build());
    let (_, scheduler) = scheduler_with(store);

    let report = scheduler
        .utilization_report("D1", t0(), t0() + Duration::hours(8))
        .unwrap();
    assert_eq!(report.stall_utilization, 0.0);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("充电桩利用率低于70%")));
}

#[test]
fn test_back_to_back_assignments_no_conflict() {
    // 半开区间: [8:00,9:00) 与 [9:00,10:00) 不冲突
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.10).build());
    store.upsert_vehicle(VehicleBuilder::new("V2").soc(0.20).build());
    let (_, scheduler) = scheduler_with(store.clone());

    scheduler
        .schedule_vehicle("V1", "S1", t0(), t0() + Duration::hours(1))
        .unwrap();
    // 外部生命周期释放资源位
    store.write(|s| {
        if let Some(r) = s.resources.get_mut("S1") {
            r.status = ResourceStatus::Available;
        }
    });
    let result = scheduler.schedule_vehicle(
        "V2",
        "S1",
        t0() + Duration::hours(1),
        t0() + Duration::hours(2),
    );
    assert!(result.is_ok());
}

#[test]
fn test_terminal_assignments_ignored_by_conflict_scan() {
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.10).build());
    store.upsert_vehicle(VehicleBuilder::new("V2").soc(0.20).build());
    let (_, scheduler) = scheduler_with(store.clone());

    let assignment = scheduler
        .schedule_vehicle("V1", "S1", t0(), t0() + Duration::hours(1))
        .unwrap();

    // 外部生命周期: 取消预订并释放资源位
    store.write(|s| {
        if let Some(a) = s
            .assignments
            .iter_mut()
            .find(|a| a.assignment_id == assignment.assignment_id)
        {
            a.status = AssignmentStatus::Cancelled;
        }
        if let Some(r) = s.resources.get_mut("S1") {
            r.status = ResourceStatus::Available;
        }
    });

    // 同一时段重新预订成功 (终态预订不参与冲突检测)
    let result = scheduler.schedule_vehicle("V2", "S1", t0(), t0() + Duration::hours(1));
    assert!(result.is_ok());
}
