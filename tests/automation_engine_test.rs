// ==========================================
// 自动化规则引擎集成测试
// ==========================================
// 职责: 规则评估/冷却/自动排队/调车的端到端验证
// ==========================================

mod helpers;

use chrono::Duration;
use fleet_ops_core::config::OpsConfig;
use fleet_ops_core::domain::rule::{
    CompareOp, RuleAction, RuleCondition, RuleTrigger, ThresholdDirection,
};
use fleet_ops_core::domain::types::{ChargingStrategy, SelectionCriteria, Urgency, VehicleStatus};
use fleet_ops_core::domain::AutomationRule;
use fleet_ops_core::engine::AutomationEngine;
use fleet_ops_core::store::{FixedClock, FleetStore};
use helpers::test_data_builder::{depot, standard_store, t0, VehicleBuilder};
use serde_json::json;
use std::sync::Arc;

fn engine_with(store: Arc<FleetStore>) -> (Arc<FixedClock>, AutomationEngine) {
    let clock = Arc::new(FixedClock::new(t0()));
    let engine = AutomationEngine::new(store, clock.clone(), OpsConfig::default());
    (clock, engine)
}

#[test]
fn test_cooldown_enforcement_property() {
    // 连续两次评估: 冷却未满的规则第二次不得触发, execution_count 不变
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.15).build());
    let (_, engine) = engine_with(store);

    let rule_id = engine.add_rule(
        AutomationRule::new(
            "low-soc-queue",
            RuleTrigger::SocThreshold {
                threshold: 0.2,
                direction: ThresholdDirection::Below,
            },
            vec![RuleAction::QueueForCharging],
        )
        .with_cooldown(15),
    );

    assert_eq!(engine.evaluate_rules().len(), 1);
    assert_eq!(engine.evaluate_rules().len(), 0);
    assert_eq!(engine.rule(&rule_id).unwrap().execution_count, 1);
}

#[test]
fn test_max_concurrent_scenario() {
    // 场景: 5 台符合条件, max_concurrent=3 → 3 台入队, 2 台跳过
    let store = standard_store();
    for (id, soc) in [
        ("V1", 0.05),
        ("V2", 0.12),
        ("V3", 0.18),
        ("V4", 0.25),
        ("V5", 0.33),
    ] {
        store.upsert_vehicle(VehicleBuilder::new(id).soc(soc).build());
    }
    let (_, engine) = engine_with(store);

    let proposal =
        engine.auto_queue_charging(None, None, ChargingStrategy::UrgentFirst, 3, 0.40, true);

    assert_eq!(proposal.queued.len(), 3);
    let over_limit: Vec<_> = proposal
        .skipped
        .iter()
        .filter(|s| s.reason == "exceeds concurrent limit of 3")
        .collect();
    assert_eq!(over_limit.len(), 2);
}

#[test]
fn test_rules_with_conditions_and_actions() {
    let store = standard_store();
    store.upsert_vehicle(
        VehicleBuilder::new("V1")
            .soc(0.15)
            .city("beijing")
            .build(),
    );
    store.upsert_vehicle(VehicleBuilder::new("V2").soc(0.15).build());
    let (_, engine) = engine_with(store);

    engine.add_rule(
        AutomationRule::new(
            "beijing-low-soc",
            RuleTrigger::SocThreshold {
                threshold: 0.2,
                direction: ThresholdDirection::Below,
            },
            vec![
                RuleAction::QueueForCharging,
                RuleAction::Notify {
                    channel: "ops".to_string(),
                },
            ],
        )
        .with_conditions(vec![RuleCondition {
            field: "city".to_string(),
            op: CompareOp::Eq,
            value: json!("beijing"),
        }]),
    );

    let fired = engine.evaluate_rules();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].vehicle_ids, vec!["V1"]);
    assert_eq!(
        fired[0].action_kinds,
        vec!["queue_for_charging", "notify"]
    );
}

#[test]
fn test_maintenance_due_trigger() {
    let store = standard_store();
    store.upsert_vehicle(
        VehicleBuilder::new("V1")
            .next_maintenance(t0().date_naive() + Duration::days(3))
            .build(),
    );
    store.upsert_vehicle(
        VehicleBuilder::new("V2")
            .next_maintenance(t0().date_naive() + Duration::days(30))
            .build(),
    );
    let (_, engine) = engine_with(store);

    engine.add_rule(AutomationRule::new(
        "maintenance-week",
        RuleTrigger::MaintenanceDue { within_days: 7 },
        vec![RuleAction::QueueForMaintenance],
    ));

    let fired = engine.evaluate_rules();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].vehicle_ids, vec!["V1"]);
}

#[test]
fn test_prediction_confidence_trigger_delegates() {
    let store = standard_store();
    // 20 台低电量车: 置信度 0.5 + 0.02*20 = 0.9 (负向因子再扣减)
    for i in 0..20 {
        store.upsert_vehicle(VehicleBuilder::new(&format!("V{:02}", i)).soc(0.10).build());
    }
    let (_, engine) = engine_with(store);

    engine.add_rule(AutomationRule::new(
        "confident-charging-forecast",
        RuleTrigger::PredictionConfidence {
            prediction: fleet_ops_core::domain::PredictionKind::Charging,
            min_confidence: 0.6,
        },
        vec![RuleAction::CreateAlert {
            severity: "medium".to_string(),
        }],
    ));

    let fired = engine.evaluate_rules();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].vehicle_ids.len(), 20);
}

#[test]
fn test_rebalance_plan_feasibility() {
    let store = standard_store();
    store.upsert_depot(depot("D2", 10));
    for i in 0..4 {
        store.upsert_vehicle(
            VehicleBuilder::new(&format!("V{}", i))
                .depot("D1")
                .status(VehicleStatus::Idle)
                .build(),
        );
    }
    store.upsert_vehicle(
        VehicleBuilder::new("V9")
            .depot("D2")
            .status(VehicleStatus::Idle)
            .build(),
    );
    let (_, engine) = engine_with(store);

    let plan = engine.auto_rebalance_fleet(None, None, 2, SelectionCriteria::HighestSoc);
    assert!(plan.feasible);
    // D1 利用率 4/20=0.2 高于 D2 的 1/10=0.1
    assert_eq!(plan.source_depot_id.as_deref(), Some("D1"));
    assert_eq!(plan.target_depot_id.as_deref(), Some("D2"));
    assert_eq!(plan.vehicle_ids.len(), 2);
}

#[test]
fn test_vehicle_idle_trigger_with_priority_actions() {
    let store = standard_store();
    store.upsert_vehicle(
        VehicleBuilder::new("V1")
            .status(VehicleStatus::Idle)
            .soc(0.90)
            .build(),
    );
    let (_, engine) = engine_with(store);

    engine.add_rule(AutomationRule::new(
        "idle-dispatch",
        RuleTrigger::VehicleIdle,
        vec![RuleAction::CreateJob {
            job_type: "DISPATCH".to_string(),
        }],
    ));

    let fired = engine.evaluate_rules();
    assert_eq!(fired.len(), 1);
    assert!(fired[0].success);
    assert_eq!(fired[0].action_kinds, vec!["create_job"]);
}

#[test]
fn test_queue_priority_derived_from_soc() {
    let store = standard_store();
    store.upsert_vehicle(VehicleBuilder::new("V1").soc(0.05).build());
    store.upsert_vehicle(VehicleBuilder::new("V2").soc(0.15).build());
    store.upsert_vehicle(VehicleBuilder::new("V3").soc(0.30).build());
    store.upsert_vehicle(VehicleBuilder::new("V4").soc(0.38).build());
    let (_, engine) = engine_with(store);

    let proposal =
        engine.auto_queue_charging(None, None, ChargingStrategy::UrgentFirst, 10, 0.40, true);

    let priority_of = |id: &str| {
        proposal
            .queued
            .iter()
            .find(|q| q.vehicle_id == id)
            .unwrap()
            .priority
    };
    assert_eq!(priority_of("V1"), Urgency::Critical);
    assert_eq!(priority_of("V2"), Urgency::High);
    assert_eq!(priority_of("V3"), Urgency::Medium);
    assert_eq!(priority_of("V4"), Urgency::Low);
}
