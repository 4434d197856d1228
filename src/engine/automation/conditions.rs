// ==========================================
// 车队运营核心 - 条件求值
// ==========================================
// 职责: 字段级谓词对车辆快照求值, AND 组合
// 红线: 字段不识别/类型不匹配 → 条件为假, 绝不 panic
// ==========================================

use crate::domain::{CompareOp, RuleCondition, Vehicle};
use serde_json::{json, Value};

/// 条件字段解析
///
/// 支持字段: soc / status / city / depot_id / mileage_km / utilization_rate /
/// uptime / safety_score / engine_hours / battery_capacity_kwh /
/// revenue_per_day / disengagement_rate
fn field_value(vehicle: &Vehicle, field: &str) -> Option<Value> {
    match field {
        "soc" => Some(json!(vehicle.soc)),
        "status" => Some(json!(vehicle.status.to_string())),
        "city" => Some(json!(vehicle.city)),
        "depot_id" => vehicle.current_depot_id.as_ref().map(|d| json!(d)),
        "mileage_km" => Some(json!(vehicle.mileage_km)),
        "utilization_rate" => Some(json!(vehicle.utilization_rate)),
        "uptime" => Some(json!(vehicle.uptime)),
        "safety_score" => Some(json!(vehicle.safety_score)),
        "engine_hours" => Some(json!(vehicle.engine_hours)),
        "battery_capacity_kwh" => Some(json!(vehicle.battery_capacity_kwh)),
        "revenue_per_day" => Some(json!(vehicle.revenue_per_day)),
        "disengagement_rate" => Some(json!(vehicle.disengagement_rate)),
        _ => None,
    }
}

/// 单条件求值
fn evaluate(op: CompareOp, actual: &Value, expected: &Value) -> bool {
    match op {
        CompareOp::Eq => actual == expected,
        CompareOp::Ne => actual != expected,
        CompareOp::Gt => match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(e)) => a > e,
            _ => false,
        },
        CompareOp::Lt => match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(e)) => a < e,
            _ => false,
        },
        CompareOp::In => expected
            .as_array()
            .map_or(false, |items| items.contains(actual)),
        CompareOp::Contains => match (actual.as_str(), expected.as_str()) {
            (Some(a), Some(e)) => a.contains(e),
            _ => false,
        },
        CompareOp::Between => match expected.as_array() {
            Some(bounds) if bounds.len() == 2 => {
                match (actual.as_f64(), bounds[0].as_f64(), bounds[1].as_f64()) {
                    (Some(a), Some(lo), Some(hi)) => lo <= a && a <= hi,
                    _ => false,
                }
            }
            _ => false,
        },
    }
}

/// 条件组求值 (AND 组合, 空条件组恒真)
pub(crate) fn vehicle_matches_conditions(vehicle: &Vehicle, conditions: &[RuleCondition]) -> bool {
    conditions.iter().all(|condition| {
        field_value(vehicle, &condition.field)
            .map_or(false, |actual| evaluate(condition.op, &actual, &condition.value))
    })
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AutonomyLevel, VehicleStatus};

    fn vehicle() -> Vehicle {
        Vehicle {
            vehicle_id: "V1".to_string(),
            name: "AV-V1".to_string(),
            status: VehicleStatus::Available,
            soc: 0.25,
            battery_capacity_kwh: 75.0,
            current_depot_id: Some("D1".to_string()),
            current_resource_id: None,
            city: "shanghai".to_string(),
            autonomy_level: AutonomyLevel::L4,
            avg_daily_distance_km: 200.0,
            energy_per_100km: 18.0,
            utilization_rate: 0.6,
            uptime: 0.97,
            maintenance_cost_per_km: 0.05,
            revenue_per_day: 300.0,
            safety_score: 92.0,
            disengagement_rate: 0.02,
            mileage_km: 30_000.0,
            engine_hours: 1_500.0,
            next_maintenance_date: None,
        }
    }

    fn condition(field: &str, op: CompareOp, value: Value) -> RuleCondition {
        RuleCondition {
            field: field.to_string(),
            op,
            value,
        }
    }

    #[test]
    fn test_numeric_comparisons() {
        let v = vehicle();
        assert!(vehicle_matches_conditions(
            &v,
            &[condition("soc", CompareOp::Lt, json!(0.3))]
        ));
        assert!(!vehicle_matches_conditions(
            &v,
            &[condition("soc", CompareOp::Gt, json!(0.3))]
        ));
        assert!(vehicle_matches_conditions(
            &v,
            &[condition("mileage_km", CompareOp::Between, json!([20_000, 40_000]))]
        ));
    }

    #[test]
    fn test_string_comparisons() {
        let v = vehicle();
        assert!(vehicle_matches_conditions(
            &v,
            &[condition("status", CompareOp::Eq, json!("AVAILABLE"))]
        ));
        assert!(vehicle_matches_conditions(
            &v,
            &[condition("city", CompareOp::In, json!(["beijing", "shanghai"]))]
        ));
        assert!(vehicle_matches_conditions(
            &v,
            &[condition("city", CompareOp::Contains, json!("shang"))]
        ));
    }

    #[test]
    fn test_and_combination() {
        let v = vehicle();
        assert!(vehicle_matches_conditions(
            &v,
            &[
                condition("soc", CompareOp::Lt, json!(0.3)),
                condition("depot_id", CompareOp::Eq, json!("D1")),
            ]
        ));
        // 任一不满足即为假
        assert!(!vehicle_matches_conditions(
            &v,
            &[
                condition("soc", CompareOp::Lt, json!(0.3)),
                condition("depot_id", CompareOp::Eq, json!("D2")),
            ]
        ));
    }

    #[test]
    fn test_unknown_field_is_false() {
        let v = vehicle();
        assert!(!vehicle_matches_conditions(
            &v,
            &[condition("nonexistent", CompareOp::Eq, json!(1))]
        ));
    }

    #[test]
    fn test_type_mismatch_is_false() {
        let v = vehicle();
        // 字符串字段做数值比较 → 假
        assert!(!vehicle_matches_conditions(
            &v,
            &[condition("city", CompareOp::Gt, json!(1))]
        ));
        // between 参数不是二元数组 → 假
        assert!(!vehicle_matches_conditions(
            &v,
            &[condition("soc", CompareOp::Between, json!([0.1]))]
        ));
    }

    #[test]
    fn test_empty_conditions_always_true() {
        assert!(vehicle_matches_conditions(&vehicle(), &[]));
    }
}
