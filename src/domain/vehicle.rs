// ==========================================
// 车队运营核心 - 车辆实体
// ==========================================
// 职责: 车辆主数据 + 运营/安全指标
// 写入方: 仅 ResourceScheduler (状态/位置)
// ==========================================

use crate::domain::types::{AutonomyLevel, VehicleStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 车辆实体
///
/// soc 取值 0.0-1.0; safety_score 取值 0-100
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    pub name: String,
    pub status: VehicleStatus,

    // 电池
    pub soc: f64,
    pub battery_capacity_kwh: f64,

    // 位置
    pub current_depot_id: Option<String>,
    /// 预订成功后记录的资源位 (充电桩/整备位)
    pub current_resource_id: Option<String>,
    pub city: String,

    // 自动驾驶
    pub autonomy_level: AutonomyLevel,

    // 运营指标
    pub avg_daily_distance_km: f64,
    pub energy_per_100km: f64,
    pub utilization_rate: f64,
    pub uptime: f64,
    pub maintenance_cost_per_km: f64,
    pub revenue_per_day: f64,

    // 安全指标
    pub safety_score: f64,
    pub disengagement_rate: f64,

    // 维保
    pub mileage_km: f64,
    pub engine_hours: f64,
    pub next_maintenance_date: Option<NaiveDate>,
}

impl Vehicle {
    /// 是否位于指定场站
    pub fn is_at_depot(&self, depot_id: &str) -> bool {
        self.current_depot_id.as_deref() == Some(depot_id)
    }

    /// 是否处于排程豁免状态 (充电中/维修中不参与充电预测与排队)
    pub fn is_exempt_from_charging(&self) -> bool {
        matches!(
            self.status,
            VehicleStatus::Charging | VehicleStatus::Maintenance
        )
    }
}
