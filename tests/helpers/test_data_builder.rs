// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fleet_ops_core::domain::types::{
    AutonomyLevel, ResourceStatus, VehicleStatus,
};
use fleet_ops_core::domain::{CityConditions, Depot, DepotResource, ResourceKind, Vehicle};
use fleet_ops_core::store::FleetStore;
use std::sync::Arc;

/// 基准时点: 2026-03-01 08:00 UTC
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

// ==========================================
// Vehicle 构建器
// ==========================================

pub struct VehicleBuilder {
    vehicle: Vehicle,
}

impl VehicleBuilder {
    pub fn new(vehicle_id: &str) -> Self {
        Self {
            vehicle: Vehicle {
                vehicle_id: vehicle_id.to_string(),
                name: format!("AV-{}", vehicle_id),
                status: VehicleStatus::Available,
                soc: 0.5,
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
            },
        }
    }

    pub fn soc(mut self, soc: f64) -> Self {
        self.vehicle.soc = soc;
        self
    }

    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.vehicle.status = status;
        self
    }

    pub fn depot(mut self, depot_id: &str) -> Self {
        self.vehicle.current_depot_id = Some(depot_id.to_string());
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.vehicle.city = city.to_string();
        self
    }

    pub fn capacity_kwh(mut self, capacity: f64) -> Self {
        self.vehicle.battery_capacity_kwh = capacity;
        self
    }

    pub fn autonomy(mut self, level: AutonomyLevel) -> Self {
        self.vehicle.autonomy_level = level;
        self
    }

    pub fn safety_score(mut self, score: f64) -> Self {
        self.vehicle.safety_score = score;
        self
    }

    pub fn mileage(mut self, mileage_km: f64) -> Self {
        self.vehicle.mileage_km = mileage_km;
        self
    }

    pub fn engine_hours(mut self, hours: f64) -> Self {
        self.vehicle.engine_hours = hours;
        self
    }

    pub fn next_maintenance(mut self, date: NaiveDate) -> Self {
        self.vehicle.next_maintenance_date = Some(date);
        self
    }

    pub fn uptime(mut self, uptime: f64) -> Self {
        self.vehicle.uptime = uptime;
        self
    }

    pub fn utilization(mut self, rate: f64) -> Self {
        self.vehicle.utilization_rate = rate;
        self
    }

    pub fn revenue(mut self, revenue_per_day: f64) -> Self {
        self.vehicle.revenue_per_day = revenue_per_day;
        self
    }

    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}

// ==========================================
// 资源位/场站构建辅助
// ==========================================

pub fn charging_stall(resource_id: &str, depot_id: &str, power_kw: f64) -> DepotResource {
    DepotResource {
        resource_id: resource_id.to_string(),
        depot_id: depot_id.to_string(),
        kind: ResourceKind::ChargingStall { power_kw },
        status: ResourceStatus::Available,
        occupying_vehicle_id: None,
        reserved_until: None,
    }
}

pub fn detailing_bay(resource_id: &str, depot_id: &str) -> DepotResource {
    DepotResource {
        resource_id: resource_id.to_string(),
        depot_id: depot_id.to_string(),
        kind: ResourceKind::DetailingBay,
        status: ResourceStatus::Available,
        occupying_vehicle_id: None,
        reserved_until: None,
    }
}

pub fn depot(depot_id: &str, capacity: usize) -> Depot {
    Depot {
        depot_id: depot_id.to_string(),
        name: format!("场站-{}", depot_id),
        city: "shanghai".to_string(),
        vehicle_capacity: capacity,
    }
}

/// 标准场站: D1 含 2 桩 (250kW/150kW) + 1 整备位
pub fn standard_store() -> Arc<FleetStore> {
    let store = Arc::new(FleetStore::new());
    store.upsert_depot(depot("D1", 20));
    store.upsert_resource(charging_stall("S1", "D1", 250.0));
    store.upsert_resource(charging_stall("S2", "D1", 150.0));
    store.upsert_resource(detailing_bay("B1", "D1"));
    store.set_city_conditions("shanghai", CityConditions::default());
    store
}
