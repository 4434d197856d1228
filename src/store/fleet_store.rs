// ==========================================
// 车队运营核心 - 车队状态仓储
// ==========================================
// 职责: 车辆/场站/资源位/预订的共享快照
// 并发: 单个读写锁; 预订路径在写锁内校验+变更, 保证原子性
// 红线: 状态变更只经 ResourceScheduler, 其余组件只读
// ==========================================

use crate::domain::{
    CityConditions, Depot, DepotResource, ScheduleAssignment, Vehicle,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

// ==========================================
// FleetState - 车队快照
// ==========================================
// BTreeMap 保证按标识有序遍历 (功率并列时按资源位ID裁决)
#[derive(Debug, Default)]
pub struct FleetState {
    pub vehicles: BTreeMap<String, Vehicle>,
    pub depots: BTreeMap<String, Depot>,
    pub resources: BTreeMap<String, DepotResource>,
    pub assignments: Vec<ScheduleAssignment>,
    /// 城市环境 (key: 城市名)
    pub city_conditions: HashMap<String, CityConditions>,
}

impl FleetState {
    /// 指定场站的车辆 (按ID序)
    pub fn vehicles_at_depot(&self, depot_id: &str) -> Vec<&Vehicle> {
        self.vehicles
            .values()
            .filter(|v| v.is_at_depot(depot_id))
            .collect()
    }

    /// 指定场站的资源位 (按ID序)
    pub fn resources_at_depot(&self, depot_id: &str) -> Vec<&DepotResource> {
        self.resources
            .values()
            .filter(|r| r.depot_id == depot_id)
            .collect()
    }

    /// 指定资源位的非终态预订
    pub fn open_assignments_for(&self, resource_id: &str) -> Vec<&ScheduleAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.resource_id == resource_id && !a.status.is_terminal())
            .collect()
    }

    /// 车辆所在城市的环境 (缺省: 晴/畅通)
    pub fn conditions_for_city(&self, city: &str) -> CityConditions {
        self.city_conditions.get(city).copied().unwrap_or_default()
    }
}

// ==========================================
// FleetStore - 共享仓储句柄
// ==========================================
pub struct FleetStore {
    state: RwLock<FleetState>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FleetState::default()),
        }
    }

    pub fn with_state(state: FleetState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// 读访问 (可并发)
    pub fn read<R>(&self, f: impl FnOnce(&FleetState) -> R) -> R {
        let guard = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// 写访问 (独占; 校验与变更须在同一次写锁内完成)
    pub fn write<R>(&self, f: impl FnOnce(&mut FleetState) -> R) -> R {
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    // ==========================================
    // 装配辅助 (初始化/测试夹具)
    // ==========================================

    pub fn upsert_vehicle(&self, vehicle: Vehicle) {
        self.write(|s| {
            s.vehicles.insert(vehicle.vehicle_id.clone(), vehicle);
        });
    }

    pub fn upsert_depot(&self, depot: Depot) {
        self.write(|s| {
            s.depots.insert(depot.depot_id.clone(), depot);
        });
    }

    pub fn upsert_resource(&self, resource: DepotResource) {
        self.write(|s| {
            s.resources.insert(resource.resource_id.clone(), resource);
        });
    }

    pub fn set_city_conditions(&self, city: &str, conditions: CityConditions) {
        self.write(|s| {
            s.city_conditions.insert(city.to_string(), conditions);
        });
    }
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new()
    }
}
