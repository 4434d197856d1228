// ==========================================
// 车队运营核心 - 场站资源实体
// ==========================================
// 职责: 场站/资源位/城市环境主数据
// 写入方: 仅 ResourceScheduler (预订成功/释放)
// ==========================================

use crate::domain::types::{ResourceStatus, Traffic, Weather};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 场站 (Depot)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Depot {
    pub depot_id: String,
    pub name: String,
    pub city: String,
    /// 车位容量, 用于调车利用率计算
    pub vehicle_capacity: usize,
}

// ==========================================
// 城市环境 (City Conditions)
// ==========================================
// 事故风险模型的环境输入
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CityConditions {
    pub weather: Weather,
    pub traffic: Traffic,
}

impl Default for CityConditions {
    fn default() -> Self {
        Self {
            weather: Weather::Clear,
            traffic: Traffic::Light,
        }
    }
}

// ==========================================
// 资源位类型 (Resource Kind)
// ==========================================
// 充电桩携带功率; 整备位无功率字段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceKind {
    ChargingStall { power_kw: f64 },
    DetailingBay,
}

impl ResourceKind {
    pub fn is_stall(&self) -> bool {
        matches!(self, ResourceKind::ChargingStall { .. })
    }

    pub fn is_bay(&self) -> bool {
        matches!(self, ResourceKind::DetailingBay)
    }
}

// ==========================================
// 场站资源位 (Depot Resource)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotResource {
    pub resource_id: String,
    pub depot_id: String,
    pub kind: ResourceKind,
    pub status: ResourceStatus,
    pub occupying_vehicle_id: Option<String>,
    pub reserved_until: Option<DateTime<Utc>>,
}

impl DepotResource {
    /// 功率排序值: 充电桩取额定功率, 整备位记 0
    pub fn power_kw(&self) -> f64 {
        match self.kind {
            ResourceKind::ChargingStall { power_kw } => power_kw,
            ResourceKind::DetailingBay => 0.0,
        }
    }

    /// 是否可被预订
    pub fn is_bookable(&self) -> bool {
        self.status == ResourceStatus::Available
    }
}
