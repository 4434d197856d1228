// ==========================================
// 车队运营核心 - 领域类型定义
// ==========================================
// 红线: 状态与档位一律用封闭枚举, 不用松散字符串
// 序列化格式: SCREAMING_SNAKE_CASE (与外部接口一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 车辆状态 (Vehicle Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,   // 可调度
    Charging,    // 充电中
    Detailing,   // 清洁整备中
    Maintenance, // 维修中
    Active,      // 执行任务中
    Idle,        // 空闲待命
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "AVAILABLE"),
            VehicleStatus::Charging => write!(f, "CHARGING"),
            VehicleStatus::Detailing => write!(f, "DETAILING"),
            VehicleStatus::Maintenance => write!(f, "MAINTENANCE"),
            VehicleStatus::Active => write!(f, "ACTIVE"),
            VehicleStatus::Idle => write!(f, "IDLE"),
        }
    }
}

// ==========================================
// 资源状态 (Resource Status)
// ==========================================
// 充电桩/整备位共用; 只有 Available 可被预订
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    Available,   // 可预订
    Occupied,    // 占用中
    Maintenance, // 检修中
    Reserved,    // 已预留
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceStatus::Available => write!(f, "AVAILABLE"),
            ResourceStatus::Occupied => write!(f, "OCCUPIED"),
            ResourceStatus::Maintenance => write!(f, "MAINTENANCE"),
            ResourceStatus::Reserved => write!(f, "RESERVED"),
        }
    }
}

// ==========================================
// 预订类型 (Assignment Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentKind {
    Charging,  // 充电
    Detailing, // 清洁整备
}

impl fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentKind::Charging => write!(f, "CHARGING"),
            AssignmentKind::Detailing => write!(f, "DETAILING"),
        }
    }
}

// ==========================================
// 预订状态 (Assignment Status)
// ==========================================
// 终态 (Completed/Cancelled) 不参与冲突检测
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Scheduled, // 已排定
    Active,    // 进行中
    Completed, // 已完成
    Cancelled, // 已取消
}

impl AssignmentStatus {
    /// 终态判定: 终态预订释放时间区间
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssignmentStatus::Completed | AssignmentStatus::Cancelled)
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Scheduled => write!(f, "SCHEDULED"),
            AssignmentStatus::Active => write!(f, "ACTIVE"),
            AssignmentStatus::Completed => write!(f, "COMPLETED"),
            AssignmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==========================================
// 紧急档位 (Urgency)
// ==========================================
// 红线: 档位制, 不是评分制; 排序按 rank (Critical 最先)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Low,      // 正常
    Medium,   // 关注
    High,     // 紧急
    Critical, // 红线
}

impl Urgency {
    /// 排序序号: Critical=0 ... Low=3, 越小越靠前
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::Critical => 0,
            Urgency::High => 1,
            Urgency::Medium => 2,
            Urgency::Low => 3,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "LOW"),
            Urgency::Medium => write!(f, "MEDIUM"),
            Urgency::High => write!(f, "HIGH"),
            Urgency::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 自动驾驶等级 (Autonomy Level)
// ==========================================
// 参与事故风险的乘法修正 (L3 x1.2 / L5 x0.8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutonomyLevel {
    L3,
    L4,
    L5,
}

impl fmt::Display for AutonomyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutonomyLevel::L3 => write!(f, "L3"),
            AutonomyLevel::L4 => write!(f, "L4"),
            AutonomyLevel::L5 => write!(f, "L5"),
        }
    }
}

// ==========================================
// 城市天气 (Weather)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weather {
    Clear, // 晴
    Rain,  // 雨
    Snow,  // 雪
    Fog,   // 雾
}

impl Weather {
    /// 恶劣天气判定 (事故风险 x1.3)
    pub fn is_adverse(&self) -> bool {
        !matches!(self, Weather::Clear)
    }
}

// ==========================================
// 城市交通 (Traffic)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Traffic {
    Light,    // 畅通
    Moderate, // 一般
    Heavy,    // 拥堵
}

// ==========================================
// 充电排队策略 (Charging Strategy)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargingStrategy {
    UrgentFirst,    // 电量升序, 最缺电优先
    Balanced,       // 电量+利用率之和升序
    RevenueOptimal, // 日收入降序
    OffPeak,        // 电量升序, 面向错峰延后排程
}

impl fmt::Display for ChargingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargingStrategy::UrgentFirst => write!(f, "urgent_first"),
            ChargingStrategy::Balanced => write!(f, "balanced"),
            ChargingStrategy::RevenueOptimal => write!(f, "revenue_optimal"),
            ChargingStrategy::OffPeak => write!(f, "off_peak"),
        }
    }
}

// ==========================================
// 调车选择标准 (Selection Criteria)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionCriteria {
    HighestSoc,        // 电量降序
    LowestUtilization, // 利用率升序
    OldestAtDepot,     // 里程降序 (驻场时长代理值)
}

impl fmt::Display for SelectionCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionCriteria::HighestSoc => write!(f, "highest_soc"),
            SelectionCriteria::LowestUtilization => write!(f, "lowest_utilization"),
            SelectionCriteria::OldestAtDepot => write!(f, "oldest_at_depot"),
        }
    }
}

// ==========================================
// 优化目标 (Optimize Objective)
// ==========================================
// 目标只随指标回显, 不改变贪心配对 (已知限制)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeObjective {
    MinimizeWait,
    MaximizeUtilization,
    MinimizeEnergyCost,
}

impl fmt::Display for OptimizeObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeObjective::MinimizeWait => write!(f, "minimize_wait"),
            OptimizeObjective::MaximizeUtilization => write!(f, "maximize_utilization"),
            OptimizeObjective::MinimizeEnergyCost => write!(f, "minimize_energy_cost"),
        }
    }
}

// ==========================================
// 需求预测粒度 (Demand Granularity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandGranularity {
    Hourly, // 1小时
    Shift,  // 8小时
    Daily,  // 24小时
}

impl DemandGranularity {
    /// 单个预测区间的小时数
    pub fn interval_hours(&self) -> i64 {
        match self {
            DemandGranularity::Hourly => 1,
            DemandGranularity::Shift => 8,
            DemandGranularity::Daily => 24,
        }
    }
}
