// ==========================================
// 车队运营核心 - 自动化规则实体
// ==========================================
// 职责: 触发器/条件/动作的封闭和类型 + 规则与执行日志
// 红线: 触发器与动作一律用带标签的枚举, 编译期穷尽检查
// ==========================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// 触发器 (Rule Trigger)
// ==========================================
// 每个变体只携带自己相关的字段

/// SOC 阈值方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdDirection {
    Below,
    Above,
}

/// 预测类别 (prediction_confidence 触发器用)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    Charging,
    Maintenance,
    Incident,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleTrigger {
    /// SOC 越过阈值 (方向可配)
    SocThreshold {
        threshold: f64,
        direction: ThresholdDirection,
    },
    /// N 天内到期的维保
    MaintenanceDue { within_days: i64 },
    /// 委托风险预测引擎, 按预测置信度触发
    PredictionConfidence {
        prediction: PredictionKind,
        min_confidence: f64,
    },
    /// 空闲待命车辆
    VehicleIdle,
    /// 场站资源占用率达到阈值
    DepotCapacity {
        depot_id: Option<String>,
        threshold: f64,
    },
    /// 固定间隔定时触发, 命中全部车辆
    Schedule { interval_minutes: i64 },
    /// 事件触发: 新建事故 (经 report_incident 入箱)
    IncidentCreated,
    /// 事件触发: 检测到异常 (经 report_anomaly 入箱)
    AnomalyDetected,
}

// ==========================================
// 条件 (Rule Condition)
// ==========================================

/// 比较算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    In,
    Contains,
    Between,
}

/// 字段级谓词, 对车辆快照求值, 条件间 AND 组合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub field: String,
    pub op: CompareOp,
    pub value: serde_json::Value,
}

// ==========================================
// 动作 (Rule Action)
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleAction {
    CreateJob { job_type: String },
    Notify { channel: String },
    Escalate { level: String },
    QueueForCharging,
    QueueForMaintenance,
    CreateAlert { severity: String },
    Rebalance,
}

impl RuleAction {
    /// 动作类型标签, 用于执行日志
    pub fn kind(&self) -> &'static str {
        match self {
            RuleAction::CreateJob { .. } => "create_job",
            RuleAction::Notify { .. } => "notify",
            RuleAction::Escalate { .. } => "escalate",
            RuleAction::QueueForCharging => "queue_for_charging",
            RuleAction::QueueForMaintenance => "queue_for_maintenance",
            RuleAction::CreateAlert { .. } => "create_alert",
            RuleAction::Rebalance => "rebalance",
        }
    }
}

// ==========================================
// 自动化规则 (Automation Rule)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationRule {
    pub rule_id: String,
    pub name: String,
    pub enabled: bool,
    pub trigger: RuleTrigger,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
    pub cooldown_minutes: i64,
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub execution_count: u64,
}

impl AutomationRule {
    /// 构造新规则 (默认启用, 无冷却)
    pub fn new(name: &str, trigger: RuleTrigger, actions: Vec<RuleAction>) -> Self {
        Self {
            rule_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            enabled: true,
            trigger,
            conditions: Vec::new(),
            actions,
            cooldown_minutes: 0,
            last_triggered_at: None,
            execution_count: 0,
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<RuleCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_cooldown(mut self, minutes: i64) -> Self {
        self.cooldown_minutes = minutes;
        self
    }

    /// 冷却判定: 从未触发, 或距上次触发已满 cooldown_minutes
    pub fn cooldown_elapsed(&self, now: DateTime<Utc>) -> bool {
        match self.last_triggered_at {
            None => true,
            Some(last) => now - last >= Duration::minutes(self.cooldown_minutes),
        }
    }
}

// ==========================================
// 执行日志 (Automation Execution)
// ==========================================
// 只追加, 不修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationExecution {
    pub execution_id: String,
    pub rule_id: String,
    pub executed_at: DateTime<Utc>,
    pub vehicle_ids: Vec<String>,
    pub action_kinds: Vec<String>,
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cooldown_elapsed_never_triggered() {
        let rule = AutomationRule::new(
            "low-soc",
            RuleTrigger::SocThreshold {
                threshold: 0.2,
                direction: ThresholdDirection::Below,
            },
            vec![RuleAction::QueueForCharging],
        )
        .with_cooldown(30);

        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        assert!(rule.cooldown_elapsed(now));
    }

    #[test]
    fn test_cooldown_boundary() {
        let mut rule = AutomationRule::new(
            "low-soc",
            RuleTrigger::VehicleIdle,
            vec![RuleAction::Notify {
                channel: "ops".to_string(),
            }],
        )
        .with_cooldown(30);

        let fired = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        rule.last_triggered_at = Some(fired);

        // 29 分钟: 未满
        assert!(!rule.cooldown_elapsed(fired + Duration::minutes(29)));
        // 正好 30 分钟: 已满 (>=)
        assert!(rule.cooldown_elapsed(fired + Duration::minutes(30)));
    }

    #[test]
    fn test_trigger_serde_tagged() {
        let trigger = RuleTrigger::SocThreshold {
            threshold: 0.25,
            direction: ThresholdDirection::Below,
        };
        let json = serde_json::to_string(&trigger).unwrap();
        assert!(json.contains("\"type\":\"soc_threshold\""));
        assert!(json.contains("\"direction\":\"below\""));

        let back: RuleTrigger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trigger);
    }

    #[test]
    fn test_action_kind_labels() {
        assert_eq!(RuleAction::QueueForCharging.kind(), "queue_for_charging");
        assert_eq!(
            RuleAction::CreateAlert {
                severity: "high".to_string()
            }
            .kind(),
            "create_alert"
        );
    }
}
