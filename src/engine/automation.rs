// ==========================================
// 车队运营核心 - 自动化规则引擎
// ==========================================
// 职责: 规则管理 + 触发评估 + 自动排队提案 + 执行日志
// 红线: 规则互不影响 (单条失败不中断本轮); 冷却期内不重复触发
// 红线: 本引擎只产出提案, 预订提交走 ResourceScheduler
// ==========================================

pub mod conditions;
pub mod queueing;
pub mod rebalance;
pub mod triggers;

use crate::config::OpsConfig;
use crate::domain::{
    AutomationExecution, AutomationRule, Depot, DepotResource, RuleTrigger, Vehicle,
};
use crate::engine::automation::conditions::vehicle_matches_conditions;
use crate::engine::predictor::RiskPredictor;
use crate::store::{Clock, FleetStore};
use serde_json::json;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// EvalSnapshot - 单轮评估快照
// ==========================================
// 一轮评估只读一次仓储, 规则间共享同一份快照
#[derive(Debug, Clone)]
pub(crate) struct EvalSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub resources: Vec<DepotResource>,
    pub depots: Vec<Depot>,
}

// ==========================================
// AutomationEngine - 自动化规则引擎
// ==========================================
pub struct AutomationEngine {
    store: Arc<FleetStore>,
    clock: Arc<dyn Clock>,
    predictor: RiskPredictor,
    config: OpsConfig,

    // 规则集与执行日志各自独立加锁, 触发字段更新不与预订吞吐竞争
    rules: Mutex<Vec<AutomationRule>>,
    executions: Mutex<Vec<AutomationExecution>>,

    // 事件触发器收件箱 (report_incident / report_anomaly 喂入, 触发后消费)
    pending_incidents: Mutex<Vec<String>>,
    pending_anomalies: Mutex<Vec<String>>,
}

impl AutomationEngine {
    pub fn new(store: Arc<FleetStore>, clock: Arc<dyn Clock>, config: OpsConfig) -> Self {
        let predictor = RiskPredictor::new(store.clone(), clock.clone(), config.clone());
        Self {
            store,
            clock,
            predictor,
            config,
            rules: Mutex::new(Vec::new()),
            executions: Mutex::new(Vec::new()),
            pending_incidents: Mutex::new(Vec::new()),
            pending_anomalies: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn store(&self) -> &FleetStore {
        &self.store
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn predictor(&self) -> &RiskPredictor {
        &self.predictor
    }

    pub(crate) fn config(&self) -> &OpsConfig {
        &self.config
    }

    // ==========================================
    // 规则管理
    // ==========================================

    pub fn add_rule(&self, rule: AutomationRule) -> String {
        let rule_id = rule.rule_id.clone();
        self.lock_rules().push(rule);
        rule_id
    }

    pub fn rules(&self) -> Vec<AutomationRule> {
        self.lock_rules().clone()
    }

    pub fn rule(&self, rule_id: &str) -> Option<AutomationRule> {
        self.lock_rules()
            .iter()
            .find(|r| r.rule_id == rule_id)
            .cloned()
    }

    /// 移除规则; 返回是否存在
    pub fn remove_rule(&self, rule_id: &str) -> bool {
        let mut rules = self.lock_rules();
        let before = rules.len();
        rules.retain(|r| r.rule_id != rule_id);
        rules.len() != before
    }

    pub fn enable_rule(&self, rule_id: &str) -> bool {
        self.set_enabled(rule_id, true)
    }

    pub fn disable_rule(&self, rule_id: &str) -> bool {
        self.set_enabled(rule_id, false)
    }

    fn set_enabled(&self, rule_id: &str, enabled: bool) -> bool {
        let mut rules = self.lock_rules();
        match rules.iter_mut().find(|r| r.rule_id == rule_id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    // ==========================================
    // 事件收件箱
    // ==========================================

    /// 上报事故事件 (incident_created 触发器输入)
    pub fn report_incident(&self, vehicle_id: &str) {
        let mut inbox = self.lock_inbox(&self.pending_incidents);
        if !inbox.iter().any(|id| id == vehicle_id) {
            inbox.push(vehicle_id.to_string());
        }
    }

    /// 上报异常事件 (anomaly_detected 触发器输入)
    pub fn report_anomaly(&self, vehicle_id: &str) {
        let mut inbox = self.lock_inbox(&self.pending_anomalies);
        if !inbox.iter().any(|id| id == vehicle_id) {
            inbox.push(vehicle_id.to_string());
        }
    }

    // ==========================================
    // 规则评估
    // ==========================================

    /// 评估全部规则 (按插入顺序)
    ///
    /// 每条启用且冷却已满的规则: 触发匹配 → 条件收窄 → 命中车辆非空则记一次执行,
    /// 更新 last_triggered_at / execution_count。动作只记录, 不对外调用。
    /// 单条规则评估失败记 success=false, 不影响后续规则。
    #[instrument(skip(self))]
    pub fn evaluate_rules(&self) -> Vec<AutomationExecution> {
        let now = self.clock.now();
        let snapshot = self.snapshot();

        // 整轮持有规则锁: 并发评估互斥, 触发字段更新不竞争
        let mut rules = self.lock_rules();
        let mut fired = Vec::new();

        for rule in rules.iter_mut() {
            if !rule.enabled || !rule.cooldown_elapsed(now) {
                continue;
            }

            let matched = match self.match_trigger(&rule.trigger, rule.last_triggered_at, &snapshot)
            {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(rule_id = %rule.rule_id, "RULE_EVAL_FAILED: {}", err);
                    let execution = self.record_execution(
                        rule,
                        now,
                        Vec::new(),
                        false,
                        format!("RULE_EVAL_FAILED: {}", err),
                    );
                    fired.push(execution);
                    continue;
                }
            };

            // 条件收窄 (AND 组合)
            let narrowed: Vec<String> = matched
                .into_iter()
                .filter(|id| {
                    snapshot
                        .vehicles
                        .iter()
                        .find(|v| &v.vehicle_id == id)
                        .map_or(false, |v| vehicle_matches_conditions(v, &rule.conditions))
                })
                .collect();

            if narrowed.is_empty() {
                continue;
            }

            // 规则触发
            rule.last_triggered_at = Some(now);
            rule.execution_count += 1;
            self.consume_events(&rule.trigger, &narrowed);

            let message = json!({
                "rule": rule.name,
                "matched_vehicles": narrowed.len(),
                "actions": rule.actions.iter().map(|a| a.kind()).collect::<Vec<_>>(),
            })
            .to_string();

            info!(rule_id = %rule.rule_id, matched = narrowed.len(), "RULE_FIRED");
            let execution = self.record_execution(rule, now, narrowed, true, message);
            fired.push(execution);
        }

        fired
    }

    // ==========================================
    // 执行日志
    // ==========================================

    /// 执行日志查询 (倒序, 最新在前; limit=None 取全部)
    pub fn executions(&self, limit: Option<usize>) -> Vec<AutomationExecution> {
        let log = self.lock_executions();
        let mut entries: Vec<AutomationExecution> = log.iter().rev().cloned().collect();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    /// 清空执行日志; 返回清除条数
    pub fn clear_executions(&self) -> usize {
        let mut log = self.lock_executions();
        let count = log.len();
        log.clear();
        count
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    pub(crate) fn snapshot(&self) -> EvalSnapshot {
        self.store.read(|s| EvalSnapshot {
            vehicles: s.vehicles.values().cloned().collect(),
            resources: s.resources.values().cloned().collect(),
            depots: s.depots.values().cloned().collect(),
        })
    }

    fn record_execution(
        &self,
        rule: &AutomationRule,
        now: chrono::DateTime<chrono::Utc>,
        vehicle_ids: Vec<String>,
        success: bool,
        message: String,
    ) -> AutomationExecution {
        let execution = AutomationExecution {
            execution_id: Uuid::new_v4().to_string(),
            rule_id: rule.rule_id.clone(),
            executed_at: now,
            vehicle_ids,
            action_kinds: rule.actions.iter().map(|a| a.kind().to_string()).collect(),
            success,
            message,
        };
        self.lock_executions().push(execution.clone());
        execution
    }

    /// 事件触发器触发后消费收件箱中命中的车辆
    fn consume_events(&self, trigger: &RuleTrigger, fired_ids: &[String]) {
        let inbox = match trigger {
            RuleTrigger::IncidentCreated => &self.pending_incidents,
            RuleTrigger::AnomalyDetected => &self.pending_anomalies,
            _ => return,
        };
        let mut inbox = self.lock_inbox(inbox);
        inbox.retain(|id| !fired_ids.contains(id));
    }

    fn lock_rules(&self) -> std::sync::MutexGuard<'_, Vec<AutomationRule>> {
        self.rules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_executions(&self) -> std::sync::MutexGuard<'_, Vec<AutomationExecution>> {
        self.executions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_inbox<'a>(
        &self,
        inbox: &'a Mutex<Vec<String>>,
    ) -> std::sync::MutexGuard<'a, Vec<String>> {
        inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn pending_incident_ids(&self) -> Vec<String> {
        self.lock_inbox(&self.pending_incidents).clone()
    }

    pub(crate) fn pending_anomaly_ids(&self) -> Vec<String> {
        self.lock_inbox(&self.pending_anomalies).clone()
    }
}
