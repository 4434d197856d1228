// ==========================================
// 车队运营核心 - 自动化API
// ==========================================
// 职责: 自动化规则引擎的调度集成门面
// 规则CRUD / 评估 / 自动排队 / 调车 / 执行日志
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{validate_count, validate_fraction};
use crate::domain::types::{ChargingStrategy, SelectionCriteria};
use crate::domain::{AutomationExecution, AutomationRule, MaintenanceCategory};
use crate::engine::automation::queueing::{ChargingQueueProposal, MaintenanceQueueProposal};
use crate::engine::automation::rebalance::RebalancePlan;
use crate::engine::automation::AutomationEngine;
use std::sync::Arc;

// ==========================================
// AutomationApi - 自动化API
// ==========================================
pub struct AutomationApi {
    engine: Arc<AutomationEngine>,
}

impl AutomationApi {
    pub fn new(engine: Arc<AutomationEngine>) -> Self {
        Self { engine }
    }

    // ==========================================
    // 规则管理
    // ==========================================

    pub fn get_rules(&self) -> Vec<AutomationRule> {
        self.engine.rules()
    }

    pub fn get_rule(&self, rule_id: &str) -> Option<AutomationRule> {
        self.engine.rule(rule_id)
    }

    pub fn add_rule(&self, rule: AutomationRule) -> String {
        self.engine.add_rule(rule)
    }

    pub fn remove_rule(&self, rule_id: &str) -> bool {
        self.engine.remove_rule(rule_id)
    }

    pub fn enable_rule(&self, rule_id: &str) -> bool {
        self.engine.enable_rule(rule_id)
    }

    pub fn disable_rule(&self, rule_id: &str) -> bool {
        self.engine.disable_rule(rule_id)
    }

    // ==========================================
    // 评估与自动排队
    // ==========================================

    /// 评估全部规则
    pub fn evaluate_rules(&self) -> Vec<AutomationExecution> {
        self.engine.evaluate_rules()
    }

    /// 充电自动排队提案
    pub fn auto_queue_charging(
        &self,
        depot_filter: Option<&str>,
        city_filter: Option<&str>,
        strategy: ChargingStrategy,
        max_concurrent: usize,
        soc_threshold: f64,
        dry_run: bool,
    ) -> ApiResult<ChargingQueueProposal> {
        let max_concurrent = validate_count("max_concurrent", max_concurrent)?;
        let threshold = validate_fraction("soc_threshold", soc_threshold)?;
        Ok(self.engine.auto_queue_charging(
            depot_filter,
            city_filter,
            strategy,
            max_concurrent,
            threshold,
            dry_run,
        ))
    }

    /// 维保自动排队提案
    pub fn auto_queue_maintenance(
        &self,
        risk_threshold: f64,
        category_filter: Option<MaintenanceCategory>,
        depot_filter: Option<&str>,
    ) -> ApiResult<MaintenanceQueueProposal> {
        let threshold = validate_fraction("risk_threshold", risk_threshold)?;
        Ok(self
            .engine
            .auto_queue_maintenance(threshold, category_filter, depot_filter))
    }

    /// 车队调车提案
    pub fn auto_rebalance_fleet(
        &self,
        source_depot: Option<&str>,
        target_depot: Option<&str>,
        vehicle_count: usize,
        criteria: SelectionCriteria,
    ) -> ApiResult<RebalancePlan> {
        let count = validate_count("vehicle_count", vehicle_count)?;
        Ok(self
            .engine
            .auto_rebalance_fleet(source_depot, target_depot, count, criteria))
    }

    // ==========================================
    // 事件上报与执行日志
    // ==========================================

    pub fn report_incident(&self, vehicle_id: &str) {
        self.engine.report_incident(vehicle_id)
    }

    pub fn report_anomaly(&self, vehicle_id: &str) {
        self.engine.report_anomaly(vehicle_id)
    }

    pub fn get_executions(&self, limit: Option<usize>) -> Vec<AutomationExecution> {
        self.engine.executions(limit)
    }

    pub fn clear_executions(&self) -> usize {
        self.engine.clear_executions()
    }
}
