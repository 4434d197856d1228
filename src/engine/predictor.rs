// ==========================================
// 车队运营核心 - 风险预测引擎
// ==========================================
// 职责: 充电需求/维保风险/事故风险/场站需求预测
// 红线: 无状态, 只读快照, 空输入不报错 (置信度记 0)
// 输出: PredictionResult (置信度 + 具名因子)
// ==========================================

pub mod charging;
pub mod demand;
pub mod incident;
pub mod maintenance;
pub mod summary;

use crate::config::OpsConfig;
use crate::domain::{FactorPolarity, PredictionFactor};
use crate::store::{Clock, FleetStore};
use std::sync::Arc;

// ==========================================
// RiskPredictor - 风险预测引擎
// ==========================================
pub struct RiskPredictor {
    store: Arc<FleetStore>,
    clock: Arc<dyn Clock>,
    config: OpsConfig,
}

impl RiskPredictor {
    pub fn new(store: Arc<FleetStore>, clock: Arc<dyn Clock>, config: OpsConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub(crate) fn store(&self) -> &FleetStore {
        &self.store
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn config(&self) -> &OpsConfig {
        &self.config
    }

    // ==========================================
    // 共享置信度计算
    // ==========================================

    /// 置信度 = clamp(0.5 + 0.02 * 样本数, 0.3, 0.95) - 0.05 * 负向因子数, 再夹取
    ///
    /// 空输入直接记 0 (无数据不给置信度)
    pub(crate) fn confidence(&self, data_points: usize, factors: &[PredictionFactor]) -> f64 {
        if data_points == 0 {
            return 0.0;
        }
        let cfg = &self.config;
        let base = (cfg.confidence_base + cfg.confidence_per_data_point * data_points as f64)
            .clamp(cfg.confidence_floor, cfg.confidence_ceiling);
        let negative_count = factors
            .iter()
            .filter(|f| f.polarity == FactorPolarity::Negative)
            .count();
        (base - cfg.negative_factor_penalty * negative_count as f64)
            .clamp(cfg.confidence_floor, cfg.confidence_ceiling)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FixedClock;
    use chrono::{TimeZone, Utc};

    fn predictor() -> RiskPredictor {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        RiskPredictor::new(
            Arc::new(FleetStore::new()),
            Arc::new(FixedClock::new(t0)),
            OpsConfig::default(),
        )
    }

    fn negative_factor() -> PredictionFactor {
        PredictionFactor::new("n", 0.5, 1.0, FactorPolarity::Negative)
    }

    #[test]
    fn test_confidence_zero_on_empty_input() {
        let p = predictor();
        assert_eq!(p.confidence(0, &[]), 0.0);
    }

    #[test]
    fn test_confidence_base_growth_and_ceiling() {
        let p = predictor();
        // 10 个样本: 0.5 + 0.2 = 0.7
        assert!((p.confidence(10, &[]) - 0.7).abs() < 1e-9);
        // 样本极多时夹取到 0.95
        assert_eq!(p.confidence(1000, &[]), 0.95);
    }

    #[test]
    fn test_confidence_negative_factor_penalty() {
        let p = predictor();
        let factors = vec![negative_factor(), negative_factor()];
        // 0.7 - 2*0.05 = 0.6
        assert!((p.confidence(10, &factors) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_floor_after_penalty() {
        let p = predictor();
        let factors: Vec<_> = (0..10).map(|_| negative_factor()).collect();
        // 大量负向因子, 仍不低于下限 0.3
        assert_eq!(p.confidence(1, &factors), 0.3);
    }
}
