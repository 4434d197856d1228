// ==========================================
// 车队运营核心 - 运营参数配置
// ==========================================
// 职责: 调度/预测/自动化引擎的可调参数
// 存储: 进程内, 支持 JSON 快照/恢复 (版本重现用)
// ==========================================

use serde::{Deserialize, Serialize};

/// 运营参数全集
///
/// 引擎构造时按值注入; 运行期不热更
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpsConfig {
    /// 充电目标 SOC (排队资格线与充至目标共用)
    pub charge_target_soc: f64,
    /// 充时估算用快充功率 (kW)
    pub fast_charge_power_kw: f64,
    /// 日均活跃小时数 (SOC 耗电速率折算)
    pub active_hours_per_day: f64,
    /// 优化方案中相邻配对的错峰间隔 (分钟)
    pub optimize_stagger_minutes: i64,
    /// 自动排队默认 SOC 阈值
    pub queue_soc_threshold: f64,
    /// 场站需求基数系数 (x 场站车辆数)
    pub demand_base_factor: f64,
    /// 需求高峰判定线 (%)
    pub demand_peak_threshold_pct: f64,
    /// 置信度基数与系数
    pub confidence_base: f64,
    pub confidence_per_data_point: f64,
    pub confidence_floor: f64,
    pub confidence_ceiling: f64,
    /// 每个负向因子的置信度扣减
    pub negative_factor_penalty: f64,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            charge_target_soc: 0.80,
            fast_charge_power_kw: 250.0,
            active_hours_per_day: 12.0,
            optimize_stagger_minutes: 10,
            queue_soc_threshold: 0.40,
            demand_base_factor: 0.3,
            demand_peak_threshold_pct: 80.0,
            confidence_base: 0.5,
            confidence_per_data_point: 0.02,
            confidence_floor: 0.3,
            confidence_ceiling: 0.95,
            negative_factor_penalty: 0.05,
        }
    }
}

impl OpsConfig {
    /// 导出配置快照 (JSON)
    ///
    /// # 用途
    /// - 生成优化方案/预测时记录参数快照, 保证结果可复现
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 从配置快照恢复
    pub fn from_snapshot_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = OpsConfig::default();
        assert_eq!(cfg.charge_target_soc, 0.80);
        assert_eq!(cfg.fast_charge_power_kw, 250.0);
        assert_eq!(cfg.active_hours_per_day, 12.0);
        assert_eq!(cfg.optimize_stagger_minutes, 10);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut cfg = OpsConfig::default();
        cfg.queue_soc_threshold = 0.35;

        let snapshot = cfg.snapshot_json().unwrap();
        let restored = OpsConfig::from_snapshot_json(&snapshot).unwrap();
        assert_eq!(restored.queue_soc_threshold, 0.35);
        assert_eq!(restored.charge_target_soc, 0.80);
    }
}
