// ==========================================
// 车队运营核心 - 调度边界参数校验
// ==========================================
// 职责: 调用方参数范围校验与时间戳解析
// 红线: 校验只在这里做, 引擎内部的纯函数不重复校验
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};

// 参数上限
const MAX_HORIZON_MINUTES: i64 = 10_080; // 7 天
const MAX_HORIZON_HOURS: i64 = 168; // 7 天
const MAX_COUNT: usize = 100;

/// 校验分钟级外推窗口: (0, 10080]
pub fn validate_horizon_minutes(value: i64) -> ApiResult<i64> {
    if value <= 0 || value > MAX_HORIZON_MINUTES {
        return Err(ApiError::invalid_parameter(
            "horizon_minutes",
            format!("取值范围 (0, {}], 实际 {}", MAX_HORIZON_MINUTES, value),
        ));
    }
    Ok(value)
}

/// 校验小时级外推窗口: (0, 168]
pub fn validate_horizon_hours(value: i64) -> ApiResult<i64> {
    if value <= 0 || value > MAX_HORIZON_HOURS {
        return Err(ApiError::invalid_parameter(
            "horizon_hours",
            format!("取值范围 (0, {}], 实际 {}", MAX_HORIZON_HOURS, value),
        ));
    }
    Ok(value)
}

/// 校验比例参数 (SOC 阈值/风险阈值/置信度): [0, 1]
pub fn validate_fraction(param: &str, value: f64) -> ApiResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ApiError::invalid_parameter(
            param,
            format!("取值范围 [0.0, 1.0], 实际 {}", value),
        ));
    }
    Ok(value)
}

/// 校验数量参数 (并发上限/调车数量): (0, 100]
pub fn validate_count(param: &str, value: usize) -> ApiResult<usize> {
    if value == 0 || value > MAX_COUNT {
        return Err(ApiError::invalid_parameter(
            param,
            format!("取值范围 (0, {}], 实际 {}", MAX_COUNT, value),
        ));
    }
    Ok(value)
}

/// 解析 ISO-8601 UTC 时间戳
pub fn parse_timestamp(param: &str, raw: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ApiError::invalid_parameter(param, format!("ISO-8601 时间戳解析失败: {}", e))
        })
}
