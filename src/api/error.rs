// ==========================================
// 车队运营核心 - API层错误类型
// ==========================================
// 职责: 调度边界的参数校验错误 + 引擎错误透传
// 红线: InvalidParameter 只在调度边界产生, 引擎内部不校验调用方参数
// ==========================================

use crate::engine::error::ScheduleError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调度边界错误
    // ==========================================
    #[error("参数非法: {param}: {message}")]
    InvalidParameter { param: String, message: String },

    // ==========================================
    // 引擎错误透传
    // ==========================================
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        ApiError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
