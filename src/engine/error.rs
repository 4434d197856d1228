// ==========================================
// 车队运营核心 - 引擎层错误类型
// ==========================================
// 红线: 预订失败一律以类型化结果返回, 不抛异常, 不重试
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::ResourceStatus;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// 调度层错误类型
///
/// 批量路径 (方案提交/自动排队) 据此上报逐项成败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("时间区间非法: start={start} end={end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("资源位不可预订: resource_id={resource_id}, status={status}")]
    ResourceUnavailable {
        resource_id: String,
        status: ResourceStatus,
    },

    #[error("预订区间冲突: resource_id={resource_id}, 与预订 {conflict_id} 重叠")]
    DoubleBooking {
        resource_id: String,
        conflict_id: String,
    },
}

/// Result 类型别名
pub type ScheduleResult<T> = Result<T, ScheduleError>;
