// ==========================================
// 车队运营核心 - 时钟抽象
// ==========================================
// 职责: 向引擎注入 now(), 保证可测性
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Mutex;

/// 时钟抽象
///
/// 引擎一律通过注入的 Clock 取当前时间, 不直接调用 Utc::now()
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

// ==========================================
// SystemClock - 系统时钟
// ==========================================
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ==========================================
// FixedClock - 固定时钟 (测试用)
// ==========================================
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// 拨到指定时点
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// 前拨指定时长
    pub fn advance(&self, delta: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_fixed_clock_advance() {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let clock = FixedClock::new(t0);
        assert_eq!(clock.now(), t0);

        clock.advance(Duration::minutes(31));
        assert_eq!(clock.now(), t0 + Duration::minutes(31));

        clock.set(t0);
        assert_eq!(clock.now(), t0);
    }
}
