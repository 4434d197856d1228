// ==========================================
// 车队运营核心 - 状态仓储层
// ==========================================
// 职责: 共享车队快照 + 时钟抽象
// ==========================================

pub mod clock;
pub mod fleet_store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use fleet_store::{FleetState, FleetStore};
