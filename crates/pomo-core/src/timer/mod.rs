//! Timer lifecycle.
//!
//! [`TimerState`] is the pure state machine; [`TimerService`] owns one and
//! adds the side effects of a transition (persisting the completed count,
//! firing notifications). Callers pass the current time into every
//! operation, so the service itself never reads a clock.

pub mod machine;
pub mod service;
pub mod types;

pub use machine::TimerState;
pub use service::TimerService;
pub use types::{PhaseDurations, TimerEvent, TimerPhase, TimerSnapshot};
