//! Per-request session state.
//!
//! - `machine` - the event-driven state machine that owns the open message
//! - `accumulator` - the open message itself
//! - `health` - healthy/degraded status of the last request

mod accumulator;
mod health;
mod machine;

pub use accumulator::MessageAccumulator;
pub use health::SessionStatus;
pub use machine::{Completion, Dispatch, SessionMachine, SessionState, SessionStats};
