//! Error types for streamchat.
//!
//! | Kind | Fatal | Surfaced as |
//! |------|-------|-------------|
//! | Transport (non-2xx, network) | Yes | one error notification, health degraded |
//! | Decode (truncated UTF-8 at end) | Yes | one error notification, health degraded |
//! | Malformed event payload | No | logged, skipped |
//! | Backend `error` event | No | error notification, stream continues |
//!
//! Only the first two are Rust errors; see [`StreamError`].

mod stream;

pub use stream::{DecodeError, StreamError};
