//! streamchat - incremental streaming client for agent chat backends
//!
//! Consumes a chunked `data:`-framed event stream, reassembles it into typed
//! events across arbitrary chunk boundaries, and drives a session state
//! machine that renders assistant messages and tool notifications through
//! caller-supplied sinks.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod sse;
pub mod traits;
