//! Adapter implementations for the trait abstractions.
//!
//! - [`ReqwestHttpClient`] - production transport
//! - [`TerminalSink`] - plain-text rendering for the command-line client
//! - [`mock`] - test doubles

pub mod mock;
pub mod reqwest_http;
pub mod terminal;

pub use reqwest_http::ReqwestHttpClient;
pub use terminal::{TerminalBlock, TerminalSink};
