//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - transport serving scripted chunked bodies
//! - [`RecordingSink`] - sink recording every render, refresh, and health call

pub mod http;
pub mod sink;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use sink::{RecordingSink, SinkCommand};
