//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming POST transport
//! - [`RenderSink`] - message and notification rendering
//! - [`WorkspaceRefresher`] - file-tree refresh trigger
//! - [`HealthSignal`] - stream health indicator
//! - [`ChatSink`] - all three sink traits together

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use sink::{ChatSink, HealthSignal, RenderSink, Role, WorkspaceRefresher};
