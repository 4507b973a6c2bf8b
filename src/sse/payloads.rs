//! Wire payload deserialization.
//!
//! Payloads are JSON objects discriminated by their `type` field. These structs
//! mirror the wire shape; [`WirePayload::into_event`] maps them onto the
//! public [`StreamEvent`].

use serde::Deserialize;

use crate::sse::events::{StreamEvent, ToolStatus};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum WirePayload {
    Content {
        content: String,
    },
    ToolCallStart {
        tool_name: String,
    },
    ToolResult {
        result: serde_json::Value,
        status: String,
    },
    Error {
        message: String,
    },
    Complete,
}

impl WirePayload {
    pub(crate) fn into_event(self) -> StreamEvent {
        match self {
            WirePayload::Content { content } => StreamEvent::Content { text: content },
            WirePayload::ToolCallStart { tool_name } => StreamEvent::ToolCallStart { tool_name },
            WirePayload::ToolResult { result, status } => StreamEvent::ToolResult {
                result: result_text(result),
                status: ToolStatus::from_wire(&status),
            },
            WirePayload::Error { message } => StreamEvent::Error { message },
            WirePayload::Complete => StreamEvent::Complete,
        }
    }
}

/// Strings are passed through, anything else is rendered as compact JSON.
fn result_text(result: serde_json::Value) -> String {
    match result {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
