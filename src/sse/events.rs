//! Typed stream events and parse outcomes.

use std::fmt;

/// Outcome reported by the backend for a finished tool execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Success,
    Failure,
}

impl ToolStatus {
    /// Map the wire status string. Only `"success"` counts as success.
    pub fn from_wire(status: &str) -> Self {
        if status == "success" {
            ToolStatus::Success
        } else {
            ToolStatus::Failure
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Success => "success",
            ToolStatus::Failure => "failure",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolStatus::Success)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured event carried by one `data:` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Assistant text token
    Content { text: String },
    /// The backend started executing a tool
    ToolCallStart { tool_name: String },
    /// A tool finished
    ToolResult { result: String, status: ToolStatus },
    /// Application-level failure reported by the backend
    Error { message: String },
    /// The backend finished the response
    Complete,
}

impl StreamEvent {
    /// Wire name of the event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::Content { .. } => "content",
            StreamEvent::ToolCallStart { .. } => "tool_call_start",
            StreamEvent::ToolResult { .. } => "tool_result",
            StreamEvent::Error { .. } => "error",
            StreamEvent::Complete => "complete",
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, StreamEvent::Content { .. })
    }
}

/// A `data:` record whose payload could not be turned into a [`StreamEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEvent {
    /// Payload text after the `data: ` prefix
    pub raw_text: String,
    /// Why it was rejected
    pub reason: String,
}

/// Result of parsing one event-prefixed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Event(StreamEvent),
    Malformed(MalformedEvent),
    /// The `[DONE]` sentinel
    Terminator,
}
