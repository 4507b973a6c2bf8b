//! Collaborator interfaces the stream core calls into.
//!
//! Rendering, workspace browsing, and the status indicator live outside the
//! core. The session machine and the client only ever talk to them through
//! these traits.

use crate::sse::ToolStatus;

/// Author of a rendered message block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Rendering surface for messages and notifications.
pub trait RenderSink {
    /// Opaque reference to a rendered message block.
    type Handle;

    /// Create a message block showing `raw_text`.
    fn render_message_block(&mut self, role: Role, raw_text: &str) -> Self::Handle;

    /// Replace the whole content of an existing block.
    ///
    /// Always called with the full accumulated text, never a delta.
    fn update_message_block(&mut self, handle: &Self::Handle, raw_text: &str);

    /// No further updates will reach this block.
    fn finish_message_block(&mut self, _handle: Self::Handle) {}

    /// Show that a tool started executing.
    fn render_tool_status(&mut self, tool_name: &str);

    /// Show a finished tool's output.
    fn render_tool_result(&mut self, result: &str, status: ToolStatus);

    /// Show an error notification.
    fn render_error(&mut self, message: &str);
}

/// Side effect fired after every tool result.
pub trait WorkspaceRefresher {
    fn refresh_workspace_view(&mut self, current_path: &str);
}

/// Status indicator for the last stream attempt.
pub trait HealthSignal {
    fn set_stream_health(&mut self, is_healthy: bool);
}

/// Everything a chat request reports to.
pub trait ChatSink: RenderSink + WorkspaceRefresher + HealthSignal {}

impl<T: RenderSink + WorkspaceRefresher + HealthSignal> ChatSink for T {}
