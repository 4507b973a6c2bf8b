//! Sink that records every command it receives.

use crate::session::SessionStatus;
use crate::sse::ToolStatus;
use crate::traits::{HealthSignal, RenderSink, Role, WorkspaceRefresher};

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCommand {
    RenderMessageBlock { handle: usize, role: Role, text: String },
    UpdateMessageBlock { handle: usize, text: String },
    FinishMessageBlock { handle: usize },
    ToolStatus { tool_name: String },
    ToolResult { result: String, status: ToolStatus },
    Error { message: String },
    RefreshWorkspace { path: String },
    Health { is_healthy: bool },
}

/// In-memory sink for tests.
///
/// Handles are sequential block numbers starting at 1.
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<SinkCommand>,
    next_handle: usize,
    status: SessionStatus,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded command, in call order.
    pub fn commands(&self) -> Vec<SinkCommand> {
        self.commands.clone()
    }

    /// Recorded commands excluding health updates.
    pub fn render_commands(&self) -> Vec<SinkCommand> {
        self.commands
            .iter()
            .filter(|c| !matches!(c, SinkCommand::Health { .. }))
            .cloned()
            .collect()
    }

    /// Latest text shown in block `handle`.
    pub fn block_text(&self, handle: usize) -> Option<String> {
        self.commands.iter().rev().find_map(|c| match c {
            SinkCommand::UpdateMessageBlock { handle: h, text }
            | SinkCommand::RenderMessageBlock { handle: h, text, .. }
                if *h == handle =>
            {
                Some(text.clone())
            }
            _ => None,
        })
    }

    /// Handles of every block opened for `role`.
    pub fn blocks(&self, role: Role) -> Vec<usize> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::RenderMessageBlock { handle, role: r, .. } if *r == role => {
                    Some(*handle)
                }
                _ => None,
            })
            .collect()
    }

    /// Every update sent to block `handle`.
    pub fn updates(&self, handle: usize) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::UpdateMessageBlock { handle: h, text } if *h == handle => {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Messages of every error notification.
    pub fn errors(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::Error { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Health as last reported.
    pub fn status(&self) -> SessionStatus {
        self.status
    }
}

impl RenderSink for RecordingSink {
    type Handle = usize;

    fn render_message_block(&mut self, role: Role, raw_text: &str) -> usize {
        self.next_handle += 1;
        self.commands.push(SinkCommand::RenderMessageBlock {
            handle: self.next_handle,
            role,
            text: raw_text.to_string(),
        });
        self.next_handle
    }

    fn update_message_block(&mut self, handle: &usize, raw_text: &str) {
        self.commands.push(SinkCommand::UpdateMessageBlock {
            handle: *handle,
            text: raw_text.to_string(),
        });
    }

    fn finish_message_block(&mut self, handle: usize) {
        self.commands.push(SinkCommand::FinishMessageBlock { handle });
    }

    fn render_tool_status(&mut self, tool_name: &str) {
        self.commands.push(SinkCommand::ToolStatus {
            tool_name: tool_name.to_string(),
        });
    }

    fn render_tool_result(&mut self, result: &str, status: ToolStatus) {
        self.commands.push(SinkCommand::ToolResult {
            result: result.to_string(),
            status,
        });
    }

    fn render_error(&mut self, message: &str) {
        self.commands.push(SinkCommand::Error {
            message: message.to_string(),
        });
    }
}

impl WorkspaceRefresher for RecordingSink {
    fn refresh_workspace_view(&mut self, current_path: &str) {
        self.commands.push(SinkCommand::RefreshWorkspace {
            path: current_path.to_string(),
        });
    }
}

impl HealthSignal for RecordingSink {
    fn set_stream_health(&mut self, is_healthy: bool) {
        self.status = SessionStatus::from_healthy(is_healthy);
        self.commands.push(SinkCommand::Health { is_healthy });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_sequential() {
        let mut sink = RecordingSink::new();
        assert_eq!(sink.render_message_block(Role::User, "hi"), 1);
        assert_eq!(sink.render_message_block(Role::Assistant, ""), 2);
        assert_eq!(sink.blocks(Role::Assistant), vec![2]);
        assert_eq!(sink.block_text(1), Some("hi".to_string()));
    }

    #[test]
    fn test_block_text_tracks_latest_update() {
        let mut sink = RecordingSink::new();
        let handle = sink.render_message_block(Role::Assistant, "");
        sink.update_message_block(&handle, "a");
        sink.update_message_block(&handle, "ab");
        assert_eq!(sink.block_text(handle), Some("ab".to_string()));
        assert_eq!(sink.updates(handle), vec!["a", "ab"]);
        assert_eq!(sink.block_text(99), None);
    }

    #[test]
    fn test_health_is_recorded_separately() {
        let mut sink = RecordingSink::new();
        sink.set_stream_health(false);
        sink.render_error("boom");
        assert_eq!(sink.status(), SessionStatus::Degraded);
        assert_eq!(
            sink.render_commands(),
            vec![SinkCommand::Error {
                message: "boom".to_string()
            }]
        );
    }
}
