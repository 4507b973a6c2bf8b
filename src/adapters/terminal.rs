//! Plain-text terminal rendering sink.
//!
//! Message blocks are re-rendered with their full text on every update; on a
//! terminal that means printing only the part not already on screen.

use std::io::Write;

use crate::session::SessionStatus;
use crate::sse::ToolStatus;
use crate::traits::{HealthSignal, RenderSink, Role, WorkspaceRefresher};

/// Handle to a block printed by [`TerminalSink`].
#[derive(Debug)]
pub struct TerminalBlock {
    id: usize,
}

/// Renders a chat session as a plain transcript.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    next_id: usize,
    /// Block currently being written and how much of it is on screen
    current: Option<(usize, String)>,
    status: SessionStatus,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_id: 0,
            current: None,
            status: SessionStatus::default(),
        }
    }

    /// Health as last reported by the client.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Status indicator text for the last stream.
    pub fn status_line(&self) -> String {
        format!("status: {}", self.status.label())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("terminal write failed: {}", e);
        }
    }

    /// End the line of the block being written, if any.
    fn break_block(&mut self) {
        if let Some((_, shown)) = self.current.take() {
            if !shown.is_empty() && !shown.ends_with('\n') {
                self.write("\n");
            }
        }
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    type Handle = TerminalBlock;

    fn render_message_block(&mut self, role: Role, raw_text: &str) -> TerminalBlock {
        self.break_block();
        self.next_id += 1;
        let id = self.next_id;

        let header = match role {
            Role::User => "> ",
            Role::Assistant => "",
        };
        let text = format!("{}{}", header, raw_text);
        self.write(&text);
        self.current = Some((id, text));
        TerminalBlock { id }
    }

    fn update_message_block(&mut self, handle: &TerminalBlock, raw_text: &str) {
        let on_screen = match &self.current {
            Some((id, shown)) if *id == handle.id => Some(shown.clone()),
            _ => None,
        };
        let shown = match on_screen {
            Some(shown) => shown,
            None => {
                // Not the block on screen: start it again on a fresh line.
                self.break_block();
                String::new()
            }
        };

        let suffix = match raw_text.strip_prefix(shown.as_str()) {
            Some(suffix) => suffix.to_string(),
            None => format!("\n{}", raw_text),
        };
        self.write(&suffix);
        self.current = Some((handle.id, raw_text.to_string()));
    }

    fn finish_message_block(&mut self, handle: TerminalBlock) {
        if matches!(&self.current, Some((id, _)) if *id == handle.id) {
            self.break_block();
        }
    }

    fn render_tool_status(&mut self, tool_name: &str) {
        self.break_block();
        self.write(&format!("[running {}]\n", tool_name));
    }

    fn render_tool_result(&mut self, result: &str, status: ToolStatus) {
        self.break_block();
        let marker = if status.is_success() { "ok" } else { "failed" };
        self.write(&format!("[{}] {}\n", marker, result));
    }

    fn render_error(&mut self, message: &str) {
        self.break_block();
        self.write(&format!("[error] {}\n", message));
    }
}

impl<W: Write> WorkspaceRefresher for TerminalSink<W> {
    fn refresh_workspace_view(&mut self, current_path: &str) {
        tracing::debug!(path = current_path, "workspace contents may have changed");
    }
}

impl<W: Write> HealthSignal for TerminalSink<W> {
    fn set_stream_health(&mut self, is_healthy: bool) {
        self.status = SessionStatus::from_healthy(is_healthy);
    }
}
