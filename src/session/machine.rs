//! Session state machine.
//!
//! Consumes parse outcomes in arrival order and drives the sink:
//!
//! | State | Input | Effect | Next |
//! |-------|-------|--------|------|
//! | Idle | `content` | open block, append, update | Streaming |
//! | Streaming | `content` | append, update | Streaming |
//! | any | `tool_call_start` | close block; tool status | Idle |
//! | any | `tool_result` | close block; tool result; refresh workspace | Idle |
//! | any | `error` | close block; error notification | Idle |
//! | any | `complete` / `[DONE]` | close block | Finished |
//! | any | malformed | log | unchanged |
//!
//! A `content` event after any other event always opens a new block.

use tracing::{debug, info, warn};

use super::accumulator::MessageAccumulator;
use crate::sse::{ParseOutcome, StreamEvent};
use crate::traits::{RenderSink, Role, WorkspaceRefresher};

/// How a stream ended without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The backend sent a `complete` event
    CompleteEvent,
    /// The `[DONE]` sentinel was read
    Terminator,
    /// The body ended without either
    EndOfBody,
}

/// Current state of a session.
#[derive(Debug)]
pub enum SessionState<H> {
    Idle,
    Streaming(MessageAccumulator<H>),
    Finished(Completion),
}

/// Whether the caller should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Finished(Completion),
}

/// Counters kept while a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    /// Well-formed events dispatched
    pub events: usize,
    /// Malformed payloads skipped
    pub malformed: usize,
    /// Assistant message blocks opened
    pub message_blocks: usize,
}

/// State machine for one chat request.
///
/// `H` is the sink's message block handle type.
#[derive(Debug)]
pub struct SessionMachine<H> {
    state: SessionState<H>,
    workspace_path: String,
    stats: SessionStats,
}

impl<H> SessionMachine<H> {
    /// `workspace_path` is passed to the workspace refresher after tool results.
    pub fn new(workspace_path: impl Into<String>) -> Self {
        Self {
            state: SessionState::Idle,
            workspace_path: workspace_path.into(),
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> &SessionState<H> {
        &self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The open message, if the last dispatched event was `content`.
    pub fn accumulator(&self) -> Option<&MessageAccumulator<H>> {
        match &self.state {
            SessionState::Streaming(acc) => Some(acc),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    /// Feed one parse outcome.
    pub fn handle<S>(&mut self, outcome: ParseOutcome, sink: &mut S) -> Dispatch
    where
        S: RenderSink<Handle = H> + WorkspaceRefresher,
    {
        match outcome {
            ParseOutcome::Event(event) => self.apply(event, sink),
            ParseOutcome::Malformed(malformed) => {
                if let SessionState::Finished(completion) = self.state {
                    return Dispatch::Finished(completion);
                }
                self.stats.malformed += 1;
                warn!(
                    raw = %malformed.raw_text,
                    reason = %malformed.reason,
                    "skipping malformed stream event"
                );
                Dispatch::Continue
            }
            ParseOutcome::Terminator => self.finish(Completion::Terminator, sink),
        }
    }

    /// Apply one well-formed event.
    pub fn apply<S>(&mut self, event: StreamEvent, sink: &mut S) -> Dispatch
    where
        S: RenderSink<Handle = H> + WorkspaceRefresher,
    {
        if let SessionState::Finished(completion) = self.state {
            debug!(kind = event.kind(), "ignoring event after stream completion");
            return Dispatch::Finished(completion);
        }

        self.stats.events += 1;
        debug!(kind = event.kind(), "dispatching stream event");

        match event {
            StreamEvent::Content { text } => {
                self.append_content(&text, sink);
                Dispatch::Continue
            }
            StreamEvent::ToolCallStart { tool_name } => {
                self.close(sink);
                sink.render_tool_status(&tool_name);
                Dispatch::Continue
            }
            StreamEvent::ToolResult { result, status } => {
                self.close(sink);
                sink.render_tool_result(&result, status);
                sink.refresh_workspace_view(&self.workspace_path);
                Dispatch::Continue
            }
            StreamEvent::Error { message } => {
                self.close(sink);
                sink.render_error(&message);
                Dispatch::Continue
            }
            StreamEvent::Complete => self.finish(Completion::CompleteEvent, sink),
        }
    }

    /// Close the open message, if any, and return to `Idle`.
    ///
    /// Does nothing once the session is finished.
    pub fn close<S>(&mut self, sink: &mut S)
    where
        S: RenderSink<Handle = H>,
    {
        if self.is_finished() {
            return;
        }
        if let SessionState::Streaming(acc) =
            std::mem::replace(&mut self.state, SessionState::Idle)
        {
            sink.finish_message_block(acc.into_handle());
        }
    }

    /// The body ended without a completion signal.
    pub fn end_of_body<S>(&mut self, sink: &mut S) -> Completion
    where
        S: RenderSink<Handle = H>,
    {
        match self.finish(Completion::EndOfBody, sink) {
            Dispatch::Finished(completion) => completion,
            Dispatch::Continue => Completion::EndOfBody,
        }
    }

    fn append_content<S>(&mut self, text: &str, sink: &mut S)
    where
        S: RenderSink<Handle = H>,
    {
        let mut acc = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Streaming(acc) => acc,
            _ => {
                self.stats.message_blocks += 1;
                MessageAccumulator::new(sink.render_message_block(Role::Assistant, ""))
            }
        };
        acc.append(text);
        sink.update_message_block(acc.handle(), acc.text());
        self.state = SessionState::Streaming(acc);
    }

    fn finish<S>(&mut self, completion: Completion, sink: &mut S) -> Dispatch
    where
        S: RenderSink<Handle = H>,
    {
        if let SessionState::Finished(previous) = self.state {
            return Dispatch::Finished(previous);
        }
        self.close(sink);
        self.state = SessionState::Finished(completion);
        info!(
            ?completion,
            events = self.stats.events,
            malformed = self.stats.malformed,
            message_blocks = self.stats.message_blocks,
            "stream finished"
        );
        Dispatch::Finished(completion)
    }
}
