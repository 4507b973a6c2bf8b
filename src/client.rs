//! Chat client for the streaming backend.
//!
//! One call to [`ChatClient::stream_chat`] runs a whole request:
//! transport bytes → [`Utf8Decoder`] → [`LineFramer`] → [`parse_line`] →
//! [`SessionMachine`] → sink. Everything happens on the calling task; the only
//! suspension point is waiting for the next chunk.

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, warn, Instrument};
use uuid::Uuid;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::StreamError;
use crate::session::{Completion, Dispatch, SessionMachine};
use crate::sse::{parse_line, FramedLines, LineFramer, Utf8Decoder};
use crate::traits::{ChatSink, Headers, HttpClient, HttpError, RenderSink, Role, WorkspaceRefresher};

/// Body of a chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's prompt
    pub message: String,
    /// Workspace directory the backend's tools operate on
    pub current_path: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, current_path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            current_path: current_path.into(),
        }
    }
}

/// What a finished stream did.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSummary {
    /// Correlates with the `chat_stream` tracing span
    pub request_id: Uuid,
    pub completion: Completion,
    /// Well-formed events dispatched
    pub events: usize,
    /// Malformed payloads skipped
    pub malformed: usize,
    /// Assistant message blocks opened
    pub message_blocks: usize,
}

/// Client for the streaming chat endpoint.
pub struct ChatClient<C: HttpClient> {
    http: C,
    config: ClientConfig,
}

impl ChatClient<ReqwestHttpClient> {
    /// Build a client backed by reqwest.
    pub fn from_config(config: ClientConfig) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::with_connect_timeout(std::time::Duration::from_secs(
            config.connect_timeout_secs,
        ))?;
        Ok(Self::new(http, config))
    }
}

impl<C: HttpClient> ChatClient<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn http(&self) -> &C {
        &self.http
    }

    /// Request for `message` in the configured workspace.
    pub fn request(&self, message: impl Into<String>) -> ChatRequest {
        ChatRequest::new(message, self.config.workspace_path.clone())
    }

    /// Show the user's prompt, then stream the reply.
    pub async fn submit<S: ChatSink>(
        &self,
        prompt: &str,
        sink: &mut S,
    ) -> Result<StreamSummary, StreamError> {
        let block = sink.render_message_block(Role::User, prompt);
        sink.finish_message_block(block);
        self.stream_chat(&self.request(prompt), sink).await
    }

    /// Send `request` and render the streamed reply into `sink`.
    ///
    /// Health is reset to healthy first. A transport or decode failure closes
    /// any open message, renders one error notification, marks health
    /// degraded, and is returned. The response body is released before this
    /// returns, whichever way the stream ended.
    pub async fn stream_chat<S: ChatSink>(
        &self,
        request: &ChatRequest,
        sink: &mut S,
    ) -> Result<StreamSummary, StreamError> {
        let request_id = Uuid::new_v4();
        let url = self.config.stream_url();
        let span = tracing::info_span!("chat_stream", %request_id, %url);

        async move {
            sink.set_stream_health(true);
            let mut machine = SessionMachine::new(request.current_path.clone());

            match self.drive(&url, request, &mut machine, sink).await {
                Ok(completion) => {
                    let stats = machine.stats();
                    Ok(StreamSummary {
                        request_id,
                        completion,
                        events: stats.events,
                        malformed: stats.malformed,
                        message_blocks: stats.message_blocks,
                    })
                }
                Err(err) => {
                    error!(error = %err, "chat stream failed");
                    machine.close(sink);
                    sink.render_error(&err.user_message());
                    sink.set_stream_health(false);
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn drive<S: ChatSink>(
        &self,
        url: &str,
        request: &ChatRequest,
        machine: &mut SessionMachine<S::Handle>,
        sink: &mut S,
    ) -> Result<Completion, StreamError> {
        let body = serde_json::to_string(request).map_err(|e| HttpError::Other(e.to_string()))?;
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        let mut bytes = self.http.post_stream(url, &body, &headers).await?;
        let mut decoder = Utf8Decoder::new();
        let mut framer = LineFramer::new();

        while let Some(chunk) = bytes.next().await {
            let text = decoder.decode(&chunk?, false)?;
            if let Dispatch::Finished(completion) = dispatch_lines(framer.feed(&text), machine, sink)
            {
                return Ok(completion);
            }
        }

        let text = decoder.decode(&[], true)?;
        if let Dispatch::Finished(completion) = dispatch_lines(framer.feed(&text), machine, sink) {
            return Ok(completion);
        }

        if let Some(dangling) = framer.finish() {
            warn!(line = %dangling, "discarding unterminated final line");
        }
        warn!("response body ended without a completion signal");
        Ok(machine.end_of_body(sink))
    }
}

/// Parse and dispatch lines until they run out or the session finishes.
///
/// Lines after the finishing one are never parsed.
fn dispatch_lines<S>(
    lines: FramedLines,
    machine: &mut SessionMachine<S::Handle>,
    sink: &mut S,
) -> Dispatch
where
    S: RenderSink + WorkspaceRefresher,
{
    for line in lines {
        if let Some(outcome) = parse_line(&line) {
            if let Dispatch::Finished(completion) = machine.handle(outcome, sink) {
                return Dispatch::Finished(completion);
            }
        }
    }
    Dispatch::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse, RecordingSink, SinkCommand};
    use crate::session::SessionStatus;
    use bytes::Bytes;

    const URL: &str = "http://test.local/api/chat";

    fn client(response: MockResponse) -> ChatClient<MockHttpClient> {
        let http = MockHttpClient::new();
        http.set_response(URL, response);
        ChatClient::new(
            http,
            ClientConfig::new()
                .with_base_url("http://test.local")
                .with_workspace_path("/ws"),
        )
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest::new("hi", "/ws");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"message": "hi", "current_path": "/ws"})
        );
    }

    #[tokio::test]
    async fn test_request_is_posted_with_headers() {
        let client = client(MockResponse::Stream(vec![Bytes::from("data: [DONE]\n")]));
        let mut sink = RecordingSink::new();

        client
            .stream_chat(&client.request("hello"), &mut sink)
            .await
            .unwrap();

        let requests = client.http.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, URL);
        assert_eq!(
            requests[0].headers.get("Accept"),
            Some(&"text/event-stream".to_string())
        );
        let body: ChatRequest = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, ChatRequest::new("hello", "/ws"));
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let body = concat!(
            "data: {\"type\":\"content\",\"content\":\"a\"}\n",
            "data: {nope\n",
            "data: {\"type\":\"tool_call_start\",\"tool_name\":\"ls\"}\n",
            "data: {\"type\":\"content\",\"content\":\"b\"}\n",
            "data: {\"type\":\"complete\"}\n",
        );
        let client = client(MockResponse::chunked(body.as_bytes(), 7));
        let mut sink = RecordingSink::new();

        let summary = client
            .stream_chat(&client.request("x"), &mut sink)
            .await
            .unwrap();

        assert_eq!(summary.completion, Completion::CompleteEvent);
        assert_eq!(summary.events, 4);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.message_blocks, 2);
    }

    #[tokio::test]
    async fn test_submit_renders_user_block_first() {
        let client = client(MockResponse::Stream(vec![Bytes::from(
            "data: {\"type\":\"content\",\"content\":\"hi\"}\ndata: [DONE]\n",
        )]));
        let mut sink = RecordingSink::new();

        client.submit("hello?", &mut sink).await.unwrap();

        let commands = sink.render_commands();
        assert_eq!(
            &commands[..2],
            &[
                SinkCommand::RenderMessageBlock {
                    handle: 1,
                    role: Role::User,
                    text: "hello?".to_string(),
                },
                SinkCommand::FinishMessageBlock { handle: 1 },
            ]
        );
        assert_eq!(sink.blocks(Role::Assistant), vec![2]);
        assert_eq!(sink.block_text(2), Some("hi".to_string()));
    }

    #[tokio::test]
    async fn test_health_reset_then_degraded_on_failure() {
        let client = client(MockResponse::Error(HttpError::ServerError {
            status: 502,
            message: "bad gateway".to_string(),
        }));
        let mut sink = RecordingSink::new();

        let err = client
            .stream_chat(&client.request("x"), &mut sink)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert_eq!(
            sink.commands(),
            vec![
                SinkCommand::Health { is_healthy: true },
                SinkCommand::Error {
                    message: err.user_message()
                },
                SinkCommand::Health { is_healthy: false },
            ]
        );
        assert_eq!(sink.status(), SessionStatus::Degraded);
    }
}
