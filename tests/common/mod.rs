//! Common test utilities for integration tests.

#![allow(dead_code)]

pub use streamchat::adapters::mock::{MockHttpClient, MockResponse, RecordingSink, SinkCommand};

use streamchat::client::ChatClient;
use streamchat::config::ClientConfig;

/// Base URL the mock client is configured for.
pub const BASE_URL: &str = "http://backend.test";

/// Streaming endpoint under [`BASE_URL`].
pub const STREAM_URL: &str = "http://backend.test/api/chat";

/// Workspace path used by every test client.
pub const WORKSPACE: &str = "/home/dev/project";

/// Join event payloads into a wire body, one `data: ` record per line.
pub fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|p| format!("data: {}\n", p))
        .collect()
}

/// A client whose transport serves `response` at [`STREAM_URL`].
pub fn mock_client(response: MockResponse) -> ChatClient<MockHttpClient> {
    let http = MockHttpClient::new();
    http.set_response(STREAM_URL, response);
    ChatClient::new(http, test_config(BASE_URL))
}

/// Config pointing at `base_url` with the test workspace.
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(base_url)
        .with_workspace_path(WORKSPACE)
}

/// Run one request and return the sink together with the result.
pub async fn run_stream(
    client: &ChatClient<MockHttpClient>,
) -> (
    RecordingSink,
    Result<streamchat::client::StreamSummary, streamchat::error::StreamError>,
) {
    let mut sink = RecordingSink::new();
    let result = client
        .stream_chat(&client.request("test prompt"), &mut sink)
        .await;
    (sink, result)
}
