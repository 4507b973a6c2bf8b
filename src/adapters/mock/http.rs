//! Mock HTTP transport for testing.
//!
//! Serves scripted response bodies chunk by chunk, so tests control exactly
//! where chunk boundaries fall. Also tracks how many chunks were pulled and
//! whether each body stream was released.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::{HashMap, VecDeque};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Fail before any body is returned (connection error, non-2xx status)
    Error(HttpError),
    /// Deliver these chunks, then end the body cleanly
    Stream(Vec<Bytes>),
    /// Deliver these chunks, then fail mid-body
    StreamThenError(Vec<Bytes>, HttpError),
}

impl MockResponse {
    /// Stream `body` split at the given byte offsets.
    ///
    /// Offsets must be ascending and within `body`.
    pub fn split_at(body: &[u8], offsets: &[usize]) -> Self {
        let mut chunks = Vec::with_capacity(offsets.len() + 1);
        let mut start = 0;
        for &offset in offsets {
            chunks.push(Bytes::copy_from_slice(&body[start..offset]));
            start = offset;
        }
        chunks.push(Bytes::copy_from_slice(&body[start..]));
        MockResponse::Stream(chunks)
    }

    /// Stream `body` in chunks of at most `size` bytes.
    pub fn chunked(body: &[u8], size: usize) -> Self {
        MockResponse::Stream(
            body.chunks(size.max(1))
                .map(Bytes::copy_from_slice)
                .collect(),
        )
    }
}

#[derive(Debug, Default)]
struct StreamTracker {
    opened: AtomicUsize,
    released: AtomicUsize,
    chunks_read: AtomicUsize,
}

/// Body stream that reports reads and release to its tracker.
struct ScriptedBody {
    items: VecDeque<Result<Bytes, HttpError>>,
    tracker: Arc<StreamTracker>,
}

impl Stream for ScriptedBody {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let item = self.items.pop_front();
        if item.is_some() {
            self.tracker.chunks_read.fetch_add(1, Ordering::SeqCst);
        }
        Poll::Ready(item)
    }
}

impl Drop for ScriptedBody {
    fn drop(&mut self) {
        self.tracker.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use streamchat::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://test/api/chat",
///     MockResponse::split_at(b"data: [DONE]\n", &[3]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    tracker: Arc<StreamTracker>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
            tracker: Arc::new(StreamTracker::default()),
        }
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Body streams handed out so far.
    pub fn streams_opened(&self) -> usize {
        self.tracker.opened.load(Ordering::SeqCst)
    }

    /// Body streams dropped so far.
    pub fn streams_released(&self) -> usize {
        self.tracker.released.load(Ordering::SeqCst)
    }

    /// Chunks pulled from all body streams.
    pub fn chunks_read(&self) -> usize {
        self.tracker.chunks_read.load(Ordering::SeqCst)
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    fn open_body(&self, items: VecDeque<Result<Bytes, HttpError>>) -> ByteStream {
        self.tracker.opened.fetch_add(1, Ordering::SeqCst);
        Box::pin(ScriptedBody {
            items,
            tracker: Arc::clone(&self.tracker),
        })
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(self.open_body(chunks.into_iter().map(Ok).collect()))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let mut items: VecDeque<_> = chunks.into_iter().map(Ok).collect();
                items.push_back(Err(err));
                Ok(self.open_body(items))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
