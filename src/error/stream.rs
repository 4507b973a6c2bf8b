//! Stream-fatal error types.
//!
//! Only failures that end a request live here. Malformed event payloads are
//! not errors: the parser reports them as
//! [`ParseOutcome::Malformed`](crate::sse::ParseOutcome) and the stream goes on.

use thiserror::Error;

use crate::traits::HttpError;

/// Bytes left undecodable when the body ended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The body ended in the middle of a multi-byte character
    #[error("stream ended inside a multi-byte character ({} pending bytes)", pending.len())]
    IncompleteSequence { pending: Vec<u8> },
}

/// Errors that abort a chat request.
#[derive(Debug, Clone, Error)]
pub enum StreamError {
    /// Non-success status or a network failure before or during streaming
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// The body could not be decoded as text
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl StreamError {
    /// Text for the single error notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Transport(HttpError::ServerError { status, message }) => {
                if message.is_empty() {
                    format!("The server rejected the request (HTTP {}).", status)
                } else {
                    format!("The server rejected the request (HTTP {}): {}", status, message)
                }
            }
            StreamError::Transport(HttpError::Timeout(_)) => {
                "The server took too long to respond.".to_string()
            }
            StreamError::Transport(HttpError::ConnectionFailed(_)) => {
                "Could not connect to the server.".to_string()
            }
            StreamError::Transport(err) => format!("Connection error: {}", err),
            StreamError::Decode(_) => {
                "The response ended with incomplete text and could not be decoded.".to_string()
            }
        }
    }

    /// HTTP status when the server answered with a non-success code.
    pub fn status(&self) -> Option<u16> {
        match self {
            StreamError::Transport(HttpError::ServerError { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
