//! Incremental parsing of the chat event stream.
//!
//! The response body is a sequence of newline-delimited records:
//! - `data: <json>` - one structured event, discriminated by its `type` field
//! - `data: [DONE]` - end of stream
//! - anything else (blank lines, `:` keep-alives) - ignored
//!
//! # Module structure
//! - `decoder` - bytes to text, tolerant of characters split across chunks
//! - `framer` - text to complete lines
//! - `parser` - lines to [`ParseOutcome`]s
//! - `events` - event and outcome types
//! - `payloads` - internal wire payload structs

mod decoder;
mod events;
mod framer;
mod parser;
mod payloads;

pub use decoder::Utf8Decoder;
pub use events::{MalformedEvent, ParseOutcome, StreamEvent, ToolStatus};
pub use framer::{FramedLines, LineFramer};
pub use parser::{parse_line, parse_payload, DATA_PREFIX, TERMINATOR};
