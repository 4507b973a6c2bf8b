//! Event record parsing.
//!
//! Only `data: ` records carry events. Everything else on the wire (blank
//! separators, `:` keep-alive comments, `event:` names) is skipped.

use crate::sse::events::{MalformedEvent, ParseOutcome};
use crate::sse::payloads::WirePayload;

/// Prefix marking an event record.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that ends the stream.
pub const TERMINATOR: &str = "[DONE]";

/// Parse one framed line.
///
/// Returns `None` for lines that are not event records. Never fails: a payload
/// that cannot be decoded comes back as [`ParseOutcome::Malformed`].
pub fn parse_line(line: &str) -> Option<ParseOutcome> {
    let payload = line.strip_prefix(DATA_PREFIX)?;

    if payload == TERMINATOR {
        return Some(ParseOutcome::Terminator);
    }

    Some(parse_payload(payload))
}

/// Decode a JSON payload into an event.
pub fn parse_payload(payload: &str) -> ParseOutcome {
    match serde_json::from_str::<WirePayload>(payload) {
        Ok(wire) => ParseOutcome::Event(wire.into_event()),
        Err(e) => ParseOutcome::Malformed(MalformedEvent {
            raw_text: payload.to_string(),
            reason: e.to_string(),
        }),
    }
}
