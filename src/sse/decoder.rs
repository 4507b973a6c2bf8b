//! Incremental UTF-8 decoding of transport chunks.
//!
//! Network chunks are cut at arbitrary byte offsets, so a multi-byte character
//! can straddle two chunks. The decoder holds back the incomplete tail of each
//! chunk and prepends it to the next one.

use crate::error::DecodeError;

/// Replacement emitted for byte sequences that can never become valid UTF-8.
const REPLACEMENT: char = '\u{FFFD}';

/// Stateful byte-to-text decoder.
///
/// `pending` never holds more than three bytes: the longest prefix of a
/// four-byte sequence that is still incomplete.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a decoder with an empty hold-back buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk.
    ///
    /// Returns the text that could be fully decoded. With `is_final = true`
    /// any bytes still held back are reported as a [`DecodeError`] and the
    /// buffer is cleared.
    pub fn decode(&mut self, chunk: &[u8], is_final: bool) -> Result<String, DecodeError> {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut text = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    if let Ok(valid) = std::str::from_utf8(valid) {
                        text.push_str(valid);
                    }

                    match err.error_len() {
                        Some(invalid_len) => {
                            tracing::warn!(
                                bytes = ?&after[..invalid_len],
                                "invalid UTF-8 in stream, substituting replacement character"
                            );
                            text.push(REPLACEMENT);
                            rest = &after[invalid_len..];
                        }
                        None => {
                            self.pending.extend_from_slice(after);
                            break;
                        }
                    }
                }
            }
        }

        if is_final && !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            return Err(DecodeError::IncompleteSequence { pending });
        }

        Ok(text)
    }

    /// Number of bytes currently held back.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
