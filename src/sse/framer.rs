//! Line framing over decoded text fragments.

/// Accumulates text and hands out newline-terminated lines.
///
/// Whatever follows the last newline stays buffered until a later fragment
/// completes it.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: String,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and return the lines it completed, in order.
    ///
    /// The returned iterator owns the completed text, so the framer can be fed
    /// again before the lines are consumed. A trailing `\r` is stripped from
    /// each line.
    pub fn feed(&mut self, fragment: &str) -> FramedLines {
        // The buffer never holds a newline before this push.
        let start = self.buffer.len();
        self.buffer.push_str(fragment);

        let completed = match self.buffer[start..].rfind('\n').map(|i| start + i) {
            Some(last_newline) => {
                let rest = self.buffer.split_off(last_newline + 1);
                std::mem::replace(&mut self.buffer, rest)
            }
            None => String::new(),
        };

        FramedLines {
            text: completed,
            pos: 0,
        }
    }

    /// Text buffered after the last newline.
    pub fn partial(&self) -> &str {
        &self.buffer
    }

    /// End of stream: drop the unterminated remainder, returning it if non-empty.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

/// Lazy iterator over the lines completed by one [`LineFramer::feed`] call.
#[derive(Debug)]
pub struct FramedLines {
    text: String,
    pos: usize,
}

impl Iterator for FramedLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let remaining = &self.text[self.pos..];
        let newline = remaining.find('\n')?;
        let line = &remaining[..newline];
        let line = line.strip_suffix('\r').unwrap_or(line).to_string();
        self.pos += newline + 1;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(framer: &mut LineFramer, fragment: &str) -> Vec<String> {
        framer.feed(fragment).collect()
    }

    #[test]
    fn test_complete_lines_are_yielded() {
        let mut framer = LineFramer::new();
        assert_eq!(collect(&mut framer, "one\ntwo\n"), vec!["one", "two"]);
        assert_eq!(framer.partial(), "");
    }

    #[test]
    fn test_partial_line_is_retained() {
        let mut framer = LineFramer::new();
        assert_eq!(collect(&mut framer, "one\ntw"), vec!["one"]);
        assert_eq!(framer.partial(), "tw");
        assert_eq!(collect(&mut framer, "o\n"), vec!["two"]);
    }

    #[test]
    fn test_fragment_without_newline_yields_nothing() {
        let mut framer = LineFramer::new();
        assert!(collect(&mut framer, "data: {").is_empty());
        assert!(collect(&mut framer, "\"a\":1}").is_empty());
        assert_eq!(collect(&mut framer, "\n"), vec!["data: {\"a\":1}"]);
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let mut framer = LineFramer::new();
        assert_eq!(collect(&mut framer, "a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let mut framer = LineFramer::new();
        assert_eq!(collect(&mut framer, "a\r\nb\r"), vec!["a"]);
        assert_eq!(collect(&mut framer, "\n"), vec!["b"]);
    }

    #[test]
    fn test_only_one_carriage_return_is_stripped() {
        let mut framer = LineFramer::new();
        assert_eq!(collect(&mut framer, "a\r\r\nb\r\n"), vec!["a\r", "b"]);
    }

    #[test]
    fn test_long_line_in_small_fragments() {
        let payload = "x".repeat(10_000);
        let text = format!("data: {}\ndata: [DONE]\n", payload);
        let mut framer = LineFramer::new();
        let mut lines = Vec::new();

        for piece in text.as_bytes().chunks(3) {
            let piece = std::str::from_utf8(piece).unwrap();
            lines.extend(collect(&mut framer, piece));
        }

        assert_eq!(lines, vec![format!("data: {}", payload), "data: [DONE]".to_string()]);
        assert_eq!(framer.partial(), "");
    }

    #[test]
    fn test_newline_found_after_buffered_prefix() {
        let mut framer = LineFramer::new();
        assert!(collect(&mut framer, "abc").is_empty());
        assert_eq!(collect(&mut framer, "d\nef\ng"), vec!["abcd", "ef"]);
        assert_eq!(framer.partial(), "g");
    }

    #[test]
    fn test_finish_discards_dangling_line() {
        let mut framer = LineFramer::new();
        collect(&mut framer, "done\ndangling");
        assert_eq!(framer.finish(), Some("dangling".to_string()));
        assert_eq!(framer.finish(), None);
    }

    #[test]
    fn test_every_split_point_yields_same_lines() {
        let text = "data: first\n\n: keep-alive\ndata: second\ndata: [DONE]\n";
        let expected: Vec<String> = LineFramer::new().feed(text).collect();

        for split in 0..=text.len() {
            let mut framer = LineFramer::new();
            let mut lines = collect(&mut framer, &text[..split]);
            lines.extend(collect(&mut framer, &text[split..]));
            assert_eq!(lines, expected, "split at {}", split);
        }
    }
}
