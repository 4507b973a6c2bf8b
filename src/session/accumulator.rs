//! The in-progress assistant message.

/// Text of one open assistant message plus the sink's handle to its block.
///
/// Append-only. Owned by [`SessionState::Streaming`](super::SessionState);
/// consuming it with [`MessageAccumulator::into_handle`] closes the message.
#[derive(Debug)]
pub struct MessageAccumulator<H> {
    text: String,
    handle: H,
}

impl<H> MessageAccumulator<H> {
    pub fn new(handle: H) -> Self {
        Self {
            text: String::new(),
            handle,
        }
    }

    pub fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    /// Everything appended so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_accumulates_in_order() {
        let mut acc = MessageAccumulator::new(7u32);
        acc.append("Hel");
        acc.append("");
        acc.append("lo");
        assert_eq!(acc.text(), "Hello");
        assert_eq!(*acc.handle(), 7);
        assert_eq!(acc.into_handle(), 7);
    }
}
