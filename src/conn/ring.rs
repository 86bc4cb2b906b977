//! Fixed-size read buffer with CR-LF line framing.
//!
//! Inbound bytes accumulate in a 2048-byte buffer; complete `\r\n`
//! terminated lines are drained off the front and the partial remainder
//! is compacted down for the next read.

/// Size of the inbound read buffer. A single line longer than this
/// (without a CR-LF) cannot be framed and is surfaced as an error.
pub const READ_BUFFER_SIZE: usize = 2048;

/// The read ring: `buf[..used]` is a prefix of the inbound byte stream
/// that has not been framed into lines yet.
pub(crate) struct LineRing {
    buf: [u8; READ_BUFFER_SIZE],
    used: usize,
}

impl std::fmt::Debug for LineRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineRing")
            .field("used", &self.used)
            .finish_non_exhaustive()
    }
}

impl LineRing {
    pub(crate) fn new() -> Self {
        Self {
            buf: [0; READ_BUFFER_SIZE],
            used: 0,
        }
    }

    /// The writable tail of the buffer; reads land here.
    pub(crate) fn vacant_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.used..]
    }

    /// Record `n` bytes appended to the tail by a read.
    pub(crate) fn commit(&mut self, n: usize) {
        debug_assert!(self.used + n <= READ_BUFFER_SIZE);
        self.used += n;
    }

    pub(crate) fn is_full(&self) -> bool {
        self.used == READ_BUFFER_SIZE
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Pop the next complete line, without its CR-LF terminator.
    ///
    /// Consumed bytes (line + 2) are compacted out with a block move, so
    /// the unparsed remainder always starts at the front of the buffer.
    /// Lines are decoded lossily; Twitch sends UTF-8.
    pub(crate) fn next_line(&mut self) -> Option<String> {
        let end = self.buf[..self.used]
            .windows(2)
            .position(|w| w == b"\r\n")?;

        let line = String::from_utf8_lossy(&self.buf[..end]).into_owned();

        let consumed = end + 2;
        self.buf.copy_within(consumed..self.used, 0);
        self.used -= consumed;

        Some(line)
    }

    pub(crate) fn clear(&mut self) {
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed(ring: &mut LineRing, bytes: &[u8]) {
        ring.vacant_mut()[..bytes.len()].copy_from_slice(bytes);
        ring.commit(bytes.len());
    }

    #[test]
    fn test_single_line() {
        let mut ring = LineRing::new();
        feed(&mut ring, b"PING :tmi.twitch.tv\r\n");
        assert_eq!(ring.next_line().as_deref(), Some("PING :tmi.twitch.tv"));
        assert!(ring.next_line().is_none());
        assert!(ring.is_empty());
    }

    #[test]
    fn test_partial_line_stays_buffered() {
        let mut ring = LineRing::new();
        feed(&mut ring, b"PING :tmi.twi");
        assert!(ring.next_line().is_none());
        feed(&mut ring, b"tch.tv\r\nJOIN #x\r\n");
        assert_eq!(ring.next_line().as_deref(), Some("PING :tmi.twitch.tv"));
        assert_eq!(ring.next_line().as_deref(), Some("JOIN #x"));
        assert!(ring.next_line().is_none());
    }

    #[test]
    fn test_cr_without_lf_is_not_a_terminator() {
        let mut ring = LineRing::new();
        feed(&mut ring, b"abc\rdef\r\n");
        assert_eq!(ring.next_line().as_deref(), Some("abc\rdef"));
    }

    #[test]
    fn test_split_across_delimiter() {
        let mut ring = LineRing::new();
        feed(&mut ring, b"PING\r");
        assert!(ring.next_line().is_none());
        feed(&mut ring, b"\n");
        assert_eq!(ring.next_line().as_deref(), Some("PING"));
    }

    #[test]
    fn test_full_without_line() {
        let mut ring = LineRing::new();
        feed(&mut ring, &[b'x'; READ_BUFFER_SIZE]);
        assert!(ring.is_full());
        assert!(ring.next_line().is_none());
    }

    #[test]
    fn test_clear() {
        let mut ring = LineRing::new();
        feed(&mut ring, b"partial");
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.vacant_mut().len(), READ_BUFFER_SIZE);
    }

    proptest! {
        /// For any byte stream split arbitrarily across reads, the framed
        /// lines equal the lines of the concatenated stream.
        #[test]
        fn framing_is_chunking_invariant(
            lines in prop::collection::vec("[a-zA-Z0-9 :#@!.=;-]{0,120}", 1..20),
            chunk_sizes in prop::collection::vec(1usize..64, 1..200),
        ) {
            let stream: Vec<u8> = lines
                .iter()
                .flat_map(|l| l.bytes().chain(*b"\r\n"))
                .collect();

            let mut ring = LineRing::new();
            let mut framed = Vec::new();
            let mut offset = 0;
            let mut chunks = chunk_sizes.iter().cycle();

            while offset < stream.len() {
                let n = (*chunks.next().unwrap()).min(stream.len() - offset);
                feed(&mut ring, &stream[offset..offset + n]);
                offset += n;
                while let Some(line) = ring.next_line() {
                    framed.push(line);
                }
            }

            prop_assert_eq!(framed, lines);
            prop_assert!(ring.is_empty());
        }
    }
}
