//! CR/LF line framing
//!
//! HLX frames are single ASCII lines terminated by `\r\n` on transmit. On
//! receive a bare `\n` is tolerated. The framer accumulates raw transport
//! bytes and yields complete frames with the terminator stripped; partial
//! lines stay buffered until the rest arrives.

use bytes::{BufMut, Bytes, BytesMut};

/// Terminator emitted on every transmitted frame
pub const FRAME_TERMINATOR: &[u8] = b"\r\n";

/// Incremental line framer
///
/// Feed transport bytes in with [`extend`](Self::extend), then drain complete
/// frames with [`next_frame`](Self::next_frame).
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: BytesMut,
}

impl LineFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes received from the transport
    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Pop the next complete frame, if one is buffered
    ///
    /// Returns the frame content without its terminator. Accepts both `\r\n`
    /// and bare `\n` as terminators.
    pub fn next_frame(&mut self) -> Option<Bytes> {
        let newline = self.pending.iter().position(|&b| b == b'\n')?;

        let mut line = self.pending.split_to(newline + 1);
        line.truncate(newline);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }

        Some(line.freeze())
    }

    /// Number of buffered bytes not yet forming a complete frame
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Frame a line for transmission, appending `\r\n`
    pub fn frame(line: &[u8]) -> Bytes {
        let mut framed = BytesMut::with_capacity(line.len() + FRAME_TERMINATOR.len());
        framed.put_slice(line);
        framed.put_slice(FRAME_TERMINATOR);
        framed.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let mut framer = LineFramer::new();
        framer.extend(b"QO1\r\n");

        assert_eq!(framer.next_frame().as_deref(), Some(&b"QO1"[..]));
        assert!(framer.next_frame().is_none());
    }

    #[test]
    fn test_bare_newline_tolerated() {
        let mut framer = LineFramer::new();
        framer.extend(b"ERROR\n");

        assert_eq!(framer.next_frame().as_deref(), Some(&b"ERROR"[..]));
    }

    #[test]
    fn test_split_across_reads() {
        let mut framer = LineFramer::new();
        framer.extend(b"(VO1,");
        assert!(framer.next_frame().is_none());
        assert_eq!(framer.pending_len(), 5);

        framer.extend(b"-42)\r\n(VM");
        assert_eq!(framer.next_frame().as_deref(), Some(&b"(VO1,-42)"[..]));
        assert!(framer.next_frame().is_none());
        assert_eq!(framer.pending_len(), 3);
    }

    #[test]
    fn test_multiple_frames_in_one_read() {
        let mut framer = LineFramer::new();
        framer.extend(b"SAVING...\r\nSAVE\r\n");

        assert_eq!(framer.next_frame().as_deref(), Some(&b"SAVING..."[..]));
        assert_eq!(framer.next_frame().as_deref(), Some(&b"SAVE"[..]));
        assert!(framer.next_frame().is_none());
    }

    #[test]
    fn test_frame_appends_crlf() {
        assert_eq!(&LineFramer::frame(b"FPB3")[..], b"FPB3\r\n");
    }

    #[test]
    fn test_empty_line_is_a_frame() {
        let mut framer = LineFramer::new();
        framer.extend(b"\r\n");
        assert_eq!(framer.next_frame().as_deref(), Some(&b""[..]));
    }
}
