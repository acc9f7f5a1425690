//! Shared connection byte buffer
//!
//! A [`ConnectionBuffer`] is the unit of data exchanged between the codec and
//! a transport connection. Clones share the same underlying storage; readers
//! may inspect concurrently, while mutation requires the exclusive window
//! (append and flush fail with [`WireError::BufferNotOwned`] if a reader is
//! live at that moment).
//!
//! Content is 7-bit ASCII with no embedded NULs; the codec upholds that
//! contract when it fills buffers.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use parking_lot::RwLock;

use crate::error::{Result, WireError};

/// Growable byte buffer with shared-ownership semantics
///
/// Cheap to clone; all clones view the same bytes. Readers use
/// [`snapshot`](Self::snapshot); writers use [`append`](Self::append) and
/// [`flush`](Self::flush), which take the exclusive mutation window.
#[derive(Clone, Default)]
pub struct ConnectionBuffer {
    inner: Arc<RwLock<BytesMut>>,
}

impl ConnectionBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer pre-filled with the given content
    pub fn from_bytes(content: &[u8]) -> Self {
        let buffer = Self::new();
        // A freshly created buffer always grants the mutation window.
        buffer
            .append(content)
            .expect("mutation window on a fresh buffer");
        buffer
    }

    /// Number of content bytes currently held
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True if the buffer holds no content
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the current content out
    ///
    /// Readers never block writers for longer than the copy.
    pub fn snapshot(&self) -> Bytes {
        Bytes::copy_from_slice(&self.inner.read())
    }

    /// Append content bytes
    ///
    /// Fails with [`WireError::BufferNotOwned`] when another clone holds the
    /// mutation window.
    pub fn append(&self, content: &[u8]) -> Result<()> {
        debug_assert!(
            content.iter().all(|&b| b != 0 && b.is_ascii()),
            "connection buffers carry 7-bit ASCII without NULs"
        );

        let mut inner = self.inner.try_write().ok_or(WireError::BufferNotOwned)?;
        inner.extend_from_slice(content);
        Ok(())
    }

    /// Drain the buffer, returning everything accumulated so far
    pub fn flush(&self) -> Result<Bytes> {
        let mut inner = self.inner.try_write().ok_or(WireError::BufferNotOwned)?;
        Ok(inner.split().freeze())
    }
}

impl std::fmt::Debug for ConnectionBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ConnectionBuffer")
            .field("len", &inner.len())
            .field("content", &String::from_utf8_lossy(&inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_len() {
        let buffer = ConnectionBuffer::new();
        assert!(buffer.is_empty());

        buffer.append(b"QO1").unwrap();
        assert_eq!(buffer.len(), 3);
        assert_eq!(&buffer.snapshot()[..], b"QO1");
    }

    #[test]
    fn test_clones_share_content() {
        let buffer = ConnectionBuffer::new();
        let view = buffer.clone();

        buffer.append(b"VO1,-42").unwrap();
        assert_eq!(&view.snapshot()[..], b"VO1,-42");
    }

    #[test]
    fn test_flush_drains() {
        let buffer = ConnectionBuffer::from_bytes(b"ERROR\r\n");
        let drained = buffer.flush().unwrap();

        assert_eq!(&drained[..], b"ERROR\r\n");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_flush_on_empty_is_empty() {
        let buffer = ConnectionBuffer::new();
        assert!(buffer.flush().unwrap().is_empty());
    }
}
