//! Request dispatch table
//!
//! An ordered list of compiled pattern → handler entries, tried first to
//! last; with every pattern fully anchored the order only matters where one
//! body is a prefix of another (`VMT…` registers before `VM…`). Handlers
//! return the frames for the origin and the frames to broadcast to the
//! other peers; a handler error becomes a single `ERROR` to the origin and
//! nothing to anyone else.

use bytes::Bytes;
use hlx_wire::CommandPattern;
use tracing::trace;

use crate::error::Result;

/// Frames produced by one handled request
#[derive(Debug, Default)]
pub struct Outcome {
    /// Sent to the requesting peer, in order; ends with the echo response
    pub reply: Vec<Bytes>,
    /// Sent to every other peer; empty when the mutation was redundant
    pub broadcast: Vec<Bytes>,
}

impl Outcome {
    /// A reply with nothing to broadcast
    pub fn reply(frames: Vec<Bytes>) -> Self {
        Self { reply: frames, broadcast: Vec::new() }
    }

    /// The common mutation shape: one echo, broadcast only when changed
    pub fn echo(frame: Bytes, changed: bool) -> Self {
        let broadcast = if changed { vec![frame.clone()] } else { Vec::new() };
        Self { reply: vec![frame], broadcast }
    }
}

/// Handles one matched request, given its capture vector
pub type RequestHandler = Box<dyn Fn(&[String]) -> Result<Outcome> + Send + Sync>;

struct Entry {
    pattern: &'static CommandPattern,
    handler: RequestHandler,
}

/// Ordered pattern → handler table
#[derive(Default)]
pub struct CommandDispatcher {
    table: Vec<Entry>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; more specific patterns register first
    pub fn register(&mut self, pattern: &'static CommandPattern, handler: RequestHandler) {
        self.table.push(Entry { pattern, handler });
    }

    /// Match a received frame against the table
    ///
    /// `None` means no entry recognized the frame.
    pub fn dispatch(&self, frame: &[u8]) -> Option<Result<Outcome>> {
        for entry in &self.table {
            if let Some(captures) = entry.pattern.captures(frame) {
                trace!(pattern = entry.pattern.as_str(), "request matched");
                return Some((entry.handler)(&captures));
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlx_codec::zone;

    #[test]
    fn test_first_matching_entry_wins() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register(
            zone::ToggleMute::request_pattern(),
            Box::new(|_| Ok(Outcome::reply(vec![Bytes::from_static(b"toggle")]))),
        );
        dispatcher.register(
            zone::Mute::request_pattern(),
            Box::new(|_| Ok(Outcome::reply(vec![Bytes::from_static(b"set")]))),
        );

        let outcome = dispatcher.dispatch(b"VMTO3").unwrap().unwrap();
        assert_eq!(outcome.reply[0], Bytes::from_static(b"toggle"));

        let outcome = dispatcher.dispatch(b"VMO3,M").unwrap().unwrap();
        assert_eq!(outcome.reply[0], Bytes::from_static(b"set"));
    }

    #[test]
    fn test_unmatched_frame_is_none() {
        let dispatcher = CommandDispatcher::new();
        assert!(dispatcher.dispatch(b"ZZZ").is_none());
    }

    #[test]
    fn test_redundant_echo_suppresses_broadcast() {
        let unchanged = Outcome::echo(Bytes::from_static(b"(VO1,-40)"), false);
        assert_eq!(unchanged.reply.len(), 1);
        assert!(unchanged.broadcast.is_empty());

        let changed = Outcome::echo(Bytes::from_static(b"(VO1,-30)"), true);
        assert_eq!(changed.broadcast.len(), 1);
    }
}
