//! # Packet handle
//!
//! The scheduler never owns payload memory outright: a [`Packet`] pairs a
//! host-assigned uid with a refcounted [`Bytes`] handle to the frame, so
//! enqueue/dequeue move handles, not bytes.

use bytes::Bytes;

// ─── Packet ──────────────────────────────────────────────────────────────────

/// A scheduled unit: stable identity plus a cheap handle to the frame bytes.
///
/// The uid must be unique among packets resident in the same scheduler; it
/// keys the finish-time table. Hosts that do not already carry an identity
/// can mint one with [`UidGenerator`].
#[derive(Debug, Clone)]
pub struct Packet {
    uid: u64,
    data: Bytes,
}

impl Packet {
    pub fn new(uid: u64, data: Bytes) -> Self {
        Packet { uid, data }
    }

    /// Stable identity for this packet's lifetime in the scheduler.
    #[inline]
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// Full frame length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The frame bytes (PPP + IPv4 + transport + payload).
    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

// ─── UidGenerator ────────────────────────────────────────────────────────────

/// Monotonic uid generator for hosts without their own packet identities.
#[derive(Debug, Default)]
pub struct UidGenerator {
    next: u64,
}

impl UidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let uid = self.next;
        self.next = self.next.wrapping_add(1);
        uid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uids_are_monotonic() {
        let mut gen = UidGenerator::new();
        assert_eq!(gen.next(), 0);
        assert_eq!(gen.next(), 1);
        assert_eq!(gen.next(), 2);
    }

    #[test]
    fn packet_reports_frame_length() {
        let pkt = Packet::new(7, Bytes::from_static(b"abcd"));
        assert_eq!(pkt.uid(), 7);
        assert_eq!(pkt.len(), 4);
        assert!(!pkt.is_empty());
    }
}
