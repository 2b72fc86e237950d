//! # Bounded class buffer
//!
//! One FIFO per traffic class, tracking packet count and cumulative bytes and
//! enforcing a capacity in one of two modes. Rejection hands the packet back
//! untouched so the caller can route it to the drop path; the buffer's own
//! state never changes on a failed admission.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::packet::Packet;

// ─── Mode ────────────────────────────────────────────────────────────────────

/// Capacity accounting mode, uniform across both class buffers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Limit each buffer by packet count (`max_packets`).
    #[default]
    Packets,
    /// Limit each buffer by cumulative bytes (`max_bytes`).
    Bytes,
}

// ─── ClassBuffer ─────────────────────────────────────────────────────────────

/// FIFO buffer for one traffic class.
///
/// Invariant: `bytes` always equals the sum of the lengths of the resident
/// packets, and the configured limit for the active [`Mode`] holds after
/// every successful admission.
#[derive(Debug)]
pub struct ClassBuffer {
    queue: VecDeque<Packet>,
    bytes: u64,
    mode: Mode,
    max_packets: usize,
    max_bytes: u64,
    weight: u32,
}

impl ClassBuffer {
    pub fn new(mode: Mode, max_packets: usize, max_bytes: u64, weight: u32) -> Self {
        ClassBuffer {
            queue: VecDeque::new(),
            bytes: 0,
            mode,
            max_packets,
            max_bytes,
            weight,
        }
    }

    /// Append a packet to the tail, or hand it back if the buffer is at
    /// capacity.
    ///
    /// In bytes mode the boundary is exclusive: a packet that would make the
    /// buffer exactly reach `max_bytes` is rejected too.
    pub fn try_admit(&mut self, packet: Packet) -> Result<(), Packet> {
        match self.mode {
            Mode::Packets => {
                if self.queue.len() >= self.max_packets {
                    return Err(packet);
                }
            }
            Mode::Bytes => {
                if self.bytes + packet.len() as u64 >= self.max_bytes {
                    return Err(packet);
                }
            }
        }

        self.bytes += packet.len() as u64;
        self.queue.push_back(packet);
        Ok(())
    }

    /// Remove and return the head-of-line packet.
    pub fn pop_front(&mut self) -> Option<Packet> {
        let packet = self.queue.pop_front()?;
        self.bytes -= packet.len() as u64;
        Some(packet)
    }

    /// Head-of-line packet, next to leave this class.
    #[inline]
    pub fn front(&self) -> Option<&Packet> {
        self.queue.front()
    }

    /// Tail packet, the most recently admitted.
    #[inline]
    pub fn back(&self) -> Option<&Packet> {
        self.queue.back()
    }

    /// Resident packet count.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Resident bytes.
    #[inline]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Configured class weight.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }
}
