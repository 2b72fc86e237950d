//! # Two-class classifier
//!
//! Maps each arriving packet onto one of the two weighted classes by its
//! transport-layer destination port: traffic addressed to the configured
//! second-queue port goes to [`Class::Second`], everything else — including
//! non-UDP/TCP protocols and frames too short to parse — falls back to
//! [`Class::First`].
//!
//! Classification is a pure read over the frame bytes (see [`crate::wire`]);
//! it is deterministic and leaves the packet bit-identical.

use serde::Serialize;

use crate::packet::Packet;
use crate::wire::{FrameView, IPPROTO_TCP, IPPROTO_UDP};

// ─── Class ───────────────────────────────────────────────────────────────────

/// One of the two weighted traffic classes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Class {
    /// Default class — everything not addressed to the second-queue port.
    #[default]
    First = 0,
    /// Traffic addressed to the configured second-queue port.
    Second = 1,
}

impl Class {
    /// Number of classes. The scheduler is hard-wired to exactly two.
    pub const COUNT: usize = 2;

    /// Both classes, in selection order (First is evaluated first and wins
    /// exact finish-time ties).
    pub const ALL: [Class; Class::COUNT] = [Class::First, Class::Second];

    /// Buffer index for this class.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

// ─── Classifier ──────────────────────────────────────────────────────────────

/// Stateless port-threshold classifier.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    second_queue_port: u16,
}

impl Classifier {
    pub fn new(second_queue_port: u16) -> Self {
        Classifier { second_queue_port }
    }

    /// Assign a packet to a class. Never fails: unparseable frames and
    /// unrecognized protocols are first-class traffic.
    pub fn classify(&self, packet: &Packet) -> Class {
        let Some(view) = FrameView::parse(packet.data()) else {
            tracing::debug!(uid = packet.uid(), "classifier: unparseable frame");
            return Class::First;
        };

        match view.protocol() {
            IPPROTO_UDP | IPPROTO_TCP => match view.dst_port() {
                Some(port) if port == self.second_queue_port => {
                    tracing::trace!(uid = packet.uid(), port, "classifier: second queue");
                    Class::Second
                }
                Some(port) => {
                    tracing::trace!(uid = packet.uid(), port, "classifier: first queue");
                    Class::First
                }
                None => {
                    tracing::debug!(uid = packet.uid(), "classifier: truncated transport header");
                    Class::First
                }
            },
            proto => {
                tracing::debug!(
                    uid = packet.uid(),
                    protocol = proto,
                    "classifier: unrecognized transport protocol"
                );
                Class::First
            }
        }
    }
}
