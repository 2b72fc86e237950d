//! # fairlink-wfq
//!
//! Two-class weighted fair queueing (WFQ) link scheduler.
//!
//! Arriving packets are classified by transport-layer destination port into
//! one of two weighted classes, buffered in bounded per-class FIFOs, and
//! released in virtual-finish-time order so the output link's capacity is
//! shared between the classes in proportion to their configured weights.
//!
//! Synchronous and single-threaded by design: every operation runs to
//! completion, and one [`WfqScheduler`] instance owns all mutable state.
//!
//! ## Crate structure
//!
//! - [`wire`] — read-only PPP/IPv4/UDP/TCP header views
//! - [`packet`] — packet handle (uid + refcounted bytes)
//! - [`classify`] — the two-class destination-port classifier
//! - [`buffer`] — bounded per-class FIFO with packet/byte accounting
//! - [`sched`] — finish-time table, virtual clock, enqueue/dequeue/peek
//! - [`config`] — construction-time configuration and validation
//! - [`stats`] — per-class counters
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use fairlink_wfq::{Packet, WfqConfig, WfqScheduler};
//!
//! let mut sched = WfqScheduler::new(WfqConfig::default()).unwrap();
//! // Frames that don't parse as PPP+IPv4 fall into the first class.
//! sched.enqueue(Packet::new(0, Bytes::from_static(b"opaque frame")));
//! let next = sched.dequeue().unwrap();
//! assert_eq!(next.uid(), 0);
//! ```

pub mod buffer;
pub mod classify;
pub mod config;
pub mod packet;
pub mod sched;
pub mod stats;
pub mod wire;

pub use buffer::Mode;
pub use classify::{Class, Classifier};
pub use config::{ConfigError, WfqConfig};
pub use packet::{Packet, UidGenerator};
pub use sched::{DropSink, LogDropSink, WfqScheduler};
pub use stats::{ClassStats, SchedulerStats};
