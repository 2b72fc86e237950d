//! # Virtual-time WFQ scheduler
//!
//! The facade the host queueing stage talks to. One [`WfqScheduler`] instance
//! owns both class buffers, the uid → finish-time table, and the global
//! virtual clock; every entry point takes `&mut self` (or `&self` for pure
//! reads), so exclusive access per call is enforced by the borrow checker.
//! There is no internal locking — a multi-threaded host must serialize
//! access externally.
//!
//! ## Discipline
//!
//! - On admission a packet gets `finish = prev + size / weight`, where `prev`
//!   is its class tail's finish time, or the global virtual time `V` when the
//!   class was empty (a reactivated class starts from "now", never backdated).
//! - Dequeue serves the head with the minimum finish time across both
//!   classes; the first class wins exact ties.
//! - Only dequeue advances `V`, by `size / weight_sum` over the classes that
//!   were backlogged at departure.

use std::collections::HashMap;
use std::fmt;

use crate::buffer::{ClassBuffer, Mode};
use crate::classify::{Class, Classifier};
use crate::config::{ConfigError, WfqConfig};
use crate::packet::Packet;
use crate::stats::SchedulerStats;

// ─── DropSink ────────────────────────────────────────────────────────────────

/// Receives packets rejected at admission.
///
/// The counterpart of a queue's drop trace hook: the scheduler never retries
/// or re-queues a rejected packet, it hands it here and reports `false` to
/// the caller.
pub trait DropSink {
    fn on_drop(&mut self, packet: Packet, class: Class);
}

/// Default sink: log the drop and release the handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDropSink;

impl DropSink for LogDropSink {
    fn on_drop(&mut self, packet: Packet, class: Class) {
        tracing::debug!(uid = packet.uid(), len = packet.len(), ?class, "packet dropped");
    }
}

// ─── WfqScheduler ────────────────────────────────────────────────────────────

/// Two-class weighted fair queueing scheduler.
pub struct WfqScheduler {
    classifier: Classifier,
    buffers: [ClassBuffer; Class::COUNT],
    /// uid → virtual finish time; an entry exists iff the packet is resident.
    finish_times: HashMap<u64, f64>,
    /// Global virtual time. Non-decreasing; advanced only by dequeue.
    virtual_time: f64,
    mode: Mode,
    drop_sink: Box<dyn DropSink>,
    stats: SchedulerStats,
}

impl fmt::Debug for WfqScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WfqScheduler")
            .field("buffers", &self.buffers)
            .field("virtual_time", &self.virtual_time)
            .field("mode", &self.mode)
            .field("resident", &self.finish_times.len())
            .finish_non_exhaustive()
    }
}

impl WfqScheduler {
    /// Build a scheduler with the default logging drop sink.
    pub fn new(config: WfqConfig) -> Result<Self, ConfigError> {
        Self::with_drop_sink(config, Box::new(LogDropSink))
    }

    /// Build a scheduler routing rejected packets to a custom sink.
    pub fn with_drop_sink(
        config: WfqConfig,
        drop_sink: Box<dyn DropSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let buffers = Class::ALL.map(|class| {
            let (max_packets, max_bytes, weight) = config.class_limits(class);
            ClassBuffer::new(config.mode, max_packets, max_bytes, weight)
        });
        Ok(WfqScheduler {
            classifier: Classifier::new(config.second_queue_port),
            buffers,
            finish_times: HashMap::new(),
            virtual_time: 0.0,
            mode: config.mode,
            drop_sink,
            stats: SchedulerStats::default(),
        })
    }

    // ─── Entry points ────────────────────────────────────────────────────

    /// Classify and admit a packet. Returns `false` if the class buffer was
    /// at capacity, in which case the packet went to the drop sink and no
    /// scheduler state changed.
    pub fn enqueue(&mut self, packet: Packet) -> bool {
        let class = self.classifier.classify(&packet);
        let idx = class.index();

        // Finish time chains off the class tail; an empty class restarts
        // from the global virtual clock.
        let prev_finish = match self.buffers[idx].back() {
            Some(tail) => self.stored_finish(tail.uid()),
            None => self.virtual_time,
        };
        let finish = prev_finish + packet.len() as f64 / self.buffers[idx].weight() as f64;

        let uid = packet.uid();
        let len = packet.len();
        match self.buffers[idx].try_admit(packet) {
            Ok(()) => {
                self.finish_times.insert(uid, finish);
                self.stats.record_admit(class, len);
                tracing::trace!(
                    uid,
                    ?class,
                    finish,
                    packets = self.buffers[idx].len(),
                    bytes = self.buffers[idx].bytes(),
                    "admitted"
                );
                true
            }
            Err(packet) => {
                self.stats.record_drop(class, len);
                tracing::debug!(uid, ?class, len, "buffer full, dropping packet");
                self.drop_sink.on_drop(packet, class);
                false
            }
        }
    }

    /// Remove and return the next packet in fair order, or `None` when both
    /// buffers are empty.
    pub fn dequeue(&mut self) -> Option<Packet> {
        let class = self.select()?;

        // Weight sum counts the classes backlogged *before* removal; the
        // winning class is among them, so the sum is never zero.
        let weight_sum: u32 = Class::ALL
            .iter()
            .filter(|c| !self.buffers[c.index()].is_empty())
            .map(|c| self.buffers[c.index()].weight())
            .sum();

        let packet = self.buffers[class.index()]
            .pop_front()
            .expect("selected class has a head packet");
        self.virtual_time += packet.len() as f64 / weight_sum as f64;
        self.finish_times.remove(&packet.uid());
        self.stats.record_dequeue(class, packet.len());

        tracing::trace!(
            uid = packet.uid(),
            ?class,
            virtual_time = self.virtual_time,
            packets = self.buffers[class.index()].len(),
            bytes = self.buffers[class.index()].bytes(),
            "dequeued"
        );
        Some(packet)
    }

    /// The packet the next [`dequeue`](Self::dequeue) would return. Pure
    /// read: no buffer, table, or clock mutation.
    pub fn peek(&self) -> Option<&Packet> {
        let class = self.select()?;
        self.buffers[class.index()].front()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Pick the class whose head packet has the minimum finish time.
    ///
    /// The first class is evaluated first and the second is compared with a
    /// strict `<`, so the first buffer wins exact ties.
    fn select(&self) -> Option<Class> {
        let mut winner: Option<(Class, f64)> = None;
        for class in Class::ALL {
            let Some(head) = self.buffers[class.index()].front() else {
                continue;
            };
            let finish = self.stored_finish(head.uid());
            match winner {
                Some((_, min)) if finish >= min => {}
                _ => winner = Some((class, finish)),
            }
        }
        winner.map(|(class, _)| class)
    }

    fn stored_finish(&self, uid: u64) -> f64 {
        *self
            .finish_times
            .get(&uid)
            .expect("resident packet has a finish-time entry")
    }

    // ─── Observers ───────────────────────────────────────────────────────

    /// Capacity accounting mode (fixed at construction).
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current global virtual time.
    #[inline]
    pub fn virtual_time(&self) -> f64 {
        self.virtual_time
    }

    /// Resident packet count for one class.
    #[inline]
    pub fn class_len(&self, class: Class) -> usize {
        self.buffers[class.index()].len()
    }

    /// Resident bytes for one class.
    #[inline]
    pub fn class_bytes(&self, class: Class) -> u64 {
        self.buffers[class.index()].bytes()
    }

    /// Total resident packets across both classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffers.iter().map(ClassBuffer::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffers.iter().all(ClassBuffer::is_empty)
    }

    /// Counter snapshot.
    #[inline]
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }
}
