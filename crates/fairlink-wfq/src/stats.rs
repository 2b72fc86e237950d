//! # Scheduler statistics
//!
//! Per-class counters recorded around admission, drop, and departure.
//! Snapshots serialize cleanly for JSON export from a host's stats loop.

use serde::Serialize;

use crate::classify::Class;

// ─── ClassStats ──────────────────────────────────────────────────────────────

/// Counters for one traffic class.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ClassStats {
    /// Packets accepted into the buffer.
    pub packets_admitted: u64,
    /// Bytes accepted into the buffer.
    pub bytes_admitted: u64,
    /// Packets rejected at admission and handed to the drop sink.
    pub packets_dropped: u64,
    /// Bytes rejected at admission.
    pub bytes_dropped: u64,
    /// Packets that left via dequeue.
    pub packets_dequeued: u64,
    /// Bytes that left via dequeue.
    pub bytes_dequeued: u64,
}

impl ClassStats {
    /// Fraction of offered packets that were dropped.
    pub fn drop_rate(&self) -> f64 {
        let offered = self.packets_admitted + self.packets_dropped;
        if offered == 0 {
            0.0
        } else {
            self.packets_dropped as f64 / offered as f64
        }
    }
}

// ─── SchedulerStats ──────────────────────────────────────────────────────────

/// Counters for both classes, indexed by [`Class`].
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SchedulerStats {
    pub classes: [ClassStats; Class::COUNT],
}

impl SchedulerStats {
    #[inline]
    pub fn class(&self, class: Class) -> &ClassStats {
        &self.classes[class.index()]
    }

    pub(crate) fn record_admit(&mut self, class: Class, len: usize) {
        let c = &mut self.classes[class.index()];
        c.packets_admitted += 1;
        c.bytes_admitted += len as u64;
    }

    pub(crate) fn record_drop(&mut self, class: Class, len: usize) {
        let c = &mut self.classes[class.index()];
        c.packets_dropped += 1;
        c.bytes_dropped += len as u64;
    }

    pub(crate) fn record_dequeue(&mut self, class: Class, len: usize) {
        let c = &mut self.classes[class.index()];
        c.packets_dequeued += 1;
        c.bytes_dequeued += len as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_rate_over_offered_load() {
        let mut stats = SchedulerStats::default();
        stats.record_admit(Class::First, 100);
        stats.record_admit(Class::First, 100);
        stats.record_admit(Class::First, 100);
        stats.record_drop(Class::First, 100);

        assert_eq!(stats.class(Class::First).drop_rate(), 0.25);
        assert_eq!(stats.class(Class::Second).drop_rate(), 0.0);
    }

    #[test]
    fn snapshot_serializes() {
        let mut stats = SchedulerStats::default();
        stats.record_admit(Class::Second, 42);
        stats.record_dequeue(Class::Second, 42);

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["classes"][1]["bytes_dequeued"], 42);
    }
}
