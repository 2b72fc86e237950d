//! # Scheduler configuration
//!
//! All knobs are fixed before traffic flows: [`WfqConfig`] is consumed by
//! `WfqScheduler::new`, validated once, and there is no live reconfiguration
//! surface. Defaults mirror a classic two-queue WFQ link stage: generous
//! per-class capacities, equal weights, and port 3000 steering traffic into
//! the second class.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::Mode;
use crate::classify::Class;

// ─── WfqConfig ───────────────────────────────────────────────────────────────

/// Construction-time configuration for the two-class scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WfqConfig {
    /// Capacity accounting mode for both class buffers.
    pub mode: Mode,
    /// Max packets in the first class buffer (packets mode).
    pub first_max_packets: usize,
    /// Max packets in the second class buffer (packets mode).
    pub second_max_packets: usize,
    /// Byte limit for the first class buffer (bytes mode, exclusive).
    pub first_max_bytes: u64,
    /// Byte limit for the second class buffer (bytes mode, exclusive).
    pub second_max_bytes: u64,
    /// Destination port steering traffic into the second class.
    pub second_queue_port: u16,
    /// First class weight. Must be positive.
    pub first_weight: u32,
    /// Second class weight. Must be positive.
    pub second_weight: u32,
}

impl Default for WfqConfig {
    fn default() -> Self {
        WfqConfig {
            mode: Mode::Packets,
            first_max_packets: 100,
            second_max_packets: 100,
            first_max_bytes: 100 * 65535,
            second_max_bytes: 100 * 65535,
            second_queue_port: 3000,
            first_weight: 1,
            second_weight: 1,
        }
    }
}

impl WfqConfig {
    /// Check the preconditions the scheduler's arithmetic relies on.
    ///
    /// A zero weight would divide by zero in the finish-time computation, so
    /// it is rejected here rather than propagated as infinities. Capacities
    /// are only checked for the active mode; a zero limit in the inactive
    /// mode is inert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_weight == 0 {
            return Err(ConfigError::ZeroWeight(Class::First));
        }
        if self.second_weight == 0 {
            return Err(ConfigError::ZeroWeight(Class::Second));
        }
        match self.mode {
            Mode::Packets => {
                if self.first_max_packets == 0 {
                    return Err(ConfigError::ZeroCapacity(Class::First));
                }
                if self.second_max_packets == 0 {
                    return Err(ConfigError::ZeroCapacity(Class::Second));
                }
            }
            Mode::Bytes => {
                if self.first_max_bytes == 0 {
                    return Err(ConfigError::ZeroCapacity(Class::First));
                }
                if self.second_max_bytes == 0 {
                    return Err(ConfigError::ZeroCapacity(Class::Second));
                }
            }
        }
        Ok(())
    }

    /// Per-class `(max_packets, max_bytes, weight)` tuple.
    pub(crate) fn class_limits(&self, class: Class) -> (usize, u64, u32) {
        match class {
            Class::First => (self.first_max_packets, self.first_max_bytes, self.first_weight),
            Class::Second => (
                self.second_max_packets,
                self.second_max_bytes,
                self.second_weight,
            ),
        }
    }
}

// ─── ConfigError ─────────────────────────────────────────────────────────────

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A class weight of zero would divide by zero in finish-time math.
    #[error("{0:?} class weight must be positive")]
    ZeroWeight(Class),
    /// The active mode's capacity limit is zero; no packet could ever be
    /// admitted to that class.
    #[error("{0:?} class capacity must be positive for the configured mode")]
    ZeroCapacity(Class),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(WfqConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_weight_is_rejected() {
        let cfg = WfqConfig {
            second_weight: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroWeight(Class::Second)));
    }

    #[test]
    fn zero_capacity_checked_for_active_mode_only() {
        // Zero byte limit is inert while in packets mode...
        let cfg = WfqConfig {
            first_max_bytes: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());

        // ...and rejected once bytes mode is active.
        let cfg = WfqConfig {
            mode: Mode::Bytes,
            first_max_bytes: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCapacity(Class::First)));
    }

    #[test]
    fn config_round_trips_through_serde() {
        let cfg = WfqConfig {
            mode: Mode::Bytes,
            first_weight: 3,
            second_queue_port: 4444,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: WfqConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
