//! # Arrival/drain driver
//!
//! Deterministic (seeded) traffic generation and a backlogged-drain loop for
//! measuring how the scheduler splits link service between the two classes.
//! The driver plays the host runtime's role: it calls `enqueue` once per
//! arrival and `dequeue` once per transmission opportunity, nothing else.

use rand::rngs::StdRng;
use rand::RngExt as _;
use rand::SeedableRng;
use serde::Serialize;

use fairlink_wfq::wire::FrameView;
use fairlink_wfq::{ConfigError, Packet, UidGenerator, WfqConfig, WfqScheduler};

use crate::frame::{tcp_frame, udp_frame, TCP_FRAME_OVERHEAD};

// ─── TrafficSource ──────────────────────────────────────────────────────────

/// Reproducible random packet source.
#[derive(Debug, Clone)]
pub struct TrafficConfig {
    pub seed: u64,
    /// Probability an arrival targets the second-queue port.
    pub second_share: f64,
    /// Probability an arrival is TCP rather than UDP.
    pub tcp_share: f64,
    pub min_len: usize,
    pub max_len: usize,
    pub second_queue_port: u16,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        TrafficConfig {
            seed: 1,
            second_share: 0.5,
            tcp_share: 0.3,
            min_len: TCP_FRAME_OVERHEAD,
            max_len: 1500,
            second_queue_port: 3000,
        }
    }
}

/// Generates packets according to a [`TrafficConfig`], with uids minted from
/// a [`UidGenerator`].
#[derive(Debug)]
pub struct TrafficSource {
    cfg: TrafficConfig,
    rng: StdRng,
    uids: UidGenerator,
}

impl TrafficSource {
    pub fn new(cfg: TrafficConfig) -> Self {
        let rng = StdRng::seed_from_u64(cfg.seed);
        TrafficSource {
            cfg,
            rng,
            uids: UidGenerator::new(),
        }
    }

    /// Next random arrival.
    pub fn next_packet(&mut self) -> Packet {
        let span = (self.cfg.max_len - self.cfg.min_len) as f64;
        let len = self.cfg.min_len + (self.rng.random::<f64>() * span) as usize;
        let port = if self.rng.random::<f64>() < self.cfg.second_share {
            self.cfg.second_queue_port
        } else {
            80
        };
        let data = if self.rng.random::<f64>() < self.cfg.tcp_share {
            tcp_frame(port, len)
        } else {
            udp_frame(port, len)
        };
        Packet::new(self.uids.next(), data)
    }
}

// ─── Fairness experiment ────────────────────────────────────────────────────

/// A saturation experiment: keep both classes backlogged, drain in rounds,
/// and tally how many bytes each class was served.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub scheduler: WfqConfig,
    /// Refill/drain rounds to run.
    pub rounds: usize,
    /// Transmission opportunities per round. Keep this well under the class
    /// capacities so neither class empties mid-round.
    pub drain_per_round: usize,
    /// Fixed frame length for both classes.
    pub frame_len: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            scheduler: WfqConfig::default(),
            rounds: 50,
            drain_per_round: 8,
            frame_len: 1000,
        }
    }
}

/// Served-byte tallies from a [`run_backlogged`] experiment.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FairnessReport {
    pub first_packets: u64,
    pub first_bytes: u64,
    pub second_packets: u64,
    pub second_bytes: u64,
}

impl FairnessReport {
    /// Second-class bytes per first-class byte; the long-run value under
    /// saturation approaches `second_weight / first_weight`.
    pub fn byte_ratio(&self) -> f64 {
        if self.first_bytes == 0 {
            f64::INFINITY
        } else {
            self.second_bytes as f64 / self.first_bytes as f64
        }
    }
}

/// Run the saturation experiment.
pub fn run_backlogged(cfg: &ExperimentConfig) -> Result<FairnessReport, ConfigError> {
    let mut sched = WfqScheduler::new(cfg.scheduler.clone())?;
    let second_port = cfg.scheduler.second_queue_port;
    let mut uids = UidGenerator::new();
    let mut report = FairnessReport::default();

    for round in 0..cfg.rounds {
        // Refill both classes to capacity. `enqueue` reports false once the
        // class buffer rejects, which is the fill signal here, not an error.
        while sched.enqueue(Packet::new(uids.next(), udp_frame(80, cfg.frame_len))) {}
        while sched.enqueue(Packet::new(uids.next(), udp_frame(second_port, cfg.frame_len))) {}

        for _ in 0..cfg.drain_per_round {
            let Some(pkt) = sched.dequeue() else { break };
            let is_second = FrameView::parse(pkt.data())
                .and_then(|v| v.dst_port())
                .is_some_and(|p| p == second_port);
            if is_second {
                report.second_packets += 1;
                report.second_bytes += pkt.len() as u64;
            } else {
                report.first_packets += 1;
                report.first_bytes += pkt.len() as u64;
            }
        }
        tracing::trace!(round, ?report, "round complete");
    }

    Ok(report)
}
