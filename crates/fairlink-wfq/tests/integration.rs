//! # Integration tests: full scheduler behaviour through the public API
//!
//! Drives classify → admit → finish-time assignment → fair selection end to
//! end, with hand-rolled PPP+IPv4+UDP/TCP frames standing in for host
//! traffic. No I/O anywhere.

use bytes::Bytes;
use fairlink_wfq::{Class, Mode, Packet, UidGenerator, WfqConfig, WfqScheduler};

// ─── Helpers ────────────────────────────────────────────────────────────────

const SECOND_QUEUE_PORT: u16 = 3000;
const HEADERS_LEN: usize = 2 + 20 + 8;

/// PPP+IPv4+UDP frame of exactly `total_len` bytes.
fn udp_frame(dst_port: u16, total_len: usize) -> Bytes {
    assert!(total_len >= HEADERS_LEN);
    let mut f = vec![0x00, 0x21];
    let mut ip = vec![0u8; 20];
    ip[0] = 0x45;
    ip[9] = 17;
    f.extend_from_slice(&ip);
    let mut udp = vec![0u8; 8];
    udp[2..4].copy_from_slice(&dst_port.to_be_bytes());
    f.extend_from_slice(&udp);
    f.resize(total_len, 0);
    Bytes::from(f)
}

fn pkt(uids: &mut UidGenerator, dst_port: u16, len: usize) -> Packet {
    Packet::new(uids.next(), udp_frame(dst_port, len))
}

// ─── Worked scenario ────────────────────────────────────────────────────────

#[test]
fn two_class_scenario_advances_virtual_time_by_weight_sum() {
    let mut uids = UidGenerator::new();
    let mut s = WfqScheduler::new(WfqConfig {
        first_max_packets: 2,
        second_max_packets: 2,
        ..Default::default()
    })
    .unwrap();

    let a = pkt(&mut uids, 80, 100);
    let a_uid = a.uid();
    let b = pkt(&mut uids, SECOND_QUEUE_PORT, 200);

    assert!(s.enqueue(a));
    assert!(s.enqueue(b));
    assert_eq!(s.virtual_time(), 0.0, "enqueue never advances V");

    // A's finish time (100) beats B's (200). Both classes were backlogged,
    // so V advances by 100 / (1 + 1) = 50.
    let served = s.dequeue().unwrap();
    assert_eq!(served.uid(), a_uid);
    assert_eq!(s.virtual_time(), 50.0);
}

#[test]
fn single_backlogged_class_gets_full_service_rate() {
    let mut uids = UidGenerator::new();
    let mut s = WfqScheduler::new(WfqConfig::default()).unwrap();

    assert!(s.enqueue(pkt(&mut uids, 80, 100)));
    s.dequeue().unwrap();
    // Only the first class was backlogged: V += 100 / 1.
    assert_eq!(s.virtual_time(), 100.0);
}

// ─── Classification through the facade ──────────────────────────────────────

#[test]
fn destination_port_steers_between_classes() {
    let mut uids = UidGenerator::new();
    let mut s = WfqScheduler::new(WfqConfig::default()).unwrap();

    assert!(s.enqueue(pkt(&mut uids, 80, 100)));
    assert!(s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 100)));
    assert!(s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 100)));

    assert_eq!(s.class_len(Class::First), 1);
    assert_eq!(s.class_len(Class::Second), 2);
    assert_eq!(s.class_bytes(Class::Second), 200);
    assert_eq!(s.len(), 3);
}

#[test]
fn enqueue_does_not_disturb_frame_bytes() {
    let mut s = WfqScheduler::new(WfqConfig::default()).unwrap();
    let data = udp_frame(SECOND_QUEUE_PORT, 120);
    let original = data.to_vec();

    assert!(s.enqueue(Packet::new(1, data)));
    let back = s.dequeue().unwrap();
    assert_eq!(back.data().as_ref(), &original[..]);
}

// ─── Drops and capacity ─────────────────────────────────────────────────────

#[test]
fn overflow_is_dropped_and_counted() {
    let mut uids = UidGenerator::new();
    let mut s = WfqScheduler::new(WfqConfig {
        second_max_packets: 1,
        ..Default::default()
    })
    .unwrap();

    assert!(s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 100)));
    assert!(!s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 100)));
    assert!(!s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 100)));

    let snap = s.stats().class(Class::Second);
    assert_eq!(snap.packets_admitted, 1);
    assert_eq!(snap.packets_dropped, 2);
    assert_eq!(snap.drop_rate(), 2.0 / 3.0);

    // A full second class never blocks the first.
    assert!(s.enqueue(pkt(&mut uids, 80, 100)));
}

#[test]
fn byte_mode_limits_each_class_independently() {
    let mut uids = UidGenerator::new();
    let mut s = WfqScheduler::new(WfqConfig {
        mode: Mode::Bytes,
        first_max_bytes: 250,
        second_max_bytes: 1000,
        ..Default::default()
    })
    .unwrap();

    assert!(s.enqueue(pkt(&mut uids, 80, 200)));
    assert!(!s.enqueue(pkt(&mut uids, 80, 50))); // 200 + 50 reaches 250
    assert!(s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 900)));
    assert_eq!(s.class_bytes(Class::First), 200);
    assert_eq!(s.class_bytes(Class::Second), 900);
}

// ─── Peek / dequeue coherence ───────────────────────────────────────────────

#[test]
fn peek_then_dequeue_returns_the_same_packet() {
    let mut uids = UidGenerator::new();
    let mut s = WfqScheduler::new(WfqConfig::default()).unwrap();

    assert!(s.enqueue(pkt(&mut uids, 80, 300)));
    assert!(s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 100)));

    let expected = s.peek().unwrap().uid();
    assert_eq!(s.len(), 2, "peek must not mutate");
    assert_eq!(s.dequeue().unwrap().uid(), expected);
    assert_eq!(s.len(), 1);
}

#[test]
fn empty_scheduler_yields_none_not_an_error() {
    let mut s = WfqScheduler::new(WfqConfig::default()).unwrap();
    assert!(s.peek().is_none());
    assert!(s.dequeue().is_none());
    assert!(s.is_empty());
    assert_eq!(s.virtual_time(), 0.0);
}

// ─── Stats snapshot ─────────────────────────────────────────────────────────

#[test]
fn stats_snapshot_exports_as_json() {
    let mut uids = UidGenerator::new();
    let mut s = WfqScheduler::new(WfqConfig::default()).unwrap();
    assert!(s.enqueue(pkt(&mut uids, SECOND_QUEUE_PORT, 64)));
    s.dequeue().unwrap();

    let json = serde_json::to_value(s.stats()).unwrap();
    assert_eq!(json["classes"][1]["packets_dequeued"], 1);
    assert_eq!(json["classes"][1]["bytes_admitted"], 64);
}
