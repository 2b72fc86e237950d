//! # Frame builders
//!
//! Byte-image constructors for the PPP+IPv4+UDP/TCP frames the scheduler
//! classifies. Only the fields classification reads are meaningful; the rest
//! are plausible filler (TTL 64, zero checksums), padded to the requested
//! frame length.

use bytes::{BufMut, Bytes, BytesMut};

/// PPP (2) + IPv4 (20) + UDP (8).
pub const UDP_FRAME_OVERHEAD: usize = 30;

/// PPP (2) + IPv4 (20) + TCP (20).
pub const TCP_FRAME_OVERHEAD: usize = 42;

fn ppp_ipv4_prefix(buf: &mut BytesMut, protocol: u8, ip_total_len: usize) {
    buf.put_u16(0x0021); // PPP: IPv4
    buf.put_u8(0x45); // version 4, IHL 5
    buf.put_u8(0); // DSCP/ECN
    buf.put_u16(ip_total_len as u16);
    buf.put_u32(0); // id + flags/fragment offset
    buf.put_u8(64); // TTL
    buf.put_u8(protocol);
    buf.put_u16(0); // header checksum (unverified here)
    buf.put_u32(u32::from_be_bytes([10, 0, 0, 1])); // src
    buf.put_u32(u32::from_be_bytes([10, 0, 0, 2])); // dst
}

/// UDP frame of exactly `total_len` bytes addressed to `dst_port`.
pub fn udp_frame(dst_port: u16, total_len: usize) -> Bytes {
    assert!(total_len >= UDP_FRAME_OVERHEAD, "frame shorter than headers");
    let mut buf = BytesMut::with_capacity(total_len);
    ppp_ipv4_prefix(&mut buf, 17, total_len - 2);
    buf.put_u16(49152); // src port
    buf.put_u16(dst_port);
    buf.put_u16((total_len - 22) as u16); // UDP length
    buf.put_u16(0); // checksum
    buf.resize(total_len, 0);
    buf.freeze()
}

/// TCP frame of exactly `total_len` bytes addressed to `dst_port`.
pub fn tcp_frame(dst_port: u16, total_len: usize) -> Bytes {
    assert!(total_len >= TCP_FRAME_OVERHEAD, "frame shorter than headers");
    let mut buf = BytesMut::with_capacity(total_len);
    ppp_ipv4_prefix(&mut buf, 6, total_len - 2);
    buf.put_u16(49152); // src port
    buf.put_u16(dst_port);
    buf.put_u32(0); // seq
    buf.put_u32(0); // ack
    buf.put_u8(0x50); // data offset 5
    buf.put_u8(0x10); // ACK flag
    buf.put_u16(65535); // window
    buf.put_u16(0); // checksum
    buf.put_u16(0); // urgent pointer
    buf.resize(total_len, 0);
    buf.freeze()
}

/// IPv4 frame carrying a non-UDP/TCP protocol (classified first-class).
pub fn raw_protocol_frame(protocol: u8, total_len: usize) -> Bytes {
    assert!(total_len >= 22, "frame shorter than headers");
    let mut buf = BytesMut::with_capacity(total_len);
    ppp_ipv4_prefix(&mut buf, protocol, total_len - 2);
    buf.resize(total_len, 0);
    buf.freeze()
}
