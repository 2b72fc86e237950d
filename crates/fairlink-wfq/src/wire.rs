//! # Link-layer header views
//!
//! Read-only views over the PPP → IPv4 → UDP/TCP header chain, parsed just
//! far enough to reach the transport-layer destination port. Nothing here
//! mutates the frame: every accessor works on a borrowed byte slice, so the
//! packet's on-wire representation is bit-identical before and after
//! classification.
//!
//! ## Frame layout
//!
//! ```text
//! +----------------+--------------------+----------------------+---------+
//! | PPP (2 bytes)  | IPv4 (IHL*4 bytes) | UDP (8) / TCP (20+)  | payload |
//! +----------------+--------------------+----------------------+---------+
//! ```

// ─── Constants ───────────────────────────────────────────────────────────────

/// PPP protocol field value for IPv4 payloads.
pub const PPP_PROTO_IPV4: u16 = 0x0021;

/// Length of the PPP header in bytes.
pub const PPP_HEADER_LEN: usize = 2;

/// Minimum IPv4 header length (IHL = 5).
pub const IPV4_MIN_HEADER_LEN: usize = 20;

/// IANA protocol number for TCP.
pub const IPPROTO_TCP: u8 = 6;

/// IANA protocol number for UDP.
pub const IPPROTO_UDP: u8 = 17;

// ─── FrameView ───────────────────────────────────────────────────────────────

/// Borrowed view over a PPP-framed IPv4 packet.
///
/// `parse` validates only what classification needs: PPP framing, IPv4
/// version, and a complete IPv4 header. Transport-layer fields are resolved
/// lazily by [`FrameView::dst_port`].
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// IPv4 header and everything after it.
    ip: &'a [u8],
    /// IPv4 header length in bytes (IHL * 4).
    ihl: usize,
}

impl<'a> FrameView<'a> {
    /// Parse a frame. Returns `None` if the bytes do not carry a complete
    /// PPP + IPv4 header chain.
    pub fn parse(frame: &'a [u8]) -> Option<Self> {
        if frame.len() < PPP_HEADER_LEN + IPV4_MIN_HEADER_LEN {
            return None;
        }
        let ppp_proto = u16::from_be_bytes([frame[0], frame[1]]);
        if ppp_proto != PPP_PROTO_IPV4 {
            return None;
        }

        let ip = &frame[PPP_HEADER_LEN..];
        if ip[0] >> 4 != 4 {
            return None;
        }
        let ihl = (ip[0] & 0x0F) as usize * 4;
        if ihl < IPV4_MIN_HEADER_LEN || ip.len() < ihl {
            return None;
        }

        Some(FrameView { ip, ihl })
    }

    /// IPv4 protocol field (e.g. 6 = TCP, 17 = UDP).
    #[inline]
    pub fn protocol(&self) -> u8 {
        self.ip[9]
    }

    /// Transport-layer destination port.
    ///
    /// Both UDP and TCP carry the destination port in bytes 2..4 of their
    /// header; each protocol is still matched explicitly so anything else
    /// (or a truncated transport header) yields `None`.
    pub fn dst_port(&self) -> Option<u16> {
        match self.protocol() {
            IPPROTO_UDP | IPPROTO_TCP => {
                let transport = &self.ip[self.ihl..];
                if transport.len() < 4 {
                    return None;
                }
                Some(u16::from_be_bytes([transport[2], transport[3]]))
            }
            _ => None,
        }
    }
}
