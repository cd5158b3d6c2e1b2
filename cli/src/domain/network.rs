//! Network value types, interface selection, and packet layouts.
//!
//! Pure functions only: packets are built and parsed here, sent elsewhere.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::LazyLock;

use ipnet::Ipv4Net;
use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

// ── Constants ────────────────────────────────────────────────────────────────

/// Default Wake-on-LAN destination.
pub const WOL_BROADCAST: Ipv4Addr = Ipv4Addr::BROADCAST;
/// Default Wake-on-LAN UDP port.
pub const WOL_PORT: u16 = 9;
/// Magic packet length: 6 sync bytes + 16 × 6-byte MAC.
pub const MAGIC_PACKET_LEN: usize = 102;

/// Interface name prefixes of container and VM bridges, never scanned.
pub const BRIDGE_PREFIXES: &[&str] = &["docker", "br-", "veth", "virbr"];

const ETHERTYPE_ARP: u16 = 0x0806;
const ARP_REQUEST: u16 = 1;
const ARP_REPLY: u16 = 2;
/// Ethernet header (14) + ARP payload for IPv4 over Ethernet (28).
pub const ARP_FRAME_LEN: usize = 42;

const TCP_PROTO: u8 = 6;
const TCP_SYN: u8 = 0x02;
const TCP_HEADER_LEN: usize = 20;

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^(?i)([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}\.?$")
        .expect("valid domain regex")
});

// ── Validation ───────────────────────────────────────────────────────────────

/// Errors validating operator input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("\"{0}\" is not a valid mac")]
    InvalidMac(String),

    #[error("\"{0}\" is not a valid host")]
    InvalidHost(String),
}

/// Accept IPv4, IPv6, a domain name, or `localhost`.
///
/// # Errors
///
/// Returns [`AddressError::InvalidHost`] for anything else.
pub fn validate_host(host: &str) -> Result<(), AddressError> {
    if host.parse::<IpAddr>().is_ok() || host == "localhost" || DOMAIN_RE.is_match(host) {
        Ok(())
    } else {
        Err(AddressError::InvalidHost(host.to_string()))
    }
}

// ── MAC address ──────────────────────────────────────────────────────────────

/// 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl FromStr for MacAddress {
    type Err = AddressError;

    /// Accepts `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff`, or `aabbccddeeff`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddressError::InvalidMac(s.to_string());
        let octets: Vec<&str> = if s.len() == 12 {
            (0..6).map(|i| s.get(i * 2..i * 2 + 2)).collect::<Option<_>>().ok_or_else(invalid)?
        } else if s.len() == 17 {
            let sep = if s.contains(':') { ':' } else { '-' };
            s.split(sep).collect()
        } else {
            return Err(invalid());
        };

        if octets.len() != 6 {
            return Err(invalid());
        }
        let mut mac = [0_u8; 6];
        for (slot, octet) in mac.iter_mut().zip(&octets) {
            if octet.len() != 2 {
                return Err(invalid());
            }
            *slot = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
        }
        Ok(Self(mac))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Wake-on-LAN payload: six `0xFF` then the MAC sixteen times.
#[must_use]
pub fn magic_packet(mac: &MacAddress) -> [u8; MAGIC_PACKET_LEN] {
    let mut packet = [0xFF_u8; MAGIC_PACKET_LEN];
    for chunk in packet[6..].chunks_exact_mut(6) {
        chunk.copy_from_slice(&mac.0);
    }
    packet
}

// ── Routing table and interface selection ────────────────────────────────────

/// One IPv4 route plus the address its interface owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub network: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub interface: String,
    /// The interface's own address (unspecified when it has none).
    pub address: Ipv4Addr,
}

impl Route {
    fn rejection(&self) -> Option<&'static str> {
        let mask = u32::from(self.netmask);
        if self.network.is_unspecified() {
            return Some("default route");
        }
        if self.interface == "lo" || self.address.is_loopback() || self.address.is_unspecified() {
            return Some("loopback or unaddressed interface");
        }
        if mask == 0 || mask == u32::MAX {
            return Some("empty or host netmask");
        }
        if BRIDGE_PREFIXES.iter().any(|p| self.interface.starts_with(p)) {
            return Some("bridge interface");
        }
        if u32::from(self.address) & mask != u32::from(self.network) {
            return Some("address outside route network");
        }
        None
    }

    /// CIDR for this route, `None` for a non-contiguous mask.
    #[must_use]
    pub fn cidr(&self) -> Option<Ipv4Net> {
        Ipv4Net::with_netmask(self.network, self.netmask).ok()
    }
}

/// First route, in table order, that qualifies as the local scan target.
#[must_use]
pub fn select_scan_network(routes: &[Route]) -> Option<Ipv4Net> {
    routes.iter().find_map(|route| match route.rejection() {
        Some(reason) => {
            tracing::debug!(interface = %route.interface, network = %route.network, reason, "route skipped");
            None
        }
        None => route.cidr(),
    })
}

// ── ARP ──────────────────────────────────────────────────────────────────────

/// One host that answered the ARP sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoveredHost {
    pub ip: Ipv4Addr,
    pub mac: MacAddress,
}

/// Broadcast "who-has `target` tell `sender_ip`" Ethernet frame.
#[must_use]
pub fn arp_request_frame(
    sender_mac: &MacAddress,
    sender_ip: Ipv4Addr,
    target: Ipv4Addr,
) -> [u8; ARP_FRAME_LEN] {
    let mut f = [0_u8; ARP_FRAME_LEN];
    f[0..6].copy_from_slice(&[0xFF; 6]);
    f[6..12].copy_from_slice(&sender_mac.0);
    f[12..14].copy_from_slice(&ETHERTYPE_ARP.to_be_bytes());
    f[14..16].copy_from_slice(&1_u16.to_be_bytes()); // ethernet
    f[16..18].copy_from_slice(&0x0800_u16.to_be_bytes()); // ipv4
    f[18] = 6;
    f[19] = 4;
    f[20..22].copy_from_slice(&ARP_REQUEST.to_be_bytes());
    f[22..28].copy_from_slice(&sender_mac.0);
    f[28..32].copy_from_slice(&sender_ip.octets());
    // target hardware address stays zeroed
    f[38..42].copy_from_slice(&target.octets());
    f
}

/// Sender of an ARP reply frame, `None` for anything else.
#[must_use]
pub fn parse_arp_reply(frame: &[u8]) -> Option<DiscoveredHost> {
    if frame.len() < ARP_FRAME_LEN
        || frame[12..14] != ETHERTYPE_ARP.to_be_bytes()
        || frame[20..22] != ARP_REPLY.to_be_bytes()
    {
        return None;
    }
    let mac: [u8; 6] = frame[22..28].try_into().ok()?;
    let ip: [u8; 4] = frame[28..32].try_into().ok()?;
    Some(DiscoveredHost {
        ip: Ipv4Addr::from(ip),
        mac: MacAddress(mac),
    })
}

// ── TCP SYN probe ────────────────────────────────────────────────────────────

/// Bare 20-byte TCP header with SYN set and a valid checksum.
#[must_use]
pub fn syn_segment(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    seq: u32,
) -> [u8; TCP_HEADER_LEN] {
    let mut seg = [0_u8; TCP_HEADER_LEN];
    seg[0..2].copy_from_slice(&src_port.to_be_bytes());
    seg[2..4].copy_from_slice(&dst_port.to_be_bytes());
    seg[4..8].copy_from_slice(&seq.to_be_bytes());
    seg[12] = 5 << 4; // data offset, no options
    seg[13] = TCP_SYN;
    seg[14..16].copy_from_slice(&8192_u16.to_be_bytes()); // window
    let sum = tcp_checksum(src, dst, &seg);
    seg[16..18].copy_from_slice(&sum.to_be_bytes());
    seg
}

fn tcp_checksum(src: Ipv4Addr, dst: Ipv4Addr, segment: &[u8]) -> u16 {
    let mut pseudo = Vec::with_capacity(12 + segment.len());
    pseudo.extend_from_slice(&src.octets());
    pseudo.extend_from_slice(&dst.octets());
    pseudo.push(0);
    pseudo.push(TCP_PROTO);
    #[allow(clippy::cast_possible_truncation)] // a bare header is 20 bytes
    pseudo.extend_from_slice(&(segment.len() as u16).to_be_bytes());
    pseudo.extend_from_slice(segment);

    let mut sum: u32 = pseudo
        .chunks(2)
        .map(|w| u32::from(u16::from_be_bytes([w[0], *w.get(1).unwrap_or(&0)])))
        .sum();
    while sum > 0xFFFF {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    #[allow(clippy::cast_possible_truncation)] // folded to 16 bits above
    let folded = sum as u16;
    !folded
}

/// Whether a raw IPv4 packet is the target's answer to our SYN.
///
/// Any TCP segment from `target:dst_port` to `src_port` counts (SYN-ACK, RST, …).
#[must_use]
pub fn is_probe_reply(packet: &[u8], target: Ipv4Addr, src_port: u16, dst_port: u16) -> bool {
    if packet.len() < 20 || packet[0] >> 4 != 4 || packet[9] != TCP_PROTO {
        return false;
    }
    if packet[12..16] != target.octets() {
        return false;
    }
    let ihl = usize::from(packet[0] & 0x0F) * 4;
    let Some(tcp) = packet.get(ihl..ihl + 4) else {
        return false;
    };
    u16::from_be_bytes([tcp[0], tcp[1]]) == dst_port && u16::from_be_bytes([tcp[2], tcp[3]]) == src_port
}
