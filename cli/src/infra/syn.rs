//! Privileged reachability: one hand-built TCP SYN over a raw IPv4 socket.
//!
//! Any TCP segment coming back from the target port (SYN-ACK or RST) means
//! the host is up. Silence until the deadline means it is not.

use std::io::{ErrorKind, Read};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use socket2::{Domain, Protocol, Socket, Type};

use crate::application::ports::Prober;
use crate::infra::deadline::read_timeout;
use crate::domain::network::{is_probe_reply, syn_segment};

/// Production raw-socket [`Prober`]. Needs root.
pub struct RawSynProber {
    timeout: Duration,
}

impl RawSynProber {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Prober for RawSynProber {
    async fn probe(&self, host: &str, port: u16) -> Result<bool> {
        let target = resolve_ipv4(host, port).await?;
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || syn_probe(target, port, timeout))
            .await
            .context("raw probe task failed")?
    }
}

async fn resolve_ipv4(host: &str, port: u16) -> Result<Ipv4Addr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("cannot resolve {host}"))?
        .find_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .with_context(|| format!("{host} has no IPv4 address"))
}

/// Local address the kernel would route `target` through.
fn source_address(target: Ipv4Addr, port: u16) -> Result<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).context("cannot bind udp socket")?;
    socket
        .connect((target, port))
        .with_context(|| format!("no route to {target}"))?;
    match socket.local_addr()? {
        SocketAddr::V4(v4) => Ok(*v4.ip()),
        SocketAddr::V6(_) => anyhow::bail!("unexpected IPv6 source address"),
    }
}

/// Source port and initial sequence number for one probe.
fn probe_identity() -> (u16, u32) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    let seq = nanos ^ std::process::id().rotate_left(16);
    #[allow(clippy::cast_possible_truncation)] // modulo keeps it below 20000
    let sport = 40_000 + (seq % 20_000) as u16;
    (sport, seq)
}

fn syn_probe(target: Ipv4Addr, port: u16, timeout: Duration) -> Result<bool> {
    let src = source_address(target, port)?;
    let (sport, seq) = probe_identity();

    let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::TCP))
        .context("cannot open raw socket")?;
    let segment = syn_segment(src, target, sport, port, seq);
    socket
        .send_to(&segment, &SocketAddrV4::new(target, 0).into())
        .with_context(|| format!("cannot send SYN to {target}"))?;
    tracing::debug!(%src, %target, sport, port, "SYN sent");

    let deadline = Instant::now() + timeout;
    let mut buf = [0_u8; 1500];
    loop {
        let Some(remaining) = read_timeout(deadline, Instant::now()) else {
            return Ok(false);
        };
        socket.set_read_timeout(Some(remaining))?;
        match (&socket).read(&mut buf) {
            Ok(n) if is_probe_reply(&buf[..n], target, sport, port) => return Ok(true),
            Ok(_) => {}
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Ok(false);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e).context("raw socket read failed"),
        }
    }
}
