//! `ArpSweeper` over a Linux `AF_PACKET` socket.
//!
//! Sends one broadcast who-has per host address in the network, then listens
//! for replies until the reply window closes.

use std::time::Duration;

use anyhow::Result;
use ipnet::Ipv4Net;

use crate::application::ports::ArpSweeper;
use crate::domain::network::DiscoveredHost;

/// Shortest prefix swept in one call.
pub const MIN_SWEEP_PREFIX: u8 = 16;

/// Production [`ArpSweeper`]. Needs root.
pub struct PacketArpSweeper {
    reply_timeout: Duration,
}

impl PacketArpSweeper {
    #[must_use]
    pub fn new(reply_timeout: Duration) -> Self {
        Self { reply_timeout }
    }
}

impl ArpSweeper for PacketArpSweeper {
    async fn sweep(&self, net: Ipv4Net) -> Result<Vec<DiscoveredHost>> {
        if net.prefix_len() < MIN_SWEEP_PREFIX {
            anyhow::bail!("refusing to sweep {net}: networks larger than /{MIN_SWEEP_PREFIX} are not scanned");
        }
        let reply_timeout = self.reply_timeout;
        tokio::task::spawn_blocking(move || imp::sweep(net, reply_timeout))
            .await
            .map_err(|e| anyhow::anyhow!("arp sweep task failed: {e}"))?
    }
}

#[cfg(target_os = "linux")]
mod imp {
    use std::collections::HashSet;
    use std::io::{ErrorKind, Read};
    use std::net::{Ipv4Addr, SocketAddrV4};
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use ipnet::Ipv4Net;
    use nix::ifaddrs::getifaddrs;
    use nix::net::if_::if_nametoindex;
    use socket2::{Domain, Protocol, SockAddr, Socket, Type};

    use crate::domain::network::{
        DiscoveredHost, MacAddress, arp_request_frame, parse_arp_reply,
    };
    use crate::infra::deadline::read_timeout;

    const ETH_P_ARP: u16 = 0x0806;

    /// The local interface that owns an address inside the swept network.
    struct LocalInterface {
        name: String,
        index: u32,
        ip: Ipv4Addr,
        mac: MacAddress,
    }

    fn local_interface(net: Ipv4Net) -> Result<LocalInterface> {
        let ifaddrs: Vec<_> = getifaddrs().context("cannot list network interfaces")?.collect();

        let (name, ip) = ifaddrs
            .iter()
            .find_map(|ifa| {
                let sin = ifa.address.as_ref()?.as_sockaddr_in()?;
                let ip = *SocketAddrV4::from(*sin).ip();
                net.contains(&ip).then(|| (ifa.interface_name.clone(), ip))
            })
            .with_context(|| format!("no local interface has an address in {net}"))?;

        let mac = ifaddrs
            .iter()
            .filter(|ifa| ifa.interface_name == name)
            .find_map(|ifa| ifa.address.as_ref()?.as_link_addr()?.addr())
            .with_context(|| format!("{name} has no hardware address"))?;

        let index = if_nametoindex(name.as_str())
            .with_context(|| format!("cannot resolve index of {name}"))?;

        Ok(LocalInterface {
            name,
            index,
            ip,
            mac: MacAddress(mac),
        })
    }

    /// Broadcast link-layer address on `ifindex` for ARP frames.
    #[allow(unsafe_code)]
    fn broadcast_link_addr(ifindex: u32) -> Result<SockAddr> {
        let ifindex = i32::try_from(ifindex).context("interface index out of range")?;
        // SAFETY: `sockaddr_storage` is plain old data, so all-zero is a valid
        // value, and it is large and aligned enough to hold a `sockaddr_ll`.
        // The length passed to `SockAddr::new` matches the struct written.
        unsafe {
            let mut storage: libc::sockaddr_storage = std::mem::zeroed();
            let sll = &mut *std::ptr::from_mut(&mut storage).cast::<libc::sockaddr_ll>();
            sll.sll_family = u16::try_from(libc::AF_PACKET).unwrap_or_default();
            sll.sll_protocol = ETH_P_ARP.to_be();
            sll.sll_ifindex = ifindex;
            sll.sll_halen = 6;
            sll.sll_addr[..6].copy_from_slice(&[0xFF; 6]);
            #[allow(clippy::cast_possible_truncation)] // sockaddr_ll is 20 bytes
            let len = std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t;
            Ok(SockAddr::new(storage, len))
        }
    }

    pub(super) fn sweep(net: Ipv4Net, reply_timeout: Duration) -> Result<Vec<DiscoveredHost>> {
        let iface = local_interface(net)?;
        tracing::debug!(interface = %iface.name, ip = %iface.ip, mac = %iface.mac, %net, "arp sweep starting");

        let socket = Socket::new(
            Domain::PACKET,
            Type::RAW,
            Some(Protocol::from(i32::from(ETH_P_ARP.to_be()))),
        )
        .context("cannot open packet socket")?;
        let link = broadcast_link_addr(iface.index)?;
        socket.bind(&link).context("cannot bind packet socket")?;

        for target in net.hosts().filter(|h| *h != iface.ip) {
            let frame = arp_request_frame(&iface.mac, iface.ip, target);
            socket
                .send_to(&frame, &link)
                .with_context(|| format!("cannot send ARP request for {target}"))?;
        }

        let mut seen = HashSet::new();
        let mut hosts = Vec::new();
        let deadline = Instant::now() + reply_timeout;
        let mut buf = [0_u8; 1514];
        loop {
            let Some(remaining) = read_timeout(deadline, Instant::now()) else {
                break;
            };
            socket.set_read_timeout(Some(remaining))?;
            match (&socket).read(&mut buf) {
                Ok(n) => {
                    let Some(host) = parse_arp_reply(&buf[..n]) else {
                        continue;
                    };
                    if net.contains(&host.ip) && seen.insert(host.ip) {
                        hosts.push(host);
                    }
                }
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e).context("packet socket read failed"),
            }
        }
        Ok(hosts)
    }
}

#[cfg(not(target_os = "linux"))]
mod imp {
    use std::time::Duration;

    use anyhow::Result;
    use ipnet::Ipv4Net;

    use crate::domain::network::DiscoveredHost;

    pub(super) fn sweep(_net: Ipv4Net, _reply_timeout: Duration) -> Result<Vec<DiscoveredHost>> {
        anyhow::bail!("ARP sweeps need Linux packet sockets")
    }
}
