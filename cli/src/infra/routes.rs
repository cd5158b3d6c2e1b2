//! `RouteTable` backed by `/proc/net/route` and `getifaddrs(3)`.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::PathBuf;

use anyhow::{Context, Result};
use nix::ifaddrs::getifaddrs;

use crate::application::ports::RouteTable;
use crate::domain::network::Route;

const PROC_NET_ROUTE: &str = "/proc/net/route";

/// Production [`RouteTable`].
pub struct ProcRouteTable {
    path: PathBuf,
}

impl Default for ProcRouteTable {
    fn default() -> Self {
        Self {
            path: PathBuf::from(PROC_NET_ROUTE),
        }
    }
}

/// One row of `/proc/net/route`, before interface addresses are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelRoute {
    pub interface: String,
    pub destination: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

/// `/proc/net/route` prints each address as the raw in-memory `u32` in hex.
fn parse_hex_addr(field: &str) -> Option<Ipv4Addr> {
    u32::from_str_radix(field, 16)
        .ok()
        .map(|raw| Ipv4Addr::from(raw.to_ne_bytes()))
}

/// Parse the kernel table, skipping the header and any malformed row.
#[must_use]
pub fn parse_route_table(text: &str) -> Vec<KernelRoute> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 8 {
                return None;
            }
            Some(KernelRoute {
                interface: cols[0].to_string(),
                destination: parse_hex_addr(cols[1])?,
                gateway: parse_hex_addr(cols[2])?,
                netmask: parse_hex_addr(cols[7])?,
            })
        })
        .collect()
}

/// Pair each route with its interface's address.
///
/// Prefers an address inside the route's network; falls back to the
/// interface's first address, then to `0.0.0.0` for an unaddressed interface.
#[must_use]
pub fn attach_addresses(
    kernel: Vec<KernelRoute>,
    addresses: &HashMap<String, Vec<Ipv4Addr>>,
) -> Vec<Route> {
    kernel
        .into_iter()
        .map(|r| {
            let mask = u32::from(r.netmask);
            let candidates = addresses.get(&r.interface).map(Vec::as_slice).unwrap_or_default();
            let address = candidates
                .iter()
                .find(|a| u32::from(**a) & mask == u32::from(r.destination))
                .or_else(|| candidates.first())
                .copied()
                .unwrap_or(Ipv4Addr::UNSPECIFIED);
            Route {
                network: r.destination,
                netmask: r.netmask,
                gateway: r.gateway,
                interface: r.interface,
                address,
            }
        })
        .collect()
}

/// IPv4 addresses per interface name, in `getifaddrs` order.
///
/// # Errors
///
/// Returns an error if the interface list cannot be read.
pub fn interface_addresses() -> Result<HashMap<String, Vec<Ipv4Addr>>> {
    let mut map: HashMap<String, Vec<Ipv4Addr>> = HashMap::new();
    for ifa in getifaddrs().context("cannot list network interfaces")? {
        if let Some(sin) = ifa.address.as_ref().and_then(|a| a.as_sockaddr_in()) {
            map.entry(ifa.interface_name)
                .or_default()
                .push(*SocketAddrV4::from(*sin).ip());
        }
    }
    Ok(map)
}

impl RouteTable for ProcRouteTable {
    async fn routes(&self) -> Result<Vec<Route>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        let kernel = parse_route_table(&text);
        let routes = attach_addresses(kernel, &interface_addresses()?);
        tracing::debug!(count = routes.len(), "routing table loaded");
        Ok(routes)
    }
}
