//! Application service: local network discovery by ARP sweep.

use ipnet::Ipv4Net;

use crate::application::ports::{ArpSweeper, PrivilegeCheck, RouteTable};
use crate::domain::capability::{Capabilities, Capability};
use crate::domain::error::OpError;
use crate::domain::network::{DiscoveredHost, select_scan_network};

/// Enumerate live hosts on `net`, or on the local subnet picked from the
/// routing table when `net` is `None`.
///
/// # Errors
///
/// - [`OpError::Unsupported`] without raw packets or without privilege.
/// - [`OpError::NoUsableInterface`] when no route qualifies.
/// - [`OpError::Other`] when the routing table or the sweep fails.
pub async fn scan(
    caps: &Capabilities,
    privilege: &impl PrivilegeCheck,
    routes: &impl RouteTable,
    sweeper: &impl ArpSweeper,
    net: Option<Ipv4Net>,
) -> Result<Vec<DiscoveredHost>, OpError> {
    if !caps.raw_packets {
        return Err(OpError::Unsupported(Capability::RawPackets));
    }
    if !privilege.is_privileged() {
        return Err(OpError::Unsupported(Capability::Privilege));
    }

    let net = match net {
        Some(net) => net,
        None => {
            let table = routes.routes().await?;
            select_scan_network(&table).ok_or(OpError::NoUsableInterface)?
        }
    };

    tracing::debug!(%net, "arp sweep");
    let hosts = sweeper.sweep(net).await?;
    tracing::info!(%net, found = hosts.len(), "scan complete");
    Ok(hosts)
}
