//! Application service: host reachability with per-call strategy selection.

use crate::application::ports::{PrivilegeCheck, Prober};
use crate::domain::capability::{Capabilities, ProbeStrategy};

/// Whether `host` is online.
///
/// The strategy is re-selected on every call: a raw SYN probe when raw
/// packets are supported and the process is privileged right now, one ping
/// otherwise. A raw probe that cannot run degrades to ping for this call.
///
/// # Errors
///
/// Returns an error only when the ping fallback itself cannot be spawned.
pub async fn is_reachable(
    caps: &Capabilities,
    privilege: &impl PrivilegeCheck,
    raw: &impl Prober,
    ping: &impl Prober,
    host: &str,
    port: u16,
) -> anyhow::Result<bool> {
    let strategy = ProbeStrategy::select(caps, privilege.is_privileged());
    tracing::debug!(host, port, ?strategy, "probing");

    if strategy == ProbeStrategy::RawProbe {
        match raw.probe(host, port).await {
            Ok(up) => return Ok(up),
            Err(e) => tracing::warn!(host, error = %e, "raw probe failed, falling back to ping"),
        }
    }
    ping.probe(host, port).await
}
