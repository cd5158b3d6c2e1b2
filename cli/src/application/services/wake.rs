//! Application service: Wake-on-LAN.

use crate::application::ports::DatagramSender;
use crate::domain::network::{MacAddress, magic_packet};

/// Send one magic packet for `mac` to `host:port`.
///
/// There is no acknowledgment; confirm the wake with a later probe.
///
/// # Errors
///
/// Returns an error when the datagram cannot be sent.
pub async fn wake(
    sender: &impl DatagramSender,
    mac: &MacAddress,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let packet = magic_packet(mac);
    sender.send_to(&packet, host, port).await?;
    tracing::info!(%mac, host, port, "magic packet sent");
    Ok(())
}
