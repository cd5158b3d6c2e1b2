//! `DatagramSender` over a broadcast-enabled tokio UDP socket.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use anyhow::{Context, Result};
use tokio::net::UdpSocket;

use crate::application::ports::DatagramSender;

/// Production [`DatagramSender`].
#[derive(Default)]
pub struct UdpDatagramSender;

impl DatagramSender for UdpDatagramSender {
    async fn send_to(&self, payload: &[u8], host: &str, port: u16) -> Result<()> {
        let bind: IpAddr = match host.parse::<IpAddr>() {
            Ok(IpAddr::V6(_)) => Ipv6Addr::UNSPECIFIED.into(),
            _ => Ipv4Addr::UNSPECIFIED.into(),
        };
        let socket = UdpSocket::bind((bind, 0))
            .await
            .context("cannot bind udp socket")?;
        socket
            .set_broadcast(true)
            .context("cannot enable broadcast")?;
        let sent = socket
            .send_to(payload, (host, port))
            .await
            .with_context(|| format!("cannot send to {host}:{port}"))?;
        if sent != payload.len() {
            anyhow::bail!("short send to {host}:{port}: {sent} of {} bytes", payload.len());
        }
        Ok(())
    }
}
