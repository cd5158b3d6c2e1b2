//! `wol wake`: send a Wake-on-LAN magic packet.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::wake;
use crate::commands::parse_host;
use crate::domain::network::MacAddress;
use crate::infra::udp::UdpDatagramSender;

/// Arguments for the wake command.
#[derive(Args, Debug)]
pub struct WakeArgs {
    /// MAC address of the host to wake
    pub mac: MacAddress,

    /// Destination address for the packet [default: wake.broadcast from config]
    #[arg(long, value_parser = parse_host)]
    pub host: Option<String>,

    /// Destination UDP port [default: wake.port from config]
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,
}

/// Run the wake command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the datagram cannot be sent.
pub async fn run(app: &AppContext, args: WakeArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let host = args.host.unwrap_or(config.wake.broadcast);
    let port = args.port.unwrap_or(config.wake.port);

    wake::wake(&UdpDatagramSender, &args.mac, &host, port).await?;
    app.renderer().render_wake(&args.mac, &host, port)?;
    Ok(ExitCode::SUCCESS)
}
