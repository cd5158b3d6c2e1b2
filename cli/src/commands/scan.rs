//! `wol scan`: ARP sweep of the local network.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use ipnet::Ipv4Net;

use crate::app::AppContext;
use crate::application::services::discovery;
use crate::commands::op_failed;
use crate::infra::arp::PacketArpSweeper;
use crate::infra::privilege::EffectiveUid;
use crate::infra::routes::ProcRouteTable;

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Network to sweep, e.g. 192.168.1.0/24 [default: picked from the routing table]
    #[arg(long)]
    pub net: Option<Ipv4Net>,
}

/// Run the scan command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or rendering fails.
pub async fn run(app: &AppContext, args: ScanArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let caps = app.capabilities(&config).await;
    let sweeper = PacketArpSweeper::new(Duration::from_secs(config.scan.reply_timeout_secs));

    let pb = app.spinner("scanning local network");
    let result = discovery::scan(
        &caps,
        &EffectiveUid,
        &ProcRouteTable::default(),
        &sweeper,
        args.net.map(|n| n.trunc()),
    )
    .await;
    pb.finish_and_clear();

    match result {
        Ok(hosts) => {
            app.renderer().render_hosts(&hosts)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => op_failed(app, &e),
    }
}
