//! `wol check`: is a host online?

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::reachability;
use crate::commands::parse_host;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::ping::PingProber;
use crate::infra::privilege::EffectiveUid;
use crate::infra::syn::RawSynProber;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Remote host: IP address or domain name
    #[arg(value_parser = parse_host)]
    pub host: String,

    /// TCP port for the SYN probe [default: probe.port from config]
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,
}

/// Run the check command. Exits 1 when the host is not reached.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the ping fallback
/// cannot be spawned.
pub async fn run(app: &AppContext, args: CheckArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let caps = app.capabilities(&config).await;
    let port = args.port.unwrap_or(config.probe.port);

    let raw = RawSynProber::new(Duration::from_secs(config.probe.syn_timeout_secs));
    let ping = PingProber::new(TokioCommandRunner::default(), config.probe.ping_timeout_secs);

    let pb = app.spinner(&format!("probing {}", args.host));
    let result =
        reachability::is_reachable(&caps, &EffectiveUid, &raw, &ping, &args.host, port).await;
    pb.finish_and_clear();
    let reachable = result?;

    app.renderer().render_check(&args.host, reachable)?;
    Ok(if reachable {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
