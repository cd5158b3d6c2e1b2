//! `wol stats`: remote CPU utilization over one second.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::remote_exec;
use crate::commands::remote::open_shell;
use crate::commands::{SshArgs, op_failed};

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub ssh: SshArgs,

    /// Digits after the decimal point
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=15))]
    pub precision: Option<u8>,
}

/// Run the stats command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or rendering fails.
pub async fn run(app: &AppContext, args: StatsArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let caps = app.capabilities(&config).await;
    let shell = open_shell(&config, &caps);
    let creds = args.ssh.credentials();

    let pb = app.spinner(&format!("sampling CPU on {}", creds.host));
    let result = remote_exec::sample_cpu(&shell, &caps, &creds, args.precision).await;
    pb.finish_and_clear();

    match result {
        Ok(stat) => {
            app.renderer().render_cpu(&stat)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => op_failed(app, &e),
    }
}
