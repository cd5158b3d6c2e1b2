//! wol - Wake-on-LAN and remote host management

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wol_cli::cli::Cli;
use wol_cli::output::json::format_error;

/// Environment variable holding a tracing filter, e.g. `WOL_LOG=wol_cli=trace`.
const LOG_ENV: &str = "WOL_LOG";

fn init_tracing(verbose: bool) {
    let default = if verbose { "wol_cli=debug,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json {
                match format_error(&format!("{e:#}"), "error", None) {
                    Ok(obj) => println!("{obj}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
