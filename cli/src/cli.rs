//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::commands::remote::PowerAction;

/// Wake-on-LAN and remote host management
#[derive(Parser, Debug)]
#[command(
    name = "wol",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// More detailed output (failure details, debug logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check if a host is online (TCP SYN when root, ping otherwise)
    Check(commands::check::CheckArgs),

    /// Wake up a host with a magic packet
    Wake(commands::wake::WakeArgs),

    /// Reboot a remote host (ssh)
    Reboot(commands::SshArgs),

    /// Immediately shut down a remote host (ssh)
    Shutdown(commands::SshArgs),

    /// Get CPU stats of a remote host (ssh)
    Stats(commands::stats::StatsArgs),

    /// Scan the local network by ARP
    Scan(commands::scan::ScanArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Top-level flags for `AppContext`.
    #[must_use]
    pub fn flags(&self) -> AppFlags {
        AppFlags {
            no_color: self.no_color,
            quiet: self.quiet,
            json: self.json,
            verbose: self.verbose,
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error for failures outside the typed operation errors
    /// (config I/O, rendering, spawn failures).
    pub async fn run(self) -> Result<ExitCode> {
        let app = AppContext::new(&self.flags());
        match self.command {
            Command::Check(args) => commands::check::run(&app, args).await,
            Command::Wake(args) => commands::wake::run(&app, args).await,
            Command::Reboot(args) => commands::remote::run(&app, PowerAction::Reboot, args).await,
            Command::Shutdown(args) => {
                commands::remote::run(&app, PowerAction::Shutdown, args).await
            }
            Command::Stats(args) => commands::stats::run(&app, args).await,
            Command::Scan(args) => commands::scan::run(&app, args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
