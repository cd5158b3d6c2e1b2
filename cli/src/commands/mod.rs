//! Command implementations

pub mod check;
pub mod config;
pub mod remote;
pub mod scan;
pub mod stats;
pub mod version;
pub mod wake;

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::error::OpError;
use crate::domain::network::{AddressError, validate_host};
use crate::domain::ssh::{DEFAULT_SSH_PORT, SshCredentials};

/// SSH target shared by `reboot`, `shutdown`, and `stats`.
#[derive(Args, Debug, Clone)]
pub struct SshArgs {
    /// Remote host: IP address or domain name
    #[arg(value_parser = parse_host)]
    pub host: String,

    /// SSH username [default: current user or from ssh config]
    #[arg(long)]
    pub login: Option<String>,

    /// SSH and sudo password
    #[arg(long, env = "WOL_SSH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// SSH port
    #[arg(short, long, default_value_t = DEFAULT_SSH_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,
}

impl SshArgs {
    #[must_use]
    pub fn credentials(&self) -> SshCredentials {
        SshCredentials {
            host: self.host.clone(),
            login: self.login.clone(),
            password: self.password.clone(),
            port: self.port,
        }
    }
}

/// clap value parser for host arguments.
///
/// # Errors
///
/// Returns [`AddressError::InvalidHost`] for anything but an IP or domain name.
pub fn parse_host(s: &str) -> Result<String, AddressError> {
    validate_host(s)?;
    Ok(s.to_string())
}

/// Render a failed operation and map it to exit status 1.
///
/// # Errors
///
/// Returns an error only if rendering itself fails.
pub fn op_failed(app: &AppContext, err: &OpError) -> Result<ExitCode> {
    tracing::debug!(code = err.code(), error = %err, "operation failed");
    app.renderer().render_op_error(err, app.verbose)?;
    Ok(ExitCode::FAILURE)
}
