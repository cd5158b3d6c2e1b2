//! Application service: remote command execution and the operations built on it.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through the injected [`RemoteShell`].

use serde_json::json;

use crate::application::ports::RemoteShell;
use crate::domain::capability::{Capabilities, Capability};
use crate::domain::cpu::{CPU_SAMPLE_COMMAND, CpuStat};
use crate::domain::error::OpError;
use crate::domain::ssh::{RemoteExecError, RemoteExecResult, SshCredentials, classify_session};

pub const REBOOT_COMMAND: &str = "reboot";
pub const SHUTDOWN_COMMAND: &str = "shutdown now";

/// Run one command in a fresh session and classify the outcome.
///
/// # Errors
///
/// - [`OpError::Unsupported`] when no ssh client is installed.
/// - [`OpError::Remote`] with `NotConnected`, `Ssh`, or `Exec`.
pub async fn execute(
    shell: &impl RemoteShell,
    caps: &Capabilities,
    creds: &SshCredentials,
    command: &str,
    sudo: bool,
) -> Result<RemoteExecResult, OpError> {
    if !caps.remote_shell {
        return Err(OpError::Unsupported(Capability::RemoteShell));
    }

    tracing::debug!(host = %creds.host, port = creds.port, sudo, command, "remote exec");
    let result = match shell.run(creds, command, sudo).await {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(host = %creds.host, error = %e, "remote session failed");
            return Err(RemoteExecError::ssh(json!({ "error": format!("{e:#}") })).into());
        }
    };
    Ok(classify_session(result)?)
}

/// Sample CPU utilization over one second, as percentages.
///
/// # Errors
///
/// Everything [`execute`] returns, plus [`OpError::Sample`] when the output
/// cannot be parsed or the counters did not advance.
pub async fn sample_cpu(
    shell: &impl RemoteShell,
    caps: &Capabilities,
    creds: &SshCredentials,
    precision: Option<u8>,
) -> Result<CpuStat, OpError> {
    let result = execute(shell, caps, creds, CPU_SAMPLE_COMMAND, false).await?;
    let pct = CpuStat::utilization_from_output(&result.stdout)?;
    Ok(match precision {
        Some(p) => pct.round(p),
        None => pct,
    })
}

/// Reboot the host through `sudo`.
///
/// # Errors
///
/// See [`execute`].
pub async fn reboot(
    shell: &impl RemoteShell,
    caps: &Capabilities,
    creds: &SshCredentials,
) -> Result<(), OpError> {
    execute(shell, caps, creds, REBOOT_COMMAND, true).await?;
    Ok(())
}

/// Power the host off through `sudo`.
///
/// # Errors
///
/// See [`execute`].
pub async fn shutdown(
    shell: &impl RemoteShell,
    caps: &Capabilities,
    creds: &SshCredentials,
) -> Result<(), OpError> {
    execute(shell, caps, creds, SHUTDOWN_COMMAND, true).await?;
    Ok(())
}
