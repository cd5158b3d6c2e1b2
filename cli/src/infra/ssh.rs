//! `RemoteShell` backed by the system OpenSSH client.
//!
//! One `ssh` process per call, so every session is scoped to one command.
//! Passwords never appear on a command line: login goes through `sshpass -e`
//! (`SSHPASS` in the environment) and sudo reads its password from stdin.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, RemoteShell};
use crate::domain::capability::Capabilities;
use crate::domain::config::SshConfig;
use crate::domain::ssh::{RemoteExecResult, SSH_TRANSPORT_EXIT, SshCredentials};

/// `sshpass` exit statuses that report its own failure: conflicting
/// arguments, runtime error, unrecognised ssh prompt, bad password, unknown
/// host key. Exit 1 is left alone since remote commands use it too.
const SSHPASS_CLIENT_FAILURES: &[i32] = &[2, 3, 4, 5, 6];

/// Production [`RemoteShell`].
pub struct OpenSshShell<R> {
    runner: R,
    connect_timeout_secs: u64,
    command_timeout: Duration,
    password_login: bool,
}

impl<R: CommandRunner> OpenSshShell<R> {
    #[must_use]
    pub fn new(runner: R, config: &SshConfig, caps: &Capabilities) -> Self {
        Self {
            runner,
            connect_timeout_secs: config.connect_timeout_secs,
            command_timeout: config.command_timeout(),
            password_login: caps.password_login,
        }
    }
}

/// Fully resolved invocation: program, arguments, environment, stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshInvocation {
    pub program: &'static str,
    pub args: Vec<String>,
    pub env: Vec<(&'static str, String)>,
    pub stdin: Option<String>,
}

/// The command string the remote shell runs.
#[must_use]
pub fn remote_command(command: &str, sudo: bool, has_password: bool) -> String {
    match (sudo, has_password) {
        (false, _) => command.to_string(),
        (true, true) => format!("sudo -S -p '' {command}"),
        (true, false) => format!("sudo -n {command}"),
    }
}

/// Build the `ssh` (or `sshpass -e ssh`) invocation for one command.
#[must_use]
pub fn build_invocation(
    creds: &SshCredentials,
    command: &str,
    sudo: bool,
    connect_timeout_secs: u64,
    password_login: bool,
) -> SshInvocation {
    let use_sshpass = password_login && creds.password.is_some();

    let mut args: Vec<String> = Vec::new();
    if use_sshpass {
        args.extend(["-e".to_string(), "ssh".to_string()]);
    } else {
        args.extend(["-o".to_string(), "BatchMode=yes".to_string()]);
    }
    args.extend([
        "-o".to_string(),
        format!("ConnectTimeout={connect_timeout_secs}"),
        "-o".to_string(),
        "StrictHostKeyChecking=accept-new".to_string(),
        "-p".to_string(),
        creds.port.to_string(),
    ]);
    if let Some(login) = &creds.login {
        args.extend(["-l".to_string(), login.clone()]);
    }
    args.push(creds.host.clone());
    args.push(remote_command(command, sudo, creds.password.is_some()));

    let env = match (&creds.password, use_sshpass) {
        (Some(pw), true) => vec![("SSHPASS", pw.clone())],
        _ => Vec::new(),
    };
    let stdin = match (&creds.password, sudo) {
        (Some(pw), true) => Some(format!("{pw}\n")),
        _ => None,
    };

    SshInvocation {
        program: if use_sshpass { "sshpass" } else { "ssh" },
        args,
        env,
        stdin,
    }
}

impl<R: CommandRunner> RemoteShell for OpenSshShell<R> {
    async fn run(
        &self,
        creds: &SshCredentials,
        command: &str,
        sudo: bool,
    ) -> Result<RemoteExecResult> {
        if creds.password.is_some() && !self.password_login {
            tracing::debug!("sshpass not found, password used for sudo only");
        }
        let inv = build_invocation(
            creds,
            command,
            sudo,
            self.connect_timeout_secs,
            self.password_login,
        );
        tracing::debug!(program = inv.program, args = ?inv.args, "spawning ssh");

        let args: Vec<&str> = inv.args.iter().map(String::as_str).collect();
        let env: Vec<(&str, &str)> = inv.env.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let output = self
            .runner
            .run_with_env(
                inv.program,
                &args,
                &env,
                inv.stdin.as_deref().map(str::as_bytes),
                self.command_timeout,
            )
            .await?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        // A signal-killed client never reported a remote status.
        let mut exit_code = output.status.code().unwrap_or(SSH_TRANSPORT_EXIT);
        if inv.program == "sshpass" && SSHPASS_CLIENT_FAILURES.contains(&exit_code) {
            exit_code = SSH_TRANSPORT_EXIT;
        }
        Ok(RemoteExecResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
            exit_code,
        })
    }
}
