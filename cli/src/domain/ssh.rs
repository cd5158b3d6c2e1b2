//! Remote-shell value types and failure classification.
//!
//! Pure functions only: no I/O, no async.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Default SSH port.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Exit status the OpenSSH client reserves for its own (transport) failures.
pub const SSH_TRANSPORT_EXIT: i32 = 255;

/// `ssh` stderr fragments that mean no connection was ever established.
const NOT_CONNECTED_MARKERS: &[&str] = &[
    "connection refused",
    "no route to host",
    "could not resolve hostname",
    "name or service not known",
    "connection timed out",
    "operation timed out",
    "network is unreachable",
    "host is down",
];

/// Target and credentials for one transient SSH session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshCredentials {
    /// IP address, hostname, or ssh-config alias.
    pub host: String,
    /// Login user; `None` lets the ssh client pick (current user or ssh config).
    pub login: Option<String>,
    /// Login password (when `sshpass` is present) and sudo password.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub port: u16,
}

impl SshCredentials {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            login: None,
            password: None,
            port: DEFAULT_SSH_PORT,
        }
    }

    #[must_use]
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Captured output of one remote command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Remote failure class. The numeric values are part of the JSON contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum RemoteErrorCode {
    /// The host could not be reached at the transport layer.
    NotConnected = 0,
    /// The session failed after connecting (auth, host key, protocol).
    Ssh = 1,
    /// The command ran and exited non-zero.
    Exec = 2,
}

impl RemoteErrorCode {
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotConnected => "not_connected",
            Self::Ssh => "ssh_error",
            Self::Exec => "exec_error",
        }
    }
}

/// Typed remote failure, never retried.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{reason}")]
pub struct RemoteExecError {
    pub code: RemoteErrorCode,
    pub reason: String,
    pub details: Option<Value>,
}

impl RemoteExecError {
    #[must_use]
    pub fn not_connected() -> Self {
        Self {
            code: RemoteErrorCode::NotConnected,
            reason: "can't connect to host".to_string(),
            details: None,
        }
    }

    #[must_use]
    pub fn ssh(details: Value) -> Self {
        Self {
            code: RemoteErrorCode::Ssh,
            reason: "ssh exception".to_string(),
            details: Some(details),
        }
    }

    #[must_use]
    pub fn exec(stdout: &str, stderr: &str) -> Self {
        Self {
            code: RemoteErrorCode::Exec,
            reason: "can't exec command".to_string(),
            details: Some(json!({ "out": stdout, "err": stderr })),
        }
    }

    /// `{code, reason, details}` with `details` defaulting to `{}`.
    #[must_use]
    pub fn as_json(&self) -> Value {
        json!({
            "code": self.code.as_u8(),
            "reason": self.reason,
            "details": self.details.clone().unwrap_or_else(|| json!({})),
        })
    }
}

/// Classify a completed `ssh` invocation.
///
/// Exit 255 is the client's own failure: it becomes `NotConnected` when
/// stderr shows the connection never came up, `Ssh` otherwise. Any other
/// non-zero exit belongs to the remote command and becomes `Exec`.
///
/// OpenSSH passes the remote status through unchanged, so a remote command
/// that itself exits 255 cannot be told apart from a client failure and is
/// reported as `Ssh`.
///
/// # Errors
///
/// Returns the classified [`RemoteExecError`] for every non-zero exit.
pub fn classify_session(result: RemoteExecResult) -> Result<RemoteExecResult, RemoteExecError> {
    match result.exit_code {
        0 => Ok(result),
        SSH_TRANSPORT_EXIT => {
            let stderr = result.stderr.to_lowercase();
            if NOT_CONNECTED_MARKERS.iter().any(|m| stderr.contains(m)) {
                Err(RemoteExecError::not_connected())
            } else {
                Err(RemoteExecError::ssh(json!({
                    "exit_code": result.exit_code,
                    "stderr": result.stderr.trim(),
                })))
            }
        }
        _ => Err(RemoteExecError::exec(&result.stdout, &result.stderr)),
    }
}
