//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use ipnet::Ipv4Net;

use crate::domain::config::WolConfig;
use crate::domain::network::{DiscoveredHost, Route};
use crate::domain::ssh::{RemoteExecResult, SshCredentials};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with extra environment variables and optional stdin.
    ///
    /// Secrets travel through `env` or `stdin`, never through `args`.
    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
        stdin: Option<&[u8]>,
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Remote Shell Port ─────────────────────────────────────────────────────────

/// One transient remote-shell session per call.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run `command` on `creds.host`, elevated when `sudo` is set.
    ///
    /// A non-zero exit is NOT an error here: it comes back in
    /// [`RemoteExecResult::exit_code`] for the caller to classify.
    ///
    /// # Errors
    ///
    /// Returns an error only when the session could not be driven at all
    /// (client failed to spawn, timed out).
    async fn run(
        &self,
        creds: &SshCredentials,
        command: &str,
        sudo: bool,
    ) -> Result<RemoteExecResult>;
}

// ── Network Ports ─────────────────────────────────────────────────────────────

/// One reachability strategy.
#[allow(async_fn_in_trait)]
pub trait Prober {
    /// `Ok(true)` when `host` answered within the strategy's timeout.
    async fn probe(&self, host: &str, port: u16) -> Result<bool>;
}

/// Whether the process currently holds raw-socket privilege.
pub trait PrivilegeCheck {
    fn is_privileged(&self) -> bool;
}

/// Read access to the OS IPv4 routing table.
#[allow(async_fn_in_trait)]
pub trait RouteTable {
    /// Routes in table order, each paired with its interface's own address.
    async fn routes(&self) -> Result<Vec<Route>>;
}

/// A single ARP broadcast sweep.
#[allow(async_fn_in_trait)]
pub trait ArpSweeper {
    /// Every responder seen for `net`, in arrival order.
    async fn sweep(&self, net: Ipv4Net) -> Result<Vec<DiscoveredHost>>;
}

/// Fire-and-forget UDP send.
#[allow(async_fn_in_trait)]
pub trait DatagramSender {
    async fn send_to(&self, payload: &[u8], host: &str, port: u16) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the config, returning defaults when no file exists.
    fn load(&self) -> Result<WolConfig>;
    /// Persist the config.
    fn save(&self, config: &WolConfig) -> Result<()>;
    /// Location of the config file.
    fn path(&self) -> Result<PathBuf>;
}
