//! Shared mock infrastructure for unit tests.
//!
//! Hand-written port implementations that return canned values and record
//! the calls they receive, so each test file doesn't have to re-define the
//! same boilerplate.

#![allow(dead_code, clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::process::Output;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use ipnet::Ipv4Net;
use wol_cli::application::ports::{
    ArpSweeper, CommandRunner, ConfigStore, DatagramSender, PrivilegeCheck, Prober,
    RemoteShell, RouteTable,
};
use wol_cli::domain::config::WolConfig;
use wol_cli::domain::network::{DiscoveredHost, Route};
use wol_cli::domain::ssh::{RemoteExecResult, SshCredentials};

fn unexpected<T>() -> Result<T> {
    anyhow::bail!("not expected in this test")
}

// ── Remote shell ─────────────────────────────────────────────────────────────

/// One recorded `RemoteShell::run` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCall {
    pub host: String,
    pub command: String,
    pub sudo: bool,
}

/// Returns the same canned result for every call.
pub struct MockShell {
    result: std::result::Result<RemoteExecResult, String>,
    pub calls: RefCell<Vec<ShellCall>>,
}

impl MockShell {
    pub fn returning(result: RemoteExecResult) -> Self {
        Self {
            result: Ok(result),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// The session itself cannot be driven (spawn failure, timeout).
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ShellCall> {
        self.calls.borrow().clone()
    }
}

impl RemoteShell for MockShell {
    async fn run(
        &self,
        creds: &SshCredentials,
        command: &str,
        sudo: bool,
    ) -> Result<RemoteExecResult> {
        self.calls.borrow_mut().push(ShellCall {
            host: creds.host.clone(),
            command: command.to_string(),
            sudo,
        });
        match &self.result {
            Ok(r) => Ok(r.clone()),
            Err(msg) => anyhow::bail!("{msg}"),
        }
    }
}

// ── Probing ──────────────────────────────────────────────────────────────────

/// Canned prober that counts its calls.
pub struct MockProber {
    answer: Option<bool>,
    pub calls: Cell<usize>,
}

impl MockProber {
    pub fn up() -> Self {
        Self {
            answer: Some(true),
            calls: Cell::new(0),
        }
    }

    pub fn down() -> Self {
        Self {
            answer: Some(false),
            calls: Cell::new(0),
        }
    }

    /// Cannot run at all (e.g. socket creation refused).
    pub fn broken() -> Self {
        Self {
            answer: None,
            calls: Cell::new(0),
        }
    }
}

impl Prober for MockProber {
    async fn probe(&self, _host: &str, _port: u16) -> Result<bool> {
        self.calls.set(self.calls.get() + 1);
        match self.answer {
            Some(up) => Ok(up),
            None => anyhow::bail!("Operation not permitted (os error 1)"),
        }
    }
}

pub struct FixedPrivilege(pub bool);

impl PrivilegeCheck for FixedPrivilege {
    fn is_privileged(&self) -> bool {
        self.0
    }
}

// ── Discovery ────────────────────────────────────────────────────────────────

pub struct StaticRoutes(pub Vec<Route>);

impl RouteTable for StaticRoutes {
    async fn routes(&self) -> Result<Vec<Route>> {
        Ok(self.0.clone())
    }
}

/// Routing table that must not be consulted.
pub struct NoRoutes;

impl RouteTable for NoRoutes {
    async fn routes(&self) -> Result<Vec<Route>> {
        unexpected()
    }
}

/// Records swept networks and answers with a fixed host list.
pub struct RecordingSweeper {
    hosts: Vec<DiscoveredHost>,
    pub swept: RefCell<Vec<Ipv4Net>>,
}

impl RecordingSweeper {
    pub fn answering(hosts: Vec<DiscoveredHost>) -> Self {
        Self {
            hosts,
            swept: RefCell::new(Vec::new()),
        }
    }
}

impl ArpSweeper for RecordingSweeper {
    async fn sweep(&self, net: Ipv4Net) -> Result<Vec<DiscoveredHost>> {
        self.swept.borrow_mut().push(net);
        Ok(self.hosts.clone())
    }
}

// ── Wake ─────────────────────────────────────────────────────────────────────

/// One captured datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub payload: Vec<u8>,
    pub host: String,
    pub port: u16,
}

#[derive(Default)]
pub struct RecordingSender {
    pub sent: RefCell<Vec<Datagram>>,
}

impl DatagramSender for RecordingSender {
    async fn send_to(&self, payload: &[u8], host: &str, port: u16) -> Result<()> {
        self.sent.borrow_mut().push(Datagram {
            payload: payload.to_vec(),
            host: host.to_string(),
            port,
        });
        Ok(())
    }
}

// ── Process runner ───────────────────────────────────────────────────────────

/// One recorded `run_with_env` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub stdin: Option<Vec<u8>>,
}

/// Records `run_with_env` invocations and returns a canned `Output`.
///
/// The call log is shared, so it stays readable after the runner is moved
/// into the adapter under test.
pub struct MockRunner {
    output: Output,
    pub calls: Rc<RefCell<Vec<RunCall>>>,
}

impl MockRunner {
    pub fn returning(output: Output) -> Self {
        Self {
            output,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn call_log(&self) -> Rc<RefCell<Vec<RunCall>>> {
        Rc::clone(&self.calls)
    }

    pub fn last_call(&self) -> RunCall {
        self.calls
            .borrow()
            .last()
            .cloned()
            .expect("runner was never called")
    }
}

impl CommandRunner for MockRunner {
    async fn run(&self, _: &str, _: &[&str]) -> Result<Output> {
        unexpected()
    }
    async fn run_with_timeout(&self, _: &str, _: &[&str], _: Duration) -> Result<Output> {
        unexpected()
    }
    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
        stdin: Option<&[u8]>,
        _timeout: Duration,
    ) -> Result<Output> {
        self.calls.borrow_mut().push(RunCall {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            env: env
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            stdin: stdin.map(<[u8]>::to_vec),
        });
        Ok(self.output.clone())
    }
}

// ── Config ───────────────────────────────────────────────────────────────────

/// In-memory config store.
#[derive(Default)]
pub struct MemoryConfigStore {
    pub saved: RefCell<Option<WolConfig>>,
    pub save_count: Cell<usize>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<WolConfig> {
        Ok(self.saved.borrow().clone().unwrap_or_default())
    }
    fn save(&self, config: &WolConfig) -> Result<()> {
        *self.saved.borrow_mut() = Some(config.clone());
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/nonexistent/config.yaml"))
    }
}
