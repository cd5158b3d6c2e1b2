//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
use serde_json::json as json_value;

pub use human::HumanRenderer;
pub use styles::Styles;

use crate::domain::config::WolConfig;
use crate::domain::cpu::CpuStat;
use crate::domain::error::OpError;
use crate::domain::network::{DiscoveredHost, MacAddress};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Machine-readable renderer: one JSON object per command on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &serde_json::Value) -> Result<()> {
        println!("{}", json::format_value(value)?);
        Ok(())
    }
}

/// Dispatches each render call to the human or JSON renderer.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => r.render_version(version),
            Self::Json(_) => JsonRenderer::print(&json_value!({ "version": version }))?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_check(&self, host: &str, reachable: bool) -> Result<()> {
        match self {
            Self::Human(r) => r.render_check(reachable),
            Self::Json(_) => {
                JsonRenderer::print(&json_value!({ "host": host, "reachable": reachable }))?;
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_wake(&self, mac: &MacAddress, host: &str, port: u16) -> Result<()> {
        match self {
            Self::Human(r) => r.render_wake(mac, host, port),
            Self::Json(_) => JsonRenderer::print(&json_value!({
                "sent": true,
                "mac": mac.to_string(),
                "host": host,
                "port": port,
            }))?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_remote_done(&self, action: &str, host: &str, message: &str) -> Result<()> {
        match self {
            Self::Human(r) => r.render_remote_done(message),
            Self::Json(_) => {
                JsonRenderer::print(&json_value!({ "host": host, "action": action, "ok": true }))?;
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_cpu(&self, stat: &CpuStat) -> Result<()> {
        match self {
            Self::Human(r) => r.render_cpu(stat),
            Self::Json(_) => {
                println!("{}", json::format_value(stat)?);
                Ok(())
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_hosts(&self, hosts: &[DiscoveredHost]) -> Result<()> {
        match self {
            Self::Human(r) => r.render_hosts(hosts),
            Self::Json(_) => println!("{}", json::format_value(&hosts)?),
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &WolConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => r.render_config(config, path),
            Self::Json(_) => JsonRenderer::print(&json_value!({
                "path": path.display().to_string(),
                "config": config,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(r) => r.render_config_set(key, value),
            Self::Json(_) => JsonRenderer::print(&json_value!({ "key": key, "value": value }))?,
        }
        Ok(())
    }

    /// Render a failed operation: stderr for humans, the error object for JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_op_error(&self, err: &OpError, verbose: bool) -> Result<()> {
        match self {
            Self::Human(r) => r.render_op_error(err, verbose),
            Self::Json(_) => {
                let details = match err {
                    OpError::Remote(e) => e.details.clone(),
                    OpError::Unsupported(cap) => Some(json_value!({ "hint": cap.hint() })),
                    _ => None,
                };
                println!(
                    "{}",
                    json::format_error(&format!("{err:#}"), err.code(), details.as_ref())?
                );
                Ok(())
            }
        }
    }
}
