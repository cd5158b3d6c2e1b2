//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;
use serde::Serialize;

use crate::domain::config::WolConfig;
use crate::domain::cpu::CpuStat;
use crate::domain::error::OpError;
use crate::domain::network::{DiscoveredHost, MacAddress};
use crate::output::{OutputContext, json};

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("wol {version}");
        }
    }

    /// `reached` in green, or `not reached` in red.
    pub fn render_check(&self, reachable: bool) {
        if reachable {
            self.ctx.success("reached");
        } else {
            self.ctx.error("not reached");
        }
    }

    pub fn render_wake(&self, mac: &MacAddress, host: &str, port: u16) {
        self.ctx.success(&format!("magic packet sent to {mac} via {host}:{port}"));
    }

    pub fn render_remote_done(&self, message: &str) {
        self.ctx.success(message);
    }

    /// Utilization as a key-highlighted JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the stat cannot be serialized.
    pub fn render_cpu(&self, stat: &CpuStat) -> anyhow::Result<()> {
        println!("{}", self.highlight_json(stat)?);
        Ok(())
    }

    pub fn render_hosts(&self, hosts: &[DiscoveredHost]) {
        if hosts.is_empty() {
            self.ctx.info("no results");
            return;
        }
        if !self.ctx.quiet {
            self.ctx.header("results:");
        }
        for host in hosts {
            println!("  {:<15} {} {}", host.ip, "|".style(self.ctx.styles.dim), host.mac);
        }
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized.
    pub fn render_config(&self, config: &WolConfig, path: &Path) -> anyhow::Result<()> {
        self.ctx.kv("Config:", &path.display().to_string());
        let yaml = serde_yaml::to_string(config)?;
        for line in yaml.lines() {
            println!("  {line}");
        }
        Ok(())
    }

    pub fn render_config_set(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }

    /// Print a failed operation to stderr, with details under `verbose`.
    ///
    /// # Errors
    ///
    /// Returns an error if the details cannot be serialized.
    pub fn render_op_error(&self, err: &OpError, verbose: bool) -> anyhow::Result<()> {
        match err {
            OpError::Unsupported(cap) => {
                self.ctx.error(&err.to_string());
                eprintln!("  {}", cap.hint().style(self.ctx.styles.dim));
            }
            OpError::Remote(e) => {
                self.ctx.error(&format!("can't exec command on host: {}", e.reason));
                if let (true, Some(details)) = (verbose, &e.details) {
                    eprintln!("{}", self.highlight_json(details)?);
                }
            }
            other => self.ctx.error(&format!("{other:#}")),
        }
        Ok(())
    }

    /// Pretty JSON with object keys styled.
    fn highlight_json(&self, value: &impl Serialize) -> anyhow::Result<String> {
        let pretty = json::format_value(value)?;
        let lines: Vec<String> = pretty
            .lines()
            .map(|line| {
                let indent = line.len() - line.trim_start().len();
                match line.trim_start().split_once("\": ") {
                    Some((key, rest)) if key.starts_with('"') => format!(
                        "{}{}: {rest}",
                        &line[..indent],
                        format!("{key}\"").style(self.ctx.styles.key)
                    ),
                    _ => line.to_string(),
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }
}
