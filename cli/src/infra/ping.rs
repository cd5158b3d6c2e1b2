//! Unprivileged reachability: one ICMP echo through the system `ping`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, Prober};

/// Production ping [`Prober`]. The port argument is ignored.
pub struct PingProber<R> {
    runner: R,
    timeout_secs: u64,
}

impl<R: CommandRunner> PingProber<R> {
    #[must_use]
    pub fn new(runner: R, timeout_secs: u64) -> Self {
        Self {
            runner,
            timeout_secs,
        }
    }
}

/// `ping -c 1 -W <secs> <host>`.
#[must_use]
pub fn ping_args(host: &str, timeout_secs: u64) -> Vec<String> {
    vec![
        "-c".to_string(),
        "1".to_string(),
        "-W".to_string(),
        timeout_secs.to_string(),
        host.to_string(),
    ]
}

impl<R: CommandRunner> Prober for PingProber<R> {
    async fn probe(&self, host: &str, _port: u16) -> Result<bool> {
        let args = ping_args(host, self.timeout_secs);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        // Name resolution is outside -W, so allow headroom before killing.
        let deadline = Duration::from_secs(self.timeout_secs + 5);
        let output = self.runner.run_with_timeout("ping", &args, deadline).await?;
        Ok(output.status.success())
    }
}
