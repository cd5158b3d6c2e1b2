//! Domain types and validators for `wol` configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::network::{WOL_BROADCAST, WOL_PORT};

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "ssh.connect_timeout_secs",
    "ssh.command_timeout_secs",
    "probe.port",
    "probe.syn_timeout_secs",
    "probe.ping_timeout_secs",
    "probe.raw_packets",
    "wake.broadcast",
    "wake.port",
    "scan.reply_timeout_secs",
];

/// Upper bound on any configured timeout (one hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.wol/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WolConfig {
    pub ssh: SshConfig,
    pub probe: ProbeConfig,
    pub wake: WakeConfig,
    pub scan: ScanConfig,
}

/// Remote shell timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshConfig {
    /// Passed to the ssh client as `ConnectTimeout`.
    pub connect_timeout_secs: u64,
    /// Hard bound on one remote command, connection included.
    pub command_timeout_secs: u64,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            command_timeout_secs: 60,
        }
    }
}

impl SshConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

/// Reachability probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// TCP port targeted by the SYN probe.
    pub port: u16,
    pub syn_timeout_secs: u64,
    pub ping_timeout_secs: u64,
    /// `false` forces the ping strategy even when running as root.
    pub raw_packets: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            port: 80,
            syn_timeout_secs: 15,
            ping_timeout_secs: 2,
            raw_packets: true,
        }
    }
}

/// Wake-on-LAN defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WakeConfig {
    pub broadcast: String,
    pub port: u16,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            broadcast: WOL_BROADCAST.to_string(),
            port: WOL_PORT,
        }
    }
}

/// ARP sweep settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Listening window after the last request goes out.
    pub reply_timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            reply_timeout_secs: 2,
        }
    }
}

impl WolConfig {
    /// Apply one validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the key is unknown or the value invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;

        let invalid = || invalid_value(key, value, "a valid value");
        match key {
            "ssh.connect_timeout_secs" => self.ssh.connect_timeout_secs = parse(value, invalid)?,
            "ssh.command_timeout_secs" => self.ssh.command_timeout_secs = parse(value, invalid)?,
            "probe.port" => self.probe.port = parse(value, invalid)?,
            "probe.syn_timeout_secs" => self.probe.syn_timeout_secs = parse(value, invalid)?,
            "probe.ping_timeout_secs" => self.probe.ping_timeout_secs = parse(value, invalid)?,
            "probe.raw_packets" => self.probe.raw_packets = parse(value, invalid)?,
            "wake.broadcast" => self.wake.broadcast = value.to_string(),
            "wake.port" => self.wake.port = parse(value, invalid)?,
            "scan.reply_timeout_secs" => self.scan.reply_timeout_secs = parse(value, invalid)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(
    value: &str,
    invalid: impl Fn() -> ConfigError,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid())
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::UnknownKey {
        key: key.to_string(),
        valid: VALID_CONFIG_KEYS.join(", "),
    }
}

fn invalid_value(key: &str, value: &str, valid: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<(), ConfigError> {
    if VALID_CONFIG_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(unknown_key(key))
    }
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let ok = match key {
        "probe.port" | "wake.port" => value.parse::<u16>().is_ok_and(|p| p > 0),
        "probe.raw_packets" => value.parse::<bool>().is_ok(),
        "wake.broadcast" => value.parse::<IpAddr>().is_ok(),
        k if k.ends_with("_secs") => value
            .parse::<u64>()
            .is_ok_and(|s| (1..=MAX_TIMEOUT_SECS).contains(&s)),
        _ => true,
    };
    if ok {
        return Ok(());
    }
    let valid = match key {
        "probe.port" | "wake.port" => "1-65535".to_string(),
        "probe.raw_packets" => "true, false".to_string(),
        "wake.broadcast" => "an IPv4 or IPv6 address".to_string(),
        _ => format!("1-{MAX_TIMEOUT_SECS} (seconds)"),
    };
    Err(invalid_value(key, value, &valid))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
