//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.

use thiserror::Error;

use crate::domain::capability::Capability;
use crate::domain::ssh::RemoteExecError;

// ── CPU sample errors ─────────────────────────────────────────────────────────

/// Errors turning raw stat text into a utilization vector.
#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("malformed CPU sample: {0}")]
    Malformed(String),

    #[error("CPU counters did not advance between samples")]
    Degenerate,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors validating `wol config set` input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}

// ── Operation errors ──────────────────────────────────────────────────────────

/// Failure of one host operation (probe, wake, exec, sample, scan).
#[derive(Debug, Error)]
pub enum OpError {
    /// A required optional capability is missing, or the process lacks privilege.
    #[error("{0} is not available")]
    Unsupported(Capability),

    #[error(transparent)]
    Remote(#[from] RemoteExecError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error("no usable network interface found")]
    NoUsableInterface,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OpError {
    /// Stable machine-readable code for JSON output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unsupported(_) => "unsupported",
            Self::Remote(e) => e.code.as_str(),
            Self::Sample(SampleError::Malformed(_)) => "malformed_sample",
            Self::Sample(SampleError::Degenerate) => "degenerate_sample",
            Self::NoUsableInterface => "no_usable_interface",
            Self::Other(_) => "error",
        }
    }
}
