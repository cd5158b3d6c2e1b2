//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`
//! sockets. All functions are synchronous and take data in, returning data out.

pub mod capability;
pub mod config;
pub mod cpu;
pub mod error;
pub mod network;
pub mod ssh;

pub use capability::{Capabilities, Capability, ProbeStrategy};
pub use config::WolConfig;
pub use cpu::{CpuStat, CpuStatShort};
pub use error::{ConfigError, OpError, SampleError};
pub use network::{DiscoveredHost, MacAddress, Route};
pub use ssh::{RemoteErrorCode, RemoteExecError, RemoteExecResult, SshCredentials};
