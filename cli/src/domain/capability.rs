//! Optional-capability descriptor and probe strategy selection.

use std::fmt;

use serde::Serialize;

/// Capabilities detected once at process start and injected into services.
///
/// Privilege is deliberately absent: it is re-checked on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    /// An SSH client binary is installed.
    pub remote_shell: bool,
    /// `sshpass` is installed, so a password can be used to log in.
    pub password_login: bool,
    /// Raw IP and link-layer sockets are supported on this platform.
    pub raw_packets: bool,
}

impl Capabilities {
    /// Everything available (test and diagnostic helper).
    #[must_use]
    pub fn all() -> Self {
        Self {
            remote_shell: true,
            password_login: true,
            raw_packets: true,
        }
    }

    /// Nothing available.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// A capability an operation may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    RemoteShell,
    RawPackets,
    Privilege,
}

impl Capability {
    /// Operator hint rendered after the "not available" message.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::RemoteShell => "is the ssh client installed?",
            Self::RawPackets => "raw sockets need Linux and probe.raw_packets enabled",
            Self::Privilege => "raw sockets need root; are you root?",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RemoteShell => "remote execution",
            Self::RawPackets => "raw packet probing",
            Self::Privilege => "privileged network access",
        })
    }
}

/// How reachability is tested for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStrategy {
    /// Single TCP SYN, any reply counts.
    RawProbe,
    /// One ICMP echo through the system `ping`.
    PingFallback,
}

impl ProbeStrategy {
    /// Raw probing needs both the platform support and root right now.
    #[must_use]
    pub fn select(caps: &Capabilities, privileged: bool) -> Self {
        if caps.raw_packets && privileged {
            Self::RawProbe
        } else {
            Self::PingFallback
        }
    }
}
