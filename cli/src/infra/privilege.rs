//! `PrivilegeCheck` by effective UID.

use nix::unistd::geteuid;

use crate::application::ports::PrivilegeCheck;

/// Privileged when running as effective UID 0. Queried on every call.
#[derive(Default)]
pub struct EffectiveUid;

impl PrivilegeCheck for EffectiveUid {
    fn is_privileged(&self) -> bool {
        geteuid().is_root()
    }
}
