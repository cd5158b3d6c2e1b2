//! One-shot detection of optional host capabilities.

use crate::application::ports::CommandRunner;
use crate::domain::capability::Capabilities;
use crate::domain::config::ProbeConfig;

/// Probe for the ssh client, `sshpass`, and raw-socket support.
///
/// Spawn failures mean "absent"; detection itself never fails.
pub async fn detect(runner: &impl CommandRunner, probe: &ProbeConfig) -> Capabilities {
    let caps = Capabilities {
        remote_shell: binary_works(runner, "ssh", &["-V"]).await,
        password_login: binary_works(runner, "sshpass", &["-V"]).await,
        raw_packets: cfg!(target_os = "linux") && probe.raw_packets,
    };
    tracing::debug!(?caps, "capabilities detected");
    caps
}

async fn binary_works(runner: &impl CommandRunner, program: &str, args: &[&str]) -> bool {
    runner
        .run(program, args)
        .await
        .is_ok_and(|out| out.status.success())
}
