//! `wol reboot` / `wol shutdown`: privileged power actions over SSH.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::remote_exec;
use crate::commands::{SshArgs, op_failed};
use crate::domain::capability::Capabilities;
use crate::domain::config::WolConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::ssh::OpenSshShell;

/// Which power action to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Reboot,
    Shutdown,
}

impl PowerAction {
    fn name(self) -> &'static str {
        match self {
            Self::Reboot => "reboot",
            Self::Shutdown => "shutdown",
        }
    }

    fn done_message(self) -> &'static str {
        match self {
            Self::Reboot => "reboot started",
            Self::Shutdown => "shutdown success",
        }
    }
}

/// Build the production shell for one command.
pub(crate) fn open_shell(
    config: &WolConfig,
    caps: &Capabilities,
) -> OpenSshShell<TokioCommandRunner> {
    OpenSshShell::new(TokioCommandRunner::default(), &config.ssh, caps)
}

/// Run a power action.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or rendering fails.
/// Remote failures are rendered and exit 1.
pub async fn run(app: &AppContext, action: PowerAction, args: SshArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let caps = app.capabilities(&config).await;
    let shell = open_shell(&config, &caps);
    let creds = args.credentials();

    let result = match action {
        PowerAction::Reboot => remote_exec::reboot(&shell, &caps, &creds).await,
        PowerAction::Shutdown => remote_exec::shutdown(&shell, &caps, &creds).await,
    };
    match result {
        Ok(()) => {
            app.renderer()
                .render_remote_done(action.name(), &creds.host, action.done_message())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => op_failed(app, &e),
    }
}
