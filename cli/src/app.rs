//! Application context: unified state passed to every command handler.
//!
//! Adapters are built from the loaded config inside each command, so a
//! command only pays for the capabilities it actually uses.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::capability::Capabilities;
use crate::domain::config::WolConfig;
use crate::infra::capabilities;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
#[allow(clippy::struct_excessive_bools)]
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Show failure details.
    pub verbose: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Render remote failure details.
    pub verbose: bool,
    /// Config persistence.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        Self::with_store(flags, YamlConfigStore::new())
    }

    /// Construct with an explicit config store.
    #[must_use]
    pub fn with_store(flags: &AppFlags, config_store: YamlConfigStore) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            verbose: flags.verbose,
            config_store,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Load `~/.wol/config.yaml` (or `$WOL_CONFIG`), defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_config(&self) -> Result<WolConfig> {
        self.config_store.load()
    }

    /// Detect optional capabilities for this process.
    pub async fn capabilities(&self, config: &WolConfig) -> Capabilities {
        capabilities::detect(&TokioCommandRunner::default(), &config.probe).await
    }

    /// Progress spinner when the terminal allows it.
    #[must_use]
    pub fn spinner(&self, msg: &str) -> indicatif::ProgressBar {
        crate::output::progress::maybe_spinner(self.output.show_progress() && !self.is_json(), msg)
    }
}
