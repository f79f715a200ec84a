//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use trtech_api::ApiClient;
use trtech_storefront::Storefront;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::opener::TerminalOpener;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env();

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Install the log subscriber. `--verbose` lowers the level to debug.
    pub fn init_logging(&self) {
        let mut logging = self.config.logging;
        if self.output.is_verbose() {
            logging.level = trtech_observability::LogLevel::Debug;
        }
        if let Err(e) = trtech_observability::init_logging(&logging) {
            self.output.debug(&e.to_string());
        }
    }

    /// Client for the configured backend.
    pub fn api_client(&self) -> Result<ApiClient> {
        let config = self.config.api_config()?;
        self.output.debug(&format!("Backend: {}", config.base_url));
        ApiClient::new(config).context("Failed to build HTTP client")
    }

    /// Storefront wired to the backend, the terminal and the configured
    /// WhatsApp number. `launch` opens links in the system browser.
    pub fn storefront(&self, launch: bool) -> Result<Storefront> {
        let client = Arc::new(self.api_client()?);
        let opener = Arc::new(TerminalOpener::new(self.output, launch));
        Ok(Storefront::builder(client, opener)
            .notifier(Arc::new(self.output))
            .link(self.config.handoff_link()?)
            .handoff_attempts(self.config.whatsapp.handoff_attempts)
            .build())
    }
}

/// Find a config file in `start` or any parent directory.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
