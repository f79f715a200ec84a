//! Hand-off opener for the terminal.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use trtech_storefront::{HandoffError, HandoffOpener};

use crate::output::Output;

/// Prints the link and, when asked, launches the system browser on it.
pub struct TerminalOpener {
    output: Output,
    launch: bool,
}

impl TerminalOpener {
    pub fn new(output: Output, launch: bool) -> Self {
        Self { output, launch }
    }
}

#[async_trait]
impl HandoffOpener for TerminalOpener {
    async fn open(&self, url: &str) -> Result<(), HandoffError> {
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(HandoffError::Refused(url.to_string()));
        }

        if self.output.is_json() {
            self.output.json(&serde_json::json!({ "handoff_url": url }));
        } else {
            self.output.kv("WhatsApp link", url);
        }

        if !self.launch {
            return Ok(());
        }

        let (program, args) = launcher();
        debug!(program, "launching browser");
        let status = Command::new(program)
            .args(args)
            .arg(url)
            .status()
            .await
            .map_err(|e| HandoffError::Unavailable(format!("{program}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(HandoffError::Unavailable(format!("{program} exited with {status}")))
        }
    }
}

fn launcher() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}
