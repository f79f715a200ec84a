//! Backend health check.

use anyhow::{Context as _, Result};

use crate::context::Context;

/// Run the health command.
pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let spinner = ctx.output.spinner("Checking backend...");
    let health = client.health().await;
    spinner.finish_and_clear();
    let health = health.context("Backend is not reachable")?;

    if ctx.output.is_json() {
        ctx.output.json(&health);
        return Ok(());
    }

    let status = health.status.as_deref().unwrap_or("OK");
    ctx.output.success(&format!("Backend is up ({status})"));
    if let Some(message) = &health.message {
        ctx.output.kv("Message", message);
    }
    Ok(())
}
