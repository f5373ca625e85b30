//! Session construction and execution

use anyhow::{Context, Result};
use pentestgpt_core::config::PentestConfig;
use pentestgpt_core::session::PentestGpt;

/// Build the session handler and run it to completion
pub async fn run_pentest(config: PentestConfig) -> Result<()> {
    let mut session = PentestGpt::new(config).context("Failed to construct session")?;
    session.run().await.context("Session ended with an error")?;
    Ok(())
}
