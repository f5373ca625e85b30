use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pentestgpt_core::connection::check_connection;

mod args;
mod runner;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("pentestgpt v{}", env!("CARGO_PKG_VERSION"));

    // Nothing works without the API, so fail fast before building the session
    if !check_connection().await {
        error!("Cannot reach the OpenAI API; check OPENAI_API_KEY and network access");
        std::process::exit(1);
    }

    if let Err(e) = runner::run_pentest(args.into_config()).await {
        error!("Session failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
