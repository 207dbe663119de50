//! MotionCare CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use motion_cli::config::AppConfig;
use motion_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    tracing::info!(
        "Model {} in {}/{} via {}",
        config.scorer.model,
        config.llm.project_id,
        config.llm.location,
        config.llm.api_base_url
    );

    let output = motion_cli::run(&cli.command, &config).await?;
    println!("{}", output);

    Ok(())
}
