use anyhow::Context;
use clap::Parser;
use clawpatrol::Supervisor;
use clawpatrol_core::config::Config;
use clawpatrol_sink::WebhookSink;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "clawpatrol",
    about = "ClawPatrol SOC monitor — ships classified log events to a collector webhook"
)]
struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence).
    #[arg(long)]
    debug: bool,

    /// Monitor this file instead of the configured set. Repeatable.
    #[arg(long = "path", value_name = "FILE")]
    paths: Vec<PathBuf>,

    /// Override the per-file poll interval.
    #[arg(long, value_name = "MS")]
    poll_interval_ms: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "info" })
            }),
        )
        .init();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    if !cli.paths.is_empty() {
        config.log_paths = cli.paths;
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval = Duration::from_millis(ms);
    }

    let sink = Arc::new(WebhookSink::new(&config).context("building webhook client")?);
    let supervisor = Supervisor::new(config, sink);

    supervisor
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl+C");
            }
        })
        .await;

    Ok(())
}
