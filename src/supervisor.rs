//! Supervisor — owns the tailers and brackets a run with lifecycle events.

use clawpatrol_core::{config::Config, Event, EventSink, EventType, Severity};
use clawpatrol_feeds::{TailError, Tailer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

pub const STARTED_MESSAGE: &str = "ClawPatrol SOC monitor started";
pub const STOPPED_MESSAGE: &str = "ClawPatrol SOC monitor stopped";

/// Which configured paths ended up monitored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartReport {
    pub started: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub struct Supervisor<S> {
    config: Config,
    sink: Arc<S>,
    cancel: CancellationToken,
    tailers: JoinSet<()>,
}

impl<S: EventSink> Supervisor<S> {
    pub fn new(config: Config, sink: Arc<S>) -> Self {
        Self {
            config,
            sink,
            cancel: CancellationToken::new(),
            tailers: JoinSet::new(),
        }
    }

    /// Emit the startup event, then start a tailer for every configured path
    /// that exists. Missing paths are logged and never retried.
    pub async fn start(&mut self) -> StartReport {
        tracing::info!("ClawPatrol SOC monitor starting");
        tracing::info!(webhook = %self.config.webhook_url, "Collector webhook");

        self.sink
            .deliver(startup_event(self.config.log_paths.len()))
            .await;

        let mut report = StartReport::default();
        for path in &self.config.log_paths {
            match Tailer::open(path, self.sink.clone(), self.config.poll_interval).await {
                Ok(tailer) => {
                    self.tailers.spawn(tailer.run(self.cancel.child_token()));
                    report.started.push(path.clone());
                }
                Err(TailError::NotFound(_)) => {
                    tracing::warn!("Log file not found: {}", path.display());
                    report.skipped.push(path.clone());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Log file unavailable: {}", path.display());
                    report.skipped.push(path.clone());
                }
            }
        }

        tracing::info!(
            monitored = report.started.len(),
            skipped = report.skipped.len(),
            "Monitoring started. Press Ctrl+C to stop."
        );
        report
    }

    /// Emit the shutdown event, wait for its delivery attempt, then stop
    /// every tailer.
    pub async fn shutdown(mut self) {
        tracing::info!("Shutting down ClawPatrol SOC monitor...");
        self.sink.deliver(shutdown_event()).await;

        self.cancel.cancel();
        while let Some(joined) = self.tailers.join_next().await {
            if let Err(e) = joined {
                tracing::warn!(error = %e, "tailer task ended abnormally");
            }
        }
    }

    /// Start, wait for `signal`, then shut down.
    pub async fn run_until<F>(mut self, signal: F) -> StartReport
    where
        F: std::future::Future<Output = ()>,
    {
        let report = self.start().await;
        signal.await;
        self.shutdown().await;
        report
    }
}

fn startup_event(monitored_files: usize) -> Event {
    Event::new(EventType::System, Severity::Info, STARTED_MESSAGE)
        .with_metadata("version", env!("CARGO_PKG_VERSION"))
        .with_metadata("monitored_files", monitored_files)
}

fn shutdown_event() -> Event {
    Event::new(EventType::System, Severity::Info, STOPPED_MESSAGE)
}
