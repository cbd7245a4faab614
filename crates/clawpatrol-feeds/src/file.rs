//! File tailer — follows one append-only log file.
//!
//! Each [`Tailer`] keeps an explicit [`TailState`] of `{last_size,
//! last_modified}` and advances it only after a delta has been read and every
//! line in it dispatched. One tailer runs as one task, so read cycles for the
//! same file never overlap and events leave in the order lines were written.
//!
//! # Change detection
//!
//! The file is stat'ed every `poll_interval`. A native filesystem watcher, when
//! the platform offers one, wakes the loop early; it never replaces the poll.
//! A cycle reads only when the modification time has advanced **and** the
//! file has grown. Any other change (truncation, rotation, in-place rewrite)
//! just replaces the snapshot with what was observed. Rotation is not
//! otherwise followed.
//!
//! Cancellation interrupts a cycle between or during deliveries. The
//! interrupted delta is never committed.

use crate::TailError;
use clawpatrol_core::{classify, EventSink};
use notify::{RecursiveMode, Watcher};
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Per-file tail bookkeeping. Lives only for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailState {
    pub path: PathBuf,
    /// Byte offset up to which content has been consumed.
    pub last_size: u64,
    /// Modification time seen at the last committed cycle.
    pub last_modified: SystemTime,
}

impl TailState {
    /// Snapshot `path` as it is right now. Existing content counts as
    /// consumed, so nothing written before this call is replayed.
    pub async fn observe(path: &Path) -> Result<Self, TailError> {
        let (size, modified) = stat(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            last_size: size,
            last_modified: modified,
        })
    }
}

/// Tails a single file and forwards classified lines to a sink.
pub struct Tailer<S> {
    state: TailState,
    sink: Arc<S>,
    poll_interval: Duration,
}

impl<S: EventSink> Tailer<S> {
    /// Start tracking `path`. Fails with [`TailError::NotFound`] if the file
    /// does not exist.
    pub async fn open(
        path: impl AsRef<Path>,
        sink: Arc<S>,
        poll_interval: Duration,
    ) -> Result<Self, TailError> {
        let state = TailState::observe(path.as_ref()).await?;
        Ok(Self {
            state,
            sink,
            poll_interval,
        })
    }

    pub fn state(&self) -> &TailState {
        &self.state
    }

    /// Run one detection cycle and return how many events were dispatched.
    ///
    /// On error the state is left untouched, so the same delta is retried on
    /// the next cycle.
    pub async fn poll_once(&mut self) -> Result<usize, TailError> {
        let (size, modified) = stat(&self.state.path).await?;

        if modified <= self.state.last_modified {
            return Ok(0);
        }

        if size <= self.state.last_size {
            tracing::debug!(
                path = %self.state.path.display(),
                previous = self.state.last_size,
                current = size,
                "file changed without growing"
            );
            self.state.last_size = size;
            self.state.last_modified = modified;
            return Ok(0);
        }

        let delta = self.read_delta().await?;
        let text = String::from_utf8_lossy(&delta);

        let mut dispatched = 0;
        for line in split_lines(&text) {
            if let Some(event) = classify(line, &self.state.path) {
                self.sink.deliver(event).await;
                dispatched += 1;
            }
        }

        self.state.last_size += delta.len() as u64;
        self.state.last_modified = modified;
        Ok(dispatched)
    }

    /// Follow the file until `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(path = %self.state.path.display(), "Monitoring: {}", self.state.path.display());

        // Held for the life of the loop so `recv` never sees a closed channel.
        let (wake_tx, mut wake_rx) = mpsc::unbounded_channel();
        let _watcher = native_watcher(&self.state.path, wake_tx.clone());

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut failing = false;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
                Some(()) = wake_rx.recv() => {
                    while wake_rx.try_recv().is_ok() {}
                }
            }

            let cycle = tokio::select! {
                _ = cancel.cancelled() => break,
                cycle = self.poll_once() => cycle,
            };

            match cycle {
                Ok(_) if failing => {
                    tracing::info!(path = %self.state.path.display(), "tailing recovered");
                    failing = false;
                }
                Ok(_) => {}
                Err(e) if !failing => {
                    tracing::warn!(error = %e, "tail cycle failed");
                    failing = true;
                }
                Err(e) => tracing::debug!(error = %e, "tail cycle still failing"),
            }
        }

        drop(wake_tx);
        tracing::debug!(path = %self.state.path.display(), "stopped monitoring");
    }

    async fn read_delta(&self) -> Result<Vec<u8>, TailError> {
        let read_err = |source: io::Error| TailError::Read {
            path: self.state.path.clone(),
            source,
        };

        let mut file = tokio::fs::File::open(&self.state.path)
            .await
            .map_err(read_err)?;
        file.seek(SeekFrom::Start(self.state.last_size))
            .await
            .map_err(read_err)?;

        let mut delta = Vec::new();
        file.read_to_end(&mut delta).await.map_err(read_err)?;
        Ok(delta)
    }
}

/// Split a delta on `\n`, dropping whitespace-only lines. Lines are handed
/// on untouched; the classifier does its own trimming.
pub fn split_lines(delta: &str) -> impl Iterator<Item = &str> {
    delta.split('\n').filter(|line| !line.trim().is_empty())
}

async fn stat(path: &Path) -> Result<(u64, SystemTime), TailError> {
    let stat_err = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            TailError::NotFound(path.to_path_buf())
        } else {
            TailError::Stat {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    let metadata = tokio::fs::metadata(path).await.map_err(stat_err)?;
    let modified = metadata.modified().map_err(stat_err)?;
    Ok((metadata.len(), modified))
}

fn native_watcher(
    path: &Path,
    wake: mpsc::UnboundedSender<()>,
) -> Option<notify::RecommendedWatcher> {
    let handler = move |res: notify::Result<notify::Event>| match res {
        Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
            let _ = wake.send(());
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "native watcher error"),
    };

    let mut watcher = match notify::recommended_watcher(handler) {
        Ok(w) => w,
        Err(e) => {
            tracing::debug!(error = %e, "native watcher unavailable, polling only");
            return None;
        }
    };

    if let Err(e) = watcher.watch(path, RecursiveMode::NonRecursive) {
        tracing::debug!(path = %path.display(), error = %e, "native watch failed, polling only");
        return None;
    }
    Some(watcher)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
