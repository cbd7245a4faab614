//! clawpatrol — ClawPatrol SOC monitor.
//!
//! Tails a fixed set of append-only log files, classifies each new line into
//! a structured security/operational event, and ships every event to a remote
//! collector webhook.
//!
//! # Architecture
//!
//! ```text
//!              ┌──► Tailer(gateway.log)  ──┐
//! Supervisor ──┼──► Tailer(sessions.log) ──┼──► classify() ──► WebhookSink ──► collector
//!              └──► Tailer(…)            ──┘
//! ```
//!
//! The supervisor owns the tailers, emits the startup/shutdown events and
//! coordinates graceful termination. The member crates are re-exported so
//! integration tests can reach every layer from here.

pub mod supervisor;

pub use clawpatrol_core as core;
pub use clawpatrol_feeds as feeds;
pub use clawpatrol_sink as sink;
pub use supervisor::{StartReport, Supervisor};
