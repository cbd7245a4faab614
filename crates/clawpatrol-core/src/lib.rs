//! clawpatrol-core — shared building blocks for the ClawPatrol SOC monitor.
//!
//! This crate holds everything that is free of I/O scheduling concerns: the
//! [`Event`] data model, the line [`classifier`], the layered [`config`], and
//! the [`EventSink`] seam that the tailer and supervisor deliver through.
//!
//! # Pipeline
//!
//! ```text
//! file growth ──► Tailer ──► classify() ──► EventSink ──► collector
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod sink;
pub mod types;

pub use classifier::classify;
pub use error::{ClassifyError, ConfigError};
pub use sink::EventSink;
pub use types::{Event, EventType, Metadata, Severity};
