//! clawpatrol-feeds — log file tailers.
//!
//! A [`Tailer`] owns one monitored file. It polls the file's metadata, reads
//! only the bytes appended since the last cycle, classifies each new line and
//! hands the resulting events to an [`EventSink`](clawpatrol_core::EventSink).

pub mod error;
pub mod file;

pub use error::TailError;
pub use file::{TailState, Tailer};
