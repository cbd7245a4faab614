//! Shared test utilities for clawpatrol integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod fake_collector;
pub mod fixtures;
pub mod recording_sink;

pub use assertions::*;
pub use fake_collector::FakeCollector;
pub use fixtures::*;
pub use recording_sink::RecordingSink;
