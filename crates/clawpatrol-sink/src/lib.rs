//! clawpatrol-sink — delivers events to the remote collector.
//!
//! [`WebhookSink`] POSTs each event as one JSON document. Delivery is
//! best-effort: failures are logged and the event is dropped, with no retry
//! and no queueing.

pub mod error;
pub mod webhook;

pub use error::DeliveryError;
pub use webhook::{envelope, WebhookSink};
