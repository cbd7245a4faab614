//! The delivery seam between event producers and the remote collector.

use crate::Event;
use std::future::Future;

/// Delivers one event to wherever events go.
///
/// `deliver` is best-effort and infallible from the caller's side:
/// implementations report their own failures and return normally, so a
/// broken collector never stalls or kills a tailer.
pub trait EventSink: Send + Sync + 'static {
    fn deliver(&self, event: Event) -> impl Future<Output = ()> + Send;
}
