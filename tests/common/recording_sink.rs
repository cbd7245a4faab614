//! In-memory [`EventSink`] that records every delivered event.

use clawpatrol_core::{Event, EventSink};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
    delay: Duration,
}

impl RecordingSink {
    /// A sink where every delivery takes `delay` before it is recorded.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            events: Mutex::default(),
            delay,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Poll until at least `n` events arrived or `timeout` elapsed.
    pub async fn wait_for(&self, n: usize, timeout: Duration) -> Vec<Event> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let events = self.events();
            if events.len() >= n || tokio::time::Instant::now() >= deadline {
                return events;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl EventSink for RecordingSink {
    async fn deliver(&self, event: Event) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.events.lock().unwrap().push(event);
    }
}
