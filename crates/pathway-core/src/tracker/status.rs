//! Rotating progress messages shown while a plan is generated.

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle, time};

/// Message published when an attempt starts.
pub const INITIAL_STATUS: &str = "Starting...";

/// Messages cycled while an attempt runs.
pub const STATUS_MESSAGES: [&str; 5] = [
    "Analyzing your current profile...",
    "Mapping skill gaps for the target role...",
    "Checking market trends...",
    "Structuring the learning plan...",
    "Finishing the details...",
];

/// Publishes [`STATUS_MESSAGES`] in a loop until dropped.
pub(super) struct StatusTicker {
    handle: JoinHandle<()>,
}

impl StatusTicker {
    pub(super) fn start(status: Arc<watch::Sender<String>>, every: Duration) -> Self {
        status.send_replace(INITIAL_STATUS.to_string());

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(every);
            ticker.tick().await;
            for message in STATUS_MESSAGES.iter().cycle() {
                ticker.tick().await;
                status.send_replace((*message).to_string());
            }
        });

        Self { handle }
    }
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
