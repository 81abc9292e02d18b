//! Publisher double.

use async_trait::async_trait;
use ircpush::error::PublishError;
use ircpush::publish::Publisher;
use std::sync::Mutex;
use tokio::sync::Notify;

/// One publish call as the bridge made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub payload: String,
    pub event: String,
    pub channel: String,
}

/// Records every publish call and wakes waiters.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Published>>,
    notify: Notify,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Published> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until at least `count` calls were recorded.
    pub async fn wait_for(&self, count: usize) -> Vec<Published> {
        loop {
            let notified = self.notify.notified();
            let calls = self.calls();
            if calls.len() >= count {
                return calls;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl Publisher for Recorder {
    async fn publish(&self, payload: &str, event: &str, channel: &str) -> Result<(), PublishError> {
        self.calls.lock().unwrap().push(Published {
            payload: payload.to_string(),
            event: event.to_string(),
            channel: channel.to_string(),
        });
        self.notify.notify_waiters();
        Ok(())
    }
}
