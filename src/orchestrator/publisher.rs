//! Fire-and-forget result publication.

use crate::assignment::AssignmentResult;
use tokio::sync::broadcast;
use tracing::debug;

/// Logical name of the channel results are broadcast on.
pub const ASSIGNMENTS_TOPIC: &str = "assignments";

/// One-way sink for finished runs.
///
/// `publish` never blocks on subscribers and never reports delivery.
#[cfg_attr(test, mockall::automock)]
pub trait ResultPublisher: Send + Sync {
    fn publish(&self, result: AssignmentResult);
}

/// In-process broadcast of results on [`ASSIGNMENTS_TOPIC`].
///
/// Every receiver subscribed at send time gets the result once. Results
/// sent while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct AssignmentBroadcaster {
    topic: String,
    sender: broadcast::Sender<AssignmentResult>,
}

impl AssignmentBroadcaster {
    /// Creates a broadcaster buffering up to `capacity` unread results per
    /// subscriber. Slow subscribers lose the oldest results first.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            topic: ASSIGNMENTS_TOPIC.to_string(),
            sender,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AssignmentResult> {
        self.sender.subscribe()
    }
}

impl Default for AssignmentBroadcaster {
    fn default() -> Self {
        Self::new(16)
    }
}

impl ResultPublisher for AssignmentBroadcaster {
    fn publish(&self, result: AssignmentResult) {
        match self.sender.send(result) {
            Ok(subscribers) => debug!(topic = %self.topic, subscribers, "result published"),
            Err(_) => debug!(topic = %self.topic, "no subscribers; result dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_subscriber_receives_result() {
        let broadcaster = AssignmentBroadcaster::new(4);
        let mut a = broadcaster.subscribe();
        let mut b = broadcaster.subscribe();

        broadcaster.publish(AssignmentResult::empty("done"));

        assert_eq!(a.recv().await.unwrap().message, "done");
        assert_eq!(b.recv().await.unwrap().message, "done");
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let broadcaster = AssignmentBroadcaster::default();
        broadcaster.publish(AssignmentResult::empty("nobody listening"));
        assert_eq!(broadcaster.topic(), ASSIGNMENTS_TOPIC);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_results() {
        let broadcaster = AssignmentBroadcaster::new(4);
        broadcaster.publish(AssignmentResult::empty("first"));
        let mut late = broadcaster.subscribe();
        broadcaster.publish(AssignmentResult::empty("second"));
        assert_eq!(late.recv().await.unwrap().message, "second");
    }
}
