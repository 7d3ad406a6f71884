//! In-process log bus backed by a tokio broadcast channel.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use minaret_domain::log::{LogEntry, LogLevel};

use crate::ports::LogSink;

/// Default number of entries kept for late subscribers.
pub const DEFAULT_HISTORY_LEN: usize = 200;

/// In-process log sink using a tokio [`broadcast`] channel.
///
/// Every entry is mirrored to `tracing`, kept in a bounded history and sent
/// to live subscribers. Emitting succeeds even when there are no active
/// subscribers.
pub struct InProcessLogBus {
    sender: broadcast::Sender<LogEntry>,
    history: Mutex<VecDeque<LogEntry>>,
    history_len: usize,
}

impl InProcessLogBus {
    /// Create a bus with the given channel capacity and history length.
    #[must_use]
    pub fn new(capacity: usize, history_len: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            history: Mutex::new(VecDeque::with_capacity(history_len)),
            history_len,
        }
    }

    /// Subscribe to entries emitted *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }

    /// The most recent entries, oldest first.
    #[must_use]
    pub fn recent(&self) -> Vec<LogEntry> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl Default for InProcessLogBus {
    fn default() -> Self {
        Self::new(256, DEFAULT_HISTORY_LEN)
    }
}

impl LogSink for InProcessLogBus {
    fn emit(&self, entry: LogEntry) {
        match entry.level {
            LogLevel::Info => tracing::info!(id = %entry.id, "{}", entry.message),
            LogLevel::Warn => tracing::warn!(id = %entry.id, "{}", entry.message),
            LogLevel::Error => tracing::error!(id = %entry.id, "{}", entry.message),
        }

        // History and broadcast share one critical section so subscribers
        // and `recent` see the same order.
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if self.history_len > 0 {
            if history.len() == self.history_len {
                history.pop_front();
            }
            history.push_back(entry.clone());
        }
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_entry_to_subscriber() {
        let bus = InProcessLogBus::new(16, 8);
        let mut rx = bus.subscribe();

        let entry = LogEntry::info("Scheduler started.");
        let entry_id = entry.id;
        bus.emit(entry);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, entry_id);
    }

    #[tokio::test]
    async fn should_preserve_order_from_one_emitter() {
        let bus = InProcessLogBus::new(16, 8);
        let mut rx = bus.subscribe();

        bus.info("one");
        bus.warn("two");
        bus.error("three");

        assert_eq!(rx.recv().await.unwrap().message, "one");
        assert_eq!(rx.recv().await.unwrap().message, "two");
        assert_eq!(rx.recv().await.unwrap().message, "three");
    }

    #[test]
    fn should_succeed_when_no_subscribers() {
        let bus = InProcessLogBus::new(16, 8);
        bus.info("nobody listening");
        assert_eq!(bus.recent().len(), 1);
    }

    #[test]
    fn should_keep_only_latest_history() {
        let bus = InProcessLogBus::new(16, 2);
        bus.info("a");
        bus.info("b");
        bus.info("c");

        let messages: Vec<_> = bus.recent().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn should_keep_no_history_when_disabled() {
        let bus = InProcessLogBus::new(16, 0);
        bus.info("a");
        assert!(bus.recent().is_empty());
    }
}
