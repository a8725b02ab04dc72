//! Player-facing message log.
use std::collections::VecDeque;

use delve_core::{MessageSink, Tick};

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    /// Scheduler clock when the message was posted.
    pub posted_at: Tick,
}

/// Circular buffer of messages displayed to the player.
///
/// Every message is also emitted as an `info` tracing event, so the log file
/// keeps what the buffer drops.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
    clock: Tick,
    posted: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
            clock: Tick::ZERO,
            posted: 0,
        }
    }

    /// Sets the time stamped on messages posted from now on.
    pub fn set_clock(&mut self, clock: Tick) {
        self.clock = clock;
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        let text = message.into();
        tracing::info!(target: "delve::messages", clock = self.clock.0, "{text}");
        self.posted += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(MessageEntry {
            text,
            posted_at: self.clock,
        });
    }

    /// Most recent entries first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages posted over the log's lifetime, including dropped ones.
    pub fn posted(&self) -> usize {
        self.posted
    }
}

impl MessageSink for MessageLog {
    fn post_message(&mut self, text: String) {
        self.push_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let mut log = MessageLog::new(2);
        log.push_text("one");
        log.set_clock(Tick(4));
        log.post_message("two".to_string());
        log.push_text("three");

        let texts: Vec<&str> = log.iter().map(|entry| entry.text.as_str()).collect();
        assert_eq!(texts, ["two", "three"]);
        assert_eq!(log.recent(1).next().unwrap().posted_at, Tick(4));
    }

    #[test]
    fn zero_capacity_still_keeps_the_latest() {
        let mut log = MessageLog::new(0);
        log.push_text("a");
        log.push_text("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.posted(), 2);
        assert_eq!(log.iter().next().unwrap().text, "b");
    }
}
