//! Bounded record of successful calculations.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One completed calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

impl HistoryEntry {
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// FIFO of the most recent calculations. Oldest entries are evicted
/// once `limit` is reached; a limit of 0 records nothing.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        History {
            entries: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    pub fn record(&mut self, expression: impl Into<String>, result: impl Into<String>) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            expression: expression.into(),
            result: result.into(),
        });
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
