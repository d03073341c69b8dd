//! The two append-only logs: operator alerts and the decision trail.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    Solar,
    Energy,
    Security,
    Cleanliness,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertLogEntry {
    pub id:        EntityId,
    pub timestamp: String,
    pub category:  AlertCategory,
    pub message:   String,
    pub severity:  Severity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransparencyKind {
    Analysis,
    Decision,
    Action,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransparencyEvent {
    pub id:         EntityId,
    pub timestamp:  String,
    pub module:     String,
    pub kind:       TransparencyKind,
    pub detail:     String,
    /// In [0, 1].
    pub confidence: f64,
}

/// Newest-first log. Entries are only ever pushed to the front; when a
/// capacity is set the oldest entries fall off the back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewestFirst<T> {
    entries:  VecDeque<T>,
    capacity: Option<usize>,
}

impl<T> NewestFirst<T> {
    /// Build from entries already ordered newest-first.
    pub fn from_newest_first(entries: Vec<T>, capacity: Option<usize>) -> Self {
        let mut log = Self { entries: entries.into(), capacity };
        log.evict();
        log
    }

    pub fn prepend(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.evict();
    }

    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
        self.evict();
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn newest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    fn evict(&mut self) {
        if let Some(cap) = self.capacity {
            self.entries.truncate(cap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_log_drops_oldest() {
        let mut log = NewestFirst::from_newest_first(vec![], Some(3));
        for i in 0..5 {
            log.prepend(i);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
    }

    #[test]
    fn unbounded_log_keeps_everything() {
        let mut log = NewestFirst::from_newest_first(vec![], None);
        for i in 0..100 {
            log.prepend(i);
        }
        assert_eq!(log.len(), 100);
        assert_eq!(log.newest(), Some(&99));
        assert_eq!(log.oldest(), Some(&0));
    }

    #[test]
    fn seeding_past_capacity_truncates() {
        let log = NewestFirst::from_newest_first(vec![9, 8, 7, 6], Some(2));
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![9, 8]);
    }

    #[test]
    fn lowering_capacity_evicts_oldest() {
        let mut log = NewestFirst::from_newest_first(vec![5, 4, 3, 2, 1], None);
        log.set_capacity(Some(3));
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![5, 4, 3]);
        assert_eq!(log.capacity(), Some(3));
    }
}
