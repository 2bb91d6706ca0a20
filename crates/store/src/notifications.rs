use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{LocalNotification, NewNotification};

/// Number of most-recent notifications kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded, newest-first list of local notifications.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: VecDeque<LocalNotification>,
    capacity: usize,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationLog {
    /// A capacity of zero is raised to one so the newest entry always survives.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuilds a log from persisted entries, keeping only the first `capacity`.
    pub fn from_entries(entries: Vec<LocalNotification>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries: VecDeque<_> = entries.into();
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Prepends an unread notification, evicting the oldest entries past capacity.
    pub fn add(&mut self, notification: NewNotification, timestamp: DateTime<Utc>) -> &LocalNotification {
        self.entries.push_front(LocalNotification {
            id: Uuid::new_v4(),
            timestamp,
            read: false,
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
        });
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Returns false when no notification has this id.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(entry) => {
                entry.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    /// Returns false when no notification has this id.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalNotification> {
        self.entries.iter()
    }

    pub fn list(&self) -> Vec<LocalNotification> {
        self.entries.iter().cloned().collect()
    }
}
