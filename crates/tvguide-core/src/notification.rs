//! Reminder storage seam and an in-memory implementation.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::model::Program;

/// Abstraction over persistent program reminders.
pub trait NotificationStore {
    /// Whether a reminder is registered for `program`.
    fn is_reminder_set(&self, program: &Program) -> bool;

    /// Register a reminder for `program`.
    fn set_reminder(&mut self, program: &Program) -> Result<()>;

    /// Remove any reminder for `program`.
    fn clear_reminder(&mut self, program: &Program) -> Result<()>;
}

/// Reminder key: a program is identified by channel, title and start time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ReminderKey {
    channel_id: String,
    title: String,
    start: NaiveDateTime,
}

impl ReminderKey {
    fn of(program: &Program) -> Self {
        Self {
            channel_id: program.channel.id.clone(),
            title: program.title.clone(),
            start: program.start,
        }
    }
}

/// Process-local reminder store.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    reminders: HashSet<ReminderKey>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered reminders.
    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}

impl NotificationStore for MemoryNotificationStore {
    fn is_reminder_set(&self, program: &Program) -> bool {
        self.reminders.contains(&ReminderKey::of(program))
    }

    fn set_reminder(&mut self, program: &Program) -> Result<()> {
        if self.reminders.insert(ReminderKey::of(program)) {
            log::info!(
                "Reminder set for '{}' on {} at {}",
                program.title,
                program.channel.id,
                program.start
            );
        }
        Ok(())
    }

    fn clear_reminder(&mut self, program: &Program) -> Result<()> {
        if self.reminders.remove(&ReminderKey::of(program)) {
            log::info!("Reminder cleared for '{}'", program.title);
        }
        Ok(())
    }
}
