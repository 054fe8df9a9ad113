//! Program to visual variant classification.

use crate::model::Program;
use crate::notification::NotificationStore;

/// How a cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellVariant {
    #[default]
    Normal,
    /// A reminder is registered for the program.
    ReminderPending,
}

/// Classify `program` against the live reminder state. Not cached.
pub fn classify<N: NotificationStore + ?Sized>(store: &N, program: &Program) -> CellVariant {
    if store.is_reminder_set(program) {
        CellVariant::ReminderPending
    } else {
        CellVariant::Normal
    }
}
