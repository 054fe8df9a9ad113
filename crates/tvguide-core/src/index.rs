//! Cell identity to program mapping, rebuilt wholesale on every layout pass.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{GuideError, Result};
use crate::model::{CellId, Program};

/// Maps the host's cell identities to the programs they show.
///
/// Registration order is kept: navigation breaks ties by first found, so
/// iteration must be deterministic.
#[derive(Debug, Default)]
pub struct ProgramCellIndex {
    entries: Vec<(CellId, Rc<Program>)>,
    by_id: HashMap<CellId, usize>,
}

impl ProgramCellIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous mapping and register `entries` in order.
    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (CellId, Rc<Program>)>,
    {
        self.entries.clear();
        self.by_id.clear();
        for (id, program) in entries {
            if let Some(&slot) = self.by_id.get(&id) {
                log::warn!("Cell {id} registered twice in one layout pass");
                self.entries[slot].1 = program;
                continue;
            }
            self.by_id.insert(id, self.entries.len());
            self.entries.push((id, program));
        }
    }

    /// The program shown by `id`. A miss means the caller holds a stale id.
    pub fn program_for(&self, id: CellId) -> Result<&Rc<Program>> {
        self.by_id
            .get(&id)
            .map(|&slot| &self.entries[slot].1)
            .ok_or(GuideError::NotFound(id))
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Cell identities in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// First registered cell, used for automatic focus.
    pub fn first(&self) -> Option<CellId> {
        self.entries.first().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and hand back the identities that were registered.
    pub fn drain_ids(&mut self) -> Vec<CellId> {
        self.by_id.clear();
        self.entries.drain(..).map(|(id, _)| id).collect()
    }
}
