//! Deep history storage: which descendant was last active inside an ancestor

use heapless::Vec;

use crate::error::{HsmError, HsmResult};
use crate::hsm::{same_state, StateFn};

/// One recorded (ancestor, descendant) association.
struct HistoryEntry<CTX, E, const N: usize> {
    parent: StateFn<CTX, E, N>,
    child: StateFn<CTX, E, N>,
}

/// Fixed-capacity table mapping ancestor states to the descendant that was
/// last active inside them. Entries are inserted or updated explicitly and
/// never evicted.
pub(crate) struct HistoryTable<CTX, E, const N: usize> {
    entries: Vec<HistoryEntry<CTX, E, N>, N>,
}

impl<CTX, E, const N: usize> HistoryTable<CTX, E, N> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or update the descendant recorded under `parent`.
    ///
    /// Updating an existing entry always succeeds; inserting a new one fails
    /// with [`HsmError::HistoryFull`] once all `N` slots are taken, leaving
    /// the table untouched.
    pub(crate) fn record(
        &mut self,
        parent: StateFn<CTX, E, N>,
        child: StateFn<CTX, E, N>,
    ) -> HsmResult<()> {
        for entry in self.entries.iter_mut() {
            if same_state(entry.parent, parent) {
                entry.child = child;
                return Ok(());
            }
        }
        self.entries
            .push(HistoryEntry { parent, child })
            .map_err(|_| HsmError::HistoryFull)
    }

    /// The descendant last recorded under `parent`, if any.
    pub(crate) fn retrieve(&self, parent: StateFn<CTX, E, N>) -> Option<StateFn<CTX, E, N>> {
        self.entries
            .iter()
            .find(|entry| same_state(entry.parent, parent))
            .map(|entry| entry.child)
    }
}
