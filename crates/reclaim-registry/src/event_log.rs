//! Append-only event log.
//!
//! Entries are ordered by operation completion; one entry per successful
//! transition, appended after every other effect of the operation has been
//! applied. The core never reads the log back — it exists purely for
//! external consumers.

use reclaim_types::LedgerEvent;

/// Ordered, append-only transition log.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an event. There is no removal or mutation path.
    pub fn append(&mut self, event: LedgerEvent) {
        self.entries.push(event);
    }

    /// Iterate entries in append order.
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEvent> {
        self.entries.iter()
    }

    /// The most recently appended entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LedgerEvent> {
        self.entries.last()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
