//! Per-account reputation counters.
//!
//! Profiles are created lazily on first interaction, never destroyed,
//! never reset. Nothing in the core reads them to gate a decision — they
//! exist for external observation only.

use serde::{Deserialize, Serialize};

/// Reputation counters for one account. Counters only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Items this account has reported lost.
    pub items_lost: u64,
    /// Items this account found whose return was confirmed.
    pub items_found: u64,
    /// Informational score, monotonically non-decreasing.
    pub reputation: u64,
}

impl UserProfile {
    /// Whether this profile has recorded no activity at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.items_lost == 0 && self.items_found == 0 && self.reputation == 0
    }
}
