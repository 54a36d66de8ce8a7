//! Reputation ledger — per-account counters mutated only as a side effect
//! of confirmed registry transitions.
//!
//! Pure counter storage. Nothing in the core reads a score to gate a
//! decision; the ledger exists for external observation. Profiles are
//! created lazily on first interaction and never removed or reset.

use std::collections::HashMap;

use reclaim_types::{AccountId, UserProfile};

/// Per-account reputation counters.
#[derive(Debug, Default)]
pub struct ReputationLedger {
    profiles: HashMap<AccountId, UserProfile>,
}

impl ReputationLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Profile for an account; the zero profile if it never interacted.
    #[must_use]
    pub fn profile(&self, account: AccountId) -> UserProfile {
        self.profiles.get(&account).copied().unwrap_or_default()
    }

    /// An item was reported: bump the owner's lost counter.
    pub fn record_reported(&mut self, owner: AccountId) {
        let profile = self.profiles.entry(owner).or_default();
        profile.items_lost += 1;
    }

    /// A return was confirmed: credit the finder's find and both parties'
    /// reputation in one step, so the confirm-side mutation lives in one
    /// place.
    pub fn record_rewarded(
        &mut self,
        finder: AccountId,
        owner: AccountId,
        finder_award: u64,
        owner_award: u64,
    ) {
        {
            let profile = self.profiles.entry(finder).or_default();
            profile.items_found += 1;
            profile.reputation += finder_award;
        }
        let profile = self.profiles.entry(owner).or_default();
        profile.reputation += owner_award;
    }

    /// Number of accounts with a profile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no account has interacted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
