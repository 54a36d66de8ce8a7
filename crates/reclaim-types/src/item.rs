//! The item record and its lifecycle state machine.
//!
//! ## State Machine
//!
//! ```text
//!   ┌──────┐  claim_found   ┌──────────────────────┐  confirm_return  ┌──────────┐
//!   │ OPEN ├───────────────▶│ PENDING_CONFIRMATION ├─────────────────▶│ REWARDED │
//!   └──┬───┘                └──────────────────────┘                  └──────────┘
//!      │ cancel_item
//!      ▼
//!   ┌───────────┐
//!   │ CANCELLED │
//!   └───────────┘
//! ```
//!
//! `REWARDED` and `CANCELLED` are terminal. There is no path from
//! `PENDING_CONFIRMATION` back to `OPEN`: once a finder is recorded, the
//! only remaining transition is the owner's confirmation.
//!
//! While an item is in `OPEN` or `PENDING_CONFIRMATION` it is *active*:
//! the custodian holds exactly `reward` on its behalf. The custodian keeps
//! no per-item ledger — [`ItemRecord::escrowed_value`] is the authoritative
//! per-item attribution.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, ItemId, RegistryError, Result};

/// Lifecycle status of a reported item.
///
/// Transitions are **monotonic** (never go backwards):
/// - `Open → PendingConfirmation` (a finder claimed the item)
/// - `Open → Cancelled` (the owner withdrew the report)
/// - `PendingConfirmation → Rewarded` (the owner confirmed the return)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Reported and waiting for a finder. Reward is in custody.
    Open,
    /// A finder claimed the item; awaiting owner confirmation. Reward is
    /// still in custody.
    PendingConfirmation,
    /// Return confirmed, reward released to the finder. **Terminal.**
    Rewarded,
    /// Report withdrawn, reward refunded to the owner. **Terminal.**
    Cancelled,
}

impl ItemStatus {
    /// Whether escrowed value is still attributable to an item in this status.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Open | Self::PendingConfirmation)
    }

    /// Terminal statuses admit no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rewarded | Self::Cancelled)
    }

    /// Can an item in this status transition to `target`?
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::PendingConfirmation | Self::Cancelled)
                | (Self::PendingConfirmation, Self::Rewarded)
        )
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::PendingConfirmation => write!(f, "PENDING_CONFIRMATION"),
            Self::Rewarded => write!(f, "REWARDED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A lost-item report with its escrowed reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Sequential identifier assigned by the registry.
    pub id: ItemId,
    /// The account that filed the report and deposited the reward.
    pub owner: AccountId,
    /// Free-text description of the lost item.
    pub description: String,
    /// Free-text last-known location.
    pub location: String,
    /// Reward deposited at report time. Zeroed when the item is cancelled.
    pub reward: Decimal,
    /// Current lifecycle status.
    pub status: ItemStatus,
    /// The account that claimed the find. Set at most once.
    pub finder: Option<AccountId>,
    /// When the report was filed.
    pub reported_at: DateTime<Utc>,
}

impl ItemRecord {
    /// Create a fresh `OPEN` record. The caller validates inputs first.
    #[must_use]
    pub fn new(
        id: ItemId,
        owner: AccountId,
        description: String,
        location: String,
        reward: Decimal,
    ) -> Self {
        Self {
            id,
            owner,
            description,
            location,
            reward,
            status: ItemStatus::Open,
            finder: None,
            reported_at: Utc::now(),
        }
    }

    /// Whether escrowed value is still attributable to this item.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Custodied value attributable to this item: the full reward while
    /// active, zero once terminal.
    #[must_use]
    pub fn escrowed_value(&self) -> Decimal {
        if self.is_active() {
            self.reward
        } else {
            Decimal::ZERO
        }
    }

    /// Record the finder and transition `OPEN → PENDING_CONFIRMATION`.
    ///
    /// # Errors
    /// Returns [`RegistryError::WrongStatus`] unless the item is `OPEN`.
    pub fn mark_found(&mut self, finder: AccountId) -> Result<()> {
        if !self.status.can_transition_to(ItemStatus::PendingConfirmation) {
            return Err(RegistryError::WrongStatus {
                item: self.id,
                status: self.status,
                required: ItemStatus::Open,
            });
        }
        self.finder = Some(finder);
        self.status = ItemStatus::PendingConfirmation;
        Ok(())
    }

    /// Transition `PENDING_CONFIRMATION → REWARDED`.
    ///
    /// # Errors
    /// Returns [`RegistryError::WrongStatus`] unless the item is
    /// `PENDING_CONFIRMATION`.
    pub fn mark_rewarded(&mut self) -> Result<()> {
        if !self.status.can_transition_to(ItemStatus::Rewarded) {
            return Err(RegistryError::WrongStatus {
                item: self.id,
                status: self.status,
                required: ItemStatus::PendingConfirmation,
            });
        }
        self.status = ItemStatus::Rewarded;
        Ok(())
    }

    /// Transition `OPEN → CANCELLED` and zero the reward. The caller
    /// captures the refund amount before invoking this.
    ///
    /// # Errors
    /// Returns [`RegistryError::WrongStatus`] unless the item is `OPEN`.
    pub fn mark_cancelled(&mut self) -> Result<()> {
        if !self.status.can_transition_to(ItemStatus::Cancelled) {
            return Err(RegistryError::WrongStatus {
                item: self.id,
                status: self.status,
                required: ItemStatus::Open,
            });
        }
        self.status = ItemStatus::Cancelled;
        self.reward = Decimal::ZERO;
        Ok(())
    }
}

/// Read-only view of an item for external queries.
///
/// The lifecycle booleans are derived from [`ItemStatus`] — they are never
/// stored, so they cannot diverge from the status enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDetails {
    pub owner: AccountId,
    pub description: String,
    pub location: String,
    pub reward: Decimal,
    /// A finder has been recorded (`PENDING_CONFIRMATION` or `REWARDED`).
    pub is_found: bool,
    /// The reward has been released (`REWARDED`).
    pub is_claimed: bool,
    pub finder: Option<AccountId>,
    pub status: ItemStatus,
    pub reported_at: DateTime<Utc>,
}

impl From<&ItemRecord> for ItemDetails {
    fn from(record: &ItemRecord) -> Self {
        Self {
            owner: record.owner,
            description: record.description.clone(),
            location: record.location.clone(),
            reward: record.reward,
            is_found: matches!(
                record.status,
                ItemStatus::PendingConfirmation | ItemStatus::Rewarded
            ),
            is_claimed: record.status == ItemStatus::Rewarded,
            finder: record.finder,
            status: record.status,
            reported_at: record.reported_at,
        }
    }
}

/// Dummy record for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl ItemRecord {
    /// Create a dummy `OPEN` record for unit tests.
    pub fn dummy(id: ItemId, owner: AccountId, reward: Decimal) -> Self {
        Self::new(
            id,
            owner,
            "black leather wallet".to_string(),
            "riverside park".to_string(),
            reward,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> ItemRecord {
        ItemRecord::dummy(ItemId(1), AccountId::new(), Decimal::new(100, 0))
    }

    #[test]
    fn status_transitions_valid() {
        assert!(ItemStatus::Open.can_transition_to(ItemStatus::PendingConfirmation));
        assert!(ItemStatus::Open.can_transition_to(ItemStatus::Cancelled));
        assert!(ItemStatus::PendingConfirmation.can_transition_to(ItemStatus::Rewarded));
    }

    #[test]
    fn status_transitions_invalid() {
        assert!(!ItemStatus::PendingConfirmation.can_transition_to(ItemStatus::Open));
        assert!(!ItemStatus::PendingConfirmation.can_transition_to(ItemStatus::Cancelled));
        assert!(!ItemStatus::Rewarded.can_transition_to(ItemStatus::Open));
        assert!(!ItemStatus::Rewarded.can_transition_to(ItemStatus::Cancelled));
        assert!(!ItemStatus::Cancelled.can_transition_to(ItemStatus::PendingConfirmation));
        assert!(!ItemStatus::Cancelled.can_transition_to(ItemStatus::Rewarded));
    }

    #[test]
    fn active_and_terminal_partition() {
        assert!(ItemStatus::Open.is_active());
        assert!(ItemStatus::PendingConfirmation.is_active());
        assert!(ItemStatus::Rewarded.is_terminal());
        assert!(ItemStatus::Cancelled.is_terminal());
        assert!(!ItemStatus::Rewarded.is_active());
        assert!(!ItemStatus::Open.is_terminal());
    }

    #[test]
    fn new_record_is_open_with_no_finder() {
        let record = make_record();
        assert_eq!(record.status, ItemStatus::Open);
        assert!(record.finder.is_none());
        assert!(record.is_active());
    }

    #[test]
    fn mark_found_records_finder() {
        let mut record = make_record();
        let finder = AccountId::new();
        record.mark_found(finder).unwrap();
        assert_eq!(record.status, ItemStatus::PendingConfirmation);
        assert_eq!(record.finder, Some(finder));
        assert!(record.is_active());
    }

    #[test]
    fn double_claim_blocked() {
        let mut record = make_record();
        record.mark_found(AccountId::new()).unwrap();
        let err = record.mark_found(AccountId::new()).unwrap_err();
        assert!(matches!(err, RegistryError::WrongStatus { .. }));
    }

    #[test]
    fn mark_rewarded_requires_pending() {
        let mut record = make_record();
        let err = record.mark_rewarded().unwrap_err();
        assert!(matches!(err, RegistryError::WrongStatus { .. }));

        record.mark_found(AccountId::new()).unwrap();
        record.mark_rewarded().unwrap();
        assert_eq!(record.status, ItemStatus::Rewarded);
    }

    #[test]
    fn rewarded_is_terminal() {
        let mut record = make_record();
        record.mark_found(AccountId::new()).unwrap();
        record.mark_rewarded().unwrap();
        assert!(record.mark_rewarded().is_err(), "REWARDED → REWARDED must fail");
        assert!(record.mark_cancelled().is_err(), "REWARDED → CANCELLED must fail");
    }

    #[test]
    fn cancel_zeroes_reward() {
        let mut record = make_record();
        record.mark_cancelled().unwrap();
        assert_eq!(record.status, ItemStatus::Cancelled);
        assert_eq!(record.reward, Decimal::ZERO);
    }

    #[test]
    fn cancel_after_claim_blocked() {
        let mut record = make_record();
        record.mark_found(AccountId::new()).unwrap();
        let err = record.mark_cancelled().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::WrongStatus {
                required: ItemStatus::Open,
                ..
            }
        ));
    }

    #[test]
    fn escrowed_value_follows_status() {
        let mut record = make_record();
        assert_eq!(record.escrowed_value(), Decimal::new(100, 0));

        record.mark_found(AccountId::new()).unwrap();
        assert_eq!(record.escrowed_value(), Decimal::new(100, 0));

        record.mark_rewarded().unwrap();
        assert_eq!(record.escrowed_value(), Decimal::ZERO);
    }

    #[test]
    fn details_derive_booleans_from_status() {
        let mut record = make_record();
        let details = ItemDetails::from(&record);
        assert!(!details.is_found);
        assert!(!details.is_claimed);

        let finder = AccountId::new();
        record.mark_found(finder).unwrap();
        let details = ItemDetails::from(&record);
        assert!(details.is_found);
        assert!(!details.is_claimed);
        assert_eq!(details.finder, Some(finder));

        record.mark_rewarded().unwrap();
        let details = ItemDetails::from(&record);
        assert!(details.is_found);
        assert!(details.is_claimed);
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", ItemStatus::Open), "OPEN");
        assert_eq!(
            format!("{}", ItemStatus::PendingConfirmation),
            "PENDING_CONFIRMATION"
        );
        assert_eq!(format!("{}", ItemStatus::Rewarded), "REWARDED");
        assert_eq!(format!("{}", ItemStatus::Cancelled), "CANCELLED");
    }

    #[test]
    fn serde_roundtrip() {
        let record = make_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: ItemRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.id, back.id);
        assert_eq!(record.owner, back.owner);
        assert_eq!(record.reward, back.reward);
        assert_eq!(record.status, back.status);
    }
}
