//! Ledger events — the append-only audit trail of the registry.
//!
//! Every successful state transition appends exactly one event. The core
//! never reads these back; they exist for external consumers (indexers,
//! notification fan-out). Each event carries a SHA-256 digest over its
//! canonical payload so consumers can reference and verify entries
//! independently.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, ItemId};

/// The kind of state transition an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// An item was reported and its reward taken into custody.
    ItemReported,
    /// A finder claimed the item; awaiting owner confirmation.
    ItemFound,
    /// The owner confirmed the return; the reward was released.
    RewardClaimed,
    /// The owner withdrew the report; the reward was refunded.
    ItemCancelled,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemReported => write!(f, "ITEM_REPORTED"),
            Self::ItemFound => write!(f, "ITEM_FOUND"),
            Self::RewardClaimed => write!(f, "REWARD_CLAIMED"),
            Self::ItemCancelled => write!(f, "ITEM_CANCELLED"),
        }
    }
}

/// One entry in the registry's append-only event log.
///
/// Entries are ordered by operation completion and carry the accounts a
/// notification consumer needs: the owner always, the finder once one is
/// involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// What kind of transition this event records.
    pub kind: EventKind,
    /// The affected item.
    pub item: ItemId,
    /// The item's owner.
    pub owner: AccountId,
    /// The finder, for found / reward-claimed events.
    pub finder: Option<AccountId>,
    /// The item description, carried on report events.
    pub description: Option<String>,
    /// The monetary amount escrowed or moved, when the transition involves one.
    pub reward: Option<Decimal>,
    /// SHA-256 digest over the canonical payload.
    pub digest: [u8; 32],
    /// When the transition completed.
    pub occurred_at: DateTime<Utc>,
}

impl LedgerEvent {
    /// Build an event stamped with the current time and sealed with its
    /// payload digest.
    #[must_use]
    pub fn new(
        kind: EventKind,
        item: ItemId,
        owner: AccountId,
        finder: Option<AccountId>,
        description: Option<String>,
        reward: Option<Decimal>,
    ) -> Self {
        let mut event = Self {
            kind,
            item,
            owner,
            finder,
            description,
            reward,
            digest: [0u8; 32],
            occurred_at: Utc::now(),
        };
        event.digest = event.payload_digest();
        event
    }

    /// Canonical digest over the event payload.
    ///
    /// Format: `"reclaim:event:v1:" || kind || item || owner || finder? || description? || reward? || millis`
    #[must_use]
    pub fn payload_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"reclaim:event:v1:");
        hasher.update(self.kind.to_string().as_bytes());
        hasher.update(self.item.0.to_le_bytes());
        hasher.update(self.owner.0.as_bytes());
        if let Some(finder) = &self.finder {
            hasher.update(finder.0.as_bytes());
        }
        if let Some(description) = &self.description {
            hasher.update(description.as_bytes());
        }
        if let Some(reward) = &self.reward {
            hasher.update(reward.to_string().as_bytes());
        }
        hasher.update(self.occurred_at.timestamp_millis().to_le_bytes());
        hasher.finalize().into()
    }

    /// Hex rendering of the digest for logs and external references.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event() -> LedgerEvent {
        LedgerEvent::new(
            EventKind::ItemReported,
            ItemId(1),
            AccountId::new(),
            None,
            Some("wallet".to_string()),
            Some(Decimal::new(100, 0)),
        )
    }

    #[test]
    fn event_kind_display() {
        assert_eq!(format!("{}", EventKind::ItemReported), "ITEM_REPORTED");
        assert_eq!(format!("{}", EventKind::ItemFound), "ITEM_FOUND");
        assert_eq!(format!("{}", EventKind::RewardClaimed), "REWARD_CLAIMED");
        assert_eq!(format!("{}", EventKind::ItemCancelled), "ITEM_CANCELLED");
    }

    #[test]
    fn digest_is_sealed_at_construction() {
        let event = make_event();
        assert_eq!(event.digest, event.payload_digest());
        assert_ne!(event.digest, [0u8; 32]);
    }

    #[test]
    fn digest_differs_across_items() {
        let owner = AccountId::new();
        let a = LedgerEvent::new(EventKind::ItemFound, ItemId(1), owner, None, None, None);
        let b = LedgerEvent::new(EventKind::ItemFound, ItemId(2), owner, None, None, None);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn digest_differs_across_kinds() {
        let owner = AccountId::new();
        let a = LedgerEvent::new(EventKind::ItemFound, ItemId(1), owner, None, None, None);
        let mut b = a.clone();
        b.kind = EventKind::RewardClaimed;
        assert_ne!(a.payload_digest(), b.payload_digest());
    }

    #[test]
    fn digest_hex_is_64_chars() {
        let event = make_event();
        let hex = event.digest_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn serde_roundtrip() {
        let event = make_event();
        let json = serde_json::to_string(&event).unwrap();
        let back: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.kind, back.kind);
        assert_eq!(event.item, back.item);
        assert_eq!(event.digest, back.digest);
        assert_eq!(event.reward, back.reward);
    }
}
