//! The registry — owns the item records and the identifier counter, and
//! orchestrates every mutating operation.
//!
//! ## Atomicity
//!
//! Each operation is one indivisible unit, built from three phases:
//!
//! 1. **Guard phase** — read-only precondition checks; a failure aborts
//!    with no state touched.
//! 2. **Transfer phase** — the outbound fund movement, when the operation
//!    has one. This is the only fallible effect; a failure aborts the call
//!    and the guard-phase reads were the only thing that happened.
//! 3. **Commit phase** — record, reputation, and event-log writes. These
//!    are infallible in-memory mutations, so once the transfer succeeded
//!    the whole operation applies.
//!
//! ## Serialization
//!
//! The registry is single shared mutable state. Every operation takes
//! `&mut self`, so the borrow checker enforces the one-writer-at-a-time
//! model within a process; wrapping the registry in a `Mutex` reproduces
//! the same guarantee across threads.

use std::collections::BTreeMap;

use reclaim_custody::{EscrowCustodian, TransferPort};
use reclaim_types::{
    AccountId, EventKind, ItemDetails, ItemId, ItemRecord, ItemStatus, LedgerEvent,
    RegistryConfig, RegistryError, Result, UserProfile,
};
use rust_decimal::Decimal;

use crate::event_log::EventLog;
use crate::guards;
use crate::reputation::ReputationLedger;

/// The lost & found registry, generic over the outbound transfer port.
pub struct Registry<P: TransferPort> {
    config: RegistryConfig,
    /// Every record ever created, keyed by id. Never shrinks — terminal
    /// records stay queryable.
    records: BTreeMap<ItemId, ItemRecord>,
    /// The next identifier to assign. Strictly monotonic from 1; ids are
    /// never reused, including after cancellation.
    next_id: ItemId,
    custodian: EscrowCustodian,
    reputation: ReputationLedger,
    events: EventLog,
    treasury: P,
}

impl<P: TransferPort> Registry<P> {
    /// Create an empty registry on top of the given transfer port.
    #[must_use]
    pub fn new(config: RegistryConfig, treasury: P) -> Self {
        Self {
            config,
            records: BTreeMap::new(),
            next_id: ItemId::first(),
            custodian: EscrowCustodian::new(),
            reputation: ReputationLedger::new(),
            events: EventLog::new(),
            treasury,
        }
    }

    // =====================================================================
    // Mutating operations
    // =====================================================================

    /// File a lost-item report. The `reward` is the value the caller
    /// deposited alongside the call; it goes straight into custody.
    ///
    /// # Errors
    /// - [`RegistryError::InvalidInput`] if `description` is empty
    /// - [`RegistryError::NonPositiveReward`] if `reward` ≤ 0
    pub fn report_item(
        &mut self,
        caller: AccountId,
        description: &str,
        location: &str,
        reward: Decimal,
    ) -> Result<ItemId> {
        guards::ensure_nonempty(description, "description")?;
        guards::ensure_positive_reward(reward)?;

        let id = self.allocate_id();
        let record = ItemRecord::new(
            id,
            caller,
            description.to_string(),
            location.to_string(),
            reward,
        );
        self.records.insert(id, record);

        self.reputation.record_reported(caller);
        self.custodian.accept(id, reward);
        self.events.append(LedgerEvent::new(
            EventKind::ItemReported,
            id,
            caller,
            None,
            Some(description.to_string()),
            Some(reward),
        ));

        tracing::info!(
            item = %id,
            owner = %caller.short(),
            reward = %reward,
            "item reported"
        );
        Ok(id)
    }

    /// Claim to have found an item. Records the finder and moves the item
    /// to `PENDING_CONFIRMATION`. No funds move at this step.
    ///
    /// # Errors
    /// - [`RegistryError::ItemNotFound`] for an unassigned id
    /// - [`RegistryError::WrongStatus`] unless the item is `OPEN`
    /// - [`RegistryError::OwnerCannotClaim`] if the caller owns the item
    /// - [`RegistryError::InvalidInput`] if `proof` is empty
    pub fn claim_found(&mut self, caller: AccountId, item_id: ItemId, proof: &str) -> Result<()> {
        let record = self.record_mut(item_id)?;
        guards::ensure_status(record, ItemStatus::Open)?;
        guards::ensure_not_owner(record, caller)?;
        guards::ensure_nonempty(proof, "proof")?;

        record.mark_found(caller)?;
        let owner = record.owner;

        self.events.append(LedgerEvent::new(
            EventKind::ItemFound,
            item_id,
            owner,
            Some(caller),
            None,
            None,
        ));

        tracing::info!(
            item = %item_id,
            finder = %caller.short(),
            "item claimed found, awaiting confirmation"
        );
        Ok(())
    }

    /// Confirm the return of a found item and release the escrowed reward
    /// to the finder, crediting both parties' reputation — all as one
    /// atomic unit. If the release transfer fails, none of the bookkeeping
    /// takes effect and the item stays `PENDING_CONFIRMATION`.
    ///
    /// # Errors
    /// - [`RegistryError::ItemNotFound`] for an unassigned id
    /// - [`RegistryError::NotOwner`] unless the caller owns the item
    /// - [`RegistryError::WrongStatus`] unless the item is `PENDING_CONFIRMATION`
    /// - [`RegistryError::NoFinder`] if no finder is recorded (unreachable
    ///   through the state machine)
    /// - [`RegistryError::TransferFailed`] if the payout did not succeed
    pub fn confirm_return(&mut self, caller: AccountId, item_id: ItemId) -> Result<()> {
        // Guard phase.
        let record = self.record(item_id)?;
        guards::ensure_owner(record, caller)?;
        guards::ensure_status(record, ItemStatus::PendingConfirmation)?;
        let finder = guards::ensure_finder_recorded(record)?;
        let reward = record.reward;

        // Transfer phase — the only fallible effect.
        self.custodian
            .release(&mut self.treasury, item_id, finder, reward)?;

        // Commit phase.
        let record = self.record_mut(item_id)?;
        record.mark_rewarded()?;
        self.reputation.record_rewarded(
            finder,
            caller,
            self.config.finder_reputation_award,
            self.config.owner_confirm_award,
        );
        self.events.append(LedgerEvent::new(
            EventKind::RewardClaimed,
            item_id,
            caller,
            Some(finder),
            None,
            Some(reward),
        ));

        tracing::info!(
            item = %item_id,
            finder = %finder.short(),
            reward = %reward,
            "return confirmed, reward released"
        );
        Ok(())
    }

    /// Withdraw an open report and refund the full reward to the owner.
    /// If the refund transfer fails, the item remains `OPEN` and nothing
    /// changes.
    ///
    /// # Errors
    /// - [`RegistryError::ItemNotFound`] for an unassigned id
    /// - [`RegistryError::NotOwner`] unless the caller owns the item
    /// - [`RegistryError::WrongStatus`] unless the item is `OPEN`
    /// - [`RegistryError::TransferFailed`] if the refund did not succeed
    pub fn cancel_item(&mut self, caller: AccountId, item_id: ItemId) -> Result<()> {
        // Guard phase.
        let record = self.record(item_id)?;
        guards::ensure_owner(record, caller)?;
        guards::ensure_status(record, ItemStatus::Open)?;
        let reward = record.reward;

        // Transfer phase.
        self.custodian
            .refund(&mut self.treasury, item_id, caller, reward)?;

        // Commit phase. `mark_cancelled` zeroes the record's reward.
        let record = self.record_mut(item_id)?;
        record.mark_cancelled()?;
        self.events.append(LedgerEvent::new(
            EventKind::ItemCancelled,
            item_id,
            caller,
            None,
            None,
            None,
        ));

        tracing::info!(
            item = %item_id,
            owner = %caller.short(),
            refund = %reward,
            "item cancelled, reward refunded"
        );
        Ok(())
    }

    // =====================================================================
    // Read-only queries
    // =====================================================================

    /// Full record for an item.
    ///
    /// # Errors
    /// Returns [`RegistryError::ItemNotFound`] for an unassigned id.
    pub fn item(&self, item_id: ItemId) -> Result<&ItemRecord> {
        self.record(item_id)
    }

    /// Query view of an item with derived lifecycle booleans.
    ///
    /// # Errors
    /// Returns [`RegistryError::ItemNotFound`] for an unassigned id.
    pub fn item_details(&self, item_id: ItemId) -> Result<ItemDetails> {
        Ok(ItemDetails::from(self.record(item_id)?))
    }

    /// Reputation counters for an account; the zero profile if it never
    /// interacted.
    #[must_use]
    pub fn user_reputation(&self, account: AccountId) -> UserProfile {
        self.reputation.profile(account)
    }

    /// Presence probe: whether escrowed value is still attributable to
    /// this id. `false` for ids never assigned.
    #[must_use]
    pub fn is_item_active(&self, item_id: ItemId) -> bool {
        self.records.get(&item_id).is_some_and(ItemRecord::is_active)
    }

    /// Number of records ever created.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.records.len()
    }

    /// Sum of escrowed value attributable to active items.
    #[must_use]
    pub fn active_reward_total(&self) -> Decimal {
        self.records.values().map(ItemRecord::escrowed_value).sum()
    }

    /// Check the custody invariant: sum of active rewards == value held.
    ///
    /// # Errors
    /// Returns [`RegistryError::CustodyInvariantViolation`] on mismatch.
    pub fn verify_custody(&self) -> Result<()> {
        self.custodian.verify(self.active_reward_total())
    }

    /// The append-only event log, for external observers.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The escrow custodian, for external observers.
    #[must_use]
    pub fn custodian(&self) -> &EscrowCustodian {
        &self.custodian
    }

    /// The transfer port backing this registry.
    #[must_use]
    pub fn treasury(&self) -> &P {
        &self.treasury
    }

    /// The configuration this registry runs with.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // =====================================================================
    // Internal
    // =====================================================================

    fn allocate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn record(&self, item_id: ItemId) -> Result<&ItemRecord> {
        self.records
            .get(&item_id)
            .ok_or(RegistryError::ItemNotFound(item_id))
    }

    fn record_mut(&mut self, item_id: ItemId) -> Result<&mut ItemRecord> {
        self.records
            .get_mut(&item_id)
            .ok_or(RegistryError::ItemNotFound(item_id))
    }
}
