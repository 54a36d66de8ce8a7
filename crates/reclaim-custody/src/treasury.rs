//! Outbound value transfer — the treasury port and its in-memory backing.
//!
//! The custodian never credits recipients directly; it goes through a
//! [`TransferPort`]. The port models fund movement as a fallible external
//! call: either the full amount reaches the recipient, or the call returns
//! [`RegistryError::TransferFailed`] and nothing moved.

use std::collections::HashMap;

use reclaim_types::{AccountId, Result};
use rust_decimal::Decimal;

/// The outbound value-transfer mechanism.
///
/// Implementations must be all-or-nothing: a failed transfer leaves the
/// recipient untouched. The registry relies on this to keep whole
/// operations atomic.
pub trait TransferPort {
    /// Move `amount` of custodied value to `recipient`'s control.
    ///
    /// # Errors
    /// Returns [`RegistryError::TransferFailed`] if the transfer did not
    /// succeed.
    ///
    /// [`RegistryError::TransferFailed`]: reclaim_types::RegistryError::TransferFailed
    fn transfer(&mut self, recipient: AccountId, amount: Decimal) -> Result<()>;
}

/// In-memory treasury: credits recipient balances directly.
///
/// The reference [`TransferPort`] for a single-process deployment and for
/// tests. Balances only ever grow — recipients withdraw through whatever
/// sits on top of the registry, not through the custodian.
#[derive(Debug)]
pub struct InMemoryTreasury {
    /// Per-account value paid out of custody.
    balances: HashMap<AccountId, Decimal>,
    /// Running total across all recipients.
    total_paid_out: Decimal,
}

impl InMemoryTreasury {
    /// Create an empty treasury.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            total_paid_out: Decimal::ZERO,
        }
    }

    /// Value this account has received from custody.
    #[must_use]
    pub fn balance(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }

    /// Total value paid out across all recipients.
    #[must_use]
    pub fn total_paid_out(&self) -> Decimal {
        self.total_paid_out
    }
}

impl Default for InMemoryTreasury {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferPort for InMemoryTreasury {
    fn transfer(&mut self, recipient: AccountId, amount: Decimal) -> Result<()> {
        *self.balances.entry(recipient).or_insert(Decimal::ZERO) += amount;
        self.total_paid_out += amount;
        Ok(())
    }
}

/// Treasury with a payout kill-switch. **Test helper** for exercising
/// rollback paths; never use in production.
///
/// The switch is shared: clone it out with [`FaultyTreasury::switch`]
/// before handing the treasury to a registry, then flip it mid-scenario.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct FaultyTreasury {
    /// The backing treasury used while payouts are allowed.
    pub inner: InMemoryTreasury,
    reject: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl FaultyTreasury {
    /// Create a treasury that initially accepts payouts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle for flipping the payout kill-switch.
    #[must_use]
    pub fn switch(&self) -> std::rc::Rc<std::cell::Cell<bool>> {
        std::rc::Rc::clone(&self.reject)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl TransferPort for FaultyTreasury {
    fn transfer(&mut self, recipient: AccountId, amount: Decimal) -> Result<()> {
        if self.reject.get() {
            return Err(reclaim_types::RegistryError::TransferFailed {
                recipient,
                amount,
                reason: "payouts rejected by treasury".to_string(),
            });
        }
        self.inner.transfer(recipient, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reclaim_types::RegistryError;

    #[test]
    fn transfer_credits_recipient() {
        let mut treasury = InMemoryTreasury::new();
        let recipient = AccountId::new();
        treasury.transfer(recipient, Decimal::new(100, 0)).unwrap();
        assert_eq!(treasury.balance(recipient), Decimal::new(100, 0));
        assert_eq!(treasury.total_paid_out(), Decimal::new(100, 0));
    }

    #[test]
    fn transfers_accumulate() {
        let mut treasury = InMemoryTreasury::new();
        let recipient = AccountId::new();
        treasury.transfer(recipient, Decimal::new(40, 0)).unwrap();
        treasury.transfer(recipient, Decimal::new(60, 0)).unwrap();
        assert_eq!(treasury.balance(recipient), Decimal::new(100, 0));
    }

    #[test]
    fn unknown_account_balance_is_zero() {
        let treasury = InMemoryTreasury::new();
        assert_eq!(treasury.balance(AccountId::new()), Decimal::ZERO);
    }

    #[test]
    fn faulty_treasury_rejects_when_switched() {
        let mut treasury = FaultyTreasury::new();
        let recipient = AccountId::new();

        treasury.transfer(recipient, Decimal::new(10, 0)).unwrap();
        assert_eq!(treasury.inner.balance(recipient), Decimal::new(10, 0));

        treasury.switch().set(true);
        let err = treasury.transfer(recipient, Decimal::new(5, 0)).unwrap_err();
        assert!(matches!(err, RegistryError::TransferFailed { .. }));
        // Nothing moved on the failure path.
        assert_eq!(treasury.inner.balance(recipient), Decimal::new(10, 0));
        assert_eq!(treasury.inner.total_paid_out(), Decimal::new(10, 0));
    }
}
