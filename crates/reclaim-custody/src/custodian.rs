//! The escrow custodian — holds deposited rewards and performs outbound
//! transfers on release and refund.
//!
//! The custodian is a pure transfer mechanism: it tracks only the total
//! value in custody. Per-item attribution is derived from the item records
//! (`ItemRecord::escrowed_value`), so its correctness depends on status
//! transitions being applied atomically with transfers — the registry's
//! commit discipline guarantees that.
//!
//! Payout ordering: the outbound transfer runs first, against fully staged
//! bookkeeping; custody totals are debited only once the port reports
//! success. A failed transfer leaves the custodian byte-for-byte unchanged.

use reclaim_types::{AccountId, ItemId, RegistryError, Result};
use rust_decimal::Decimal;

use crate::conservation::CustodyConservation;
use crate::treasury::TransferPort;

/// Holds the custody pool and moves value out of it through a
/// [`TransferPort`].
#[derive(Debug)]
pub struct EscrowCustodian {
    /// Value currently held on behalf of active items.
    total_held: Decimal,
    /// Lifetime deposit/payout totals for conservation checks.
    conservation: CustodyConservation,
}

impl EscrowCustodian {
    /// Create an empty custodian.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_held: Decimal::ZERO,
            conservation: CustodyConservation::new(),
        }
    }

    /// Take a deposited reward into custody.
    ///
    /// The value arrives attached to the report call, so acceptance cannot
    /// fail. Called only with the positive amount the reporter deposited.
    pub fn accept(&mut self, item: ItemId, value: Decimal) {
        self.total_held += value;
        self.conservation.record_deposit(value);
        tracing::debug!(
            item = %item,
            value = %value,
            total_held = %self.total_held,
            "reward accepted into custody"
        );
    }

    /// Release the escrowed reward to the finder. Returns the transferred
    /// amount.
    ///
    /// # Errors
    /// - [`RegistryError::TransferFailed`] if the port rejects the payout;
    ///   custody is untouched and the caller must abort its whole operation.
    /// - [`RegistryError::CustodyInvariantViolation`] if the amount exceeds
    ///   the custody total (unreachable through the registry).
    pub fn release<P: TransferPort>(
        &mut self,
        port: &mut P,
        item: ItemId,
        recipient: AccountId,
        amount: Decimal,
    ) -> Result<Decimal> {
        self.pay_out(port, item, recipient, amount, "release")
    }

    /// Refund the escrowed reward to the owner. Symmetric atomicity
    /// contract with [`EscrowCustodian::release`].
    ///
    /// # Errors
    /// Same as [`EscrowCustodian::release`].
    pub fn refund<P: TransferPort>(
        &mut self,
        port: &mut P,
        item: ItemId,
        recipient: AccountId,
        amount: Decimal,
    ) -> Result<Decimal> {
        self.pay_out(port, item, recipient, amount, "refund")
    }

    fn pay_out<P: TransferPort>(
        &mut self,
        port: &mut P,
        item: ItemId,
        recipient: AccountId,
        amount: Decimal,
        op: &'static str,
    ) -> Result<Decimal> {
        if amount > self.total_held {
            return Err(RegistryError::CustodyInvariantViolation {
                reason: format!(
                    "{op} of {amount} for {item} exceeds custody total {}",
                    self.total_held
                ),
            });
        }

        // Transfer first. Nothing here mutates until the port says Ok.
        port.transfer(recipient, amount)?;

        self.total_held -= amount;
        self.conservation.record_payout(amount);
        tracing::debug!(
            op,
            item = %item,
            recipient = %recipient,
            amount = %amount,
            total_held = %self.total_held,
            "custody payout"
        );
        Ok(amount)
    }

    /// Value currently held in custody.
    #[must_use]
    pub fn total_held(&self) -> Decimal {
        self.total_held
    }

    /// Lifetime deposit/payout totals.
    #[must_use]
    pub fn conservation(&self) -> &CustodyConservation {
        &self.conservation
    }

    /// Verify the custody invariant against the sum of active item rewards.
    ///
    /// Checks both equations: deposits − payouts == held, and
    /// held == `active_total`.
    ///
    /// # Errors
    /// Returns [`RegistryError::CustodyInvariantViolation`] on any mismatch.
    pub fn verify(&self, active_total: Decimal) -> Result<()> {
        self.conservation.verify(self.total_held)?;
        if active_total != self.total_held {
            return Err(RegistryError::CustodyInvariantViolation {
                reason: format!(
                    "sum of active rewards {active_total} != custody total {}",
                    self.total_held
                ),
            });
        }
        Ok(())
    }
}

impl Default for EscrowCustodian {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treasury::{FaultyTreasury, InMemoryTreasury};

    #[test]
    fn accept_increases_custody() {
        let mut custodian = EscrowCustodian::new();
        custodian.accept(ItemId(1), Decimal::new(100, 0));
        custodian.accept(ItemId(2), Decimal::new(50, 0));
        assert_eq!(custodian.total_held(), Decimal::new(150, 0));
        assert!(custodian.verify(Decimal::new(150, 0)).is_ok());
    }

    #[test]
    fn release_pays_recipient_and_debits_custody() {
        let mut custodian = EscrowCustodian::new();
        let mut treasury = InMemoryTreasury::new();
        let finder = AccountId::new();

        custodian.accept(ItemId(1), Decimal::new(100, 0));
        let moved = custodian
            .release(&mut treasury, ItemId(1), finder, Decimal::new(100, 0))
            .unwrap();

        assert_eq!(moved, Decimal::new(100, 0));
        assert_eq!(treasury.balance(finder), Decimal::new(100, 0));
        assert_eq!(custodian.total_held(), Decimal::ZERO);
        assert!(custodian.verify(Decimal::ZERO).is_ok());
    }

    #[test]
    fn refund_pays_owner() {
        let mut custodian = EscrowCustodian::new();
        let mut treasury = InMemoryTreasury::new();
        let owner = AccountId::new();

        custodian.accept(ItemId(1), Decimal::new(50, 0));
        custodian
            .refund(&mut treasury, ItemId(1), owner, Decimal::new(50, 0))
            .unwrap();

        assert_eq!(treasury.balance(owner), Decimal::new(50, 0));
        assert_eq!(custodian.total_held(), Decimal::ZERO);
    }

    #[test]
    fn failed_transfer_leaves_custody_untouched() {
        let mut custodian = EscrowCustodian::new();
        let mut treasury = FaultyTreasury::new();
        treasury.switch().set(true);
        let finder = AccountId::new();

        custodian.accept(ItemId(1), Decimal::new(100, 0));
        let err = custodian
            .release(&mut treasury, ItemId(1), finder, Decimal::new(100, 0))
            .unwrap_err();

        assert!(matches!(err, RegistryError::TransferFailed { .. }));
        assert_eq!(custodian.total_held(), Decimal::new(100, 0));
        assert_eq!(treasury.inner.balance(finder), Decimal::ZERO);
        // Conservation still balanced against the held total.
        assert!(custodian.verify(Decimal::new(100, 0)).is_ok());
    }

    #[test]
    fn over_release_is_invariant_violation() {
        let mut custodian = EscrowCustodian::new();
        let mut treasury = InMemoryTreasury::new();
        let finder = AccountId::new();

        custodian.accept(ItemId(1), Decimal::new(10, 0));
        let err = custodian
            .release(&mut treasury, ItemId(1), finder, Decimal::new(11, 0))
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::CustodyInvariantViolation { .. }
        ));
        // The port was never invoked.
        assert_eq!(treasury.balance(finder), Decimal::ZERO);
        assert_eq!(custodian.total_held(), Decimal::new(10, 0));
    }

    #[test]
    fn verify_fails_on_attribution_mismatch() {
        let mut custodian = EscrowCustodian::new();
        custodian.accept(ItemId(1), Decimal::new(100, 0));
        let err = custodian.verify(Decimal::new(90, 0)).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::CustodyInvariantViolation { .. }
        ));
    }
}
