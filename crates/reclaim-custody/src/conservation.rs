//! Custody conservation invariant checker.
//!
//! Mathematical invariant enforced after every mutating operation:
//! ```text
//! Σ(deposits) − Σ(payouts) == value currently held in custody
//! ```
//!
//! If this invariant ever breaks, the registry halts the operation with a
//! critical alert. This is the ultimate safety net — a broken conservation
//! equation means value was minted or destroyed inside the custodian.

use reclaim_types::{RegistryError, Result};
use rust_decimal::Decimal;

/// Tracks lifetime deposit and payout totals for the custody pool and
/// validates conservation on demand.
#[derive(Debug)]
pub struct CustodyConservation {
    /// Total value deposited into custody since genesis.
    deposits: Decimal,
    /// Total value paid out of custody since genesis (releases + refunds).
    payouts: Decimal,
}

impl CustodyConservation {
    /// Create a new conservation tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: Decimal::ZERO,
            payouts: Decimal::ZERO,
        }
    }

    /// Record a deposit into custody.
    pub fn record_deposit(&mut self, amount: Decimal) {
        self.deposits += amount;
    }

    /// Record a payout from custody.
    pub fn record_payout(&mut self, amount: Decimal) {
        self.payouts += amount;
    }

    /// Expected custody total: deposits − payouts.
    #[must_use]
    pub fn expected_custody(&self) -> Decimal {
        self.deposits - self.payouts
    }

    /// Total deposits since genesis.
    #[must_use]
    pub fn total_deposits(&self) -> Decimal {
        self.deposits
    }

    /// Total payouts since genesis.
    #[must_use]
    pub fn total_payouts(&self) -> Decimal {
        self.payouts
    }

    /// Verify that the actual custody total matches deposits − payouts.
    ///
    /// # Errors
    /// Returns [`RegistryError::CustodyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual: Decimal) -> Result<()> {
        let expected = self.expected_custody();
        if actual != expected {
            return Err(RegistryError::CustodyInvariantViolation {
                reason: format!(
                    "actual custody {actual} != expected {expected} \
                     (deposits={}, payouts={})",
                    self.deposits, self.payouts,
                ),
            });
        }
        Ok(())
    }
}

impl Default for CustodyConservation {
    fn default() -> Self {
        Self::new()
    }
}
