//! # reclaim-custody
//!
//! **Escrow Custodian** for the Reclaim registry: holds deposited reward
//! value and performs outbound transfers on release (to the finder) and
//! refund (to the owner).
//!
//! The custodian keeps no per-item ledger — per-item attribution is derived
//! from the item records. It tracks the single custody pool and enforces
//! the conservation invariant:
//!
//! ```text
//! Σ(deposits) − Σ(payouts) == value held == Σ(active item rewards)
//! ```
//!
//! Outbound transfers go through the [`TransferPort`] abstraction. A
//! transfer either fully succeeds or fails with no effect, which lets the
//! registry stage a whole operation and commit only on success.

pub mod conservation;
pub mod custodian;
pub mod treasury;

pub use conservation::CustodyConservation;
pub use custodian::EscrowCustodian;
#[cfg(any(test, feature = "test-helpers"))]
pub use treasury::FaultyTreasury;
pub use treasury::{InMemoryTreasury, TransferPort};
