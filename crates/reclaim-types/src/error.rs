//! Error types for the Reclaim registry.
//!
//! All errors use the `RC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Item / lifecycle errors
//! - 2xx: Authorization errors
//! - 3xx: Input validation errors
//! - 4xx: Transfer errors
//! - 5xx: Custody invariant errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, ItemId, ItemStatus};

/// Central error enum for all registry operations.
///
/// Guards run before any state mutation, so every error except
/// [`RegistryError::TransferFailed`] is raised with the ledger untouched.
/// A failed transfer aborts its whole operation — callers never observe a
/// partially applied transition.
#[derive(Debug, Error)]
pub enum RegistryError {
    // =================================================================
    // Item / Lifecycle Errors (1xx)
    // =================================================================
    /// The identifier has never been assigned.
    #[error("RC_ERR_100: Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The operation is not valid for the item's current lifecycle status.
    #[error("RC_ERR_101: {item} is {status}, operation requires {required}")]
    WrongStatus {
        item: ItemId,
        status: ItemStatus,
        required: ItemStatus,
    },

    /// An item awaiting confirmation has no finder recorded. Unreachable
    /// through the state machine; kept as a hard check.
    #[error("RC_ERR_102: {0} has no finder recorded")]
    NoFinder(ItemId),

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// Owner-only operation attempted by another account.
    #[error("RC_ERR_200: Caller {caller} is not the owner of {item}")]
    NotOwner { item: ItemId, caller: AccountId },

    // =================================================================
    // Input Validation Errors (3xx)
    // =================================================================
    /// Malformed arguments (empty description, empty proof, ...).
    #[error("RC_ERR_300: Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The deposited reward must be strictly positive.
    #[error("RC_ERR_301: Reward must be positive, got {0}")]
    NonPositiveReward(Decimal),

    /// An owner cannot claim to have found their own item.
    #[error("RC_ERR_302: Owner cannot claim their own item: {0}")]
    OwnerCannotClaim(ItemId),

    // =================================================================
    // Transfer Errors (4xx)
    // =================================================================
    /// The outbound value transfer did not succeed. Every mutation staged
    /// within the same call is rolled back.
    #[error("RC_ERR_400: Transfer of {amount} to {recipient} failed: {reason}")]
    TransferFailed {
        recipient: AccountId,
        amount: Decimal,
        reason: String,
    },

    // =================================================================
    // Custody Invariant Errors (5xx)
    // =================================================================
    /// Custodied value diverged from the sum of active rewards — critical
    /// safety alert.
    #[error("RC_ERR_500: Custody invariant violation: {reason}")]
    CustodyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("RC_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("RC_ERR_901: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RegistryError>;
