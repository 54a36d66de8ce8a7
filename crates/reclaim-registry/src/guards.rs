//! Access guards — reusable precondition predicates.
//!
//! Every mutating operation runs its guards before touching any state, so
//! a failing precondition aborts with the ledger untouched. Guards are
//! pure: they read the record and the arguments, and return the specific
//! error kind the caller reports.

use reclaim_types::{AccountId, ItemRecord, ItemStatus, RegistryError, Result};
use rust_decimal::Decimal;

/// The caller must be the item's owner.
///
/// # Errors
/// Returns [`RegistryError::NotOwner`] otherwise.
pub fn ensure_owner(record: &ItemRecord, caller: AccountId) -> Result<()> {
    if record.owner != caller {
        return Err(RegistryError::NotOwner {
            item: record.id,
            caller,
        });
    }
    Ok(())
}

/// The caller must **not** be the item's owner — an owner cannot claim to
/// have found their own item.
///
/// # Errors
/// Returns [`RegistryError::OwnerCannotClaim`] otherwise.
pub fn ensure_not_owner(record: &ItemRecord, caller: AccountId) -> Result<()> {
    if record.owner == caller {
        return Err(RegistryError::OwnerCannotClaim(record.id));
    }
    Ok(())
}

/// The item must be in exactly `required` status.
///
/// # Errors
/// Returns [`RegistryError::WrongStatus`] otherwise.
pub fn ensure_status(record: &ItemRecord, required: ItemStatus) -> Result<()> {
    if record.status != required {
        return Err(RegistryError::WrongStatus {
            item: record.id,
            status: record.status,
            required,
        });
    }
    Ok(())
}

/// The item must have a finder recorded. Unreachable for well-formed
/// records in `PENDING_CONFIRMATION`; kept as a hard check.
///
/// # Errors
/// Returns [`RegistryError::NoFinder`] otherwise.
pub fn ensure_finder_recorded(record: &ItemRecord) -> Result<AccountId> {
    record.finder.ok_or(RegistryError::NoFinder(record.id))
}

/// Free-text arguments must be non-empty.
///
/// # Errors
/// Returns [`RegistryError::InvalidInput`] naming the field otherwise.
pub fn ensure_nonempty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidInput {
            reason: format!("{field} must not be empty"),
        });
    }
    Ok(())
}

/// Deposited rewards must be strictly positive.
///
/// # Errors
/// Returns [`RegistryError::NonPositiveReward`] otherwise.
pub fn ensure_positive_reward(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(RegistryError::NonPositiveReward(amount));
    }
    Ok(())
}
