//! System-wide constants for the Reclaim registry.

/// First item identifier the registry assigns. 0 is the invalid sentinel.
pub const FIRST_ITEM_ID: u64 = 1;

/// Reputation granted to the finder when a return is confirmed.
pub const FINDER_REPUTATION_AWARD: u64 = 10;

/// Reputation granted to the owner for confirming a return.
pub const OWNER_CONFIRM_AWARD: u64 = 5;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registry name.
pub const REGISTRY_NAME: &str = "Reclaim";
