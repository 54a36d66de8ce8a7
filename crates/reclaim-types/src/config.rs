//! Configuration for a Reclaim registry instance.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunables for a registry instance.
///
/// Reputation awards are informational counters only — changing them never
/// affects fund custody.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Reputation granted to the finder when a return is confirmed.
    pub finder_reputation_award: u64,
    /// Reputation granted to the owner for confirming a return.
    pub owner_confirm_award: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            finder_reputation_award: constants::FINDER_REPUTATION_AWARD,
            owner_confirm_award: constants::OWNER_CONFIRM_AWARD,
        }
    }
}
