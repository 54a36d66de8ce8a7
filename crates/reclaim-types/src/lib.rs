//! # reclaim-types
//!
//! Shared types, errors, and configuration for the **Reclaim** lost & found
//! registry.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ItemId`], [`AccountId`]
//! - **Item model**: [`ItemRecord`], [`ItemStatus`], [`ItemDetails`]
//! - **Profile model**: [`UserProfile`]
//! - **Event model**: [`LedgerEvent`], [`EventKind`]
//! - **Configuration**: [`RegistryConfig`]
//! - **Errors**: [`RegistryError`] with `RC_ERR_` prefix codes
//! - **Constants**: reputation awards and system defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod item;
pub mod profile;

// Re-export all primary types at crate root for ergonomic imports:
//   use reclaim_types::{ItemRecord, ItemStatus, LedgerEvent, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use item::*;
pub use profile::*;

// Constants are accessed via `reclaim_types::constants::FOO`
// (not re-exported to avoid name collisions).
