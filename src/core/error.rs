//! Defines the custom error types for the `core` module.

use thiserror::Error;

/// Why a single removal attempt failed.
///
/// Removal failures are per-item outcomes, not batch aborts: the orchestrator
/// records the entry and moves on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RemovalError {
    /// The entry's action-menu trigger could not be located in the live
    /// document. The entry may have been removed or re-rendered externally.
    #[error("action-menu trigger not found")]
    ControlMissing,

    /// The menu opened, but none of the matching strategies identified a
    /// remove option among the rendered items.
    #[error("no remove option matched in the open menu")]
    OptionMissing,
}
