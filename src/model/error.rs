//! Model invariant errors
//!
//! Violations of the structural invariants on tier lists.

use thiserror::Error;

/// Errors reported by [`TierList::validate`](crate::model::TierList::validate)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Two tiers in the same list share an id
    #[error("Duplicate tier id {0} in tier list")]
    DuplicateTierId(u32),

    /// Two items in the same tier share an id
    #[error("Duplicate item id {item_id} in tier {tier_id}")]
    DuplicateItemId { tier_id: u32, item_id: u32 },

    /// A tier's color is not a CSS hex color
    #[error("Tier {tier_id} has invalid color {value:?}")]
    InvalidColor { tier_id: u32, value: String },
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
