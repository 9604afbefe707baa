//! Tier-list data shapes
//!
//! This module defines the structural contracts shared by every consumer of
//! the core (editor UIs, exporters, persistence layers):
//!
//! - `Item`: one ranked entry (label plus image reference)
//! - `Tier`: a ranked bucket of items with a label and a color
//! - `TierList`: a named, described, ordered sequence of tiers
//!
//! No behavior attaches to these shapes beyond construction helpers and
//! invariant checks; ordering is meaningful everywhere (tier order is rank
//! order, item order is ranking within a tier).

pub mod error;
pub mod types;

pub use error::{ModelError, ModelResult};
pub use types::{is_css_hex_color, Item, Tier, TierList};
