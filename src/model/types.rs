//! Core data types for tier lists
//!
//! This module defines the fundamental shapes used throughout the crate:
//! - `Item`: a single ranked entry
//! - `Tier`: an ordered bucket of items with a rank label and color
//! - `TierList`: a complete ranking document
//!
//! The serialized form matches the JSON shape used by tier-list editors:
//! the tier color travels as `colorHex`, and an item's display text is
//! `label` (with `name` accepted as a legacy alias on input).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::error::{ModelError, ModelResult};

/// A single entry placed on a tier list
///
/// The `image` field holds either a regular URL or a data-URL; the model
/// does not interpret it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier within the containing tier
    pub id: u32,
    /// Display text (legacy payloads may call this `name`)
    #[serde(alias = "name")]
    pub label: String,
    /// Image reference: URL or data-URL
    pub image: String,
}

impl Item {
    /// Create a new item
    pub fn new(id: u32, label: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            image: image.into(),
        }
    }
}

/// A ranked bucket holding zero or more items
///
/// Item order is the ranking within the tier and is preserved by
/// serialization round-trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tier {
    /// Unique identifier within the containing list
    pub id: u32,
    /// Rank label, e.g. "S" or "A"
    pub label: String,
    /// CSS hex color for rendering, e.g. "#ff7f7f"
    #[serde(rename = "colorHex")]
    pub color_hex: String,
    /// Items in rank order
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Tier {
    /// Create a new, empty tier
    pub fn new(id: u32, label: impl Into<String>, color_hex: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            color_hex: color_hex.into(),
            items: Vec::new(),
        }
    }

    /// Builder method: append an item
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Builder method: append multiple items
    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Look up an item by id
    pub fn item_by_id(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of items in this tier
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether this tier holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} items)", self.label, self.color_hex, self.items.len())
    }
}

/// A named, described collection of ordered tiers
///
/// Tier order is rank order (first tier ranks highest, e.g. S above A) and
/// is preserved by serialization round-trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierList {
    /// Unique identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Tiers in rank order
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

impl TierList {
    /// Create a new tier list with no tiers
    pub fn new(id: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            tiers: Vec::new(),
        }
    }

    /// Builder method: append a tier
    pub fn tier(mut self, tier: Tier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Look up a tier by id
    pub fn tier_by_id(&self, id: u32) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    /// Number of tiers
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Total number of items across all tiers
    pub fn item_count(&self) -> usize {
        self.tiers.iter().map(|t| t.items.len()).sum()
    }

    /// Check the structural invariants
    ///
    /// Tier ids must be unique within the list, item ids unique within their
    /// tier, and every tier color must be a CSS hex color. Returns the first
    /// violation found, walking tiers in rank order.
    pub fn validate(&self) -> ModelResult<()> {
        let mut tier_ids = std::collections::HashSet::new();
        for tier in &self.tiers {
            if !tier_ids.insert(tier.id) {
                return Err(ModelError::DuplicateTierId(tier.id));
            }
            if !is_css_hex_color(&tier.color_hex) {
                return Err(ModelError::InvalidColor {
                    tier_id: tier.id,
                    value: tier.color_hex.clone(),
                });
            }
            let mut item_ids = std::collections::HashSet::new();
            for item in &tier.items {
                if !item_ids.insert(item.id) {
                    return Err(ModelError::DuplicateItemId {
                        tier_id: tier.id,
                        item_id: item.id,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Check whether a string is a CSS hex color (`#rgb`, `#rgba`, `#rrggbb`
/// or `#rrggbbaa`)
pub fn is_css_hex_color(s: &str) -> bool {
    regex::Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}
