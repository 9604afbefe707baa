//! Template shape and instantiation

use serde::{Deserialize, Serialize};

use crate::model::{Tier, TierList};

/// A predefined starting layout for a new tier list
///
/// Tiers are declared up front; items are always empty at definition time.
/// A template is never edited in place: [`Template::instantiate`] hands out
/// an independent deep copy for each new editing session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Catalog name, e.g. "TierMaker"
    pub name: String,
    /// Tiers in rank order, items empty
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

impl Template {
    /// Create a template with no tiers
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiers: Vec::new(),
        }
    }

    /// Builder method: append a tier
    pub fn tier(mut self, tier: Tier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Number of tiers this template declares
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Produce a fresh tier list from this template
    ///
    /// The result owns a deep copy of the template's tiers; mutating it can
    /// never reach back into the template (or into any other list produced
    /// from it).
    pub fn instantiate(
        &self,
        list_id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> TierList {
        TierList {
            id: list_id,
            name: name.into(),
            description: description.into(),
            tiers: self.tiers.clone(),
        }
    }
}
