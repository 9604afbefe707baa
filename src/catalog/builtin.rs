//! The shipped template catalog
//!
//! Three starter layouts, in declaration order: "Blank" (no tiers),
//! "TierMaker" (the classic warm palette) and "Cute" (a pastel palette).
//! Colors and tier ids match the catalog the editor has always shipped;
//! changing them silently would reskin users' new lists.

use crate::catalog::template::Template;
use crate::model::Tier;

/// Build the builtin templates in catalog order
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new("Blank"),
        Template::new("TierMaker")
            .tier(Tier::new(1, "S", "#ff7f7f"))
            .tier(Tier::new(2, "A", "#ffbf7f"))
            .tier(Tier::new(3, "B", "#ffdf7f"))
            .tier(Tier::new(4, "C", "#ffff7f"))
            .tier(Tier::new(5, "D", "#bfff7f")),
        Template::new("Cute")
            .tier(Tier::new(1, "S", "#acddeb"))
            .tier(Tier::new(2, "A", "#ceebf4"))
            .tier(Tier::new(3, "B", "#f7f5e9"))
            .tier(Tier::new(4, "C", "#f9d8c8"))
            .tier(Tier::new(5, "D", "#f3b8ba")),
    ]
}
