//! Starter template catalog
//!
//! A fixed set of named tier-list skeletons used to seed a new editing
//! session:
//!
//! - **template**: the `Template` shape and its deep-copy instantiation
//! - **builtin**: the shipped catalog (Blank, TierMaker, Cute)
//! - **registry**: read-only lookup by name, cloned on access
//!
//! The catalog is pure static data; nothing here can fail except a lookup
//! with an unknown name. Templates are always copied, never referenced, so
//! concurrent editing sessions can never alias the constants.
//!
//! # Example
//!
//! ```rust
//! use tierlab::catalog::TemplateRegistry;
//!
//! let registry = TemplateRegistry::builtin();
//! let list = registry
//!     .instantiate("TierMaker", 1, "My ranking", "weekend project")
//!     .unwrap();
//!
//! assert_eq!(list.tiers.len(), 5);
//! assert_eq!(list.tiers[0].label, "S");
//! ```

pub mod builtin;
pub mod registry;
pub mod template;

pub use builtin::builtin_templates;
pub use registry::{CatalogError, TemplateRegistry};
pub use template::Template;
