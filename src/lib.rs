//! # Tierlab
//!
//! Tier-list editor core - the framework-independent engine behind a
//! tier-list maker: data model, starter templates, and asynchronous image
//! loading into embeddable data URLs.
//!
//! ## Features
//!
//! - **Typed tier lists**: Items, tiers and lists with stable wire names
//! - **Starter templates**: Blank, TierMaker and Cute presets in an
//!   immutable registry
//! - **Data-URL codec**: base64 image encoding with MIME sniffing
//! - **Async loading**: file picks settle into an observable holder,
//!   failures stay visible instead of being swallowed
//!
//! ## Modules
//!
//! - [`model`]: Item / Tier / TierList shapes and validation
//! - [`catalog`]: Built-in templates and the template registry
//! - [`dataurl`]: `data:` URL encoding and decoding
//! - [`loader`]: Async image loading into an observable cell
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tierlab::catalog::TemplateRegistry;
//! use tierlab::loader::{FileSelection, ImageLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Instantiate a starter template as an editable list
//!     let registry = TemplateRegistry::builtin();
//!     let list = registry.instantiate("TierMaker", 1, "My ranking", "")?;
//!     println!("{} starts with {} tiers", list.name, list.tier_count());
//!
//!     // Load a picked image into an observable holder
//!     let loader = ImageLoader::with_defaults();
//!     let cell = loader.cell();
//!     let mut events = cell.subscribe();
//!
//!     loader.handle_selection(
//!         FileSelection::from_paths(["cover.png"]),
//!         Some(Box::new(|url| println!("loaded {} bytes of data URL", url.len()))),
//!     );
//!
//!     // React to the settled outcome
//!     let event = events.recv().await?;
//!     println!("load event: {:?}", event);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod dataurl;
pub mod loader;
pub mod model;

// Re-export top-level types for convenience
pub use model::{is_css_hex_color, Item, ModelError, ModelResult, Tier, TierList};

pub use catalog::{builtin_templates, CatalogError, Template, TemplateRegistry};

pub use dataurl::{DataUrlError, DataUrlResult, DecodedPayload};

pub use loader::{
    BytesSource, FileSelection, ImageCell, ImageLoader, ImageSource, LoadErrorKind, LoadEvent,
    LoadFailure, LoadId, LoadState, LoadedImage, LoaderError, LoaderResult, OnLoaded, PathSource,
};

pub use config::{Config, ConfigError, LoaderConfig, LoggingConfig};
