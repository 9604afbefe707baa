//! Asynchronous image loading
//!
//! The loader turns a user's file selection into a base64 data URL held in
//! an observable cell:
//!
//! ```text
//! FileSelection -> ImageLoader -> ImageCell -> LoadEvent subscribers
//!     (picker)      (read,          (holds        (push updates)
//!                    validate,       LoadState)
//!                    encode)
//! ```
//!
//! Components:
//! - [`ImageSource`] / [`PathSource`] / [`BytesSource`]: where bytes come from
//! - [`FileSelection`]: one picker event, possibly empty
//! - [`ImageLoader`]: reads, validates and encodes on background tasks
//! - [`ImageCell`]: the shared holder hosts observe
//! - [`LoadEvent`]: start/loaded/failed notifications per attempt

pub mod cell;
pub mod engine;
pub mod error;
pub mod source;

pub use cell::{ImageCell, LoadEvent, LoadFailure, LoadId, LoadState, LoadedImage};
pub use engine::{ImageLoader, OnLoaded};
pub use error::{LoadErrorKind, LoaderError, LoaderResult};
pub use source::{BytesSource, FileSelection, ImageSource, PathSource};
