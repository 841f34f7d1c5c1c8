//! Icon thumbnails for LOVE games.
//!
//! Finds an icon inside a game directory or `.love` archive, decodes it,
//! and scales it down to fit a square bound (256 px by default).
//!
//! # Layout
//!
//! - [`lookup`]: which file names count as icons, in priority order
//! - [`decode`]: bounded decode and aspect-preserving downscale
//! - [`resolver`]: directory and archive search, counting decodes
//! - [`cache`]: process-lifetime concurrent cache keyed by identity
//! - [`loader`]: background worker pool feeding an event channel

pub mod cache;
pub mod decode;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

pub use cache::IconCache;
pub use decode::{bounded_dimensions, decode_bounded};
pub use error::IconError;
pub use loader::{IconLoader, IconRequest, IconResolved};
pub use resolver::IconResolver;

/// A decoded, size-bounded icon shared between the cache and viewers.
pub type IconImage = Arc<image::RgbaImage>;

/// Largest width or height of a resolved icon.
pub const DEFAULT_MAX_DIMENSION: u32 = 256;

/// Number of concurrent icon workers.
pub const DEFAULT_WORKERS: usize = 2;
