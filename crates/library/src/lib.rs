//! LOVE game library scanning.
//!
//! Walks a chosen folder one level deep and classifies its children:
//!
//! - **Game directory**: a folder directly containing `main.lua`
//! - **Archive game**: a file whose name ends in `.love` (a ZIP archive)
//!
//! Everything else is ignored. The scanner is synchronous; callers that
//! must not block run it on a blocking worker.

pub mod error;
pub mod scanner;
pub mod types;

pub use error::LibraryError;
pub use scanner::{is_valid_game_directory, scan_folder};
pub use types::{EntryRef, GameKind, GameRecord};

/// File that marks a directory as an unpacked LOVE game.
pub const ENTRY_POINT: &str = "main.lua";

/// Extension (without the dot) of packed LOVE games.
pub const ARCHIVE_EXTENSION: &str = "love";

/// Display name used when an entry has no usable name.
pub const UNTITLED_GAME: &str = "Untitled game";
