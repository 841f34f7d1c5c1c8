//! Hub game grid: the state behind the games screen.
//!
//! This crate holds the business logic for browsing a games folder. It has
//! no UI or process-spawning code: the app supplies a [`GameRuntime`]
//! implementation that starts the actual LOVE runtime.
//!
//! # Operations
//!
//! - **Scan**: one background worker scans folders sequentially
//! - **Filter**: case-insensitive substring search over display names
//! - **Icons**: cached thumbnails resolved on a two-worker pool
//! - **Launch**: hand a game (or nothing) to the runtime

pub mod error;
pub mod presenter;
pub mod runtime;
pub mod scan_worker;
pub mod session;

pub use error::GamesError;
pub use presenter::{GamePresenter, Glyph, IconState};
pub use runtime::{GameRuntime, LaunchTarget};
pub use session::{GameHub, HubEvent, HubUpdate, SessionOptions};
