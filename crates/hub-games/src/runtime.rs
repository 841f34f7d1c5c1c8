//! Handoff to the external game runtime.

use std::fmt;

use gamehub_library::EntryRef;

use crate::error::GamesError;

/// What the runtime is asked to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// A game directory or `.love` archive.
    Game(EntryRef),
    /// The runtime's built-in no-game screen.
    NoGame,
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game(entry) => write!(f, "{entry}"),
            Self::NoGame => f.write_str("no game"),
        }
    }
}

/// Starts games. The app implements this on top of a process spawner.
pub trait GameRuntime: Send + Sync {
    /// Starts the runtime without waiting for it to exit.
    fn launch(&self, target: &LaunchTarget) -> Result<(), GamesError>;
}
