//! Scanned games and their filtered view.

use gamehub_icons::{IconCache, IconImage};
use gamehub_library::{GameKind, GameRecord};
use tracing::{debug, info};

use crate::error::GamesError;
use crate::runtime::{GameRuntime, LaunchTarget};

/// Placeholder shown until (or instead of) a real icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Folder,
    File,
}

impl Glyph {
    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::Directory => Self::Folder,
            GameKind::Archive => Self::File,
        }
    }
}

/// What a grid cell should display for a game right now.
#[derive(Debug, Clone)]
pub enum IconState {
    Icon(IconImage),
    Placeholder(Glyph),
}

impl IconState {
    pub fn icon(&self) -> Option<&IconImage> {
        match self {
            Self::Icon(icon) => Some(icon),
            Self::Placeholder(_) => None,
        }
    }
}

/// Full scan result plus the view matching the current query.
#[derive(Debug, Clone, Default)]
pub struct GamePresenter {
    all: Vec<GameRecord>,
    visible: Vec<GameRecord>,
    query: String,
}

impl GamePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the scanned games and re-applies the current query.
    pub fn set_games(&mut self, games: Vec<GameRecord>) {
        self.all = games;
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.visible.clear();
    }

    /// Filters by display name and returns the new view.
    ///
    /// Matching is a case-insensitive substring search on the trimmed
    /// query. A blank query shows every game in scan order.
    pub fn filter(&mut self, query: &str) -> &[GameRecord] {
        self.query = query.to_string();
        self.recompute();
        &self.visible
    }

    fn recompute(&mut self) {
        let needle = self.query.trim().to_lowercase();
        self.visible = if needle.is_empty() {
            self.all.clone()
        } else {
            self.all
                .iter()
                .filter(|game| game.name().to_lowercase().contains(&needle))
                .cloned()
                .collect()
        };
        debug!(
            query = %self.query,
            visible = self.visible.len(),
            total = self.all.len(),
            "filter applied"
        );
    }

    pub fn all(&self) -> &[GameRecord] {
        &self.all
    }

    pub fn visible(&self) -> &[GameRecord] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_at(&self, index: usize) -> Option<&GameRecord> {
        self.visible.get(index)
    }

    /// First game whose display name equals `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&GameRecord> {
        let name = name.to_lowercase();
        self.all.iter().find(|game| game.name().to_lowercase() == name)
    }

    /// Cached icon or placeholder for immediate display.
    pub fn icon_state(record: &GameRecord, cache: &IconCache) -> IconState {
        cache
            .get(record.entry())
            .map(IconState::Icon)
            .unwrap_or(IconState::Placeholder(Glyph::for_kind(record.kind())))
    }

    /// Hands `record` to the runtime if its file or folder still exists.
    ///
    /// Stored lists are never touched, whatever the outcome.
    pub fn launch(
        &self,
        record: &GameRecord,
        runtime: &dyn GameRuntime,
    ) -> Result<(), GamesError> {
        if !record.entry().exists() {
            return Err(GamesError::GameNotFound(record.name().to_string()));
        }
        info!(game = record.name(), entry = %record.entry(), "launching game");
        runtime.launch(&LaunchTarget::Game(record.entry().clone()))
    }
}
