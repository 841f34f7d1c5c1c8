//! Icon file naming convention.
//!
//! Fixed names come first, then `<gamename>.<ext>`. All comparisons are
//! made on lower-cased names.

use std::path::{Path, PathBuf};

/// Fixed icon names, highest priority first.
pub const ICON_PRIORITY: [&str; 8] = [
    "icon.png",
    "icon.jpg",
    "icon.jpeg",
    "icon.webp",
    "logo.png",
    "logo.jpg",
    "logo.jpeg",
    "logo.webp",
];

/// Extensions tried for the `<gamename>.<ext>` fallback, in order.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Candidate names for a game, in priority order.
pub fn candidate_names(game_name: &str) -> Vec<String> {
    let base = game_name.to_lowercase();
    ICON_PRIORITY
        .iter()
        .map(|name| (*name).to_string())
        .chain(IMAGE_EXTENSIONS.iter().map(|ext| format!("{base}.{ext}")))
        .collect()
}

/// Finds the highest-priority icon among the direct children of `dir`.
///
/// Matches whole file names, case-insensitively. Directories never match.
pub fn find_in_directory(dir: &Path, game_name: &str) -> Option<PathBuf> {
    let files: Vec<(String, PathBuf)> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .filter(|entry| {
            std::fs::metadata(entry.path())
                .map(|m| !m.is_dir())
                .unwrap_or(false)
        })
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            (name, entry.path())
        })
        .collect();

    candidate_names(game_name).into_iter().find_map(|candidate| {
        files
            .iter()
            .find(|(name, _)| *name == candidate)
            .map(|(_, path)| path.clone())
    })
}

/// Returns true if an archive entry path looks like an icon.
///
/// `entry_name` must already be lower-cased. Matching is by suffix on the
/// full path, so `assets/icon.png` qualifies.
pub fn matches_archive_entry(entry_name: &str, game_name: &str) -> bool {
    candidate_names(game_name)
        .iter()
        .any(|candidate| entry_name.ends_with(candidate.as_str()))
}
