//! One-level scan of a games folder.

use std::fs::Metadata;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::LibraryError;
use crate::types::{EntryRef, GameKind, GameRecord};
use crate::{ARCHIVE_EXTENSION, ENTRY_POINT, UNTITLED_GAME};

/// Scans the direct children of `folder` for games.
///
/// Results follow the directory listing order. Entries that vanish or
/// become unreadable mid-scan are skipped. Only a failure to list `folder`
/// itself is reported, as [`LibraryError::FolderInaccessible`].
pub fn scan_folder(folder: &Path) -> Result<Vec<GameRecord>, LibraryError> {
    let entries =
        std::fs::read_dir(folder).map_err(|e| LibraryError::inaccessible(folder, e))?;

    let mut games = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(value) => value,
            Err(e) => {
                trace!(folder = %folder.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        // Follows symlinks so linked game folders are picked up.
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                trace!(path = %path.display(), error = %e, "entry vanished during scan");
                continue;
            }
        };

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(record) = classify(&path, &file_name, &metadata) {
            trace!(name = record.name(), kind = ?record.kind(), "found game");
            games.push(record);
        }
    }

    debug!(folder = %folder.display(), count = games.len(), "scan finished");
    Ok(games)
}

/// Returns true if `dir` directly contains a `main.lua` file.
///
/// The match is exact and case-sensitive; a `main.lua` directory or one
/// nested deeper does not count.
pub fn is_valid_game_directory(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };

    entries.flatten().any(|entry| {
        entry.file_name() == ENTRY_POINT
            && std::fs::metadata(entry.path())
                .map(|m| !m.is_dir())
                .unwrap_or(false)
    })
}

fn classify(path: &Path, file_name: &str, metadata: &Metadata) -> Option<GameRecord> {
    if metadata.is_dir() {
        if !is_valid_game_directory(path) {
            return None;
        }
        let name = if file_name.is_empty() {
            UNTITLED_GAME
        } else {
            file_name
        };
        return Some(GameRecord::new(
            EntryRef::new(path),
            name,
            GameKind::Directory,
        ));
    }

    if is_archive_name(file_name) {
        return Some(GameRecord::new(
            EntryRef::new(path),
            archive_display_name(file_name),
            GameKind::Archive,
        ));
    }

    None
}

/// Case-insensitive `.love` suffix check.
fn is_archive_name(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

/// Strips the extension at the last dot.
fn archive_display_name(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some(("", _)) | None => UNTITLED_GAME,
        Some((stem, _)) => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(games: &[GameRecord]) -> HashSet<String> {
        games.iter().map(|g| g.name().to_string()).collect()
    }

    #[test]
    fn main_lua_qualifies_regardless_of_siblings() {
        for sibling_count in [0, 1, 5, 25] {
            let tmp = tempfile::tempdir().unwrap();
            let game = tmp.path().join("Platformer");
            std::fs::create_dir(&game).unwrap();
            std::fs::write(game.join("main.lua"), "function love.draw() end").unwrap();
            for i in 0..sibling_count {
                std::fs::write(game.join(format!("asset_{i}.png")), "x").unwrap();
            }
            std::fs::create_dir(game.join("lib")).unwrap();

            assert!(is_valid_game_directory(&game), "siblings: {sibling_count}");
            let games = scan_folder(tmp.path()).unwrap();
            assert_eq!(games.len(), 1);
            assert_eq!(games[0].name(), "Platformer");
            assert!(games[0].is_directory());
        }
    }

    #[test]
    fn nested_main_lua_does_not_qualify() {
        let tmp = tempfile::tempdir().unwrap();
        let outer = tmp.path().join("Collection");
        let inner = outer.join("src");
        std::fs::create_dir_all(&inner).unwrap();
        std::fs::write(inner.join("main.lua"), "").unwrap();
        std::fs::write(outer.join("conf.lua"), "").unwrap();

        assert!(!is_valid_game_directory(&outer));
        assert!(scan_folder(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn main_lua_must_be_exact_file() {
        let tmp = tempfile::tempdir().unwrap();
        let upper = tmp.path().join("Upper");
        std::fs::create_dir(&upper).unwrap();
        std::fs::write(upper.join("MAIN.LUA"), "").unwrap();

        let as_dir = tmp.path().join("AsDir");
        std::fs::create_dir_all(as_dir.join("main.lua")).unwrap();

        assert!(!is_valid_game_directory(&upper));
        assert!(!is_valid_game_directory(&as_dir));
        assert!(scan_folder(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn love_archives_are_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("tetris.love"), "zip").unwrap();
        std::fs::write(tmp.path().join("Snake.LOVE"), "zip").unwrap();
        std::fs::write(tmp.path().join("readme.txt"), "text").unwrap();
        std::fs::write(tmp.path().join("lovely.zip"), "zip").unwrap();

        let games = scan_folder(tmp.path()).unwrap();
        assert_eq!(
            names(&games),
            HashSet::from(["tetris".to_string(), "Snake".to_string()])
        );
        assert!(games.iter().all(|g| g.kind() == GameKind::Archive));
    }

    #[test]
    fn archive_name_strips_last_extension_only() {
        assert_eq!(archive_display_name("my.game.love"), "my.game");
        assert_eq!(archive_display_name("love.love"), "love");
        assert_eq!(archive_display_name(".love"), UNTITLED_GAME);
    }

    #[test]
    fn archive_name_check() {
        assert!(is_archive_name("a.love"));
        assert!(is_archive_name("a.Love"));
        assert!(!is_archive_name("love"));
        assert!(!is_archive_name("a.love.bak"));
        assert!(!is_archive_name("alove"));
    }

    #[test]
    fn mixed_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();

        std::fs::create_dir(base.join("Dungeon")).unwrap();
        std::fs::write(base.join("Dungeon").join("main.lua"), "").unwrap();
        std::fs::create_dir(base.join("Empty")).unwrap();
        std::fs::create_dir(base.join("NotAGame")).unwrap();
        std::fs::write(base.join("NotAGame").join("conf.lua"), "").unwrap();
        std::fs::write(base.join("pong.love"), "zip").unwrap();

        let games = scan_folder(base).unwrap();
        assert_eq!(
            names(&games),
            HashSet::from(["Dungeon".to_string(), "pong".to_string()])
        );

        let dungeon = games.iter().find(|g| g.name() == "Dungeon").unwrap();
        assert_eq!(dungeon.entry().path(), base.join("Dungeon"));
        assert!(dungeon.entry().exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_entries_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        std::fs::create_dir(base.join("Dungeon")).unwrap();
        std::fs::write(base.join("Dungeon").join("main.lua"), "").unwrap();
        std::os::unix::fs::symlink("missing", base.join("ghost.love")).unwrap();
        std::os::unix::fs::symlink("nowhere", base.join("Phantom")).unwrap();

        let games = scan_folder(base).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name(), "Dungeon");
    }

    #[test]
    fn empty_folder_yields_no_games() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(scan_folder(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_folder_is_inaccessible() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("gone");

        let err = scan_folder(&missing).unwrap_err();
        assert!(matches!(err, LibraryError::FolderInaccessible { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("cannot access folder"));
    }

    #[test]
    fn file_root_is_inaccessible() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let result = scan_folder(tmp.path());
        assert!(matches!(
            result,
            Err(LibraryError::FolderInaccessible { .. })
        ));
    }
}
