//! Process-lifetime icon cache.
//!
//! Keyed by the stringified identity of a game entry. Entries are never
//! evicted; a rescan of an unchanged folder reuses every earlier decode.
//! Failed resolutions are not stored, so they are retried on next request.

use std::sync::Arc;

use dashmap::DashMap;
use gamehub_library::{EntryRef, GameRecord};

use crate::IconImage;
use crate::resolver::IconResolver;

/// Concurrent identity → icon map shared by workers and the coordinator.
#[derive(Debug, Default)]
pub struct IconCache {
    icons: DashMap<String, IconImage>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entry: &EntryRef) -> Option<IconImage> {
        self.icons
            .get(&entry.key())
            .map(|icon| Arc::clone(icon.value()))
    }

    pub fn insert(&self, entry: &EntryRef, icon: IconImage) {
        self.icons.insert(entry.key(), icon);
    }

    pub fn contains(&self, entry: &EntryRef) -> bool {
        self.icons.contains_key(&entry.key())
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Returns the cached icon, resolving and caching it on a miss.
    ///
    /// The icon is stored before it is returned.
    pub fn get_or_resolve(
        &self,
        record: &GameRecord,
        resolver: &IconResolver,
    ) -> Option<IconImage> {
        if let Some(icon) = self.get(record.entry()) {
            return Some(icon);
        }

        let icon = Arc::new(resolver.resolve(record)?);
        self.insert(record.entry(), Arc::clone(&icon));
        Some(icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{png_bytes, write_game_dir, write_love};
    use gamehub_library::GameKind;

    #[test]
    fn second_resolution_hits_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_game_dir(tmp.path(), "Racer", &[("icon.png", &png_bytes(300, 300))]);
        let record = GameRecord::new(EntryRef::new(&dir), "Racer", GameKind::Directory);

        let cache = IconCache::new();
        let resolver = IconResolver::default();

        let first = cache.get_or_resolve(&record, &resolver).unwrap();
        assert_eq!(resolver.decode_count(), 1);

        let second = cache.get_or_resolve(&record, &resolver).unwrap();
        assert_eq!(resolver.decode_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.dimensions(), (256, 256));
    }

    #[test]
    fn rescanned_record_reuses_decode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pong.love");
        write_love(&path, &[("icon.png", &png_bytes(32, 32))]);

        let cache = IconCache::new();
        let resolver = IconResolver::default();

        let scan_one = GameRecord::new(EntryRef::new(&path), "pong", GameKind::Archive);
        let scan_two = GameRecord::new(EntryRef::new(&path), "pong", GameKind::Archive);

        cache.get_or_resolve(&scan_one, &resolver).unwrap();
        cache.get_or_resolve(&scan_two, &resolver).unwrap();
        assert_eq!(resolver.decode_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn misses_are_not_cached() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_game_dir(tmp.path(), "Blank", &[]);
        let record = GameRecord::new(EntryRef::new(&dir), "Blank", GameKind::Directory);

        let cache = IconCache::new();
        let resolver = IconResolver::default();

        assert!(cache.get_or_resolve(&record, &resolver).is_none());
        assert!(cache.is_empty());

        std::fs::write(dir.join("icon.png"), png_bytes(8, 8)).unwrap();
        assert!(cache.get_or_resolve(&record, &resolver).is_some());
        assert!(cache.contains(record.entry()));
    }
}
