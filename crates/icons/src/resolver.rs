//! Icon search inside game directories and `.love` archives.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use gamehub_library::{GameKind, GameRecord};
use image::RgbaImage;
use tracing::debug;
use zip::ZipArchive;
use zip::read::ZipFile;
use zip::result::ZipError;

use crate::DEFAULT_MAX_DIMENSION;
use crate::decode::decode_bounded;
use crate::error::IconError;
use crate::lookup;

/// Resolves icons for game records.
///
/// Stateless apart from a decode counter, so one instance can be shared by
/// every worker.
#[derive(Debug)]
pub struct IconResolver {
    max_dimension: u32,
    decodes: AtomicUsize,
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION)
    }
}

impl IconResolver {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            decodes: AtomicUsize::new(0),
        }
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Number of decode attempts made so far.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }

    /// Finds and decodes the icon for `record`.
    ///
    /// Every failure (missing icon, unreadable file, corrupt archive, bad
    /// image data) is logged and reported as `None`.
    pub fn resolve(&self, record: &GameRecord) -> Option<RgbaImage> {
        let path = record.entry().path();
        let result = match record.kind() {
            GameKind::Directory => self.resolve_in_directory(path, record.name()),
            GameKind::Archive => self.resolve_in_archive(path, record.name()),
        };

        match result {
            Ok(Some(icon)) => {
                debug!(
                    game = record.name(),
                    width = icon.width(),
                    height = icon.height(),
                    "icon resolved"
                );
                Some(icon)
            }
            Ok(None) => {
                debug!(game = record.name(), "no icon found");
                None
            }
            Err(e) => {
                debug!(game = record.name(), error = %e, "icon resolution failed");
                None
            }
        }
    }

    /// Decodes only the best-ranked candidate; a broken file is not skipped.
    fn resolve_in_directory(
        &self,
        dir: &Path,
        game_name: &str,
    ) -> Result<Option<RgbaImage>, IconError> {
        let Some(icon_path) = lookup::find_in_directory(dir, game_name) else {
            return Ok(None);
        };
        let bytes = std::fs::read(&icon_path)?;
        self.decode(&bytes).map(Some)
    }

    /// Streams the archive once, decoding entries as they match.
    ///
    /// Entries whose sizes only appear in a trailing data descriptor cannot
    /// be streamed; those archives are walked through the central directory
    /// instead, still in stored order.
    fn resolve_in_archive(
        &self,
        archive: &Path,
        game_name: &str,
    ) -> Result<Option<RgbaImage>, IconError> {
        let mut reader = BufReader::new(File::open(archive)?);

        match self.scan_stream(&mut reader, game_name) {
            Err(IconError::Archive(ZipError::UnsupportedArchive(reason))) => {
                debug!(archive = %archive.display(), reason, "falling back to central directory");
                self.scan_central_directory(File::open(archive)?, game_name)
            }
            other => other,
        }
    }

    fn scan_stream<R: Read>(
        &self,
        reader: &mut R,
        game_name: &str,
    ) -> Result<Option<RgbaImage>, IconError> {
        while let Some(mut entry) = zip::read::read_zipfile_from_stream(reader)? {
            if entry.is_dir() {
                continue;
            }
            if let Some(icon) = self.try_entry(&mut entry, game_name)? {
                return Ok(Some(icon));
            }
        }
        Ok(None)
    }

    fn scan_central_directory(
        &self,
        file: File,
        game_name: &str,
    ) -> Result<Option<RgbaImage>, IconError> {
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            if let Some(icon) = self.try_entry(&mut entry, game_name)? {
                return Ok(Some(icon));
            }
        }
        Ok(None)
    }

    /// Decodes `entry` if its path looks like an icon. Undecodable matches
    /// yield `None` so the caller keeps looking.
    fn try_entry<R: Read>(
        &self,
        entry: &mut ZipFile<'_, R>,
        game_name: &str,
    ) -> Result<Option<RgbaImage>, IconError> {
        let name = entry.name().to_lowercase();
        if !lookup::matches_archive_entry(&name, game_name) {
            return Ok(None);
        }

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        match self.decode(&bytes) {
            Ok(icon) => Ok(Some(icon)),
            Err(e) => {
                debug!(entry = %name, error = %e, "skipping undecodable archive icon");
                Ok(None)
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, IconError> {
        self.decodes.fetch_add(1, Ordering::Relaxed);
        decode_bounded(bytes, self.max_dimension)
    }
}
