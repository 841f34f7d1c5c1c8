//! Domain types for scanned games.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

const URI_SCHEME: &str = "file://";

/// Stable handle identifying a filesystem entry across accesses.
///
/// Two refs are equal when they point at the same path. The stringified
/// form (`file://…`) is what caches and preferences key on. It is lossless:
/// `%` and bytes that are not UTF-8 are written as `%XX`, and
/// [`EntryRef::parse`] reverses that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryRef {
    path: PathBuf,
}

impl EntryRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses a stored identity string, accepting both `file://` URIs and
    /// bare paths.
    pub fn parse(value: &str) -> Self {
        match value.strip_prefix(URI_SCHEME) {
            Some(encoded) => Self::new(decode_path(encoded)),
            None => Self::new(value),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stringified identity used as a cache key.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Re-checks that the entry is still present on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Final path component, lossily decoded.
    pub fn file_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_SCHEME}{}", encode_path(&self.path))
    }
}

fn encode_path(path: &Path) -> String {
    let mut out = String::new();
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        for chunk in path.as_os_str().as_bytes().utf8_chunks() {
            out.push_str(&chunk.valid().replace('%', "%25"));
            for byte in chunk.invalid() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    #[cfg(not(unix))]
    {
        out.push_str(&path.to_string_lossy().replace('%', "%25"));
    }
    out
}

fn decode_path(encoded: &str) -> PathBuf {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| encoded.get(i + 1..i + 3))
            .flatten()
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStringExt;
        PathBuf::from(std::ffi::OsString::from_vec(out))
    }
    #[cfg(not(unix))]
    {
        PathBuf::from(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Serialize for EntryRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a game is packaged on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameKind {
    /// Unpacked folder with `main.lua` at its top level.
    Directory,
    /// `.love` ZIP archive.
    Archive,
}

/// A game found by the scanner.
///
/// Immutable once built; a rescan produces fresh records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    entry: EntryRef,
    name: String,
    kind: GameKind,
}

impl GameRecord {
    pub fn new(entry: EntryRef, name: impl Into<String>, kind: GameKind) -> Self {
        Self {
            entry,
            name: name.into(),
            kind,
        }
    }

    pub fn entry(&self) -> &EntryRef {
        &self.entry
    }

    /// Display name shown in the grid and matched by filters.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind == GameKind::Directory
    }
}
