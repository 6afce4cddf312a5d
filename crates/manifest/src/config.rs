//! Manifest tooling configuration and constants
//!
//! File names, directory conventions and the archive.org endpoint used by both
//! stages. Callers should reference these constants rather than hardcoding
//! values.

/// Manifest file consumed by the web player.
pub const MANIFEST_FILE: &str = "music-data.json";

/// Directory holding one subfolder per collection.
pub const SONGS_DIR: &str = "songs";

/// Optional per-collection metadata descriptor.
pub const INFO_FILE: &str = "info.json";

/// Cover image expected inside each collection folder.
pub const COVER_FILE: &str = "cover.jpeg";

/// Extension (without the dot) of files listed as tracks. Case-sensitive.
pub const TRACK_EXTENSION: &str = "mp3";

/// archive.org endpoint serving the files of an item.
pub const ARCHIVE_DOWNLOAD_BASE: &str = "https://archive.org/download";

/// Item the published jukebox lives under.
pub const DEFAULT_ARCHIVE_ITEM_ID: &str = "non-stop-party-jukebox-2024";

/// Cover path advertised for collection `name`, relative to the web root.
///
/// ```
/// assert_eq!(manifest::config::cover_path("songs", "party"), "songs/party/cover.jpeg");
/// ```
pub fn cover_path(cover_root: &str, name: &str) -> String {
    let root = cover_root.trim_end_matches('/');
    if root.is_empty() {
        format!("{name}/{COVER_FILE}")
    } else {
        format!("{root}/{name}/{COVER_FILE}")
    }
}
