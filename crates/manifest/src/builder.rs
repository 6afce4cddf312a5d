//! Builder — turn a collections root into a [`Manifest`].
//!
//! ```text
//! songs/
//!   party/            -> { "name": "party", "title": <info.json or "party">,
//!     info.json             "description": <info.json or "">,
//!     Track One.mp3         "cover": "songs/party/cover.jpeg",
//!     cover.jpeg            "songs": ["Track One"] }
//!   empty/            -> omitted, no tracks
//! ```

use std::path::Path;

use crate::collection::{Collection, Manifest, TrackEntry};
use crate::config;
use crate::error::ManifestError;
use crate::metadata::CollectionInfo;
use crate::scanner::{CollectionDir, Scanner};

/// Per-run settings of the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Prefix of every `cover` path, as the web player sees the collections root.
    pub cover_root: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            cover_root: config::SONGS_DIR.to_owned(),
        }
    }
}

/// Scan `root` and describe every collection that holds at least one track.
///
/// # Errors
///
/// Fails only when `root` itself cannot be listed. Problems inside a single
/// collection never abort the scan.
pub fn build_manifest(root: &Path, options: &BuildOptions) -> Result<Manifest, ManifestError> {
    let folders: Vec<Collection> = Scanner::collection_dirs(root)?
        .iter()
        .filter_map(|dir| build_collection(dir, options))
        .collect();

    tracing::info!(
        root = %root.display(),
        folders = folders.len(),
        "manifest built"
    );
    Ok(Manifest::new(folders))
}

/// Describe one collection folder, or `None` when it has no tracks.
pub fn build_collection(dir: &CollectionDir, options: &BuildOptions) -> Option<Collection> {
    let songs = match Scanner::track_names(&dir.path) {
        Ok(songs) => songs,
        Err(e) => {
            tracing::warn!(collection = %dir.name, error = %e, "skipping unreadable collection");
            return None;
        }
    };
    if songs.is_empty() {
        tracing::debug!(collection = %dir.name, "no tracks, omitted");
        return None;
    }

    let info = CollectionInfo::load_or_default(&dir.path.join(config::INFO_FILE), &dir.name);
    let songs = songs.into_iter().map(TrackEntry::Name).collect();
    Some(Collection::new(&dir.name, info, &options.cover_root, songs))
}
