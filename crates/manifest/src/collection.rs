//! Collection — the manifest data model shared by both stages.
//!
//! Field declaration order is the key order of the emitted JSON, so keep it in
//! sync with what the web player expects: `name, title, description, cover,
//! songs`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config;
use crate::metadata::CollectionInfo;

/// One element of a collection's `songs` array.
///
/// The builder emits bare names; the rewriter turns every entry into a
/// [`TrackRecord`]. Both shapes may appear when reading a manifest back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackEntry {
    /// Audio file base name, extension stripped.
    Name(String),
    /// File name paired with its download URL.
    Resolved(TrackRecord),
}

/// `{file, url}` form of a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Audio file base name, extension stripped.
    pub file: String,
    /// Download location; empty when a hand-edited record omitted it.
    #[serde(default)]
    pub url: String,
}

impl TrackEntry {
    /// Base name this entry refers to, whichever shape it has.
    pub fn file(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Resolved(record) => &record.file,
        }
    }

    /// Download URL, if the entry has been resolved.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Resolved(record) => Some(&record.url),
        }
    }
}

impl From<&str> for TrackEntry {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

/// A folder of songs; `folders[i]` in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Folder name on disk.
    pub name: String,
    /// Display title, defaults to `name`.
    pub title: String,
    /// Free-form description, defaults to empty.
    pub description: String,
    /// Cover image path relative to the web root. Never checked for existence.
    pub cover: String,
    /// Tracks in manifest order.
    pub songs: Vec<TrackEntry>,
    /// Keys outside the model, carried through a rewrite untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// Assemble a collection for folder `name` from its resolved metadata.
    pub fn new(name: &str, info: CollectionInfo, cover_root: &str, songs: Vec<TrackEntry>) -> Self {
        Self {
            name: name.to_owned(),
            title: info.title,
            description: info.description,
            cover: config::cover_path(cover_root, name),
            songs,
            extra: Map::new(),
        }
    }
}

/// The whole `music-data.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Collections in directory-name order.
    pub folders: Vec<Collection>,
    /// Keys outside the model, carried through a rewrite untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Wrap an ordered list of collections.
    pub fn new(folders: Vec<Collection>) -> Self {
        Self { folders, extra: Map::new() }
    }

    /// Total number of track entries across all collections.
    pub fn track_count(&self) -> usize {
        self.folders.iter().map(|c| c.songs.len()).sum()
    }

    /// First track of the first collection, used as a diagnostic sample.
    pub fn first_track(&self) -> Option<&TrackEntry> {
        self.folders.first()?.songs.first()
    }
}
