//! archive.org download URLs.
//!
//! A track `file` of item `id` is served from
//! `https://archive.org/download/<id>/<percent-encoded file>`. Encoding is
//! `urlencoding::encode`: everything except `A-Z a-z 0-9 - _ . ~` is escaped
//! as UTF-8 `%XX`.

use crate::collection::TrackRecord;
use crate::config::{ARCHIVE_DOWNLOAD_BASE, DEFAULT_ARCHIVE_ITEM_ID};
use crate::error::ManifestError;

/// An archive.org item the tracks are uploaded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveItem {
    id: String,
    base_url: String,
}

impl ArchiveItem {
    /// Validate `id` and precompute the item's download base.
    ///
    /// # Errors
    ///
    /// `InvalidArchiveId` when `id` is empty or uses anything outside
    /// `A-Z a-z 0-9 . _ -`, the characters archive.org allows in identifiers.
    /// Such an id is always a single, unescaped path segment.
    pub fn new(id: &str) -> Result<Self, ManifestError> {
        let reason = if id.is_empty() {
            Some("empty")
        } else if !id.chars().all(is_id_char) {
            Some("only A-Z a-z 0-9 . _ - are allowed")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ManifestError::InvalidArchiveId {
                id: id.to_owned(),
                reason,
            });
        }
        Ok(Self {
            id: id.to_owned(),
            base_url: format!("{ARCHIVE_DOWNLOAD_BASE}/{id}"),
        })
    }

    /// Item identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `https://archive.org/download/<id>`, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download URL of `file` inside this item.
    pub fn track_url(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(file))
    }

    /// Pair `file` with its download URL.
    pub fn resolve(&self, file: String) -> TrackRecord {
        let url = self.track_url(&file);
        TrackRecord { file, url }
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

impl Default for ArchiveItem {
    fn default() -> Self {
        Self {
            id: DEFAULT_ARCHIVE_ITEM_ID.to_owned(),
            base_url: format!("{ARCHIVE_DOWNLOAD_BASE}/{DEFAULT_ARCHIVE_ITEM_ID}"),
        }
    }
}
