//! Rewriter — point every track of a manifest at its archive.org download.
//!
//! Entries that are already `{file, url}` records keep their `file` and get a
//! freshly computed `url`, so rewriting is idempotent.

use std::path::Path;

use crate::archive::ArchiveItem;
use crate::collection::{Manifest, TrackEntry, TrackRecord};
use crate::error::ManifestError;
use crate::writer;

/// What a rewrite touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Number of collections.
    pub folders: usize,
    /// Number of tracks rewritten.
    pub tracks: usize,
    /// URL of the first collection's first track, when there is one.
    pub sample_url: Option<String>,
}

/// Replace every entry of `manifest` with a record pointing into `item`.
pub fn rewrite_manifest(manifest: &mut Manifest, item: &ArchiveItem) -> RewriteSummary {
    for collection in &mut manifest.folders {
        let songs = std::mem::take(&mut collection.songs);
        collection.songs = songs
            .into_iter()
            .map(|entry| TrackEntry::Resolved(resolve_entry(entry, item)))
            .collect();
    }

    RewriteSummary {
        folders: manifest.folders.len(),
        tracks: manifest.track_count(),
        sample_url: manifest
            .first_track()
            .and_then(TrackEntry::url)
            .map(str::to_owned),
    }
}

/// Record for one entry. A resolved entry contributes its `file`, never its
/// old `url`.
pub fn resolve_entry(entry: TrackEntry, item: &ArchiveItem) -> TrackRecord {
    let file = match entry {
        TrackEntry::Name(name) => name,
        TrackEntry::Resolved(record) => record.file,
    };
    item.resolve(file)
}

/// Load the manifest at `path`, rewrite it and store it back in place.
///
/// # Errors
///
/// Fails when the manifest is missing, malformed, or cannot be written. The
/// file is left untouched in all of those cases.
pub fn rewrite_file(path: &Path, item: &ArchiveItem) -> Result<RewriteSummary, ManifestError> {
    let mut manifest = writer::read_manifest(path)?;
    let summary = rewrite_manifest(&mut manifest, item);
    writer::write_manifest(path, &manifest)?;

    tracing::info!(
        path = %path.display(),
        item = item.id(),
        tracks = summary.tracks,
        "manifest rewritten"
    );
    Ok(summary)
}
