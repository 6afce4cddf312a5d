//! Jukebox manifest — describe a folder of music collections as JSON and point
//! its tracks at archive.org.
//!
//! # Modules
//!
//! - [`collection`] — `Manifest`, `Collection` and `TrackEntry` records
//! - [`metadata`] — optional `info.json` descriptor with default fallback
//! - [`scanner`] — collection folder listing and track extension filtering
//! - [`builder`] — collections root → `Manifest`
//! - [`archive`] — archive.org download URL construction
//! - [`rewriter`] — names → `{file, url}` records, idempotent
//! - [`writer`] — manifest file read and atomic write
//! - [`config`] — file names, directory conventions, default archive item

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code

pub mod archive;
pub mod builder;
pub mod collection;
pub mod config;
pub mod error;
pub mod metadata;
pub mod rewriter;
pub mod scanner;
pub mod writer;

// Top-level re-exports for convenience
pub use archive::ArchiveItem;
pub use builder::{build_manifest, BuildOptions};
pub use collection::{Collection, Manifest, TrackEntry, TrackRecord};
pub use error::ManifestError;
pub use metadata::{parse_metadata, CollectionInfo, MetadataError};
pub use rewriter::{rewrite_file, rewrite_manifest, RewriteSummary};
pub use scanner::{CollectionDir, Scanner};
pub use writer::{read_manifest, write_manifest};
