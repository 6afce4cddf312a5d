//! Fatal errors of the build and rewrite stages.
//!
//! Anything recoverable (a broken `info.json`, an unreadable collection folder)
//! is handled where it happens and never becomes a [`ManifestError`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A condition that aborts a stage without touching the manifest on disk.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The collections root is missing or cannot be inspected.
    #[error("cannot access collections root {}", .path.display())]
    ReadRoot {
        /// Collections root.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The collections root exists but is not a directory.
    #[error("collections root {} is not a directory", .path.display())]
    NotADirectory {
        /// Collections root.
        path: PathBuf,
    },
    /// Listing the collections root failed part-way.
    #[error("cannot enumerate collections root {}", .path.display())]
    WalkRoot {
        /// Collections root.
        path: PathBuf,
        /// Underlying traversal failure.
        #[source]
        source: walkdir::Error,
    },
    /// The manifest file is missing or unreadable.
    #[error("cannot read manifest {}", .path.display())]
    ReadManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The manifest file does not match the expected shape.
    #[error("malformed manifest {}", .path.display())]
    ParseManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory manifest could not be encoded.
    #[error("cannot encode manifest")]
    Serialize(#[source] serde_json::Error),
    /// Writing or replacing the manifest file failed.
    #[error("cannot write manifest {}", .path.display())]
    WriteManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The archive item identifier cannot form a download URL.
    #[error("invalid archive item id {id:?}: {reason}")]
    InvalidArchiveId {
        /// Identifier as given.
        id: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}
