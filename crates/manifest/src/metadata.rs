//! Metadata — the optional `info.json` descriptor inside a collection folder.
//!
//! Expected shape is `{"title": string, "description": string}` with both keys
//! optional. Parsing reports every failure as a [`MetadataError`]; the builder
//! always maps those to [`CollectionInfo::fallback`], so a broken descriptor
//! only ever costs a collection its custom title.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why an `info.json` could not be used.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Missing or unreadable.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Not a JSON object, or a field has the wrong type.
    #[error("malformed {}: {source}", .path.display())]
    Parse {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

impl MetadataError {
    /// `true` when the descriptor simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Fields as written in `info.json`. Absent and `null` are both `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CollectionMetadata {
    /// Display title override.
    pub title: Option<String>,
    /// Description text.
    pub description: Option<String>,
}

impl CollectionMetadata {
    /// Fill missing fields with the defaults for folder `name`.
    pub fn resolve(self, name: &str) -> CollectionInfo {
        CollectionInfo {
            title: self.title.unwrap_or_else(|| name.to_owned()),
            description: self.description.unwrap_or_default(),
        }
    }
}

/// Resolved title and description of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    /// Display title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
}

impl CollectionInfo {
    /// Defaults used when no usable descriptor exists.
    pub fn fallback(name: &str) -> Self {
        CollectionMetadata::default().resolve(name)
    }

    /// Read the descriptor at `path`, falling back to defaults on any error.
    pub fn load_or_default(path: &Path, name: &str) -> Self {
        match parse_metadata(path) {
            Ok(meta) => meta.resolve(name),
            Err(e) if e.is_missing() => Self::fallback(name),
            Err(e) => {
                tracing::debug!(collection = name, error = %e, "ignoring collection metadata");
                Self::fallback(name)
            }
        }
    }
}

/// Parse the `info.json` at `path`.
///
/// The top-level value must be a JSON object; arrays and scalars are rejected
/// even though serde would otherwise accept a sequence for a struct.
pub fn parse_metadata(path: &Path) -> Result<CollectionMetadata, MetadataError> {
    let text = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_owned(),
        source,
    })?;
    let parse_err = |source: serde_json::Error| MetadataError::Parse {
        path: path.to_owned(),
        source,
    };
    let object: Map<String, Value> = serde_json::from_str(&text).map_err(parse_err)?;
    serde_json::from_value(Value::Object(object)).map_err(parse_err)
}
