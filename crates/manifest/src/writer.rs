//! Manifest file I/O.
//!
//! The manifest is pretty-printed with two-space indentation, keeps non-ASCII
//! text literal and has no trailing newline. Writes go to a temporary file in
//! the destination directory which then replaces the destination, so a failed
//! run leaves the previous manifest intact.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::collection::Manifest;
use crate::error::ManifestError;

/// Encode `manifest` exactly as it is stored on disk.
///
/// # Errors
///
/// Returns `ManifestError::Serialize` if encoding fails.
pub fn to_json_string(manifest: &Manifest) -> Result<String, ManifestError> {
    serde_json::to_string_pretty(manifest).map_err(ManifestError::Serialize)
}

/// Read and decode the manifest at `path`.
///
/// # Errors
///
/// `ReadManifest` when the file is missing or unreadable, `ParseManifest` when
/// it is not a manifest.
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError::ReadManifest {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ManifestError::ParseManifest {
        path: path.to_owned(),
        source,
    })
}

/// Replace the file at `path` with `manifest`.
///
/// An existing file keeps its permissions.
///
/// # Errors
///
/// `Serialize` if encoding fails, `WriteManifest` for any I/O failure. The
/// destination is only touched by the final rename.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let json = to_json_string(manifest)?;
    let write_err = |source: std::io::Error| ManifestError::WriteManifest {
        path: path.to_owned(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    if let Some(perms) = target_permissions(path) {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "manifest written");
    Ok(())
}

/// Permissions for the replacement file: the old file's, or world-readable.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::collection::{Collection, TrackEntry};
    use crate::metadata::CollectionInfo;
    use tempfile::TempDir;

    fn sample() -> Manifest {
        let info = CollectionInfo {
            title: "Fiesta Ñandú".into(),
            description: "día de \"fiesta\"".into(),
        };
        Manifest::new(vec![Collection::new(
            "fiesta",
            info,
            "songs",
            vec![TrackEntry::from("Olé")],
        )])
    }

    #[test]
    fn pretty_format_matches_player_file() {
        let expected = r#"{
  "folders": [
    {
      "name": "fiesta",
      "title": "Fiesta Ñandú",
      "description": "día de \"fiesta\"",
      "cover": "songs/fiesta/cover.jpeg",
      "songs": [
        "Olé"
      ]
    }
  ]
}"#;
        assert_eq!(to_json_string(&sample()).unwrap(), expected);
    }

    #[test]
    fn empty_manifest_format() {
        assert_eq!(
            to_json_string(&Manifest::default()).unwrap(),
            "{\n  \"folders\": []\n}"
        );
    }

    #[test]
    fn write_then_read_returns_same_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        write_manifest(&path, &sample()).unwrap();
        assert_eq!(read_manifest(&path).unwrap(), sample());
    }

    #[test]
    fn write_replaces_previous_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        fs::write(&path, "x".repeat(4096)).unwrap();
        write_manifest(&path, &Manifest::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, to_json_string(&Manifest::default()).unwrap());
    }

    #[test]
    fn write_leaves_no_temporary_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        write_manifest(&path, &sample()).unwrap();
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails_cleanly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("music-data.json");
        let err = write_manifest(&path, &sample()).unwrap_err();
        assert!(matches!(err, ManifestError::WriteManifest { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn read_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_manifest(&tmp.path().join("music-data.json")).unwrap_err();
        assert!(matches!(err, ManifestError::ReadManifest { .. }));
    }

    #[test]
    fn read_malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        for body in ["{", r#"{"folders": 3}"#, r#"{"folders": [{"name": "x"}]}"#] {
            fs::write(&path, body).unwrap();
            let err = read_manifest(&path).unwrap_err();
            assert!(matches!(err, ManifestError::ParseManifest { .. }), "{body}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn existing_permissions_are_kept() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        write_manifest(&path, &sample()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
