//! Scanner — lists collection folders and the tracks inside them.
//!
//! Only the immediate children of the collections root are considered, and
//! only the immediate children of each collection. Both listings come back in
//! byte-wise name order, which for UTF-8 names is code-point order.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::TRACK_EXTENSION;
use crate::error::ManifestError;

/// A subdirectory of the collections root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDir {
    /// Folder name, used as the collection name.
    pub name: String,
    /// Full path of the folder.
    pub path: PathBuf,
}

/// Stateless helper for directory listing and extension filtering.
pub struct Scanner;

impl Scanner {
    /// Returns `true` when `ext` marks a track. The comparison is case-sensitive.
    pub fn is_track_extension(ext: &str) -> bool {
        ext == TRACK_EXTENSION
    }

    /// Track name for `path`: the file stem, if the extension is a track one.
    pub fn track_name(path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?;
        if !Self::is_track_extension(ext) {
            return None;
        }
        path.file_stem()?.to_str()
    }

    /// Immediate subdirectories of `root`, sorted by name.
    ///
    /// Symlinks are followed. Entries that cannot be inspected, or whose names
    /// are not UTF-8, are skipped with a warning. Failing to list `root` itself
    /// is fatal.
    pub fn collection_dirs(root: &Path) -> Result<Vec<CollectionDir>, ManifestError> {
        let meta = fs::metadata(root).map_err(|source| ManifestError::ReadRoot {
            path: root.to_owned(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(ManifestError::NotADirectory {
                path: root.to_owned(),
            });
        }

        let mut dirs = Vec::new();
        for entry in listing(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
                Err(source) => {
                    return Err(ManifestError::WalkRoot {
                        path: root.to_owned(),
                        source,
                    })
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 folder name");
                continue;
            };
            dirs.push(CollectionDir {
                name: name.to_owned(),
                path: entry.path().to_owned(),
            });
        }
        Ok(dirs)
    }

    /// Track names directly inside `dir`, sorted.
    ///
    /// Sorting happens on the stems rather than the file names, so
    /// `"Track"` comes before `"Track 1"`. Children that cannot be inspected
    /// (dangling links, link loops) and tracks with non UTF-8 names are skipped
    /// with a warning; only failing to list `dir` itself is an error.
    pub fn track_names(dir: &Path) -> Result<Vec<String>, walkdir::Error> {
        let mut names = Vec::new();
        for entry in listing(dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
                Err(e) => return Err(e),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if let Some(name) = Self::track_name(path) {
                names.push(name.to_owned());
            } else if path.extension() == Some(OsStr::new(TRACK_EXTENSION)) {
                tracing::warn!(path = %path.display(), "skipping non UTF-8 track name");
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Children of `dir` in name order, following symlinks.
fn listing(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn recognises_mp3() {
        assert!(Scanner::is_track_extension("mp3"));
    }

    #[test]
    fn extension_is_case_sensitive() {
        assert!(!Scanner::is_track_extension("MP3"));
        assert!(!Scanner::is_track_extension("Mp3"));
    }

    #[test]
    fn rejects_other_audio_and_empty() {
        assert!(!Scanner::is_track_extension("flac"));
        assert!(!Scanner::is_track_extension("wav"));
        assert!(!Scanner::is_track_extension(""));
    }

    #[test]
    fn track_name_strips_only_last_extension() {
        assert_eq!(Scanner::track_name(Path::new("a/b/Mix v1.2.mp3")), Some("Mix v1.2"));
        assert_eq!(Scanner::track_name(Path::new("a/cover.jpeg")), None);
        assert_eq!(Scanner::track_name(Path::new("a/.mp3")), None);
    }

    #[test]
    fn collection_dirs_skips_files_and_sorts() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta", "Alpha", "beta"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        fs::write(tmp.path().join("readme.txt"), b"x").unwrap();

        let dirs = Scanner::collection_dirs(tmp.path()).unwrap();
        let names: Vec<_> = dirs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "zeta"]);
        assert_eq!(dirs[0].path, tmp.path().join("Alpha"));
    }

    #[test]
    fn collection_dirs_missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = Scanner::collection_dirs(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ManifestError::ReadRoot { .. }));
    }

    #[test]
    fn collection_dirs_file_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("songs");
        fs::write(&file, b"").unwrap();
        let err = Scanner::collection_dirs(&file).unwrap_err();
        assert!(matches!(err, ManifestError::NotADirectory { .. }));
    }

    #[test]
    fn track_names_sorted_by_stem() {
        let tmp = TempDir::new().unwrap();
        for name in ["Track 1.mp3", "Track.mp3", "b.mp3", "A.mp3", "cover.jpeg", "x.MP3"] {
            fs::write(tmp.path().join(name), b"FAKE").unwrap();
        }
        fs::create_dir(tmp.path().join("nested.mp3")).unwrap();

        let names = Scanner::track_names(tmp.path()).unwrap();
        assert_eq!(names, ["A", "Track", "Track 1", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn track_names_skip_dangling_links() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Track One.mp3"), b"FAKE").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("old-notes.txt"))
            .unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone.mp3"), tmp.path().join("lost.mp3"))
            .unwrap();

        assert_eq!(Scanner::track_names(tmp.path()).unwrap(), ["Track One"]);
    }

    #[cfg(unix)]
    #[test]
    fn track_names_skip_link_loops() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Track One.mp3"), b"FAKE").unwrap();
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("self")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("b.mp3"), tmp.path().join("a.mp3")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("a.mp3"), tmp.path().join("b.mp3")).unwrap();

        assert_eq!(Scanner::track_names(tmp.path()).unwrap(), ["Track One"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn track_names_skip_non_utf8_names() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ok.mp3"), b"FAKE").unwrap();
        let bad = OsString::from_vec(b"bad\xff.mp3".to_vec());
        fs::write(tmp.path().join(bad), b"FAKE").unwrap();

        assert_eq!(Scanner::track_names(tmp.path()).unwrap(), ["ok"]);
    }

    #[test]
    fn track_names_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(Scanner::track_names(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn track_names_ignores_subfolders() {
        let tmp = TempDir::new().unwrap();
        let deep = tmp.path().join("disc2");
        fs::create_dir(&deep).unwrap();
        fs::write(deep.join("hidden.mp3"), b"FAKE").unwrap();
        assert!(Scanner::track_names(tmp.path()).unwrap().is_empty());
    }
}
