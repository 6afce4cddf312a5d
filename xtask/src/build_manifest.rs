//! xtask build-manifest — scan the collections folder and write music-data.json.
//!
//! Each subfolder holding at least one `.mp3` becomes a collection. Titles and
//! descriptions come from an optional `info.json`; a broken one is ignored.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use manifest::{build_manifest, write_manifest, BuildOptions, Manifest};

/// Entry point called from main.rs
pub fn run(songs_dir: &Path, output: &Path, cover_root: String) -> Result<()> {
    println!("Scanning: {}", songs_dir.display());
    let manifest = run_build(songs_dir, output, cover_root)?;

    println!();
    println!(
        "{}",
        format!(
            "✓ Created {} with {} folders",
            output.display(),
            manifest.folders.len()
        )
        .green()
        .bold()
    );
    Ok(())
}

/// Build the manifest for `songs_dir` and write it to `output`.
pub(crate) fn run_build(songs_dir: &Path, output: &Path, cover_root: String) -> Result<Manifest> {
    let options = BuildOptions { cover_root };
    let manifest = build_manifest(songs_dir, &options)
        .with_context(|| format!("Failed to scan {}", songs_dir.display()))?;

    for collection in &manifest.folders {
        println!(
            "{}",
            format!("✓ {}: {} songs", collection.name, collection.songs.len()).green()
        );
    }

    write_manifest(output, &manifest)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(manifest)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_fake_jukebox(dir: &TempDir) {
        let party = dir.path().join("songs").join("party");
        fs::create_dir_all(&party).unwrap();
        fs::write(party.join("Track One.mp3"), b"FAKE").unwrap();
        fs::write(party.join("info.json"), r#"{"title":"Party Mix"}"#).unwrap();

        let chill = dir.path().join("songs").join("chill");
        fs::create_dir_all(&chill).unwrap();
        fs::write(chill.join("Drift.mp3"), b"FAKE").unwrap();

        let art = dir.path().join("songs").join("art");
        fs::create_dir_all(&art).unwrap();
        fs::write(art.join("cover.jpeg"), b"FAKE").unwrap();
    }

    #[test]
    fn build_writes_manifest_file() {
        let tmp = TempDir::new().unwrap();
        create_fake_jukebox(&tmp);
        let out = tmp.path().join("music-data.json");
        run_build(&tmp.path().join("songs"), &out, "songs".into()).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn build_skips_folders_without_tracks() {
        let tmp = TempDir::new().unwrap();
        create_fake_jukebox(&tmp);
        let out = tmp.path().join("music-data.json");
        let manifest = run_build(&tmp.path().join("songs"), &out, "songs".into()).unwrap();

        let names: Vec<_> = manifest.folders.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["chill", "party"]);
    }

    #[test]
    fn build_output_matches_documented_shape() {
        let tmp = TempDir::new().unwrap();
        create_fake_jukebox(&tmp);
        let out = tmp.path().join("music-data.json");
        run_build(&tmp.path().join("songs"), &out, "songs".into()).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            v["folders"][1],
            serde_json::json!({
                "name": "party",
                "title": "Party Mix",
                "description": "",
                "cover": "songs/party/cover.jpeg",
                "songs": ["Track One"]
            })
        );
    }

    #[test]
    fn missing_songs_dir_fails_and_keeps_old_manifest() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("music-data.json");
        fs::write(&out, "previous").unwrap();

        let err = run_build(&tmp.path().join("songs"), &out, "songs".into()).unwrap_err();
        assert!(err.to_string().contains("Failed to scan"));
        assert_eq!(fs::read_to_string(&out).unwrap(), "previous");
    }
}
