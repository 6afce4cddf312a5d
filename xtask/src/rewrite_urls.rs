//! xtask rewrite-urls — point every track in music-data.json at archive.org.
//!
//! Safe to run repeatedly: already rewritten entries keep their file name and
//! get their URL recomputed.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use manifest::{rewrite_file, ArchiveItem, RewriteSummary};

/// Entry point called from main.rs
pub fn run(manifest: &Path, archive_id: &str) -> Result<()> {
    let item = ArchiveItem::new(archive_id).context("Invalid --archive-id")?;
    let summary = run_rewrite(manifest, &item)?;

    println!("{}", format!("✓ {} updated successfully!", manifest.display()).green());
    println!("{}", format!("✓ All songs now point to: {}", item.base_url()).green());
    println!("{}", format!("✓ Total folders: {}", summary.folders).green());
    match summary.sample_url {
        Some(url) => println!("{}", format!("✓ Sample URL: {url}").green()),
        None => println!("{}", "  No tracks to sample".yellow()),
    }
    Ok(())
}

/// Rewrite `manifest` in place against `item`.
pub(crate) fn run_rewrite(manifest: &Path, item: &ArchiveItem) -> Result<RewriteSummary> {
    rewrite_file(manifest, item).with_context(|| format!("Failed to rewrite {}", manifest.display()))
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

    const PARTY: &str = r#"{
  "folders": [
    {
      "name": "party",
      "title": "Party Mix",
      "description": "",
      "cover": "songs/party/cover.jpeg",
      "songs": [
        "Track One"
      ]
    }
  ]
}"#;

    #[test]
    fn rewrite_produces_archive_records() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        fs::write(&path, PARTY).unwrap();

        let summary = run_rewrite(&path, &ArchiveItem::new("demo-id").unwrap()).unwrap();
        assert_eq!(summary.tracks, 1);

        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            v["folders"][0]["songs"],
            serde_json::json!([{
                "file": "Track One",
                "url": "https://archive.org/download/demo-id/Track%20One"
            }])
        );
    }

    #[test]
    fn run_rejects_bad_archive_id_before_touching_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        fs::write(&path, PARTY).unwrap();

        assert!(run(&path, "not/an/id").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), PARTY);
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = run_rewrite(
            &tmp.path().join("music-data.json"),
            &ArchiveItem::new("demo-id").unwrap(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to rewrite"));
    }

    #[test]
    fn empty_manifest_runs_without_sample() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("music-data.json");
        fs::write(&path, r#"{"folders": []}"#).unwrap();
        run(&path, "demo-id").unwrap();
    }
}
