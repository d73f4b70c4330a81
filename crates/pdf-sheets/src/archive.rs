//! ZIP archive input
//!
//! A batch may arrive as a `.zip` of PDF files. The archive is unpacked into
//! a temporary directory that is removed when the returned handle drops.

use crate::constants::ZIP_EXTENSION;
use crate::types::*;
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// Whether a path looks like a ZIP archive
pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ZIP_EXTENSION))
}

/// Unpack an archive into a fresh temporary directory
pub async fn unpack_archive(path: impl AsRef<Path>) -> Result<TempDir> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir()?;
        let extracted = extract_zip(&path, dir.path())?;
        info!(
            "Unpacked {} files from {}",
            extracted.len(),
            path.display()
        );
        Ok::<_, SheetsError>(dir)
    })
    .await?
}

/// Extract every file of a ZIP archive under `dest`
///
/// Returns the paths written. Entries whose names escape `dest` are skipped;
/// encrypted entries fail the whole extraction.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        // by_index refuses encrypted entries before they can be inspected
        {
            let raw = archive.by_index_raw(i)?;
            if raw.encrypted() {
                return Err(SheetsError::Archive(format!(
                    "{} is password-protected",
                    raw.name()
                )));
            }
        }

        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let Some(relative) = sanitize_path(entry.name()) else {
            warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };

        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        std::io::copy(&mut entry, &mut out)?;
        written.push(target);
    }

    Ok(written)
}

/// Keep only the normal components of an archive entry name
///
/// Drops `..`, `.`, roots and drive prefixes; `None` if nothing is left.
fn sanitize_path(name: &str) -> Option<PathBuf> {
    let sanitized: PathBuf = Path::new(name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    if sanitized.as_os_str().is_empty() {
        None
    } else {
        Some(sanitized)
    }
}
