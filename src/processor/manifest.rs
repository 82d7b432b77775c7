//! Container manifest
//!
//! One container path per line, sorted. Downstream converters read this
//! instead of globbing the output directory.

use crate::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Render the manifest body for a set of containers
pub fn render_manifest(paths: &[PathBuf]) -> String {
    let mut lines: Vec<String> = paths
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    lines.sort();
    lines.dedup();

    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    body
}

/// Write the manifest atomically, replacing any previous one
pub fn write_manifest(manifest: &Path, paths: &[PathBuf]) -> Result<()> {
    let dir = manifest
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::io(format!("Failed to create {}", dir.display()), e))?;

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io("Failed to create temporary manifest", e))?;
    temp.write_all(render_manifest(paths).as_bytes())
        .map_err(|e| Error::io("Failed to write manifest", e))?;
    temp.persist(manifest).map_err(|e| {
        Error::io(
            format!("Failed to move manifest into {}", manifest.display()),
            e.error,
        )
    })?;

    info!("Listed {} containers in {}", paths.len(), manifest.display());
    Ok(())
}

/// Read a manifest back into paths
pub fn read_manifest(manifest: &Path) -> Result<Vec<PathBuf>> {
    let body = std::fs::read_to_string(manifest)
        .map_err(|e| Error::io(format!("Failed to read {}", manifest.display()), e))?;
    Ok(body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(PathBuf::from)
        .collect())
}
