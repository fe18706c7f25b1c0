//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Copy a single file, with nice error messages.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))
}

/// Remove a single file, with nice error messages.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("failed to remove file: {}", path.display()))
}

/// List regular files directly inside `dir` whose extension matches `ext`,
/// ignoring case. The result is sorted.
///
/// Only file names are matched against the pattern, so the directory may be
/// any path the OS accepts, including `\\?\` verbatim paths from
/// canonicalization on Windows. A missing directory yields no files.
pub fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = Pattern::new(&format!("*.{}", Pattern::escape(ext)))
        .with_context(|| format!("invalid extension pattern: {}", ext))?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?;

    let mut results = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("failed to read entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let name = entry.file_name();
        if !pattern.matches_with(&name.to_string_lossy(), options) {
            continue;
        }

        let path = entry.path();
        if path.is_file() {
            results.push(path);
        }
    }

    results.sort();
    Ok(results)
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
