//! Static asset directory resolution.
//!
//! The app may run from a source checkout (working directory is meaningful) or as a
//! packaged single-file executable (only the executable's own directory or an
//! argv-derived path is meaningful). A fixed-priority candidate scan makes both
//! deployment modes work without separate code paths.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The file whose presence confirms a candidate is the front-end root.
pub const ASSET_MARKER: &str = "index.html";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no asset directory found: none of the candidate directories contain index.html")]
    NoAssetDirectory { candidates: Vec<PathBuf> },
}

/// Candidate base directories, in priority order: current working directory, the
/// executable's directory, the directory of the first command-line argument.
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }

    if let Some(arg) = std::env::args_os().nth(1) {
        if let Some(dir) = Path::new(&arg).parent() {
            if !dir.as_os_str().is_empty() {
                candidates.push(dir.to_path_buf());
            }
        }
    }

    candidates
}

/// Pick the first candidate containing the marker file. Chosen once at startup,
/// before the listener binds, and never reassigned.
pub fn resolve_asset_dir(candidates: &[PathBuf]) -> Result<PathBuf, AssetError> {
    for (index, dir) in candidates.iter().enumerate() {
        tracing::debug!("testing asset directory {}: {}", index, dir.display());
        if dir.join(ASSET_MARKER).is_file() {
            tracing::info!("serving static files from {}", dir.display());
            return Ok(dir.clone());
        }
    }

    Err(AssetError::NoAssetDirectory {
        candidates: candidates.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_picks_first_match_in_order() {
        let root = tempfile::tempdir().unwrap();
        let first = root.path().join("a");
        let second = root.path().join("b");
        let third = root.path().join("c");
        for dir in [&first, &second, &third] {
            std::fs::create_dir(dir).unwrap();
        }
        std::fs::write(second.join(ASSET_MARKER), "<html></html>").unwrap();
        std::fs::write(third.join(ASSET_MARKER), "<html></html>").unwrap();

        let candidates = vec![first, second.clone(), third];
        assert_eq!(resolve_asset_dir(&candidates).unwrap(), second);
    }

    #[test]
    fn test_resolve_requires_marker_file_not_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("assets");
        std::fs::create_dir_all(dir.join(ASSET_MARKER)).unwrap();

        assert!(resolve_asset_dir(&[dir]).is_err());
    }

    #[test]
    fn test_resolve_fails_when_no_candidate_matches() {
        let root = tempfile::tempdir().unwrap();
        let candidates = vec![root.path().join("x"), root.path().join("y")];

        let err = resolve_asset_dir(&candidates).unwrap_err();
        assert!(err.to_string().contains("no asset directory found"));
    }

    #[test]
    fn test_candidate_dirs_starts_with_cwd() {
        let candidates = candidate_dirs();
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0], std::env::current_dir().unwrap());
    }
}
