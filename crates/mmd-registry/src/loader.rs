//! Loading extra diagram sources from a local directory.
//!
//! Every `*.mmd` file directly inside the directory becomes one entry: the
//! file stem is the key, the file content (unmodified) is the source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::registry::{DiagramRegistry, is_valid_key};

/// File extension of diagram source files.
const DIAGRAM_EXTENSION: &str = "mmd";

/// Error loading diagram sources from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Directory or file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File stem is not a plain identifier.
    #[error("Invalid diagram key '{key}' derived from {}", path.display())]
    InvalidKey { key: String, path: PathBuf },
}

/// Load all `*.mmd` files in `dir` into a registry.
///
/// The scan is not recursive. Files are read in key order so duplicate
/// handling is deterministic.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the directory or a file cannot be read, and
/// [`LoadError::InvalidKey`] if a file stem is not a valid diagram key.
pub fn load_dir(dir: &Path) -> Result<DiagramRegistry, LoadError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LoadError::Io { path, source }
    };

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let entry = entry.map_err(io_err(dir))?;
        let path = entry.path();
        if !entry.file_type().is_ok_and(|t| t.is_file())
            || path.extension().and_then(|e| e.to_str()) != Some(DIAGRAM_EXTENSION)
        {
            continue;
        }
        let key = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_valid_key(&key) {
            return Err(LoadError::InvalidKey { key, path });
        }
        files.push((key, path));
    }
    files.sort();

    let mut entries = Vec::with_capacity(files.len());
    for (key, path) in files {
        let source = fs::read_to_string(&path).map_err(io_err(&path))?;
        entries.push((key, source));
    }

    tracing::debug!(dir = %dir.display(), count = entries.len(), "Loaded diagram sources");
    Ok(DiagramRegistry::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_dir_reads_mmd_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alpha.mmd"), "\ngraph TD\n  A-->B\n").unwrap();
        fs::write(dir.path().join("beta.mmd"), "sequenceDiagram\n").unwrap();

        let registry = load_dir(dir.path()).unwrap();

        assert_eq!(registry.keys(), vec!["alpha", "beta"]);
        assert_eq!(registry.lookup("alpha"), Some("\ngraph TD\n  A-->B\n"));
        assert_eq!(registry.lookup("beta"), Some("sequenceDiagram\n"));
    }

    #[test]
    fn test_load_dir_ignores_other_files_and_subdirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alpha.mmd"), "A").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.mmd")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/gamma.mmd"), "G").unwrap();

        let registry = load_dir(dir.path()).unwrap();

        assert_eq!(registry.keys(), vec!["alpha"]);
    }

    #[test]
    fn test_load_dir_preserves_whitespace() {
        let dir = TempDir::new().unwrap();
        let source = "\nflowchart TD\n    subgraph  \n    \r\n\ttab\n";
        fs::write(dir.path().join("ws.mmd"), source).unwrap();

        let registry = load_dir(dir.path()).unwrap();

        assert_eq!(registry.lookup("ws"), Some(source));
    }

    #[test]
    fn test_load_dir_invalid_key() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad key.mmd"), "A").unwrap();

        let err = load_dir(dir.path()).unwrap_err();

        assert!(
            matches!(err, LoadError::InvalidKey { ref key, .. } if key == "bad key"),
            "Expected InvalidKey, got {err:?}"
        );
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = load_dir(&missing).unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_load_dir_empty() {
        let dir = TempDir::new().unwrap();
        let registry = load_dir(dir.path()).unwrap();
        assert!(registry.is_empty());
    }
}
