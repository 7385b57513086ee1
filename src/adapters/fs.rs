use crate::domain::ports::FileSystem;
use crate::utils::error::{Result, ScriptError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// `FileSystem` backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    async fn read_file(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScriptError::file(path, e))
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| ScriptError::file(path, e))
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        tokio::fs::copy(from, to)
            .await
            .map_err(|e| ScriptError::file(from, e))?;
        Ok(())
    }

    async fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let owned = pattern.to_string();
        tokio::task::spawn_blocking(move || walk_glob(&owned))
            .await
            .map_err(|e| ScriptError::GlobError {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?
    }

    async fn mkdir(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| ScriptError::file(path, e))
    }

    async fn remove_dir(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScriptError::file(path, e)),
        }
    }
}

/// Directory walk plus `is_file` checks; blocking, so run off the async thread.
fn walk_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| ScriptError::GlobError {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ScriptError::GlobError {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_glob_matches_files_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("src/nested")).unwrap();
        std::fs::write(root.join("src/b.ts"), "").unwrap();
        std::fs::write(root.join("src/a.ts"), "").unwrap();
        std::fs::write(root.join("src/nested/c.ts"), "").unwrap();
        std::fs::create_dir_all(root.join("src/dir.ts")).unwrap();

        let fs = LocalFileSystem::new();
        let pattern = format!("{}/src/**/*.ts", root.display());
        let mut paths = fs.glob(&pattern).await.unwrap();
        paths.sort();

        assert_eq!(
            paths,
            vec![
                root.join("src/a.ts"),
                root.join("src/b.ts"),
                root.join("src/nested/c.ts"),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_glob_pattern() {
        let fs = LocalFileSystem::new();
        let result = fs.glob("src/***/x").await;
        assert!(matches!(result, Err(ScriptError::GlobError { .. })));
    }

    #[tokio::test]
    async fn test_remove_missing_dir_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();
        assert!(fs.remove_dir(&temp_dir.path().join("nope")).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_missing_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.js");
        let fs = LocalFileSystem::new();

        let err = fs.read_file(&missing).await.unwrap_err();
        assert!(err.to_string().contains("missing.js"));
    }
}
