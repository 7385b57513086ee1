//! In-memory doubles for the capability ports.

use crate::domain::model::LogEntry;
use crate::domain::ports::{ChildProcess, FileSystem, Logger};
use crate::utils::error::{Result, ScriptError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

fn not_found(path: &Path) -> ScriptError {
    ScriptError::file(
        path,
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        ),
    )
}

/// Writes fail unless the parent directory was created first.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dirs(parent).await;
        }
        self.files.lock().await.insert(path, content.to_string());
        self
    }

    pub async fn get_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().await.get(path.as_ref()).cloned()
    }

    pub async fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.lock().await.contains(path.as_ref())
    }

    pub async fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().await.keys().cloned().collect()
    }

    async fn add_dirs(&self, path: &Path) {
        let mut dirs = self.dirs.lock().await;
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl FileSystem for MemoryFileSystem {
    async fn read_file(&self, path: &Path) -> Result<String> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let parent_exists = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.dirs.lock().await.contains(parent)
            }
            _ => true,
        };
        if !parent_exists {
            return Err(not_found(path));
        }
        self.files
            .lock()
            .await
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        let content = self.read_file(from).await?;
        self.write_file(to, &content).await
    }

    async fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = glob::Pattern::new(pattern).map_err(|e| ScriptError::GlobError {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        let files = self.files.lock().await;
        Ok(files
            .keys()
            .filter(|path| matcher.matches_path(path))
            .cloned()
            .collect())
    }

    async fn mkdir(&self, path: &Path) -> Result<()> {
        self.add_dirs(path).await;
        Ok(())
    }

    async fn remove_dir(&self, path: &Path) -> Result<()> {
        self.files.lock().await.retain(|p, _| !p.starts_with(path));
        self.dirs.lock().await.retain(|p| !p.starts_with(path));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Records every invocation; fails when the program name equals `fail_program`.
#[derive(Clone, Default)]
pub struct RecordingProcess {
    calls: Arc<Mutex<Vec<ExecCall>>>,
    fail_program: Option<String>,
}

impl RecordingProcess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(program: &str) -> Self {
        Self {
            fail_program: Some(program.to_string()),
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<ExecCall> {
        self.calls.lock().await.clone()
    }
}

impl ChildProcess for RecordingProcess {
    async fn exec(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        self.calls.lock().await.push(ExecCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });
        if self.fail_program.as_deref() == Some(program) {
            return Err(ScriptError::ProcessError {
                command: program.to_string(),
                message: "exit status: 2".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingLogger {
    entries: Arc<std::sync::Mutex<Vec<LogEntry>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.iter().map(|e| e.message.clone()).collect())
            .unwrap_or_default()
    }
}

impl Logger for RecordingLogger {
    fn write(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}
