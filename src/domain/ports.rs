use crate::domain::model::{LogEntry, LogLevel};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait FileSystem: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_file(
        &self,
        path: &Path,
        content: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn copy_file(
        &self,
        from: &Path,
        to: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Matching paths, in the order the pattern expansion yields them.
    fn glob(&self, pattern: &str)
        -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
    /// Creates `path` and any missing parents. Existing directories are fine.
    fn mkdir(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Removes `path` recursively. A missing directory is not an error.
    fn remove_dir(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ChildProcess: Send + Sync {
    fn exec(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait Logger: Send + Sync {
    fn write(&self, entry: &LogEntry);

    fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, message);
    }

    fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    fn log(&self, message: &str) {
        self.emit(LogLevel::Log, message);
    }

    fn emit(&self, level: LogLevel, message: &str) {
        self.write(&LogEntry::new(message, chrono::Local::now(), level));
    }
}
