use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// File content waiting to be written to `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub content: String,
    pub destination: PathBuf,
}

impl Artifact {
    pub fn new(content: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            content: content.into(),
            destination: destination.into(),
        }
    }
}

/// One compiled source file, reshaped into a publishable package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub build_dir: PathBuf,
    pub es5: Artifact,
    pub es6: Artifact,
    pub typings: Artifact,
    pub manifest: Artifact,
}

impl Module {
    /// Artifacts in the order they are written.
    pub fn artifacts(&self) -> [&Artifact; 4] {
        [&self.es5, &self.es6, &self.typings, &self.manifest]
    }
}

/// The minimal `package.json` written next to each module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleManifest {
    pub main: String,
    pub module: String,
    pub typings: String,
    pub side_effects: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub root_dir: PathBuf,
    pub src_dir: PathBuf,
    pub out_dir: PathBuf,
    pub es5_dir: PathBuf,
    pub es6_dir: PathBuf,
    pub es6_tag: String,
    pub build_targets: Vec<String>,
    pub compiler: String,
    pub copy_files: Vec<String>,
}

impl BuildOptions {
    pub fn source_root(&self) -> PathBuf {
        self.root_dir.join(&self.src_dir)
    }

    pub fn output_root(&self) -> PathBuf {
        self.root_dir.join(&self.out_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    pub root_dir: PathBuf,
    pub patterns: Vec<String>,
    pub packages: Vec<String>,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    pub root_dir: PathBuf,
    pub out_dir: PathBuf,
    pub tag: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Error,
    Info,
    Log,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
            LogLevel::Log => "LOG",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub message: String,
    pub date: DateTime<Local>,
    pub level: LogLevel,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, date: DateTime<Local>, level: LogLevel) -> Self {
        Self {
            message: message.into(),
            date,
            level,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.date.format("%Y-%m-%d"),
            self.date.format("%H:%M:%S"),
            self.level,
            self.message
        )
    }
}
