pub mod build;
pub mod engine;
pub mod module;
pub mod pre_publish;
pub mod release;
pub mod rewrite;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Artifact, BuildOptions, Module, ReleaseOptions, RewriteOptions};
pub use crate::domain::ports::{ChildProcess, FileSystem, Logger};
pub use crate::utils::error::Result;
