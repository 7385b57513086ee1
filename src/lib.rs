pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{LocalFileSystem, ProcessRunner};
pub use crate::config::{toml_config::ScriptsConfig, Cli, Commands};
pub use crate::core::{
    build::BuildScript,
    engine::{Script, ScriptEngine},
    pre_publish::PrePublishScript,
    release::ReleaseScript,
    rewrite::RewriteScript,
};
pub use crate::utils::error::{Result, ScriptError};
