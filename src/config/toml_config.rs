use crate::utils::error::{Result, ScriptError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional project-level defaults, e.g. `build-scripts.toml`:
///
/// ```toml
/// [build]
/// out_dir = "dist"
/// es6_tag = "mjs"
///
/// [release]
/// tag = "${DIST_TAG}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptsConfig {
    pub build: BuildSection,
    pub rewrite: RewriteSection,
    pub release: ReleaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    pub root_dir: Option<PathBuf>,
    pub src_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub es5_dir: Option<PathBuf>,
    pub es6_dir: Option<PathBuf>,
    pub es6_tag: Option<String>,
    pub build_targets: Option<Vec<String>>,
    pub compiler: Option<String>,
    pub copy_files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteSection {
    pub root_dir: Option<PathBuf>,
    pub patterns: Option<Vec<String>>,
    pub packages: Option<Vec<String>>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseSection {
    pub root_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub tag: Option<String>,
}

impl ScriptsConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ScriptError::file(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScriptError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}
