use crate::core::engine::Script;
use crate::domain::model::RewriteOptions;
use crate::domain::ports::{FileSystem, Logger};
use crate::utils::error::{Result, ScriptError};
use futures::future::try_join_all;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::PathBuf;

/// Packages whose deep imports get rewritten when no list is configured.
///
/// The last entry is garbled (an encoding artifact around the dash) and can
/// never match a published package. It is kept as shipped and reported by
/// `invalid_package_names` at startup.
pub const TARGET_PACKAGES: &[&str] = &[
    "fp-ts",
    "monocle-ts",
    "io-ts",
    "io-ts-types",
    "elm-ts",
    "fp-ts-contrib",
    "fp-ts-rxjs",
    "fp-ts-routing",
    "newtype-ts",
    "fp-ts-fluture",
    "parser-ts",
    "retry-ts",
    "hyper-ts",
    "fpâ€”ts-local-storage",
];

pub fn default_packages() -> Vec<String> {
    TARGET_PACKAGES.iter().map(|p| p.to_string()).collect()
}

fn is_valid_package_name(name: &str) -> bool {
    let bare = match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, package)) if !scope.is_empty() => package,
            _ => return false,
        },
        None => name,
    };
    !bare.is_empty()
        && !bare.starts_with('.')
        && !bare.starts_with('_')
        && bare
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-._~".contains(c))
}

/// Names that cannot be real npm packages.
pub fn invalid_package_names(packages: &[String]) -> Vec<&str> {
    packages
        .iter()
        .map(String::as_str)
        .filter(|name| !is_valid_package_name(name))
        .collect()
}

/// Matches `from '<package>/<from>/<path>'` and `module "<package>/<from>/<path>"`.
///
/// Group 1 is everything up to the package name, group 2 the remaining path
/// with its closing quote.
pub fn import_path_regex(packages: &[String], from: &str) -> Result<Regex> {
    let alternation = packages
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r#"(?m)(\s(?:from|module)\s['"](?:{alternation}))/{from}/([\w\-/]+['"])"#,
        from = regex::escape(from),
    );
    Ok(Regex::new(&pattern)?)
}

pub fn rewrite_imports<'a>(regex: &Regex, source: &'a str, to: &str) -> Cow<'a, str> {
    regex.replace_all(source, |caps: &Captures<'_>| {
        format!("{}/{}/{}", &caps[1], to, &caps[2])
    })
}

pub struct RewriteScript<F: FileSystem, L: Logger> {
    fs: F,
    logger: L,
    options: RewriteOptions,
}

impl<F: FileSystem, L: Logger> RewriteScript<F, L> {
    pub fn new(fs: F, logger: L, options: RewriteOptions) -> Self {
        Self {
            fs,
            logger,
            options,
        }
    }

    /// Every file matched by any pattern, first match wins on duplicates.
    pub async fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for pattern in &self.options.patterns {
            let pattern = self.options.root_dir.join(pattern);
            for path in self.fs.glob(&pattern.to_string_lossy()).await? {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }
        Ok(files)
    }

    /// Rewrites all matched files and returns how many changed.
    pub async fn rewrite_files(&self) -> Result<usize> {
        let regex = import_path_regex(&self.options.packages, &self.options.from)?;
        let files = self.collect_files().await?;
        tracing::debug!("Matched {} files for import rewriting", files.len());

        let changed = try_join_all(files.iter().map(|path| {
            let regex = &regex;
            async move {
                let content = self.fs.read_file(path).await?;
                let rewritten = rewrite_imports(regex, &content, &self.options.to);
                if let Cow::Borrowed(_) = rewritten {
                    return Ok(false);
                }
                self.fs.write_file(path, &rewritten).await?;
                self.logger.log(&format!("{} rewritten", path.display()));
                Ok::<_, ScriptError>(true)
            }
        }))
        .await?;

        Ok(changed.into_iter().filter(|c| *c).count())
    }
}

#[async_trait::async_trait]
impl<F: FileSystem, L: Logger> Script for RewriteScript<F, L> {
    fn name(&self) -> &str {
        "import-path-rewrite"
    }

    async fn run(&self) -> Result<()> {
        for name in invalid_package_names(&self.options.packages) {
            tracing::warn!(
                "⚠️ '{}' is not a valid npm package name and will never match",
                name
            );
        }

        self.logger.info(&format!(
            "Rewriting '{}' imports to '{}'",
            self.options.from, self.options.to
        ));
        let count = self.rewrite_files().await?;
        self.logger.log(&format!("{} files rewritten", count));
        Ok(())
    }
}
