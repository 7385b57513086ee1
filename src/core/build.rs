use crate::core::engine::Script;
use crate::core::module::{derive_module, write_module, PACKAGE_JSON};
use crate::domain::model::BuildOptions;
use crate::domain::ports::{ChildProcess, FileSystem, Logger};
use crate::utils::error::{Result, ScriptError};
use futures::future::try_join_all;
use serde_json::Value;
use std::path::PathBuf;

/// Keys that only matter while developing the library.
pub const STRIPPED_FIELDS: [&str; 3] = ["devDependencies", "files", "scripts"];

pub const INDEX_MODULE: &str = "index";

/// Prepares the root manifest for publishing from `out_dir`.
///
/// Running it on its own output changes nothing.
pub fn make_root_manifest(manifest: Value, es6_tag: &str) -> Result<Value> {
    let Value::Object(mut fields) = manifest else {
        return Err(ScriptError::ProcessingError {
            message: "package.json must contain a JSON object".to_string(),
        });
    };

    fields.retain(|key, _| !STRIPPED_FIELDS.contains(&key.as_str()));
    fields.insert(
        "main".to_string(),
        Value::String(format!("./{INDEX_MODULE}/{INDEX_MODULE}.js")),
    );
    fields.insert(
        "module".to_string(),
        Value::String(format!("./{INDEX_MODULE}/{INDEX_MODULE}.{es6_tag}.js")),
    );
    fields.insert(
        "typings".to_string(),
        Value::String(format!("./{INDEX_MODULE}/{INDEX_MODULE}.d.ts")),
    );

    Ok(Value::Object(fields))
}

pub struct BuildScript<F: FileSystem, P: ChildProcess, L: Logger> {
    fs: F,
    process: P,
    logger: L,
    options: BuildOptions,
}

impl<F: FileSystem, P: ChildProcess, L: Logger> BuildScript<F, P, L> {
    pub fn new(fs: F, process: P, logger: L, options: BuildOptions) -> Self {
        Self {
            fs,
            process,
            logger,
            options,
        }
    }

    pub async fn compile(&self) -> Result<()> {
        for target in &self.options.build_targets {
            self.logger.log(&format!("Compiling {}", target));
            let args = vec!["-p".to_string(), target.clone()];
            self.process
                .exec(&self.options.compiler, &args, &self.options.root_dir)
                .await?;
        }
        Ok(())
    }

    pub async fn discover_sources(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.options.source_root().join("**").join("*.ts");
        let sources = self.fs.glob(&pattern.to_string_lossy()).await?;

        Ok(sources
            .into_iter()
            .filter(|path| {
                !path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".d.ts"))
            })
            .collect())
    }

    /// Writes one module per source file, in discovery order. Returns the count.
    pub async fn make_modules(&self) -> Result<usize> {
        let sources = self.discover_sources().await?;
        tracing::debug!("Discovered {} source files", sources.len());

        for source in &sources {
            let module = derive_module(&self.fs, &self.options, source).await?;
            self.logger.debug(&format!("Writing module {}", module.name));
            write_module(&self.fs, &module).await?;
        }
        Ok(sources.len())
    }

    pub async fn copy_files(&self) -> Result<()> {
        let out_dir = self.options.output_root();
        self.fs.mkdir(&out_dir).await?;

        let copies: Vec<(PathBuf, PathBuf)> = self
            .options
            .copy_files
            .iter()
            .map(|file| (self.options.root_dir.join(file), out_dir.join(file)))
            .collect();

        try_join_all(copies.iter().map(|(from, to)| async move {
            if let Some(parent) = to.parent() {
                self.fs.mkdir(parent).await?;
            }
            self.fs.copy_file(from, to).await?;
            self.logger.debug(&format!("Copied {}", from.display()));
            Ok::<_, ScriptError>(())
        }))
        .await?;
        Ok(())
    }

    pub async fn copy_package_json(&self) -> Result<()> {
        let source = self.options.root_dir.join(PACKAGE_JSON);
        let content = self.fs.read_file(&source).await?;
        let manifest: Value =
            serde_json::from_str(&content).map_err(|e| ScriptError::ManifestError {
                path: source.clone(),
                source: e,
            })?;

        let manifest = make_root_manifest(manifest, &self.options.es6_tag)?;
        let json = serde_json::to_string_pretty(&manifest)?;
        self.fs
            .write_file(&self.options.output_root().join(PACKAGE_JSON), &json)
            .await
    }

    pub async fn clean_intermediate(&self) -> Result<()> {
        for dir in [&self.options.es5_dir, &self.options.es6_dir] {
            self.fs.remove_dir(&self.options.root_dir.join(dir)).await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<F: FileSystem, P: ChildProcess, L: Logger> Script for BuildScript<F, P, L> {
    fn name(&self) -> &str {
        "build"
    }

    async fn run(&self) -> Result<()> {
        self.logger.info("Starting build");

        self.compile().await?;

        let count = self.make_modules().await?;
        self.logger.log(&format!("Wrote {} modules", count));

        self.logger.log("Copying project files");
        self.copy_files().await?;

        self.logger.log("Writing package.json");
        self.copy_package_json().await?;

        self.logger.log("Removing intermediate build output");
        self.clean_intermediate().await?;

        Ok(())
    }
}
