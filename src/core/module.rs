//! Reshapes one compiled source file into a publishable module directory.
//!
//! For `src/foo/Bar.ts` the compiler leaves `Bar.js` in both intermediate
//! output trees and `Bar.d.ts` next to the ES5 build. The module lands in
//! `<out>/foo/Bar/` as `Bar.js`, `Bar.<es6-tag>.js`, `Bar.d.ts` and a
//! `package.json` pointing at the three.

use crate::domain::model::{Artifact, BuildOptions, Module, ModuleManifest};
use crate::domain::ports::FileSystem;
use crate::utils::error::{Result, ScriptError};
use std::path::{Component, Path, PathBuf};

pub const PACKAGE_JSON: &str = "package.json";

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Splits a source path into its output subdirectory and module name.
pub fn module_location(source: &Path, source_root: &Path) -> Result<(PathBuf, String)> {
    let source = without_cur_dir(source);
    let source_root = without_cur_dir(source_root);

    let relative = source
        .strip_prefix(&source_root)
        .map_err(|_| ScriptError::ProcessingError {
            message: format!(
                "{} is not under the source root {}",
                source.display(),
                source_root.display()
            ),
        })?;

    let name = relative
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ScriptError::ProcessingError {
            message: format!("{} has no usable file name", source.display()),
        })?
        .to_string();

    let sub_dir = relative
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    Ok((sub_dir, name))
}

pub fn module_manifest(name: &str, es6_tag: &str) -> ModuleManifest {
    ModuleManifest {
        main: format!("./{name}.js"),
        module: format!("./{name}.{es6_tag}.js"),
        typings: format!("./{name}.d.ts"),
        side_effects: false,
    }
}

/// Reads every compiled file the module needs. Nothing is written here, so a
/// missing file fails before the module directory exists.
pub async fn derive_module<F: FileSystem>(
    fs: &F,
    options: &BuildOptions,
    source: &Path,
) -> Result<Module> {
    let (sub_dir, name) = module_location(source, &options.source_root())?;
    let build_dir = options.output_root().join(&sub_dir).join(&name);

    let es5_dir = options.root_dir.join(&options.es5_dir).join(&sub_dir);
    let es6_dir = options.root_dir.join(&options.es6_dir).join(&sub_dir);

    let es5 = fs.read_file(&es5_dir.join(format!("{name}.js"))).await?;
    let es6 = fs.read_file(&es6_dir.join(format!("{name}.js"))).await?;
    let typings = fs.read_file(&es5_dir.join(format!("{name}.d.ts"))).await?;
    let manifest = serde_json::to_string_pretty(&module_manifest(&name, &options.es6_tag))?;

    Ok(Module {
        es5: Artifact::new(es5, build_dir.join(format!("{name}.js"))),
        es6: Artifact::new(
            es6,
            build_dir.join(format!("{name}.{}.js", options.es6_tag)),
        ),
        typings: Artifact::new(typings, build_dir.join(format!("{name}.d.ts"))),
        manifest: Artifact::new(manifest, build_dir.join(PACKAGE_JSON)),
        name,
        build_dir,
    })
}

pub async fn write_module<F: FileSystem>(fs: &F, module: &Module) -> Result<()> {
    fs.mkdir(&module.build_dir).await?;
    for artifact in module.artifacts() {
        fs.write_file(&artifact.destination, &artifact.content)
            .await?;
    }
    Ok(())
}
