pub mod toml_config;

use crate::core::rewrite::default_packages;
use crate::domain::model::{BuildOptions, ReleaseOptions, RewriteOptions};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_dirs, validate_non_empty_list, validate_non_empty_string, validate_path,
    validate_path_segment, validate_removable_dir, Validate,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use toml_config::{BuildSection, ReleaseSection, RewriteSection};

pub const DEFAULT_ROOT_DIR: &str = ".";
pub const DEFAULT_SRC_DIR: &str = "src";
pub const DEFAULT_OUT_DIR: &str = "dist";
pub const DEFAULT_ES5_DIR: &str = "build/es5";
pub const DEFAULT_ES6_DIR: &str = "build/es6";
pub const DEFAULT_ES6_TAG: &str = "es6";
pub const DEFAULT_COMPILER: &str = "tsc";
pub const DEFAULT_BUILD_TARGETS: &[&str] = &["tsconfig.build.json", "tsconfig.build-es6.json"];
pub const DEFAULT_COPY_FILES: &[&str] = &["CHANGELOG.md", "LICENSE", "README.md"];
pub const DEFAULT_REWRITE_PATTERNS: &[&str] = &[
    "es6/**/*.js",
    "es6/**/*.d.ts",
    "dist/es6/**/*.js",
    "dist/es6/**/*.d.ts",
];
pub const DEFAULT_REWRITE_FROM: &str = "lib";
pub const DEFAULT_REWRITE_TO: &str = "es6";

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Clone, Parser)]
#[command(name = "ts-build-scripts", version)]
#[command(about = "Build, reshape and publish a TypeScript library")]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "TOML file with defaults for every command")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Compile the sources and reshape the output into one package per module
    Build(BuildArgs),
    /// Rewrite deep imports targeting one build directory to another
    ImportPathRewrite(RewriteArgs),
    /// Refuse to publish from the repository root
    PrePublish,
    /// Publish the output directory
    Release(ReleaseArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    #[arg(long, help = "Project root [default: .]")]
    pub root_dir: Option<PathBuf>,

    #[arg(short, long, help = "Directory holding the TypeScript sources [default: src]")]
    pub src_dir: Option<PathBuf>,

    #[arg(short, long, help = "Directory to output the build into [default: dist]")]
    pub out_dir: Option<PathBuf>,

    #[arg(long, help = "Compiler output directory for the ES5 build [default: build/es5]")]
    pub es5_dir: Option<PathBuf>,

    #[arg(long, help = "Compiler output directory for the ES6 build [default: build/es6]")]
    pub es6_dir: Option<PathBuf>,

    #[arg(
        short = 't',
        long,
        help = "File infix for ES6 output, as in Name.<tag>.js [default: es6]"
    )]
    pub es6_tag: Option<String>,

    #[arg(short, long, num_args = 1.., help = "Compiler project files, compiled in order")]
    pub build_targets: Option<Vec<String>>,

    #[arg(long, help = "Compiler binary [default: tsc]")]
    pub compiler: Option<String>,

    #[arg(short, long, num_args = 1.., help = "Files to copy into the output directory")]
    pub copy_files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RewriteArgs {
    #[arg(long, help = "Project root the patterns are resolved against [default: .]")]
    pub root_dir: Option<PathBuf>,

    #[arg(short = 'd', long, num_args = 1.., help = "Glob patterns of files to rewrite")]
    pub patterns: Option<Vec<String>>,

    #[arg(short, long, num_args = 1.., help = "Packages whose imports are rewritten")]
    pub packages: Option<Vec<String>>,

    #[arg(short, long, help = "Name of the directory to replace [default: lib]")]
    pub from: Option<String>,

    #[arg(short, long, help = "Name of the directory to use [default: es6]")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    #[arg(long, help = "Project root [default: .]")]
    pub root_dir: Option<PathBuf>,

    #[arg(short, long, help = "Directory to publish [default: dist]")]
    pub out_dir: Option<PathBuf>,

    #[arg(short, long, help = "Dist tag to publish under")]
    pub tag: Option<String>,

    #[arg(long, help = "Pass --dry-run to npm publish")]
    pub dry_run: bool,
}

impl BuildArgs {
    /// Flags win over the config file, the config file over built-in defaults.
    pub fn resolve(self, file: &BuildSection) -> BuildOptions {
        let file = file.clone();
        BuildOptions {
            root_dir: self
                .root_dir
                .or(file.root_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR)),
            src_dir: self
                .src_dir
                .or(file.src_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SRC_DIR)),
            out_dir: self
                .out_dir
                .or(file.out_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            es5_dir: self
                .es5_dir
                .or(file.es5_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ES5_DIR)),
            es6_dir: self
                .es6_dir
                .or(file.es6_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ES6_DIR)),
            es6_tag: self
                .es6_tag
                .or(file.es6_tag)
                .unwrap_or_else(|| DEFAULT_ES6_TAG.to_string()),
            build_targets: self
                .build_targets
                .or(file.build_targets)
                .unwrap_or_else(|| owned(DEFAULT_BUILD_TARGETS)),
            compiler: self
                .compiler
                .or(file.compiler)
                .unwrap_or_else(|| DEFAULT_COMPILER.to_string()),
            copy_files: self
                .copy_files
                .or(file.copy_files)
                .unwrap_or_else(|| owned(DEFAULT_COPY_FILES)),
        }
    }
}

impl RewriteArgs {
    pub fn resolve(self, file: &RewriteSection) -> RewriteOptions {
        let file = file.clone();
        RewriteOptions {
            root_dir: self
                .root_dir
                .or(file.root_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR)),
            patterns: self
                .patterns
                .or(file.patterns)
                .unwrap_or_else(|| owned(DEFAULT_REWRITE_PATTERNS)),
            packages: self
                .packages
                .or(file.packages)
                .unwrap_or_else(default_packages),
            from: self
                .from
                .or(file.from)
                .unwrap_or_else(|| DEFAULT_REWRITE_FROM.to_string()),
            to: self
                .to
                .or(file.to)
                .unwrap_or_else(|| DEFAULT_REWRITE_TO.to_string()),
        }
    }
}

impl ReleaseArgs {
    pub fn resolve(self, file: &ReleaseSection) -> ReleaseOptions {
        let file = file.clone();
        ReleaseOptions {
            root_dir: self
                .root_dir
                .or(file.root_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR)),
            out_dir: self
                .out_dir
                .or(file.out_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            tag: self.tag.or(file.tag),
            dry_run: self.dry_run,
        }
    }
}

impl Validate for BuildOptions {
    fn validate(&self) -> Result<()> {
        validate_path("root_dir", &self.root_dir)?;
        validate_path("src_dir", &self.src_dir)?;
        validate_path("out_dir", &self.out_dir)?;
        validate_path("es5_dir", &self.es5_dir)?;
        validate_path("es6_dir", &self.es6_dir)?;
        validate_distinct_dirs(("es5_dir", &self.es5_dir), ("es6_dir", &self.es6_dir))?;
        // both compiler output trees are removed once the build is done
        let keep = [("src_dir", self.src_dir.as_path()), ("out_dir", self.out_dir.as_path())];
        validate_removable_dir(("es5_dir", self.es5_dir.as_path()), &self.root_dir, &keep)?;
        validate_removable_dir(("es6_dir", self.es6_dir.as_path()), &self.root_dir, &keep)?;
        validate_path_segment("es6_tag", &self.es6_tag)?;
        validate_non_empty_string("compiler", &self.compiler)?;
        for target in &self.build_targets {
            validate_non_empty_string("build_targets", target)?;
        }
        for file in &self.copy_files {
            validate_path("copy_files", Path::new(file))?;
        }
        Ok(())
    }
}

impl Validate for RewriteOptions {
    fn validate(&self) -> Result<()> {
        validate_path("root_dir", &self.root_dir)?;
        validate_non_empty_list("patterns", &self.patterns)?;
        validate_non_empty_list("packages", &self.packages)?;
        validate_path_segment("from", &self.from)?;
        validate_path_segment("to", &self.to)?;
        Ok(())
    }
}

impl Validate for ReleaseOptions {
    fn validate(&self) -> Result<()> {
        validate_path("root_dir", &self.root_dir)?;
        validate_path("out_dir", &self.out_dir)?;
        if let Some(tag) = &self.tag {
            validate_non_empty_string("tag", tag)?;
        }
        Ok(())
    }
}
