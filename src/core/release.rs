use crate::core::engine::Script;
use crate::domain::model::ReleaseOptions;
use crate::domain::ports::{ChildProcess, Logger};
use crate::utils::error::Result;

pub const NPM: &str = "npm";

pub fn publish_args(options: &ReleaseOptions) -> Vec<String> {
    let mut args = vec!["publish".to_string()];
    if let Some(tag) = &options.tag {
        args.push("--tag".to_string());
        args.push(tag.clone());
    }
    if options.dry_run {
        args.push("--dry-run".to_string());
    }
    args
}

pub struct ReleaseScript<P: ChildProcess, L: Logger> {
    process: P,
    logger: L,
    options: ReleaseOptions,
}

impl<P: ChildProcess, L: Logger> ReleaseScript<P, L> {
    pub fn new(process: P, logger: L, options: ReleaseOptions) -> Self {
        Self {
            process,
            logger,
            options,
        }
    }
}

#[async_trait::async_trait]
impl<P: ChildProcess, L: Logger> Script for ReleaseScript<P, L> {
    fn name(&self) -> &str {
        "release"
    }

    async fn run(&self) -> Result<()> {
        let package_dir = self.options.root_dir.join(&self.options.out_dir);
        match &self.options.tag {
            Some(tag) => self.logger.info(&format!(
                "Publishing {} with dist tag '{}'",
                package_dir.display(),
                tag
            )),
            None => self
                .logger
                .info(&format!("Publishing {}", package_dir.display())),
        }

        self.process
            .exec(NPM, &publish_args(&self.options), &package_dir)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{RecordingLogger, RecordingProcess};
    use crate::utils::error::ScriptError;
    use std::path::PathBuf;

    fn options(tag: Option<&str>) -> ReleaseOptions {
        ReleaseOptions {
            root_dir: PathBuf::from("/project"),
            out_dir: PathBuf::from("dist"),
            tag: tag.map(str::to_string),
            dry_run: false,
        }
    }

    #[test]
    fn test_publish_args() {
        assert_eq!(publish_args(&options(None)), vec!["publish"]);
        assert_eq!(
            publish_args(&options(Some("next"))),
            vec!["publish", "--tag", "next"]
        );

        let mut dry = options(None);
        dry.dry_run = true;
        assert_eq!(publish_args(&dry), vec!["publish", "--dry-run"]);
    }

    #[tokio::test]
    async fn test_release_publishes_from_output_dir() {
        let process = RecordingProcess::new();
        let script = ReleaseScript::new(
            process.clone(),
            RecordingLogger::new(),
            options(Some("beta")),
        );

        script.run().await.unwrap();

        let calls = process.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "npm");
        assert_eq!(calls[0].args, vec!["publish", "--tag", "beta"]);
        assert_eq!(calls[0].cwd, PathBuf::from("/project/dist"));
    }

    #[tokio::test]
    async fn test_release_propagates_publish_failure() {
        let script = ReleaseScript::new(
            RecordingProcess::failing_on("npm"),
            RecordingLogger::new(),
            options(None),
        );

        let err = script.run().await.unwrap_err();
        assert!(matches!(err, ScriptError::ProcessError { .. }));
    }
}
