use crate::core::engine::Script;
use crate::utils::error::{Result, ScriptError};

pub const PRE_PUBLISH_MESSAGE: &str =
    r#""npm publish" can not be run from root, run "npm run release" instead"#;

/// Hooked into `prepublishOnly` so publishing the repository root always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrePublishScript;

#[async_trait::async_trait]
impl Script for PrePublishScript {
    fn name(&self) -> &str {
        "pre-publish"
    }

    async fn run(&self) -> Result<()> {
        Err(ScriptError::Aborted {
            message: PRE_PUBLISH_MESSAGE.to_string(),
        })
    }
}
