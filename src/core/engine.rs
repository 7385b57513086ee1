use crate::utils::error::Result;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use std::time::Instant;

#[async_trait::async_trait]
pub trait Script: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> Result<()>;
}

pub struct ScriptEngine<S: Script> {
    script: S,
}

impl<S: Script> ScriptEngine<S> {
    pub fn new(script: S) -> Self {
        Self { script }
    }

    pub async fn run(&self) -> Result<()> {
        let started = Instant::now();
        tracing::info!("🚀 Running {}", self.script.name());

        let result = self.script.run().await;
        match &result {
            Ok(()) => tracing::info!(
                "✅ {} completed in {:?}",
                self.script.name(),
                started.elapsed()
            ),
            Err(e) => tracing::error!("❌ {} failed: {}", self.script.name(), e),
        }
        result
    }
}

/// Prints the outcome and maps it to the process exit code.
pub fn report(result: &Result<()>) -> ExitCode {
    match result {
        Ok(()) => {
            println!("{}", "Finished!".green().bold());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", "Unexpected Error!".red().bold());
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScriptError;

    struct FixedScript {
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Script for FixedScript {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn run(&self) -> Result<()> {
            if self.fail {
                Err(ScriptError::Aborted {
                    message: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_engine_passes_result_through() {
        assert!(ScriptEngine::new(FixedScript { fail: false }).run().await.is_ok());

        let err = ScriptEngine::new(FixedScript { fail: true })
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_report_exit_codes() {
        let code = |c: ExitCode| format!("{:?}", c);
        assert_eq!(code(report(&Ok(()))), code(ExitCode::SUCCESS));
        let failed = Err(ScriptError::Aborted {
            message: "nope".to_string(),
        });
        assert_eq!(code(report(&failed)), code(ExitCode::FAILURE));
    }
}
