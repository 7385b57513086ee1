use crate::domain::ports::ChildProcess;
use crate::utils::error::{Result, ScriptError};
use std::path::Path;
use tokio::process::Command;

/// Runs external programs and waits for them to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ChildProcess for ProcessRunner {
    async fn exec(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        let command = display_command(program, args);
        tracing::debug!("Running `{}` in {}", command, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|e| ScriptError::ProcessError {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        // tsc reports diagnostics on stdout, npm on stderr
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };

        Err(ScriptError::ProcessError {
            command,
            message: format!("{} {}", output.status, detail).trim_end().to_string(),
        })
    }
}

pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let args = vec!["-p".to_string(), "tsconfig.build.json".to_string()];
        assert_eq!(display_command("tsc", &args), "tsc -p tsconfig.build.json");
        assert_eq!(display_command("npm", &[]), "npm");
    }

    #[tokio::test]
    async fn test_missing_program_is_process_error() {
        let runner = ProcessRunner::new();
        let result = runner
            .exec("definitely-not-a-real-binary-4821", &[], Path::new("."))
            .await;

        match result {
            Err(ScriptError::ProcessError { command, .. }) => {
                assert_eq!(command, "definitely-not-a-real-binary-4821");
            }
            other => panic!("expected process error, got {:?}", other),
        }
    }
}
