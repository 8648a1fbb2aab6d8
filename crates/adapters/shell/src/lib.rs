//! # cmdlight-adapter-shell
//!
//! Executes the user-configured light commands through a shell.
//!
//! Commands are opaque strings handed to `sh -c`; exit code 0 is success
//! and captured output is trimmed UTF-8 stdout. No timeout is imposed: a
//! command runs to completion, however long. Whatever the configuration
//! author puts in a command string runs with the daemon's privileges —
//! that boundary belongs to them.
//!
//! ## Dependency rule
//!
//! Depends on `cmdlight-app` (port traits) only.

use std::future::Future;

use tokio::process::Command;

use cmdlight_app::ports::command::{CommandExecutor, ExecError};

/// Runs commands through a shell.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::with_shell("sh")
    }
}

impl ShellExecutor {
    /// Use a specific shell binary instead of `sh`.
    #[must_use]
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    async fn status(&self, command: &str) -> Result<std::process::ExitStatus, std::io::Error> {
        Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .status()
            .await
    }
}

impl CommandExecutor for ShellExecutor {
    fn run(&self, command: &str) -> impl Future<Output = bool> + Send {
        async move {
            tracing::info!(command, "running command");
            match self.status(command).await {
                Ok(status) if status.success() => true,
                Ok(status) => {
                    tracing::error!(command, code = status.code().unwrap_or(-1), "command failed");
                    false
                }
                Err(error) => {
                    tracing::error!(command, %error, "failed to spawn command");
                    false
                }
            }
        }
    }

    fn capture(&self, command: &str) -> impl Future<Output = Result<String, ExecError>> + Send {
        async move {
            tracing::info!(command, "running state command");
            let output = Command::new(&self.shell)
                .arg("-c")
                .arg(command)
                .output()
                .await
                .map_err(|error| {
                    tracing::error!(command, %error, "failed to spawn command");
                    ExecError::Spawn(error)
                })?;

            if !output.status.success() {
                // Signal-terminated processes have no exit code.
                let code = output.status.code().unwrap_or(-1);
                tracing::error!(command, code, "command failed");
                return Err(ExecError::NonZeroExit { code });
            }

            let text = String::from_utf8(output.stdout).map_err(|_| {
                tracing::error!(command, "command output is not valid UTF-8");
                ExecError::InvalidUtf8
            })?;
            Ok(text.trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_report_success_for_zero_exit() {
        assert!(ShellExecutor::default().run("true").await);
    }

    #[tokio::test]
    async fn should_report_failure_for_nonzero_exit() {
        assert!(!ShellExecutor::default().run("false").await);
        assert!(!ShellExecutor::default().run("exit 3").await);
    }

    #[tokio::test]
    async fn should_report_failure_when_shell_is_missing() {
        let executor = ShellExecutor::with_shell("/nonexistent/shell");
        assert!(!executor.run("true").await);
    }

    #[tokio::test]
    async fn should_capture_trimmed_output() {
        let output = ShellExecutor::default()
            .capture("echo '  padded  '")
            .await
            .unwrap();
        assert_eq!(output, "padded");
    }

    #[tokio::test]
    async fn should_keep_interior_whitespace() {
        let output = ShellExecutor::default()
            .capture("printf 'a b\\nc'")
            .await
            .unwrap();
        assert_eq!(output, "a b\nc");
    }

    #[tokio::test]
    async fn should_return_exit_code_on_capture_failure() {
        let result = ShellExecutor::default().capture("exit 3").await;
        assert!(matches!(result, Err(ExecError::NonZeroExit { code: 3 })));
    }

    #[tokio::test]
    async fn should_return_spawn_error_when_shell_is_missing() {
        let executor = ShellExecutor::with_shell("/nonexistent/shell");
        let result = executor.capture("echo hi").await;
        assert!(matches!(result, Err(ExecError::Spawn(_))));
    }

    #[tokio::test]
    async fn should_reject_non_utf8_output() {
        let result = ShellExecutor::default().capture("printf '\\377'").await;
        assert!(matches!(result, Err(ExecError::InvalidUtf8)));
    }
}
