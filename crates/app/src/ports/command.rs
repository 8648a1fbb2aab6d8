//! Command execution port — how the core runs user-configured shell
//! commands.
//!
//! Commands are opaque strings handed to a shell; exit code 0 is success.
//! No timeout is enforced: a command runs to completion, however long.

use std::future::Future;

/// Why capturing a command's output failed.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The command could not be started at all.
    #[error("failed to spawn command")]
    Spawn(#[from] std::io::Error),

    /// The command ran but exited unsuccessfully.
    ///
    /// `code` is -1 when the process was terminated by a signal.
    #[error("command exited with status {code}")]
    NonZeroExit {
        /// The process exit code.
        code: i32,
    },

    /// The command's output was not valid UTF-8.
    #[error("command output is not valid UTF-8")]
    InvalidUtf8,
}

/// Executes external commands on behalf of the reconciler.
///
/// Implementations live in adapter crates (e.g. `adapter_shell`). Failures
/// are logged by the implementation at the point of occurrence; `run` never
/// surfaces them beyond its boolean.
pub trait CommandExecutor: Send + Sync {
    /// Run `command`, returning whether it exited successfully.
    fn run(&self, command: &str) -> impl Future<Output = bool> + Send;

    /// Run `command` and capture its trimmed standard output.
    fn capture(&self, command: &str) -> impl Future<Output = Result<String, ExecError>> + Send;
}
