use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({}): {}", exit_label(*code), stderr.trim_end())]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` timed out after {}", humantime::format_duration(*timeout))]
    TimedOut { command: String, timeout: Duration },

    #[error("`{command}` was interrupted")]
    Interrupted { command: String },

    #[error("lost track of `{command}`")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// Captured standard error of a command that exited non-zero.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Failed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit code {code}"),
    )
}
