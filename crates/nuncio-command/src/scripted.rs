use std::sync::Mutex;

use crate::error::CommandError;
use crate::invocation::{CommandOutput, Invocation};
use crate::{CommandRunner, Result};

/// In-memory runner for tests: records every invocation and answers from a
/// script instead of spawning processes.
///
/// Responses match on the rendered command line (`git push origin v1.0.0`).
/// The first rule whose pattern is a prefix of the command line wins;
/// unmatched commands succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, Response)>,
    calls: Mutex<Vec<String>>,
}

#[derive(Debug, Clone)]
enum Response {
    Stdout(String),
    Fail(String),
}

impl ScriptedRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers commands starting with `prefix` with the given stdout.
    #[must_use]
    pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.rules
            .push((prefix.to_string(), Response::Stdout(stdout.to_string())));
        self
    }

    /// Fails commands starting with `prefix` with the given stderr.
    #[must_use]
    pub fn fail(mut self, prefix: &str, stderr: &str) -> Self {
        self.rules
            .push((prefix.to_string(), Response::Fail(stderr.to_string())));
        self
    }

    /// Command lines run so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let line = invocation.to_string();
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(line.clone());

        let response = self
            .rules
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(Response::Fail(stderr)) => Err(CommandError::Failed {
                command: line,
                code: Some(1),
                stderr,
            }),
            Some(Response::Stdout(stdout)) => Ok(CommandOutput {
                stdout,
                ..CommandOutput::default()
            }),
            None => Ok(CommandOutput::default()),
        }
    }
}
