mod branch;
mod commit;
mod remote;
mod status;
mod tag;

use nuncio_command::{CommandOutput, CommandRunner, Invocation};

use crate::Result;

/// A git working tree, operated on through a [`CommandRunner`].
///
/// The runner decides where commands execute; a
/// [`ProcessGateway`](nuncio_command::ProcessGateway) rooted at the project
/// directory is the usual choice.
pub struct Repository<R> {
    runner: R,
}

impl<R: CommandRunner> Repository<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub(crate) fn git<I, S>(args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Never block on a credential prompt; a push without credentials fails.
        Invocation::new("git")
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
    }

    pub(crate) fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        Ok(self.runner.run(invocation)?)
    }
}
