//! External command execution for nuncio.
//!
//! Every side effect a release has on the outside world goes through a
//! [`CommandRunner`]. The production runner, [`ProcessGateway`], executes one
//! program synchronously, captures its output, enforces a timeout and kills
//! the child when the operator interrupts the release.

mod error;
mod gateway;
mod interrupt;
mod invocation;
#[cfg(any(test, feature = "testing"))]
mod scripted;

pub use error::CommandError;
pub use gateway::{DEFAULT_TIMEOUT, ProcessGateway};
pub use interrupt::InterruptFlag;
pub use invocation::{CommandOutput, Invocation};
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedRunner;

pub type Result<T> = std::result::Result<T, CommandError>;

/// Runs external commands on behalf of the release pipeline.
pub trait CommandRunner: Send + Sync {
    /// Executes `invocation` exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started, exits non-zero,
    /// exceeds its timeout, or is interrupted.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).run(invocation)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).run(invocation)
    }
}
