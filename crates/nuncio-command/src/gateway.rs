use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::CommandError;
use crate::interrupt::InterruptFlag;
use crate::invocation::{CommandOutput, Invocation};
use crate::{CommandRunner, Result};

/// Upper bound for a single external command unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs commands as child processes of the current process.
#[derive(Debug, Clone)]
pub struct ProcessGateway {
    working_dir: PathBuf,
    timeout: Duration,
    interrupt: InterruptFlag,
}

impl ProcessGateway {
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout: DEFAULT_TIMEOUT,
            interrupt: InterruptFlag::new(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    fn spawn(&self, invocation: &Invocation) -> Result<Child> {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.argv())
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in invocation.env_vars() {
            command.env(key, value);
        }

        // A terminal Ctrl-C must reach only this process; it decides whether
        // the child gets killed.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        command.spawn().map_err(|source| CommandError::Spawn {
            program: invocation.program().to_string(),
            source,
        })
    }

    fn wait(&self, child: &mut Child, invocation: &Invocation) -> Result<ExitStatus> {
        let deadline = Instant::now() + self.timeout;

        loop {
            let polled = child.try_wait().map_err(|source| CommandError::Wait {
                command: invocation.to_string(),
                source,
            })?;
            if let Some(status) = polled {
                return Ok(status);
            }

            if invocation.is_interruptible() && self.interrupt.is_tripped() {
                kill(child, invocation);
                return Err(CommandError::Interrupted {
                    command: invocation.to_string(),
                });
            }

            if Instant::now() >= deadline {
                kill(child, invocation);
                return Err(CommandError::TimedOut {
                    command: invocation.to_string(),
                    timeout: self.timeout,
                });
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl CommandRunner for ProcessGateway {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        if invocation.is_interruptible() && self.interrupt.is_tripped() {
            return Err(CommandError::Interrupted {
                command: invocation.to_string(),
            });
        }

        debug!(command = %invocation, dir = %self.working_dir.display(), "running command");
        let start = Instant::now();

        let mut child = self.spawn(invocation)?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout or interrupt the drain threads are left detached: a
        // grandchild may still hold the pipes open.
        let status = self.wait(&mut child, invocation)?;
        let stdout = collect(stdout);
        let stderr = collect(stderr);

        let duration = start.elapsed();
        debug!(
            command = %invocation,
            code = ?status.code(),
            elapsed = %humantime::format_duration(duration),
            "command finished"
        );

        if !status.success() {
            return Err(CommandError::Failed {
                command: invocation.to_string(),
                code: status.code(),
                stderr,
            });
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            duration,
        })
    }
}

fn kill(child: &mut Child, invocation: &Invocation) {
    if let Err(error) = child.kill() {
        warn!(command = %invocation, %error, "failed to kill command");
    }
    let _ = child.wait();
}

// Pipes are drained on their own threads so a chatty child cannot block on a
// full pipe while we wait for it to exit.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
