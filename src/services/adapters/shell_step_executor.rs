//! Runs `run:` steps through the system shell with a deadline.

use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::AppError;
use crate::ports::{CommandSpec, ExecutionResult, StepExecutor};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct ShellStepExecutor {
    shell: String,
}

impl Default for ShellStepExecutor {
    fn default() -> Self {
        Self { shell: "sh".to_string() }
    }
}

impl ShellStepExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into() }
    }
}

impl StepExecutor for ShellStepExecutor {
    fn execute(&self, spec: &CommandSpec, budget: Duration) -> Result<ExecutionResult, AppError> {
        let deadline = Instant::now() + budget;
        let mut command = Command::new(&self.shell);
        command
            .arg("-c")
            .arg(&spec.command)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null());
        // The shell leads its own group so a timeout reaches everything it spawned.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let mut child = command.spawn()?;

        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(ExecutionResult::Exited { code: status.code() });
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(step = %spec.step, "step exceeded its time budget, killing");
                kill_step(&mut child);
                child.wait()?;
                return Ok(ExecutionResult::TimedOut);
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

/// Kill the step's whole process group. The child may exit between
/// `try_wait` and the signal, so failures are ignored.
#[cfg(unix)]
fn kill_step(child: &mut Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        let _ = child.kill();
        return;
    };
    // SAFETY: the group id is the pid of a child we spawned with
    // `process_group(0)` and have not reaped yet.
    unsafe {
        libc::killpg(pgid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_step(child: &mut Child) {
    let _ = child.kill();
}
