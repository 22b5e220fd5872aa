use std::io;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep_until;

use crate::error::ExecuteError;
use crate::process::{shell_command, ProcessControl, SystemProcessControl};
use crate::util::SyncBuffer;

use super::pump::pump;
use super::types::{
    ExecutionRequest, ExecutionResponse, CANNED_RESPONSE, FALLBACK_EXIT_STATUS, OK_EXIT_STATUS,
    TEST_COMMAND, TIMEOUT_EXIT_STATUS, TIMEOUT_OUTPUT,
};

/// Executes system commands on behalf of checks, hooks, and mutators.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Runs one request to completion or to its deadline.
    ///
    /// Dropping the returned future abandons the call without killing an
    /// in-flight child; only the request's own deadline triggers group
    /// termination.
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResponse, ExecuteError>;
}

/// Production executor: spawns through the platform shell, enforces the
/// request deadline, and captures combined output.
pub struct CommandExecutor {
    control: Arc<dyn ProcessControl>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self {
            control: Arc::new(SystemProcessControl),
        }
    }

    /// Executor with a custom [`ProcessControl`], used by tests to observe
    /// group handling or simulate an unkillable process group.
    pub fn with_control(control: Arc<dyn ProcessControl>) -> Self {
        Self { control }
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for CommandExecutor {
    async fn execute(
        &self,
        mut request: ExecutionRequest,
    ) -> Result<ExecutionResponse, ExecuteError> {
        if request.command == TEST_COMMAND {
            return Ok(CANNED_RESPONSE.clone());
        }

        let mut cmd = shell_command(&request.command);

        if !request.env.is_empty() {
            cmd.env_clear();
            cmd.envs(request.env.iter().filter_map(|pair| pair.split_once('=')));
        }

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.stdin(if request.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let bounded = request.timeout > 0;
        if bounded {
            // Group termination is the only way to reach grandchildren, and
            // it needs the child in its own group from the start.
            self.control.prepare_group(&mut cmd);
        }

        let started = Instant::now();
        let deadline = tokio::time::Instant::now()
            .checked_add(Duration::from_secs(request.timeout))
            .unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(86_400 * 365));

        let mut child = cmd.spawn().map_err(ExecuteError::Spawn)?;
        let pid = match child.id() {
            Some(pid) => pid,
            None => {
                return Err(ExecuteError::Spawn(io::Error::other(
                    "child pid unavailable after spawn",
                )))
            }
        };

        if let Some(input) = request.input.take() {
            if let Some(mut stdin) = child.stdin.take() {
                tokio::spawn(async move {
                    if let Err(err) = stdin.write_all(input.as_bytes()).await {
                        tracing::warn!(error = %err, "failed writing execution input to stdin");
                    }
                    // stdin drops here, closing the pipe
                });
            }
        }

        let sink = SyncBuffer::new();
        let out_task = pump(child.stdout.take().unwrap(), Arc::clone(&sink), "stdout");
        let err_task = pump(child.stderr.take().unwrap(), Arc::clone(&sink), "stderr");

        // Completion means the child exited AND both pipes reached EOF, so a
        // grandchild holding the pipes open keeps the deadline in play just
        // like a slow child does.
        let mut wait_task = tokio::spawn(async move {
            let status = child.wait().await;
            let _ = out_task.await;
            let _ = err_task.await;
            status
        });

        let mut response = ExecutionResponse {
            output: String::new(),
            status: OK_EXIT_STATUS,
            duration: 0.0,
        };

        tokio::select! {
            joined = &mut wait_task => {
                response.output = sink.snapshot();
                response.status = match joined {
                    Ok(Ok(status)) => derive_status(status),
                    Ok(Err(err)) => {
                        tracing::warn!(error = %err, "could not collect child exit status");
                        FALLBACK_EXIT_STATUS
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "wait task failed");
                        FALLBACK_EXIT_STATUS
                    }
                };
            }
            _ = sleep_until(deadline), if bounded => {
                let mut kill_failure = String::new();
                if let Err(err) = self.control.terminate_group(pid).await {
                    tracing::error!(
                        error = %err,
                        pid,
                        "execution timed out and the process group could not be killed"
                    );
                    kill_failure = format!("Unable to TERM/KILL the process: #{pid}\n");
                    escape_zombie(&request);
                }
                wait_task.abort();
                response.output = format!("{TIMEOUT_OUTPUT}{kill_failure}{}", sink.snapshot());
                response.status = TIMEOUT_EXIT_STATUS;
            }
        }

        response.duration = started.elapsed().as_secs_f64();
        Ok(response)
    }
}

fn derive_status(status: std::process::ExitStatus) -> i32 {
    if status.success() {
        OK_EXIT_STATUS
    } else {
        // A child torn down by a signal reports no exit code; that cause is
        // collapsed into the fallback status.
        status.code().unwrap_or(FALLBACK_EXIT_STATUS)
    }
}

/// A timed-out execution whose group kill failed would otherwise occupy its
/// registry slot forever. Evicting the name lets the scheduler run it again.
fn escape_zombie(request: &ExecutionRequest) {
    match &request.in_progress {
        Some(registry) if !request.name.is_empty() => {
            tracing::warn!(
                name = %request.name,
                "execution left a zombie process - escaping so the name can run again"
            );
            registry.remove(&request.name);
        }
        _ => {
            tracing::error!("unable to escape zombie process left by command execution");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn derives_status_from_wait_outcomes() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        assert_eq!(derive_status(ExitStatus::from_raw(0)), OK_EXIT_STATUS);
        assert_eq!(derive_status(ExitStatus::from_raw(42 << 8)), 42);
        // Killed by SIGKILL: no exit code to report.
        assert_eq!(derive_status(ExitStatus::from_raw(9)), FALLBACK_EXIT_STATUS);
    }

    #[test]
    fn escape_zombie_requires_registry_and_name() {
        let registry = crate::registry::InProgressRegistry::new();
        registry.insert("wedged", Arc::new(()));

        // Missing name: the entry must survive.
        escape_zombie(&ExecutionRequest {
            in_progress: Some(Arc::clone(&registry)),
            ..Default::default()
        });
        assert!(registry.contains("wedged"));

        escape_zombie(&ExecutionRequest {
            name: "wedged".to_string(),
            in_progress: Some(Arc::clone(&registry)),
            ..Default::default()
        });
        assert!(!registry.contains("wedged"));
    }
}
