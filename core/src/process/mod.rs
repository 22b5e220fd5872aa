//! Platform process control: shell indirection, process-group creation,
//! and whole-group termination.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use async_trait::async_trait;
use tokio::process::Command;

/// Capability interface for putting a child into its own process group and
/// later tearing the whole group down. The engine depends only on this
/// trait; tests substitute an implementation that refuses to kill.
#[async_trait]
pub trait ProcessControl: Send + Sync {
    /// Arrange for the child to be spawned as the leader of a fresh process
    /// group (or the platform equivalent). Called before spawn, and only
    /// when a deadline is active.
    fn prepare_group(&self, cmd: &mut Command);

    /// Terminate the entire group rooted at `pid`. Invoked at most once per
    /// expired deadline; errors are handed back to the engine unchanged.
    async fn terminate_group(&self, pid: u32) -> std::io::Result<()>;
}

/// Production [`ProcessControl`] backed by the host OS.
pub struct SystemProcessControl;

#[async_trait]
impl ProcessControl for SystemProcessControl {
    fn prepare_group(&self, cmd: &mut Command) {
        #[cfg(unix)]
        unix::prepare_group(cmd);
        #[cfg(windows)]
        windows::prepare_group(cmd);
    }

    async fn terminate_group(&self, pid: u32) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            unix::terminate_group(pid).await
        }
        #[cfg(windows)]
        {
            windows::terminate_group(pid).await
        }
    }
}

/// Builds the platform shell invocation for `command`. The shell deals with
/// built-ins and "command not found", which a direct fork/exec would turn
/// into spawn errors.
pub fn shell_command(command: &str) -> Command {
    #[cfg(unix)]
    {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(command);
        cmd
    }
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
}
