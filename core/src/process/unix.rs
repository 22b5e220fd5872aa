use std::io;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::process::Command;

/// Grace between SIGTERM and SIGKILL when tearing a group down.
const KILL_GRACE: Duration = Duration::from_millis(500);

pub(super) fn prepare_group(cmd: &mut Command) {
    // pgid 0 makes the child the leader of a fresh group, so a later
    // killpg reaches grandchildren too.
    cmd.process_group(0);
}

pub(super) async fn terminate_group(pid: u32) -> io::Result<()> {
    let pgid = Pid::from_raw(pid as i32);
    killpg(pgid, Signal::SIGTERM).map_err(io::Error::from)?;
    tokio::time::sleep(KILL_GRACE).await;
    match killpg(pgid, Signal::SIGKILL) {
        Ok(()) => Ok(()),
        // The group exited during the grace period.
        Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(io::Error::from(errno)),
    }
}
