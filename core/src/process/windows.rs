use std::io;

use tokio::process::Command;
use windows::Win32::System::Threading::CREATE_NEW_PROCESS_GROUP;

pub(super) fn prepare_group(cmd: &mut Command) {
    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP.0);
}

/// Best-effort tree kill. Windows has no process groups in the POSIX
/// sense; taskkill walks the child tree instead, which cannot always reach
/// deeply detached descendants.
pub(super) async fn terminate_group(pid: u32) -> io::Result<()> {
    let status = Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .status()
        .await?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("taskkill exited with {status}")))
    }
}
