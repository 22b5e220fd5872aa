use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use checkrun_core::process::{ProcessControl, SystemProcessControl};
use tokio::process::Command;

/// Makes engine logs visible under `RUST_LOG` when a test goes sideways.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Delegates to the real platform control while counting calls, so tests
/// can assert whether group handling happened at all.
#[derive(Default)]
pub struct CountingControl {
    prepares: AtomicUsize,
    terminates: AtomicUsize,
}

impl CountingControl {
    pub fn prepares(&self) -> usize {
        self.prepares.load(Ordering::SeqCst)
    }

    pub fn terminates(&self) -> usize {
        self.terminates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProcessControl for CountingControl {
    fn prepare_group(&self, cmd: &mut Command) {
        self.prepares.fetch_add(1, Ordering::SeqCst);
        SystemProcessControl.prepare_group(cmd);
    }

    async fn terminate_group(&self, pid: u32) -> io::Result<()> {
        self.terminates.fetch_add(1, Ordering::SeqCst);
        SystemProcessControl.terminate_group(pid).await
    }
}

/// Simulates an unkillable process group: every terminate attempt fails.
pub struct UnkillableControl;

#[async_trait]
impl ProcessControl for UnkillableControl {
    fn prepare_group(&self, cmd: &mut Command) {
        SystemProcessControl.prepare_group(cmd);
    }

    async fn terminate_group(&self, _pid: u32) -> io::Result<()> {
        Err(io::Error::other("simulated unkillable process group"))
    }
}
