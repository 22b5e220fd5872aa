use thiserror::Error;

/// Errors surfaced by command execution.
///
/// Only a failure to fork/exec the child is fatal to a call. Everything
/// after a successful start (timeouts, undecodable exit causes, failed
/// group kills) is folded into the returned response instead.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("failed to start command: {0}")]
    Spawn(#[source] std::io::Error),
}
