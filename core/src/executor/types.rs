use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::registry::InProgressRegistry;

/// Reserved command that bypasses real process execution and yields
/// [`struct@CANNED_RESPONSE`]. Keeps fixture-driven tests free of real
/// subprocess spawning.
pub const TEST_COMMAND: &str = "!checkrun_test_command!";

/// Output prepended to a response when the execution deadline fires.
pub const TIMEOUT_OUTPUT: &str = "Execution timed out\n";

/// Exit status of a clean, successful execution.
pub const OK_EXIT_STATUS: i32 = 0;

/// Exit status reported when the deadline fired, whether or not the group
/// kill itself succeeded.
pub const TIMEOUT_EXIT_STATUS: i32 = 2;

/// Exit status substituted when the real exit cause cannot be decoded.
pub const FALLBACK_EXIT_STATUS: i32 = 3;

const CANNED_RESPONSE_TEXT: &str = "\
   .--.
  ( oo )   checkrun fixture
   |--|    nothing was executed
   |__|
";

lazy_static! {
    /// Fixed response returned for [`TEST_COMMAND`], no process spawned.
    pub static ref CANNED_RESPONSE: ExecutionResponse = ExecutionResponse {
        output: CANNED_RESPONSE_TEXT.to_string(),
        status: OK_EXIT_STATUS,
        duration: 0.0,
    };
}

/// One command execution: what to run, under which environment, and how
/// long it may take.
#[derive(Debug, Clone, Default)]
pub struct ExecutionRequest {
    /// Shell-interpretable command line.
    pub command: String,

    /// `"KEY=VALUE"` pairs. When non-empty, the child's environment is
    /// replaced with exactly these pairs rather than merged with the
    /// ambient one. Entries without `=` are skipped.
    pub env: Vec<String>,

    /// Payload for the child's stdin. `None` attaches the null device.
    pub input: Option<String>,

    /// Deadline in whole seconds. 0 disables the deadline entirely: the
    /// call blocks until the child exits on its own.
    pub timeout: u64,

    /// Logical name of the check, hook, or mutator behind this request,
    /// used only for zombie-escape bookkeeping.
    pub name: String,

    /// Registry of in-flight executions shared with the scheduling loop.
    /// Required, together with a non-empty `name`, for zombie escape.
    pub in_progress: Option<Arc<InProgressRegistry>>,
}

/// Outcome of one execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// Combined stdout/stderr in pipe delivery order.
    pub output: String,

    /// 0 on success, the child's exit code, 2 on timeout, or 3 when the
    /// exit cause could not be determined.
    pub status: i32,

    /// Wall-clock seconds from just before spawn to result construction.
    pub duration: f64,
}

impl ExecutionResponse {
    /// Pre-built response for use in tests.
    pub fn fixture(status: i32, output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            status,
            duration: 1.0,
        }
    }
}
