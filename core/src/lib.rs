//! Bounded-time execution of external commands for a monitoring agent.
//!
//! The engine spawns a shell command, enforces a per-execution deadline,
//! captures combined stdout/stderr, and derives an integer exit status. On
//! an expired deadline it tears down the whole process group and, when even
//! that fails, evicts the execution's logical name from the shared
//! in-progress registry so the scheduler can try again.

pub mod error;
pub mod executor;
pub mod process;
pub mod registry;
pub mod util;

pub use error::ExecuteError;
pub use executor::{
    CommandExecutor, ExecutionRequest, ExecutionResponse, Executor, CANNED_RESPONSE,
    FALLBACK_EXIT_STATUS, OK_EXIT_STATUS, TEST_COMMAND, TIMEOUT_EXIT_STATUS, TIMEOUT_OUTPUT,
};
pub use registry::InProgressRegistry;
