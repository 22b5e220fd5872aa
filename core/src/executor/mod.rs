//! The execution engine: request/response model, stream capture, and the
//! deadline race.

mod engine;
mod pump;
mod types;

pub use engine::{CommandExecutor, Executor};
pub use types::{
    ExecutionRequest, ExecutionResponse, CANNED_RESPONSE, FALLBACK_EXIT_STATUS, OK_EXIT_STATUS,
    TEST_COMMAND, TIMEOUT_EXIT_STATUS, TIMEOUT_OUTPUT,
};
