//! Argv-only command execution with bounded timeouts and cancellation, shared
//! by every checker and analyzer that shells out to an external tool.

pub mod command_spec;
pub mod error;
pub mod process;
pub mod types;

pub use command_spec::CommandSpec;
pub use error::ExecutorError;
pub use process::{CommandExecutor, DEFAULT_TIMEOUT};
pub use types::CommandOutput;
