//! CLI commands
//!
//! Each command exposes `Options` and a `run` returning the process exit code.

pub mod completion;
pub mod generate;
pub mod init;
pub mod validate;
pub mod watch;
