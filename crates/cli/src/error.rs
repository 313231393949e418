//! CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Compiler error: {0}")]
    Compiler(#[from] hogtyped_compiler::CompilerError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("{0}")]
    Message(String),
}

impl From<hogtyped_compiler::error::ParseError> for CliError {
    fn from(err: hogtyped_compiler::error::ParseError) -> Self {
        Self::Compiler(err.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;
