//! Compiler Errors
//!
//! Every failure raised while parsing, rewriting or rendering a template.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompilerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilerError {
    /// A `desc` filter whose operand chain never reaches a `trans` filter.
    #[error("The \"desc\" filter must be applied after a \"trans\" filter (line {line})")]
    MissingTransFilter { line: usize },

    #[error("The \"desc\" filter requires a default message argument (line {line})")]
    DescWithoutDefault { line: usize },

    #[error("{message} (line {line})")]
    ParseError { message: String, line: usize },

    #[error("Unknown filter \"{name}\" (line {line})")]
    UnknownFilter { name: String, line: usize },

    #[error("Variable \"{name}\" does not exist (line {line})")]
    UndefinedVariable { name: String, line: usize },

    #[error("{message} (line {line})")]
    InvalidArgument { message: String, line: usize },

    #[error("Invalid compiler configuration: {0}")]
    Config(String),
}

impl CompilerError {
    pub fn parse(message: impl Into<String>, line: usize) -> Self {
        CompilerError::ParseError {
            message: message.into(),
            line,
        }
    }

    pub fn invalid_argument(message: impl Into<String>, line: usize) -> Self {
        CompilerError::InvalidArgument {
            message: message.into(),
            line,
        }
    }

    /// Template line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompilerError::MissingTransFilter { line }
            | CompilerError::DescWithoutDefault { line }
            | CompilerError::ParseError { line, .. }
            | CompilerError::UnknownFilter { line, .. }
            | CompilerError::UndefinedVariable { line, .. }
            | CompilerError::InvalidArgument { line, .. } => Some(*line),
            CompilerError::Config(_) => None,
        }
    }
}
