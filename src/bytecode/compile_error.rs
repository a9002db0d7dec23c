use thiserror::Error;

use crate::frontend::lexer::LexerError;
use crate::outcome::{ErrorKind, Signal};

/// Errors reported by the source-level compiler driver.
///
/// Statement-level failures keep their [`ErrorKind`] untouched; the driver
/// only adds the source line and verb.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error("lexer error: {0}")]
    Lexer(#[from] LexerError),

    /// The statement does not start with a verb
    #[error("{line}: expected a statement, found '{found}'")]
    ExpectedVerb { line: usize, found: String },

    /// A verb this compiler has no statement for
    #[error("{line}: unknown statement '{verb}'")]
    UnknownVerb { line: usize, verb: String },

    #[error("{line}: {verb}: {kind}")]
    Statement {
        line: usize,
        verb: String,
        kind: ErrorKind,
    },

    /// A compile returned a signal the driver cannot act on
    #[error("{line}: {verb}: unexpected signal {signal}")]
    UnexpectedSignal {
        line: usize,
        verb: String,
        signal: Signal,
    },

    #[error("{line}: unexpected '{text}' after {verb}")]
    TrailingTokens {
        line: usize,
        verb: String,
        text: String,
    },

    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("expected a .{expected} file, got {path}")]
    Extension { path: String, expected: String },
}

impl CompileError {
    /// Source line the error refers to, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::Lexer(e) => Some(e.line),
            CompileError::ExpectedVerb { line, .. }
            | CompileError::UnknownVerb { line, .. }
            | CompileError::Statement { line, .. }
            | CompileError::UnexpectedSignal { line, .. }
            | CompileError::TrailingTokens { line, .. } => Some(*line),
            CompileError::Io { .. } | CompileError::Extension { .. } => None,
        }
    }

    /// The statement failure kind, if this error wraps one.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            CompileError::Statement { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
