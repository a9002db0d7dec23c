//! Result protocol shared by every compile and run operation.
//!
//! An [`Outcome`] is exactly one of: plain success, a [`Failure`](Outcome::Failure)
//! carrying an [`ErrorKind`], or a [`Signal`] carrying a control directive for
//! the driving loop. Signals are not failures. Callers branch on all three.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What an identifier was expected to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    LoopVariable,
    UnitName,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::LoopVariable => write!(f, "loop variable"),
            Expected::UnitName => write!(f, "program or unit name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("no active program")]
    NoActiveProgram,

    #[error("expected {0}")]
    ExpectedIdentifier(Expected),

    #[error("THEN or ELSE without matching IF")]
    MalformedConditional,

    #[error("no debugger attached")]
    NoDebugger,

    #[error("invalid argument list: {0}")]
    ArgumentList(String),

    #[error("duplicate argument name: {0}")]
    DuplicateArgument(String),

    #[error("invalid pragma: {0}")]
    InvalidPragma(String),

    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("step count must be a non-negative integer, got {0}")]
    InvalidStepCount(String),

    #[error("no query engine bound to this session")]
    NoQueryEngine,

    #[error("query error: {0}")]
    Query(String),

    #[error("{0} can only be used as an immediate debugger command")]
    ImmediateOnly(String),

    #[error("{0} cannot be executed immediately")]
    CompileOnly(String),
}

/// Name of a control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    /// Single-step count for the execution loop; 0 resumes normal execution.
    Step,
    /// Unconditional termination of the current flow.
    End,
    /// The statement cannot be compiled statically and must be interpreted at run time.
    Defer,
}

impl SignalKind {
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Step => "STEP",
            SignalKind::End => "END",
            SignalKind::Defer => "DEFER",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub kind: SignalKind,
    pub payload: i64,
}

impl Signal {
    pub fn new(kind: SignalKind, payload: i64) -> Self {
        Self { kind, payload }
    }

    pub fn step(count: i64) -> Self {
        Self::new(SignalKind::Step, count)
    }

    pub fn defer() -> Self {
        Self::new(SignalKind::Defer, 0)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.payload)
    }
}

#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok,
    Failure(ErrorKind),
    Signal(Signal),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, Outcome::Signal(_))
    }

    pub fn failure(&self) -> Option<&ErrorKind> {
        match self {
            Outcome::Failure(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn signal(&self) -> Option<Signal> {
        match self {
            Outcome::Signal(signal) => Some(*signal),
            _ => None,
        }
    }

    /// `Ok` becomes `Ok(())`; failures and signals are carried unchanged in `Err`.
    pub fn into_result(self) -> Result<(), Outcome> {
        match self {
            Outcome::Ok => Ok(()),
            other => Err(other),
        }
    }
}

impl From<ErrorKind> for Outcome {
    fn from(kind: ErrorKind) -> Self {
        Outcome::Failure(kind)
    }
}

impl From<Signal> for Outcome {
    fn from(signal: Signal) -> Self {
        Outcome::Signal(signal)
    }
}

impl From<Result<(), Outcome>> for Outcome {
    fn from(result: Result<(), Outcome>) -> Self {
        match result {
            Ok(()) => Outcome::Ok,
            Err(outcome) => outcome,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => write!(f, "ok"),
            Outcome::Failure(kind) => write!(f, "{}", kind),
            Outcome::Signal(signal) => write!(f, "signal {}", signal),
        }
    }
}
