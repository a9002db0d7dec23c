pub mod bytecode;
pub mod debugger;
pub mod frontend;
pub mod lang;
pub mod outcome;
pub mod session;
pub mod statement;

pub use bytecode::compile::Compiler;
pub use bytecode::compile_error::CompileError;
pub use outcome::{ErrorKind, Outcome, Signal, SignalKind};
pub use session::{Program, Session, SessionConfig};
pub use statement::{Statement, StatementKind};
