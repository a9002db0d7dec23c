use crate::bytecode::CodeObject;
use crate::frontend::TokenCursor;
use crate::outcome::Outcome;

/// What a prepared query produces when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Row-producing query; output needs a terminating newline.
    Selection,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub code: CodeObject,
    pub kind: QueryKind,
}

/// Compiles embedded query statements.
///
/// `prepare` consumes the query body from the cursor. An `Err` carries
/// either a failure or the DEFER signal when the statement can only be
/// interpreted at run time; callers forward it unchanged.
pub trait QueryPreparer {
    fn prepare(&mut self, tokens: &mut TokenCursor) -> Result<PreparedQuery, Outcome>;
}
