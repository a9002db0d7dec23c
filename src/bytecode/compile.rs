use std::path::Path;

use tracing::{debug, info};

use crate::{
    bytecode::{CodeObject, Op, compile_error::CompileError},
    frontend::{TokenCursor, token::Token},
    lang::symbols::SymbolTable,
    outcome::{Outcome, SignalKind},
    session::{MAIN_UNIT, Session},
    statement::Statement,
};

/// Source-level driver: splits source into statements, dispatches each by
/// verb and appends the compiled code to the unit under construction.
pub struct Compiler<'s> {
    session: &'s mut Session,
}

impl<'s> Compiler<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self { session }
    }

    pub fn compile_from_file(&mut self, path: &Path) -> Result<String, CompileError> {
        let expected = &self.session.config().source_extension;
        if path.extension().and_then(|e| e.to_str()) != Some(expected.as_str()) {
            return Err(CompileError::Extension {
                path: path.display().to_string(),
                expected: expected.clone(),
            });
        }

        let source = std::fs::read_to_string(path).map_err(|e| CompileError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), "compiling");
        self.compile_source(&source)
    }

    /// Compile a whole source into a new unit, register it with the session
    /// and return its name. On error the unit is discarded.
    pub fn compile_source(&mut self, source: &str) -> Result<String, CompileError> {
        let mut tokens = TokenCursor::from_source(source)?;

        self.session.begin_unit();
        if let Err(e) = self.compile_statements(&mut tokens) {
            self.session.abandon_unit();
            return Err(e);
        }

        Ok(self
            .session
            .finish_unit()
            .unwrap_or_else(|| MAIN_UNIT.to_string()))
    }

    fn compile_statements(&mut self, tokens: &mut TokenCursor) -> Result<(), CompileError> {
        loop {
            tokens.skip_separators();
            if tokens.at_eof() {
                return Ok(());
            }

            let code = self.compile_statement(tokens)?;
            if let Some(unit) = self.session.active_unit_mut() {
                unit.append(code);
            }
        }
    }

    /// Compile the statement under the cursor and return its code.
    ///
    /// A statement whose compile defers to run time becomes a single
    /// `Interpret` instruction carrying its source text.
    pub fn compile_statement(&mut self, tokens: &mut TokenCursor) -> Result<CodeObject, CompileError> {
        let line = tokens.span().line;
        let start = tokens.position();
        let mut stmt = self.statement_at(tokens)?;
        let verb = stmt.kind().verb().to_string();

        debug!(line, verb = %verb, "compile statement");

        match stmt.compile(tokens, self.session) {
            Outcome::Ok => {}
            Outcome::Failure(kind) => {
                return Err(CompileError::Statement { line, verb, kind });
            }
            Outcome::Signal(signal) if signal.kind == SignalKind::Defer => {
                tokens.rest_of_statement();
                let text = tokens.text_between(start, tokens.position());
                debug!(line, text = %text, "deferred to run time");
                return Ok(CodeObject::from(vec![Op::Interpret(text)]));
            }
            Outcome::Signal(signal) => {
                return Err(CompileError::UnexpectedSignal { line, verb, signal });
            }
        }

        if !tokens.end_of_statement() {
            let text = leftover(tokens);
            return Err(CompileError::TrailingTokens { line, verb, text });
        }

        Ok(stmt.take_code().unwrap_or_default())
    }

    /// Run one line of immediate debugger input.
    ///
    /// Tokens the command leaves unconsumed are rejected, unless the
    /// command failed before reading them.
    pub fn execute(&mut self, input: &str, symbols: &SymbolTable) -> Result<Outcome, CompileError> {
        let mut tokens = TokenCursor::from_source(input)?;
        tokens.skip_separators();

        let line = tokens.span().line;
        let mut stmt = self.statement_at(&mut tokens)?;
        let verb = stmt.kind().verb().to_string();
        let status = stmt.run(&mut tokens, symbols, self.session);
        debug!(verb = %verb, status = %status, "immediate");

        if !status.is_failure() && !tokens.end_of_statement() {
            let text = leftover(&mut tokens);
            return Err(CompileError::TrailingTokens { line, verb, text });
        }
        Ok(status)
    }

    /// Consume the verb under the cursor and build its statement.
    fn statement_at(&self, tokens: &mut TokenCursor) -> Result<Statement, CompileError> {
        let line = tokens.span().line;
        match tokens.next() {
            Token::Ident(verb) => {
                Statement::for_verb(&verb).ok_or(CompileError::UnknownVerb { line, verb })
            }
            other => Err(CompileError::ExpectedVerb {
                line,
                found: other.spelling(),
            }),
        }
    }
}

/// Consume the rest of the statement and render it as source text.
fn leftover(tokens: &mut TokenCursor) -> String {
    tokens
        .rest_of_statement()
        .iter()
        .map(Token::spelling)
        .collect::<Vec<_>>()
        .join(" ")
}
