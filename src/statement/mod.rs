//! Statements: one verb, one source clause.
//!
//! The driver picks a [`StatementKind`] by verb keyword, consumes the verb
//! and calls [`Statement::compile`] (building a code object) or, for
//! debugger commands, [`Statement::run`] (acting immediately and returning a
//! signal for the execution loop).

mod conditional;
mod debug;
mod entry;
mod next;
mod randomize;
mod sql;

use crate::bytecode::CodeObject;
use crate::bytecode::op::EntryKind;
use crate::frontend::TokenCursor;
use crate::lang::symbols::SymbolTable;
use crate::outcome::{ErrorKind, Outcome, SignalKind};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Else,
    Then,
    Next,
    Program,
    Sub,
    Verb,
    Randomize,
    Resume,
    Step,
    Sql,
}

const VERBS: &[(&str, StatementKind)] = &[
    ("ELSE", StatementKind::Else),
    ("THEN", StatementKind::Then),
    ("NEXT", StatementKind::Next),
    ("PROGRAM", StatementKind::Program),
    ("SUB", StatementKind::Sub),
    ("VERB", StatementKind::Verb),
    ("RANDOMIZE", StatementKind::Randomize),
    ("RESUME", StatementKind::Resume),
    ("STEP", StatementKind::Step),
    ("SQL", StatementKind::Sql),
];

impl StatementKind {
    pub fn from_verb(verb: &str) -> Option<Self> {
        VERBS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(verb))
            .map(|(_, kind)| *kind)
    }

    pub fn verb(&self) -> &'static str {
        VERBS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    /// Debugger commands act immediately and are never compiled.
    pub fn is_immediate(&self) -> bool {
        matches!(self, StatementKind::Resume | StatementKind::Step)
    }
}

#[derive(Debug)]
pub struct Statement {
    kind: StatementKind,
    code: Option<CodeObject>,
    status: Outcome,
    indent: i32,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            code: None,
            status: Outcome::Ok,
            indent: 0,
        }
    }

    pub fn for_verb(verb: &str) -> Option<Self> {
        StatementKind::from_verb(verb).map(Self::new)
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Outcome of the last compile or run.
    pub fn status(&self) -> &Outcome {
        &self.status
    }

    /// Code built by the last compile. Present on success and possibly on
    /// failure (partially emitted); never schedule it unless the status is Ok.
    pub fn code(&self) -> Option<&CodeObject> {
        self.code.as_ref()
    }

    /// Hand the compiled code to its owner.
    pub fn take_code(&mut self) -> Option<CodeObject> {
        self.code.take()
    }

    /// Source indentation hint for pretty-printers (NEXT outdents by one).
    pub fn indent(&self) -> i32 {
        self.indent
    }

    pub fn compile(&mut self, tokens: &mut TokenCursor, session: &mut Session) -> Outcome {
        let mut code = CodeObject::new();

        let status = match self.kind {
            StatementKind::Else => conditional::compile_else(&mut code, session),
            StatementKind::Then => conditional::compile_then(),
            StatementKind::Next => {
                let status = next::compile(&mut code, tokens, session);
                if status.is_ok() {
                    self.indent = next::OUTDENT;
                }
                status
            }
            StatementKind::Program => entry::compile(EntryKind::Program, &mut code, tokens, session),
            StatementKind::Sub => entry::compile(EntryKind::Sub, &mut code, tokens, session),
            StatementKind::Verb => entry::compile(EntryKind::Verb, &mut code, tokens, session),
            StatementKind::Randomize => randomize::compile(&mut code, tokens, session),
            StatementKind::Sql => sql::compile(&mut code, tokens, session),
            StatementKind::Resume | StatementKind::Step => {
                ErrorKind::ImmediateOnly(self.kind.verb().to_string()).into()
            }
        };

        // A trap, a debugger command or a deferred query leaves no stream at all.
        self.code = match (self.kind, &status) {
            (StatementKind::Then, _) => None,
            (kind, _) if kind.is_immediate() => None,
            (StatementKind::Sql, Outcome::Signal(signal)) if signal.kind == SignalKind::Defer => {
                None
            }
            _ => Some(code),
        };

        self.status = status.clone();
        status
    }

    pub fn run(
        &mut self,
        tokens: &mut TokenCursor,
        symbols: &SymbolTable,
        session: &mut Session,
    ) -> Outcome {
        let status = match self.kind {
            StatementKind::Resume => debug::resume(tokens, session),
            StatementKind::Step => debug::step(tokens, symbols, session),
            _ => ErrorKind::CompileOnly(self.kind.verb().to_string()).into(),
        };

        self.status = status.clone();
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_verb_ignores_case() {
        assert_eq!(StatementKind::from_verb("next"), Some(StatementKind::Next));
        assert_eq!(StatementKind::from_verb("Sub"), Some(StatementKind::Sub));
        assert_eq!(StatementKind::from_verb("PRINT"), None);
    }

    #[test]
    fn test_every_kind_has_a_verb() {
        for (name, kind) in VERBS {
            assert_eq!(kind.verb(), *name);
            assert_eq!(StatementKind::from_verb(name), Some(*kind));
        }
    }

    #[test]
    fn test_immediate_kinds() {
        assert!(StatementKind::Resume.is_immediate());
        assert!(StatementKind::Step.is_immediate());
        assert!(!StatementKind::Next.is_immediate());
    }

    #[test]
    fn test_compiling_a_debugger_command_fails() {
        let mut session = Session::default();
        let mut tokens = TokenCursor::from_source("").unwrap();
        let mut stmt = Statement::new(StatementKind::Step);

        let status = stmt.compile(&mut tokens, &mut session);
        assert_eq!(
            status,
            Outcome::Failure(ErrorKind::ImmediateOnly("STEP".to_string()))
        );
        assert!(stmt.code().is_none());
        assert_eq!(stmt.status(), &status);
    }

    #[test]
    fn test_running_a_compiled_verb_fails() {
        let mut session = Session::default();
        let mut tokens = TokenCursor::from_source("i").unwrap();
        let mut stmt = Statement::for_verb("NEXT").unwrap();

        let status = stmt.run(&mut tokens, &SymbolTable::new(), &mut session);
        assert_eq!(
            status,
            Outcome::Failure(ErrorKind::CompileOnly("NEXT".to_string()))
        );
        assert_eq!(tokens.position(), 0);
    }

    #[test]
    fn test_take_code_transfers_ownership() {
        let mut session = Session::default();
        session.begin_unit();
        let mut tokens = TokenCursor::from_source("i").unwrap();
        let mut stmt = Statement::new(StatementKind::Next);

        assert!(stmt.compile(&mut tokens, &mut session).is_ok());
        let code = stmt.take_code().unwrap();
        assert_eq!(code.len(), 1);
        assert!(stmt.code().is_none());
    }
}
