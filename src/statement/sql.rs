use crate::bytecode::{CodeObject, Op};
use crate::frontend::TokenCursor;
use crate::outcome::{ErrorKind, Outcome};
use crate::session::{QueryKind, Session};

pub fn compile(code: &mut CodeObject, tokens: &mut TokenCursor, session: &mut Session) -> Outcome {
    let Some(preparer) = session.query_preparer() else {
        return ErrorKind::NoQueryEngine.into();
    };

    let prepared = match preparer.prepare(tokens) {
        Ok(prepared) => prepared,
        Err(outcome) => return outcome,
    };

    code.concat(prepared.code);
    if prepared.kind == QueryKind::Selection {
        code.push(Op::Newline);
    }
    Outcome::Ok
}

#[cfg(test)]
mod tests {
    use crate::bytecode::{CodeObject, Op};
    use crate::frontend::TokenCursor;
    use crate::frontend::token::Token;
    use crate::lang::value::Value;
    use crate::outcome::{ErrorKind, Outcome, Signal};
    use crate::session::{PreparedQuery, QueryKind, QueryPreparer, Session};
    use crate::statement::{Statement, StatementKind};

    /// Treats `SELECT ...` as a selection, `DYNAMIC ...` as deferred,
    /// `BROKEN` as a failure and anything else as a plain statement.
    struct FakePreparer;

    impl QueryPreparer for FakePreparer {
        fn prepare(&mut self, tokens: &mut TokenCursor) -> Result<PreparedQuery, Outcome> {
            let kind = if tokens.assume("SELECT") {
                QueryKind::Selection
            } else if tokens.assume("DYNAMIC") {
                return Err(Signal::defer().into());
            } else if tokens.assume("BROKEN") {
                return Err(ErrorKind::Query("no such table".to_string()).into());
            } else {
                QueryKind::Other
            };

            let mut code = CodeObject::new();
            for token in tokens.rest_of_statement() {
                code.push(Op::Push(Value::String(token.spelling())));
            }
            Ok(PreparedQuery { code, kind })
        }
    }

    fn compile(source: &str, session: &mut Session) -> (Statement, TokenCursor) {
        let mut tokens = TokenCursor::from_source(source).unwrap();
        let mut stmt = Statement::new(StatementKind::Sql);
        let _ = stmt.compile(&mut tokens, session);
        (stmt, tokens)
    }

    fn session() -> Session {
        let mut session = Session::default();
        session.bind_query_preparer(Box::new(FakePreparer));
        session
    }

    #[test]
    fn test_selection_gets_trailing_newline() {
        let mut session = session();
        let (stmt, tokens) = compile("SELECT name", &mut session);

        assert!(stmt.status().is_ok());
        assert_eq!(
            stmt.code().unwrap().ops(),
            &[Op::Push(Value::String("name".to_string())), Op::Newline]
        );
        assert!(matches!(tokens.peek(), Token::Eof));
    }

    #[test]
    fn test_other_query_has_no_newline() {
        let mut session = session();
        let (stmt, _) = compile("DELETE rows", &mut session);

        assert!(stmt.status().is_ok());
        let ops = stmt.code().unwrap().ops();
        assert_eq!(ops.len(), 2);
        assert!(!ops.contains(&Op::Newline));
    }

    #[test]
    fn test_deferred_signal_is_forwarded_without_code() {
        let mut session = session();
        let (stmt, _) = compile("DYNAMIC x", &mut session);

        assert_eq!(stmt.status(), &Outcome::Signal(Signal::defer()));
        assert!(stmt.code().is_none());
    }

    #[test]
    fn test_preparer_failure_is_forwarded() {
        let mut session = session();
        let (stmt, _) = compile("BROKEN", &mut session);

        assert_eq!(
            stmt.status(),
            &Outcome::Failure(ErrorKind::Query("no such table".to_string()))
        );
    }

    #[test]
    fn test_no_preparer_bound() {
        let mut session = Session::default();
        let (stmt, tokens) = compile("SELECT name", &mut session);

        assert_eq!(stmt.status(), &Outcome::Failure(ErrorKind::NoQueryEngine));
        assert_eq!(tokens.position(), 0);
    }
}
