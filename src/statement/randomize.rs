use crate::bytecode::op::SeedMode;
use crate::bytecode::{CodeObject, Op};
use crate::frontend::TokenCursor;
use crate::outcome::Outcome;
use crate::session::Session;

pub fn compile(code: &mut CodeObject, tokens: &mut TokenCursor, session: &Session) -> Outcome {
    if tokens.assume("TIMER") {
        code.push(Op::Randomize(SeedMode::Timer));
        return Outcome::Ok;
    }

    let status = session.expressions().compile_into(code, tokens);
    if !status.is_ok() {
        return status;
    }

    code.push(Op::Randomize(SeedMode::Value));
    Outcome::Ok
}

#[cfg(test)]
mod tests {
    use crate::bytecode::op::SeedMode;
    use crate::bytecode::{CodeObject, Op};
    use crate::frontend::TokenCursor;
    use crate::lang::expr::Expressions;
    use crate::lang::symbols::SymbolTable;
    use crate::lang::value::Value;
    use crate::outcome::{ErrorKind, Outcome};
    use crate::session::{Session, SessionConfig};
    use crate::statement::{Statement, StatementKind};

    fn compile(source: &str, session: &mut Session) -> (Statement, TokenCursor) {
        let mut tokens = TokenCursor::from_source(source).unwrap();
        let mut stmt = Statement::new(StatementKind::Randomize);
        let _ = stmt.compile(&mut tokens, session);
        (stmt, tokens)
    }

    #[test]
    fn test_randomize_timer() {
        let mut session = Session::default();
        let (stmt, tokens) = compile("TIMER 5", &mut session);

        assert!(stmt.status().is_ok());
        assert_eq!(
            stmt.code().unwrap().ops(),
            &[Op::Randomize(SeedMode::Timer)]
        );
        // Only the TIMER keyword is consumed.
        assert_eq!(tokens.peek(), &crate::frontend::token::Token::Integer(5));
    }

    #[test]
    fn test_randomize_expression() {
        let mut session = Session::default();
        let (stmt, _) = compile("seed * 2", &mut session);

        assert!(stmt.status().is_ok());
        assert_eq!(
            stmt.code().unwrap().ops(),
            &[
                Op::Load("seed".to_string()),
                Op::Push(Value::Integer(2)),
                Op::Mul,
                Op::Randomize(SeedMode::Value),
            ]
        );
    }

    #[test]
    fn test_expression_failure_is_verbatim_and_no_reseed() {
        let mut session = Session::default();
        let (stmt, _) = compile("(1 +", &mut session);

        assert!(matches!(
            stmt.status(),
            Outcome::Failure(ErrorKind::InvalidExpression(_))
        ));
        assert!(
            !stmt
                .code()
                .unwrap()
                .ops()
                .iter()
                .any(|op| matches!(op, Op::Randomize(_)))
        );
    }

    /// Emits one instruction then fails with a distinctive kind.
    struct HalfEmitting;

    impl Expressions for HalfEmitting {
        fn compile_into(&self, code: &mut CodeObject, _tokens: &mut TokenCursor) -> Outcome {
            code.push(Op::Push(Value::Integer(1)));
            ErrorKind::Query("from expression".to_string()).into()
        }

        fn evaluate_now(
            &self,
            _tokens: &mut TokenCursor,
            _symbols: &SymbolTable,
        ) -> Result<Value, Outcome> {
            Ok(Value::Integer(0))
        }
    }

    #[test]
    fn test_partial_expression_code_is_kept() {
        let mut session =
            Session::new(SessionConfig::default()).with_expressions(Box::new(HalfEmitting));
        let (stmt, _) = compile("anything", &mut session);

        assert_eq!(
            stmt.status(),
            &Outcome::Failure(ErrorKind::Query("from expression".to_string()))
        );
        assert_eq!(
            stmt.code().unwrap().ops(),
            &[Op::Push(Value::Integer(1))]
        );
    }
}
