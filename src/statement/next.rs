use crate::bytecode::{CodeObject, Op};
use crate::frontend::TokenCursor;
use crate::frontend::token::Token;
use crate::outcome::{ErrorKind, Expected, Outcome};
use crate::session::Session;

/// NEXT closes a loop body, so listings print it one level out.
pub const OUTDENT: i32 = -1;

pub fn compile(code: &mut CodeObject, tokens: &mut TokenCursor, session: &Session) -> Outcome {
    if !session.has_unit_context() {
        return ErrorKind::NoActiveProgram.into();
    }

    let Token::Ident(variable) = tokens.peek().clone() else {
        return ErrorKind::ExpectedIdentifier(Expected::LoopVariable).into();
    };
    tokens.next();

    code.push(Op::Next(variable));
    Outcome::Ok
}
