//! Stray clause keywords.
//!
//! THEN and ELSE are normally consumed inline by the IF that owns them. When
//! one reaches the dispatcher on its own, THEN is always an error; a
//! stand-alone ELSE inside a block IF becomes a conditional skip.

use crate::bytecode::{CodeObject, Op};
use crate::outcome::{ErrorKind, Outcome};
use crate::session::Session;

pub fn compile_else(code: &mut CodeObject, session: &Session) -> Outcome {
    if !session.has_unit_context() {
        return ErrorKind::NoActiveProgram.into();
    }
    code.push(Op::CondSkip(0, 0));
    Outcome::Ok
}

pub fn compile_then() -> Outcome {
    ErrorKind::MalformedConditional.into()
}
