//! PROGRAM, SUB and VERB declarations.
//!
//! Each emits an entry marker for the named unit, binds its formal
//! arguments and lets the owning unit process trailing pragmas. A SUB
//! first closes the preceding flow and raises END so execution cannot fall
//! through from the previous unit's body into the subroutine.

use tracing::debug;

use crate::bytecode::op::EntryKind;
use crate::bytecode::{CodeObject, Op};
use crate::frontend::TokenCursor;
use crate::frontend::token::Token;
use crate::outcome::{ErrorKind, Expected, Outcome, SignalKind};
use crate::session::{Program, Session};

pub fn compile(
    kind: EntryKind,
    code: &mut CodeObject,
    tokens: &mut TokenCursor,
    session: &mut Session,
) -> Outcome {
    compile_entry(kind, code, tokens, session).into()
}

fn compile_entry(
    kind: EntryKind,
    code: &mut CodeObject,
    tokens: &mut TokenCursor,
    session: &mut Session,
) -> Result<(), Outcome> {
    // The prologue goes in before the name is checked, so a SUB with a
    // missing name still fails with these two instructions emitted.
    if kind == EntryKind::Sub {
        code.push(Op::CloseFlow);
        code.push(Op::Raise(SignalKind::End));
    }

    let Token::Ident(name) = tokens.peek().clone() else {
        return Err(ErrorKind::ExpectedIdentifier(Expected::UnitName).into());
    };
    tokens.next();
    let name = name.to_ascii_uppercase();

    code.push(Op::Entry {
        kind,
        name: name.clone(),
    });
    if kind == EntryKind::Verb {
        code.push(Op::ScopeLocal);
    }

    Program::generate_argument_list(code, tokens).into_result()?;

    if let Some(unit) = session.resolve_unit_mut() {
        unit.handle_pragmas(code, tokens).into_result()?;
    }

    debug!(kind = kind.name(), unit = %name, "entry declared");
    session.set_current_unit_name(&name);
    Ok(())
}
