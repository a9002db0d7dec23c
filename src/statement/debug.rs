//! RESUME and STEP: debugger commands that run immediately.
//!
//! Both check for an attached debugger before touching the cursor or any
//! debugger flag, then return a STEP signal telling the execution loop how
//! many instructions to run before stopping again (0 = run freely).

use crate::frontend::TokenCursor;
use crate::lang::symbols::SymbolTable;
use crate::outcome::{ErrorKind, Outcome, Signal};
use crate::session::Session;

pub fn resume(tokens: &mut TokenCursor, session: &mut Session) -> Outcome {
    let Some(debugger) = session.debugger_mut() else {
        return ErrorKind::NoDebugger.into();
    };

    // Anything other than RESET stays on the cursor for the caller.
    if tokens.assume("RESET") {
        debugger.reset_all_breakpoints();
    }

    Signal::step(0).into()
}

pub fn step(tokens: &mut TokenCursor, symbols: &SymbolTable, session: &mut Session) -> Outcome {
    let Some(debugger) = session.debugger_mut() else {
        return ErrorKind::NoDebugger.into();
    };

    if tokens.assume("RETURN") {
        debugger.set_return_flag(true);
        return Signal::step(0).into();
    }
    if tokens.assume("INTO") {
        debugger.set_step_into(true);
        return Signal::step(1).into();
    }

    debugger.set_step_into(false);
    if tokens.end_of_statement() {
        return Signal::step(1).into();
    }

    let value = match session.expressions().evaluate_now(tokens, symbols) {
        Ok(value) => value,
        Err(outcome) => return outcome,
    };
    match value.as_integer() {
        Some(count) if count >= 0 => Signal::step(count).into(),
        _ => ErrorKind::InvalidStepCount(value.to_string()).into(),
    }
}
