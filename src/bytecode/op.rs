use serde::{Deserialize, Serialize};

use crate::lang::value::Value;
use crate::outcome::SignalKind;

/// Kind tag carried by an entry marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Program,
    Sub,
    Verb,
}

impl EntryKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntryKind::Program => "PROGRAM",
            EntryKind::Sub => "SUB",
            EntryKind::Verb => "VERB",
        }
    }
}

/// How `RANDOMIZE` reseeds the generator. The discriminant is the mode
/// argument the VM receives.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedMode {
    /// Seed from the system clock.
    Timer = 1,
    /// Seed from the value on top of the evaluation stack.
    Value = 2,
}

// =============================================================================
// OP - Bytecode instructions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    // ==========================================================================
    // Expression evaluation
    // ==========================================================================
    Push(Value),
    /// Push the value of a named variable.
    Load(String),
    Add,
    Sub,
    Mul,
    Div,
    Neg,

    // ==========================================================================
    // Scope and entry points
    // ==========================================================================
    /// Start of a named callable unit.
    Entry {
        kind: EntryKind,
        name: String,
    },
    /// Bind the caller's argument at `position` (0-based) to `name`.
    Arg {
        position: usize,
        name: String,
    },
    /// Trailing directive after an entry declaration.
    Pragma {
        name: String,
        value: Option<Value>,
    },
    /// Reset variable scope to unit-local storage.
    ScopeLocal,
    /// Close whatever flow (loops, pending blocks) is currently open.
    CloseFlow,
    /// Raise a control signal at run time.
    Raise(SignalKind),

    // ==========================================================================
    // Control flow
    // ==========================================================================
    /// Conditional skip used by a stand-alone ELSE: `(nesting, target)`.
    /// The target is resolved by the block linker; 0 means unresolved.
    CondSkip(i32, i32),
    /// Close the innermost FOR loop on the named control variable.
    Next(String),

    // ==========================================================================
    // Statements
    // ==========================================================================
    /// Reseed the random number generator.
    Randomize(SeedMode),
    /// Terminate the current output line.
    Newline,
    /// Statement text the runtime must interpret dynamically.
    Interpret(String),
}

impl Op {
    /// Upper-case mnemonic used by the disassembler.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Op::Push(_) => "PUSH",
            Op::Load(_) => "LOAD",
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mul => "MUL",
            Op::Div => "DIV",
            Op::Neg => "NEG",
            Op::Entry { .. } => "ENTRY",
            Op::Arg { .. } => "ARG",
            Op::Pragma { .. } => "PRAGMA",
            Op::ScopeLocal => "LOCAL",
            Op::CloseFlow => "CLOSE",
            Op::Raise(_) => "SIGNAL",
            Op::CondSkip(..) => "CSKIP",
            Op::Next(_) => "NEXT",
            Op::Randomize(_) => "RAND",
            Op::Newline => "NEWLINE",
            Op::Interpret(_) => "INTERP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_mode_arguments() {
        assert_eq!(SeedMode::Timer as u8, 1);
        assert_eq!(SeedMode::Value as u8, 2);
    }

    #[test]
    fn test_entry_kind_names() {
        assert_eq!(EntryKind::Program.name(), "PROGRAM");
        assert_eq!(EntryKind::Sub.name(), "SUB");
        assert_eq!(EntryKind::Verb.name(), "VERB");
    }
}
