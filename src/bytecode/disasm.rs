use std::fmt::Write;

use crate::bytecode::{CodeObject, Op};
use crate::session::Program;

/// Print disassembly of a compiled program unit
pub fn print_unit(unit: &Program) {
    print!("{}", format_unit(unit));
}

pub fn format_unit(unit: &Program) -> String {
    let mut out = String::new();
    let kind = unit.kind().map(|k| k.name()).unwrap_or("UNIT");

    let _ = writeln!(out, "════════════════════════════════════════");
    let _ = writeln!(out, " {} {}", kind, unit.name().unwrap_or("<unnamed>"));
    let _ = writeln!(out, " {} instructions", unit.code().len());
    let _ = writeln!(out, "════════════════════════════════════════");
    out.push_str(&disassemble(unit.code()));
    out
}

/// One line per instruction: index, mnemonic, operands.
pub fn disassemble(code: &CodeObject) -> String {
    let mut out = String::new();
    for (ip, op) in code.ops().iter().enumerate() {
        // Entry markers start a new callable region; make them stand out.
        if matches!(op, Op::Entry { .. }) && ip > 0 {
            let _ = writeln!(out, "      ┌──────────────────────────────────");
        }
        let _ = writeln!(out, "{:04}   {}", ip, format_op(op));
    }
    out
}

pub fn format_op(op: &Op) -> String {
    let operands = match op {
        Op::Push(v) => v.to_string(),
        Op::Load(name) => name.clone(),
        Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Neg => String::new(),

        Op::Entry { kind, name } => format!("{} {}", kind.name(), name),
        Op::Arg { position, name } => format!("{} {}", position, name),
        Op::Pragma { name, value } => match value {
            Some(v) => format!("{} = {}", name, v),
            None => name.clone(),
        },
        Op::ScopeLocal => "; unit-local scope".to_string(),
        Op::CloseFlow => "; close open flow".to_string(),
        Op::Raise(kind) => kind.name().to_string(),

        Op::CondSkip(nesting, target) => format!("{}, {}", nesting, target),
        Op::Next(var) => var.clone(),

        Op::Randomize(mode) => format!("{} ; {:?}", *mode as u8, mode),
        Op::Newline => String::new(),
        Op::Interpret(text) => format!("{:?}", text),
    };

    if operands.is_empty() {
        op.mnemonic().to_string()
    } else {
        format!("{:<10}  {}", op.mnemonic(), operands)
    }
}
