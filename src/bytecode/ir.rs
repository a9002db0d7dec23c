use crate::bytecode::Op;
use serde::{Deserialize, Serialize};

/// A single compiled instruction stream.
///
/// Streams are append-only: instructions are pushed or concatenated at the
/// end and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeObject {
    ops: Vec<Op>,
}

impl CodeObject {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn push(&mut self, op: Op) {
        tracing::trace!(op = ?op, at = self.ops.len(), "emit");
        self.ops.push(op);
    }

    /// Append every instruction of `other`, preserving its order.
    pub fn concat(&mut self, other: CodeObject) {
        self.ops.extend(other.ops);
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn last(&self) -> Option<&Op> {
        self.ops.last()
    }
}

impl From<Vec<Op>> for CodeObject {
    fn from(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::value::Value;

    #[test]
    fn test_concat_preserves_order() {
        let mut code = CodeObject::new();
        code.push(Op::Push(Value::Integer(1)));

        let tail = CodeObject::from(vec![Op::Push(Value::Integer(2)), Op::Add]);
        code.concat(tail);
        code.push(Op::Newline);

        assert_eq!(
            code.ops(),
            &[
                Op::Push(Value::Integer(1)),
                Op::Push(Value::Integer(2)),
                Op::Add,
                Op::Newline
            ]
        );
    }

    #[test]
    fn test_empty_stream() {
        let code = CodeObject::new();
        assert!(code.is_empty());
        assert_eq!(code.len(), 0);
        assert!(code.last().is_none());
    }
}
