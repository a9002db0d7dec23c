use std::collections::HashMap;

use crate::lang::value::Value;

/// Variable environment used when evaluating an expression immediately.
///
/// Names are matched case-insensitively, as the language treats `i` and `I`
/// as the same variable.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    values: HashMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.to_ascii_uppercase()
    }

    pub fn insert(&mut self, name: &str, value: Value) -> Option<Value> {
        self.values.insert(Self::key(name), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(&Self::key(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(&Self::key(name))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
