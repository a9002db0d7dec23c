//! Language-level data: values, the symbol environment and the expression
//! subsystem that statements delegate to.

pub mod expr;
pub mod symbols;
pub mod value;
