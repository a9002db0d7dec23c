//! Source-level front end: tokens, the lexer and the token cursor that
//! statements consume.

pub mod cursor;
pub mod lexer;
pub mod token;
pub mod token_dumper;

pub use cursor::TokenCursor;
