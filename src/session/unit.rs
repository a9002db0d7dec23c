use serde::{Deserialize, Serialize};

use crate::bytecode::op::EntryKind;
use crate::bytecode::{CodeObject, Op};
use crate::frontend::TokenCursor;
use crate::frontend::token::Token;
use crate::lang::value::Value;
use crate::outcome::{ErrorKind, Outcome};

/// Trailing directive recorded on a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pragma {
    pub name: String,
    pub value: Option<Value>,
}

/// A program unit: the code of one compiled source together with the
/// metadata its entry declaration established.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    name: Option<String>,
    kind: Option<EntryKind>,
    code: CodeObject,
    pragmas: Vec<Pragma>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str, kind: EntryKind) -> Self {
        Self {
            name: Some(name.to_string()),
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> Option<EntryKind> {
        self.kind
    }

    pub fn code(&self) -> &CodeObject {
        &self.code
    }

    pub fn pragmas(&self) -> &[Pragma] {
        &self.pragmas
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Take ownership of a statement's compiled code. The first entry marker
    /// appended to an unnamed unit names it.
    pub fn append(&mut self, code: CodeObject) {
        if self.name.is_none() {
            if let Some((kind, name)) = code.ops().iter().find_map(|op| match op {
                Op::Entry { kind, name } => Some((*kind, name.clone())),
                _ => None,
            }) {
                self.name = Some(name);
                self.kind = Some(kind);
            }
        }
        self.code.concat(code);
    }

    /// Parse an optional formal parameter list `( name [, name]* )` and emit
    /// one binding instruction per formal.
    pub fn generate_argument_list(code: &mut CodeObject, tokens: &mut TokenCursor) -> Outcome {
        if !tokens.assume_token(&Token::LParen) {
            return Outcome::Ok;
        }
        if tokens.assume_token(&Token::RParen) {
            return Outcome::Ok;
        }

        let mut names: Vec<String> = Vec::new();
        loop {
            let name = match tokens.next() {
                Token::Ident(name) => name,
                other => {
                    return ErrorKind::ArgumentList(format!(
                        "expected a parameter name, found '{}'",
                        other.spelling()
                    ))
                    .into();
                }
            };
            if names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
                return ErrorKind::DuplicateArgument(name).into();
            }
            code.push(Op::Arg {
                position: names.len(),
                name: name.clone(),
            });
            names.push(name);

            match tokens.next() {
                Token::Comma => continue,
                Token::RParen => return Outcome::Ok,
                other => {
                    return ErrorKind::ArgumentList(format!(
                        "expected ',' or ')', found '{}'",
                        other.spelling()
                    ))
                    .into();
                }
            }
        }
    }

    /// Consume trailing `NAME [= literal]` directives (optionally comma
    /// separated) up to the end of the statement.
    pub fn handle_pragmas(&mut self, code: &mut CodeObject, tokens: &mut TokenCursor) -> Outcome {
        while !tokens.end_of_statement() {
            if tokens.assume_token(&Token::Comma) {
                continue;
            }
            let name = match tokens.next() {
                Token::Ident(name) => name.to_ascii_uppercase(),
                other => return ErrorKind::InvalidPragma(other.spelling()).into(),
            };
            let value = if tokens.assume_token(&Token::Eq) {
                match tokens.next() {
                    Token::Integer(n) => Some(Value::Integer(n)),
                    Token::Float(n) => Some(Value::Float(n)),
                    Token::String(s) => Some(Value::String(s)),
                    Token::Ident(s) => Some(Value::String(s)),
                    other => {
                        return ErrorKind::InvalidPragma(format!(
                            "{} = {}",
                            name,
                            other.spelling()
                        ))
                        .into();
                    }
                }
            } else {
                None
            };

            code.push(Op::Pragma {
                name: name.clone(),
                value: value.clone(),
            });
            self.pragmas.push(Pragma { name, value });
        }
        Outcome::Ok
    }

    /// Compact binary image of the unit for hand-off to a VM.
    pub fn to_image(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    pub fn from_image(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(source: &str) -> TokenCursor {
        TokenCursor::from_source(source).unwrap()
    }

    #[test]
    fn test_no_argument_list() {
        let mut code = CodeObject::new();
        let mut tokens = cursor("");
        assert!(Program::generate_argument_list(&mut code, &mut tokens).is_ok());
        assert!(code.is_empty());
    }

    #[test]
    fn test_empty_parentheses() {
        let mut code = CodeObject::new();
        let mut tokens = cursor("()");
        assert!(Program::generate_argument_list(&mut code, &mut tokens).is_ok());
        assert!(code.is_empty());
        assert!(tokens.at_eof());
    }

    #[test]
    fn test_arguments_bind_in_order() {
        let mut code = CodeObject::new();
        let mut tokens = cursor("(w, h)");
        assert!(Program::generate_argument_list(&mut code, &mut tokens).is_ok());
        assert_eq!(
            code.ops(),
            &[
                Op::Arg {
                    position: 0,
                    name: "w".to_string()
                },
                Op::Arg {
                    position: 1,
                    name: "h".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_argument() {
        let mut code = CodeObject::new();
        let mut tokens = cursor("(a, A)");
        assert_eq!(
            Program::generate_argument_list(&mut code, &mut tokens),
            Outcome::Failure(ErrorKind::DuplicateArgument("A".to_string()))
        );
        assert_eq!(code.len(), 1);
    }

    #[test]
    fn test_unclosed_argument_list() {
        let mut code = CodeObject::new();
        let mut tokens = cursor("(a b)");
        let status = Program::generate_argument_list(&mut code, &mut tokens);
        assert!(matches!(
            status,
            Outcome::Failure(ErrorKind::ArgumentList(_))
        ));
    }

    #[test]
    fn test_pragmas_are_recorded_and_emitted() {
        let mut unit = Program::new();
        let mut code = CodeObject::new();
        let mut tokens = cursor("static, version = 2");
        assert!(unit.handle_pragmas(&mut code, &mut tokens).is_ok());

        assert_eq!(
            unit.pragmas(),
            &[
                Pragma {
                    name: "STATIC".to_string(),
                    value: None
                },
                Pragma {
                    name: "VERSION".to_string(),
                    value: Some(Value::Integer(2))
                },
            ]
        );
        assert_eq!(code.len(), 2);
    }

    #[test]
    fn test_invalid_pragma() {
        let mut unit = Program::new();
        let mut code = CodeObject::new();
        let mut tokens = cursor("42");
        assert_eq!(
            unit.handle_pragmas(&mut code, &mut tokens),
            Outcome::Failure(ErrorKind::InvalidPragma("42".to_string()))
        );
        assert!(unit.pragmas().is_empty());
    }

    #[test]
    fn test_append_names_unit_from_first_entry() {
        let mut unit = Program::new();
        unit.append(CodeObject::from(vec![Op::Entry {
            kind: EntryKind::Program,
            name: "REPORT".to_string(),
        }]));
        unit.append(CodeObject::from(vec![Op::Entry {
            kind: EntryKind::Sub,
            name: "HELPER".to_string(),
        }]));

        assert_eq!(unit.name(), Some("REPORT"));
        assert_eq!(unit.kind(), Some(EntryKind::Program));
        assert_eq!(unit.code().len(), 2);
    }

    #[test]
    fn test_image_preserves_unit() {
        let mut unit = Program::named("REPORT", EntryKind::Program);
        unit.append(CodeObject::from(vec![Op::Next("i".to_string())]));

        let bytes = unit.to_image().unwrap();
        assert_eq!(Program::from_image(&bytes).unwrap(), unit);
    }
}
