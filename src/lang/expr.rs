//! Expression subsystem.
//!
//! Statements never parse expressions themselves; they hand the cursor to an
//! [`Expressions`] implementation which either emits code that leaves one
//! value on the evaluation stack, or evaluates the expression on the spot.

use crate::bytecode::{CodeObject, Op};
use crate::frontend::TokenCursor;
use crate::frontend::token::Token;
use crate::lang::symbols::SymbolTable;
use crate::lang::value::Value;
use crate::outcome::{ErrorKind, Outcome};

pub trait Expressions {
    /// Compile one expression onto the end of `code`.
    fn compile_into(&self, code: &mut CodeObject, tokens: &mut TokenCursor) -> Outcome;

    /// Evaluate one expression now against `symbols`.
    fn evaluate_now(&self, tokens: &mut TokenCursor, symbols: &SymbolTable)
    -> Result<Value, Outcome>;
}

/// Arithmetic expressions: literals, variables, unary minus, `+ - * /` and
/// parentheses.
#[derive(Debug, Default, Clone, Copy)]
pub struct Arithmetic;

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Value),
    Variable(String),
    Negate(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Expressions for Arithmetic {
    fn compile_into(&self, code: &mut CodeObject, tokens: &mut TokenCursor) -> Outcome {
        match parse_expression(tokens) {
            Ok(expr) => {
                emit(&expr, code);
                Outcome::Ok
            }
            Err(kind) => kind.into(),
        }
    }

    fn evaluate_now(
        &self,
        tokens: &mut TokenCursor,
        symbols: &SymbolTable,
    ) -> Result<Value, Outcome> {
        let expr = parse_expression(tokens)?;
        Ok(eval(&expr, symbols)?)
    }
}

// =============================================================================
// Parsing (precedence climbing over the cursor)
// =============================================================================

fn parse_expression(tokens: &mut TokenCursor) -> Result<Expr, ErrorKind> {
    if tokens.end_of_statement() {
        return Err(ErrorKind::InvalidExpression(
            "expected an expression".to_string(),
        ));
    }
    parse_sum(tokens)
}

fn parse_sum(tokens: &mut TokenCursor) -> Result<Expr, ErrorKind> {
    let mut left = parse_product(tokens)?;
    loop {
        let op = match tokens.peek() {
            Token::Plus => BinOp::Add,
            Token::Minus => BinOp::Sub,
            _ => return Ok(left),
        };
        tokens.next();
        let right = parse_product(tokens)?;
        left = Expr::Binary(op, Box::new(left), Box::new(right));
    }
}

fn parse_product(tokens: &mut TokenCursor) -> Result<Expr, ErrorKind> {
    let mut left = parse_unary(tokens)?;
    loop {
        let op = match tokens.peek() {
            Token::Star => BinOp::Mul,
            Token::Slash => BinOp::Div,
            _ => return Ok(left),
        };
        tokens.next();
        let right = parse_unary(tokens)?;
        left = Expr::Binary(op, Box::new(left), Box::new(right));
    }
}

fn parse_unary(tokens: &mut TokenCursor) -> Result<Expr, ErrorKind> {
    if tokens.assume_token(&Token::Minus) {
        let operand = parse_unary(tokens)?;
        return Ok(Expr::Negate(Box::new(operand)));
    }
    parse_primary(tokens)
}

fn parse_primary(tokens: &mut TokenCursor) -> Result<Expr, ErrorKind> {
    match tokens.next() {
        Token::Integer(n) => Ok(Expr::Literal(Value::Integer(n))),
        Token::Float(n) => Ok(Expr::Literal(Value::Float(n))),
        Token::String(s) => Ok(Expr::Literal(Value::String(s))),
        Token::Ident(name) if name.eq_ignore_ascii_case("TRUE") => {
            Ok(Expr::Literal(Value::Bool(true)))
        }
        Token::Ident(name) if name.eq_ignore_ascii_case("FALSE") => {
            Ok(Expr::Literal(Value::Bool(false)))
        }
        Token::Ident(name) => Ok(Expr::Variable(name)),
        Token::LParen => {
            let inner = parse_sum(tokens)?;
            if !tokens.assume_token(&Token::RParen) {
                return Err(ErrorKind::InvalidExpression(format!(
                    "expected ')', found '{}'",
                    tokens.peek().spelling()
                )));
            }
            Ok(inner)
        }
        other => {
            // Leave the offending token for the caller's diagnostics.
            if !matches!(other, Token::Eof) {
                tokens.push_back();
            }
            Err(ErrorKind::InvalidExpression(format!(
                "unexpected '{}'",
                other.spelling()
            )))
        }
    }
}

// =============================================================================
// Code generation and immediate evaluation
// =============================================================================

fn emit(expr: &Expr, code: &mut CodeObject) {
    match expr {
        Expr::Literal(v) => code.push(Op::Push(v.clone())),
        Expr::Variable(name) => code.push(Op::Load(name.clone())),
        Expr::Negate(inner) => {
            emit(inner, code);
            code.push(Op::Neg);
        }
        Expr::Binary(op, left, right) => {
            emit(left, code);
            emit(right, code);
            code.push(match op {
                BinOp::Add => Op::Add,
                BinOp::Sub => Op::Sub,
                BinOp::Mul => Op::Mul,
                BinOp::Div => Op::Div,
            });
        }
    }
}

fn eval(expr: &Expr, symbols: &SymbolTable) -> Result<Value, ErrorKind> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Variable(name) => symbols
            .get(name)
            .cloned()
            .ok_or_else(|| ErrorKind::UnknownVariable(name.clone())),
        Expr::Negate(inner) => match eval(inner, symbols)? {
            Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
            Value::Float(n) => Ok(Value::Float(-n)),
            other => Err(ErrorKind::InvalidExpression(format!(
                "cannot negate a {}",
                other.type_name()
            ))),
        },
        Expr::Binary(op, left, right) => {
            let left = eval(left, symbols)?;
            let right = eval(right, symbols)?;
            arithmetic(*op, left, right)
        }
    }
}

fn arithmetic(op: BinOp, left: Value, right: Value) -> Result<Value, ErrorKind> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => match op {
            BinOp::Add => Ok(Value::Integer(a.wrapping_add(b))),
            BinOp::Sub => Ok(Value::Integer(a.wrapping_sub(b))),
            BinOp::Mul => Ok(Value::Integer(a.wrapping_mul(b))),
            BinOp::Div if b == 0 => Err(ErrorKind::DivisionByZero),
            BinOp::Div => a
                .checked_div(b)
                .map(Value::Integer)
                .ok_or_else(|| ErrorKind::InvalidExpression("integer overflow".to_string())),
        },
        (Value::String(a), Value::String(b)) if op == BinOp::Add => {
            Ok(Value::String(a + &b))
        }
        (a, b) => {
            let (Some(x), Some(y)) = (as_float(&a), as_float(&b)) else {
                return Err(ErrorKind::InvalidExpression(format!(
                    "cannot combine {} and {}",
                    a.type_name(),
                    b.type_name()
                )));
            };
            match op {
                BinOp::Add => Ok(Value::Float(x + y)),
                BinOp::Sub => Ok(Value::Float(x - y)),
                BinOp::Mul => Ok(Value::Float(x * y)),
                BinOp::Div if y == 0.0 => Err(ErrorKind::DivisionByZero),
                BinOp::Div => Ok(Value::Float(x / y)),
            }
        }
    }
}

fn as_float(v: &Value) -> Option<f64> {
    match v {
        Value::Integer(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> (CodeObject, Outcome) {
        let mut tokens = TokenCursor::from_source(source).unwrap();
        let mut code = CodeObject::new();
        let status = Arithmetic.compile_into(&mut code, &mut tokens);
        (code, status)
    }

    fn evaluate(source: &str, symbols: &SymbolTable) -> Result<Value, Outcome> {
        let mut tokens = TokenCursor::from_source(source).unwrap();
        Arithmetic.evaluate_now(&mut tokens, symbols)
    }

    #[test]
    fn test_compile_respects_precedence() {
        let (code, status) = compile("1 + 2 * x");
        assert!(status.is_ok());
        assert_eq!(
            code.ops(),
            &[
                Op::Push(Value::Integer(1)),
                Op::Push(Value::Integer(2)),
                Op::Load("x".to_string()),
                Op::Mul,
                Op::Add,
            ]
        );
    }

    #[test]
    fn test_compile_parentheses_and_negation() {
        let (code, status) = compile("-(a - 1)");
        assert!(status.is_ok());
        assert_eq!(
            code.ops(),
            &[
                Op::Load("a".to_string()),
                Op::Push(Value::Integer(1)),
                Op::Sub,
                Op::Neg,
            ]
        );
    }

    #[test]
    fn test_compile_stops_at_statement_end() {
        let mut tokens = TokenCursor::from_source("7 : NEXT i").unwrap();
        let mut code = CodeObject::new();
        assert!(Arithmetic.compile_into(&mut code, &mut tokens).is_ok());
        assert_eq!(code.len(), 1);
        assert!(tokens.end_of_statement());
    }

    #[test]
    fn test_compile_empty_expression_fails() {
        let (code, status) = compile("");
        assert!(matches!(
            status,
            Outcome::Failure(ErrorKind::InvalidExpression(_))
        ));
        assert!(code.is_empty());
    }

    #[test]
    fn test_compile_unbalanced_parenthesis() {
        let (_, status) = compile("(1 + 2");
        match status {
            Outcome::Failure(ErrorKind::InvalidExpression(msg)) => {
                assert!(msg.contains("')'"))
            }
            other => panic!("expected InvalidExpression, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_integers() {
        let symbols = SymbolTable::new();
        assert_eq!(evaluate("3", &symbols), Ok(Value::Integer(3)));
        assert_eq!(evaluate("2 + 3 * 4", &symbols), Ok(Value::Integer(14)));
        assert_eq!(evaluate("(2 + 3) * 4", &symbols), Ok(Value::Integer(20)));
        assert_eq!(evaluate("-7 / 2", &symbols), Ok(Value::Integer(-3)));
    }

    #[test]
    fn test_evaluate_uses_symbols() {
        let mut symbols = SymbolTable::new();
        symbols.insert("N", Value::Integer(5));
        assert_eq!(evaluate("n * 2", &symbols), Ok(Value::Integer(10)));
        assert_eq!(
            evaluate("missing", &symbols),
            Err(Outcome::Failure(ErrorKind::UnknownVariable(
                "missing".to_string()
            )))
        );
    }

    #[test]
    fn test_evaluate_mixed_and_strings() {
        let symbols = SymbolTable::new();
        assert_eq!(evaluate("1 + 0.5", &symbols), Ok(Value::Float(1.5)));
        assert_eq!(
            evaluate("\"a\" + \"b\"", &symbols),
            Ok(Value::String("ab".to_string()))
        );
        assert!(matches!(
            evaluate("\"a\" * 2", &symbols),
            Err(Outcome::Failure(ErrorKind::InvalidExpression(_)))
        ));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let symbols = SymbolTable::new();
        assert_eq!(
            evaluate("1 / 0", &symbols),
            Err(Outcome::Failure(ErrorKind::DivisionByZero))
        );
    }

    #[test]
    fn test_evaluate_division_overflow_is_an_error() {
        let symbols = SymbolTable::new();
        assert_eq!(
            evaluate("(-9223372036854775807 - 1) / -1", &symbols),
            Err(Outcome::Failure(ErrorKind::InvalidExpression(
                "integer overflow".to_string()
            )))
        );
    }
}
