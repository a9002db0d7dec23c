#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Integer(i64),
    Float(f64),
    String(std::string::String),

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Delimiters
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Semicolon, // ;

    // Identifier or keyword. Verbs and keywords are not reserved; statements
    // match them case-insensitively through the cursor.
    Ident(std::string::String),

    // Statement separators
    Colon,
    Newline,

    // Special
    Comment(std::string::String),
    Eof,
}

impl Token {
    /// Returns true if this token ends the current statement
    pub fn ends_statement(&self) -> bool {
        matches!(self, Token::Colon | Token::Newline | Token::Eof)
    }

    /// Case-insensitive keyword match against an identifier token
    pub fn is_keyword(&self, text: &str) -> bool {
        match self {
            Token::Ident(name) => name.eq_ignore_ascii_case(text),
            _ => false,
        }
    }

    /// Source-like spelling, used for diagnostics and dynamic statements
    pub fn spelling(&self) -> std::string::String {
        match self {
            Token::Integer(n) => n.to_string(),
            Token::Float(n) => n.to_string(),
            Token::String(s) => format!("\"{}\"", s),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Eq => "=".to_string(),
            Token::NotEq => "<>".to_string(),
            Token::Lt => "<".to_string(),
            Token::Gt => ">".to_string(),
            Token::LtEq => "<=".to_string(),
            Token::GtEq => ">=".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Ident(name) => name.clone(),
            Token::Colon => ":".to_string(),
            Token::Newline => "\\n".to_string(),
            Token::Comment(c) => format!("'{}", c),
            Token::Eof => "<eof>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_end_statement() {
        assert!(Token::Colon.ends_statement());
        assert!(Token::Newline.ends_statement());
        assert!(Token::Eof.ends_statement());
        assert!(!Token::Comma.ends_statement());
    }

    #[test]
    fn test_keyword_match_ignores_case() {
        let t = Token::Ident("Timer".to_string());
        assert!(t.is_keyword("TIMER"));
        assert!(!t.is_keyword("TIME"));
        assert!(!Token::String("TIMER".to_string()).is_keyword("TIMER"));
    }

    #[test]
    fn test_spelling() {
        assert_eq!(Token::NotEq.spelling(), "<>");
        assert_eq!(Token::String("x".to_string()).spelling(), "\"x\"");
        assert_eq!(Token::Ident("i".to_string()).spelling(), "i");
    }
}
