//! Scanner for the minic front end
//!
//! Converts source code into a stream of tokens. The parser does not
//! depend on this module; it accepts any token vector that honors the
//! contract in `token.rs`.
#![allow(dead_code)]

use crate::frontend::token::{Token, TokenKind};
use crate::utils::Span;

/// The scanner state
pub struct Lexer {
    /// Source code as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Line of the current position (1-based)
    line: u32,
    /// Column of the current position (1-based)
    column: u32,
    /// Position where the current token started
    start: Span,
}

impl Lexer {
    /// Create a new scanner for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            start: Span::new(1, 1),
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Create a token spanning from the recorded token start
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.start)
    }

    /// Skip whitespace and comments
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                // Whitespace
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                // Line comment
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                // Block comment
                '/' if self.peek_next() == Some('*') => {
                    self.advance(); // skip /
                    self.advance(); // skip *
                    let mut depth = 1;
                    while depth > 0 && !self.is_at_end() {
                        match (self.peek(), self.peek_next()) {
                            (Some('*'), Some('/')) => {
                                self.advance();
                                self.advance();
                                depth -= 1;
                            }
                            (Some('/'), Some('*')) => {
                                self.advance();
                                self.advance();
                                depth += 1;
                            }
                            _ => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Read an identifier, keyword, or type keyword
    fn read_identifier(&mut self) -> Token {
        let from = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[from..self.pos].iter().collect();

        let kind = TokenKind::keyword_from_str(&text)
            .unwrap_or(TokenKind::Ident(text));

        self.make_token(kind)
    }

    /// Read a number literal (integer or float)
    fn read_number(&mut self) -> Token {
        let from = self.pos;
        let mut is_float = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        // Check for decimal point
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // consume '.'

            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Check for exponent
        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            self.advance();

            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }

            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let text: String = self.source[from..self.pos].iter().collect();

        // A literal the host types cannot represent (an i64-overflowing
        // integer, an exponent with no digits) must not silently become
        // a valid constant; hand it to the parser to report.
        let kind = if is_float {
            match text.parse() {
                Ok(value) => TokenKind::FloatLit(value),
                Err(_) => TokenKind::Unknown(text),
            }
        } else {
            match text.parse() {
                Ok(value) => TokenKind::IntLit(value),
                Err(_) => TokenKind::Unknown(text),
            }
        };
        self.make_token(kind)
    }

    /// Read a string literal
    fn read_string(&mut self) -> Token {
        self.advance(); // consume opening quote

        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c == '"' {
                self.advance(); // consume closing quote
                break;
            } else if c == '\\' {
                self.advance();
                match self.peek() {
                    Some('n') => { value.push('\n'); self.advance(); }
                    Some('r') => { value.push('\r'); self.advance(); }
                    Some('t') => { value.push('\t'); self.advance(); }
                    Some('\\') => { value.push('\\'); self.advance(); }
                    Some('"') => { value.push('"'); self.advance(); }
                    Some(c) => { value.push(c); self.advance(); }
                    None => break,
                }
            } else if c == '\n' {
                // Unterminated string
                break;
            } else {
                value.push(c);
                self.advance();
            }
        }

        self.make_token(TokenKind::StringLit(value))
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = Span::new(self.line, self.column);

        if self.is_at_end() {
            return Token::eof(self.start);
        }

        let c = self.peek().unwrap();

        // Identifiers, keywords, type names
        if c.is_alphabetic() || c == '_' {
            return self.read_identifier();
        }

        // Numbers
        if c.is_ascii_digit() {
            return self.read_number();
        }

        // String literals
        if c == '"' {
            return self.read_string();
        }

        // Operators and punctuation
        self.advance();
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Neq
                } else {
                    TokenKind::Unknown("!".into())
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Le
                } else if self.peek() == Some('<') {
                    self.advance();
                    TokenKind::Shl
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Ge
                } else if self.peek() == Some('>') {
                    self.advance();
                    TokenKind::Shr
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    TokenKind::And
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    TokenKind::OrOr
                } else {
                    TokenKind::Or
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            _ => TokenKind::Unknown(c.to_string()),
        };

        self.make_token(kind)
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TypeName;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int x = 1;");
        let tokens = lexer.tokenize();

        assert!(matches!(tokens[0].kind, TokenKind::Type(TypeName::Int)));
        assert!(matches!(tokens[1].kind, TokenKind::Ident(ref s) if s == "x"));
        assert!(matches!(tokens[2].kind, TokenKind::Assign));
        assert!(matches!(tokens[3].kind, TokenKind::IntLit(1)));
        assert!(matches!(tokens[4].kind, TokenKind::Semicolon));
        assert!(matches!(tokens[5].kind, TokenKind::Eof));
    }

    #[test]
    fn test_keywords() {
        let mut lexer = Lexer::new("print if else while repeat until return break continue");
        let kinds: Vec<_> = lexer.tokenize().into_iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Print,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Repeat,
                TokenKind::Until,
                TokenKind::Return,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let mut lexer = Lexer::new("42 3.14 1e3");
        let tokens = lexer.tokenize();

        assert!(matches!(tokens[0].kind, TokenKind::IntLit(42)));
        assert!(matches!(tokens[1].kind, TokenKind::FloatLit(f) if (f - 3.14).abs() < 0.001));
        assert!(matches!(tokens[2].kind, TokenKind::FloatLit(f) if (f - 1000.0).abs() < 0.001));
    }

    #[test]
    fn test_strings() {
        let mut lexer = Lexer::new(r#""hello\nworld""#);
        let tokens = lexer.tokenize();

        assert!(matches!(tokens[0].kind, TokenKind::StringLit(ref s) if s == "hello\nworld"));
    }

    #[test]
    fn test_multi_char_operators() {
        let mut lexer = Lexer::new("== != <= >= << >> && || < > = & |");
        let kinds: Vec<_> = lexer.tokenize().into_iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Eq,
                TokenKind::Neq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Assign,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut lexer = Lexer::new("int x;\n  y = 2;");
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].span, Span::new(1, 1)); // int
        assert_eq!(tokens[1].span, Span::new(1, 5)); // x
        assert_eq!(tokens[3].span, Span::new(2, 3)); // y
        assert_eq!(tokens[4].span, Span::new(2, 5)); // =
    }

    #[test]
    fn test_comments_skipped() {
        let mut lexer = Lexer::new("a // comment\n/* block\n comment */ b");
        let tokens = lexer.tokenize();

        assert!(matches!(tokens[0].kind, TokenKind::Ident(ref s) if s == "a"));
        assert!(matches!(tokens[1].kind, TokenKind::Ident(ref s) if s == "b"));
        assert!(matches!(tokens[2].kind, TokenKind::Eof));
    }

    #[test]
    fn test_unknown_character() {
        let mut lexer = Lexer::new("x @ y");
        let tokens = lexer.tokenize();

        assert!(matches!(tokens[1].kind, TokenKind::Unknown(ref s) if s == "@"));
    }

    #[test]
    fn test_overflowing_int_literal_is_not_a_constant() {
        let mut lexer = Lexer::new("99999999999999999999");
        let tokens = lexer.tokenize();

        assert!(
            matches!(tokens[0].kind, TokenKind::Unknown(ref s) if s == "99999999999999999999")
        );
    }

    #[test]
    fn test_exponent_without_digits_is_not_a_constant() {
        let mut lexer = Lexer::new("1e");
        let tokens = lexer.tokenize();

        assert!(matches!(tokens[0].kind, TokenKind::Unknown(ref s) if s == "1e"));
    }
}
