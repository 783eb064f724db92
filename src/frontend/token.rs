//! Token definitions for the minic front end
//!
//! The parser consumes a finite stream of these tokens; the kind
//! enumeration is the shared contract between the scanner and the parser.
#![allow(dead_code)]

use std::fmt;

use crate::utils::Span;

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(span: Span) -> Self {
        Self { kind: TokenKind::Eof, span }
    }
}

/// The builtin type keywords (`int`, `float`, `string`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Float,
    Str,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Int => write!(f, "int"),
            TypeName::Float => write!(f, "float"),
            TypeName::Str => write!(f, "string"),
        }
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ============ Keywords ============
    /// print
    Print,
    /// if
    If,
    /// else
    Else,
    /// while
    While,
    /// repeat
    Repeat,
    /// until
    Until,
    /// return
    Return,
    /// break
    Break,
    /// continue
    Continue,

    // ============ Identifiers and Literals ============
    /// Identifier (variable name, label, function name)
    Ident(String),
    /// Integer literal
    IntLit(i64),
    /// Floating-point literal
    FloatLit(f64),
    /// String literal
    StringLit(String),
    /// Type keyword (int, float, string)
    Type(TypeName),

    // ============ Operators ============
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Assign,
    /// ==
    Eq,
    /// !=
    Neq,
    /// <
    Lt,
    /// <=
    Le,
    /// >
    Gt,
    /// >=
    Ge,
    /// &&
    AndAnd,
    /// ||
    OrOr,
    /// &
    And,
    /// |
    Or,
    /// ^
    Caret,
    /// <<
    Shl,
    /// >>
    Shr,

    // ============ Delimiters ============
    /// (
    LParen,
    /// )
    RParen,
    /// {
    LBrace,
    /// }
    RBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// :
    Colon,

    // ============ Special ============
    /// End of file
    Eof,
    /// Lexeme the scanner could not turn into a token: a stray
    /// character, or a numeric literal out of range
    Unknown(String),
}

impl TokenKind {
    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "print" => Some(TokenKind::Print),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            "repeat" => Some(TokenKind::Repeat),
            "until" => Some(TokenKind::Until),
            "return" => Some(TokenKind::Return),
            "break" => Some(TokenKind::Break),
            "continue" => Some(TokenKind::Continue),
            "int" => Some(TokenKind::Type(TypeName::Int)),
            "float" => Some(TokenKind::Type(TypeName::Float)),
            "string" => Some(TokenKind::Type(TypeName::Str)),
            _ => None,
        }
    }

    /// Kind name used in syntax diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Print => "PRINT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Repeat => "REPEAT",
            TokenKind::Until => "UNTIL",
            TokenKind::Return => "RETURN",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Ident(_) => "ID",
            TokenKind::IntLit(_) => "INTEGER",
            TokenKind::FloatLit(_) => "FLOAT",
            TokenKind::StringLit(_) => "STRING",
            TokenKind::Type(_) => "TYPE",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Assign => "'='",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "LE",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "GE",
            TokenKind::AndAnd => "AND",
            TokenKind::OrOr => "OR",
            TokenKind::And => "'&'",
            TokenKind::Or => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Shl => "SHL",
            TokenKind::Shr => "SHR",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Eof => "EOF",
            TokenKind::Unknown(_) => "UNKNOWN",
        }
    }

    /// Source lexeme used in syntax diagnostics
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Print => "print".into(),
            TokenKind::If => "if".into(),
            TokenKind::Else => "else".into(),
            TokenKind::While => "while".into(),
            TokenKind::Repeat => "repeat".into(),
            TokenKind::Until => "until".into(),
            TokenKind::Return => "return".into(),
            TokenKind::Break => "break".into(),
            TokenKind::Continue => "continue".into(),
            TokenKind::Ident(name) => name.clone(),
            TokenKind::IntLit(v) => v.to_string(),
            TokenKind::FloatLit(v) => v.to_string(),
            TokenKind::StringLit(s) => s.clone(),
            TokenKind::Type(ty) => ty.to_string(),
            TokenKind::Plus => "+".into(),
            TokenKind::Minus => "-".into(),
            TokenKind::Star => "*".into(),
            TokenKind::Slash => "/".into(),
            TokenKind::Percent => "%".into(),
            TokenKind::Assign => "=".into(),
            TokenKind::Eq => "==".into(),
            TokenKind::Neq => "!=".into(),
            TokenKind::Lt => "<".into(),
            TokenKind::Le => "<=".into(),
            TokenKind::Gt => ">".into(),
            TokenKind::Ge => ">=".into(),
            TokenKind::AndAnd => "&&".into(),
            TokenKind::OrOr => "||".into(),
            TokenKind::And => "&".into(),
            TokenKind::Or => "|".into(),
            TokenKind::Caret => "^".into(),
            TokenKind::Shl => "<<".into(),
            TokenKind::Shr => ">>".into(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
            TokenKind::LBrace => "{".into(),
            TokenKind::RBrace => "}".into(),
            TokenKind::Comma => ",".into(),
            TokenKind::Semicolon => ";".into(),
            TokenKind::Colon => ":".into(),
            TokenKind::Eof => "".into(),
            TokenKind::Unknown(s) => s.clone(),
        }
    }

    /// Get the precedence of a binary operator (for Pratt parsing)
    /// Returns None if not a binary operator
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            // Logical OR (lowest)
            TokenKind::OrOr => Some(1),

            // Logical AND
            TokenKind::AndAnd => Some(2),

            // Bitwise OR
            TokenKind::Or => Some(3),

            // Bitwise XOR
            TokenKind::Caret => Some(4),

            // Bitwise AND
            TokenKind::And => Some(5),

            // Relational (non-associative tier)
            TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Eq
            | TokenKind::Neq
            | TokenKind::Le
            | TokenKind::Ge => Some(6),

            // Shift
            TokenKind::Shl | TokenKind::Shr => Some(7),

            // Additive
            TokenKind::Plus | TokenKind::Minus => Some(8),

            // Multiplicative (highest)
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(9),

            _ => None,
        }
    }

    /// Whether this is one of the relational operators. The relational
    /// tier is non-associative: `a < b < c` is a syntax error.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Eq
                | TokenKind::Neq
                | TokenKind::Le
                | TokenKind::Ge
        )
    }
}
