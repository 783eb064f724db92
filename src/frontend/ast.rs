//! Abstract Syntax Tree definitions for the minic front end
//!
//! Pure data: every node is built exactly once, when its production
//! reduces, and never mutated afterwards. Each child belongs to exactly
//! one parent.

use std::fmt;

use crate::frontend::token::TypeName;

/// A complete source unit
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Top-level declarations, in textual order
    pub declarations: Vec<Declaration>,
    /// Function definitions, in textual order
    pub fundefs: Vec<Fundef>,
    /// Top-level instructions, in textual order (empty, never absent)
    pub instructions: Vec<Instruction>,
}

/// A declaration: one type keyword followed by initialized names
#[derive(Debug, Clone)]
pub struct Declaration {
    pub ty: TypeName,
    /// Insertion order is textual order; downstream initialization
    /// semantics depend on it
    pub inits: Vec<Init>,
}

/// One initialized name inside a declaration
#[derive(Debug, Clone)]
pub struct Init {
    pub name: String,
    pub value: Expr,
}

/// An instruction (statement)
#[derive(Debug, Clone)]
pub enum Instruction {
    /// print expr, expr, ... ;
    Print(Vec<Expr>),
    /// label: instruction
    Labeled {
        label: String,
        body: Box<Instruction>,
    },
    /// name = expr ;
    Assign { name: String, value: Expr },
    /// if (cond) instruction [else instruction]
    Choice {
        cond: Expr,
        then_branch: Box<Instruction>,
        else_branch: Option<Box<Instruction>>,
    },
    /// while (cond) instruction
    While { cond: Expr, body: Box<Instruction> },
    /// repeat instructions until cond ;
    RepeatUntil {
        body: Vec<Instruction>,
        cond: Expr,
    },
    /// return expr ;
    Return(Expr),
    /// break ;
    Break,
    /// continue ;
    Continue,
    /// { declarations instructions }
    Compound(Block),
    /// Bare expression ;
    Expr(Expr),
}

/// A braced block: declarations followed by instructions. Shared by
/// compound instructions and function bodies.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub instructions: Vec<Instruction>,
}

/// An expression
#[derive(Debug, Clone)]
pub enum Expr {
    /// Literal value
    Const(Const),
    /// Identifier
    Ident(String),
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Function call
    Call { name: String, args: Vec<Expr> },
    /// Placeholder left behind by panic-mode recovery; carries no payload
    Error,
}

/// A literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Const {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Const::Int(v) => write!(f, "{}", v),
            Const::Float(v) => write!(f, "{}", v),
            Const::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Bitwise
    BitOr,
    BitAnd,
    BitXor,
    Shl,
    Shr,
    // Logical
    And,
    Or,
    // Relational
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for BinOp {
    /// Renders the source lexeme; the tree dump uses this
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::BitOr => "|",
            BinOp::BitAnd => "&",
            BinOp::BitXor => "^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        };
        write!(f, "{}", s)
    }
}

/// A function definition
#[derive(Debug, Clone)]
pub struct Fundef {
    pub ret_ty: TypeName,
    pub name: String,
    pub args: Vec<Argument>,
    pub body: Block,
}

/// A formal parameter
#[derive(Debug, Clone)]
pub struct Argument {
    pub ty: TypeName,
    pub name: String,
}
