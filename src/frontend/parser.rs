//! Parser for the minic front end
//!
//! Recursive descent parser with Pratt parsing for expressions and
//! panic-mode error recovery. Recoverable syntax errors are accumulated
//! while parsing continues from the next synchronization point; only
//! running out of input mid-construct aborts the parse.
//!
//! Synchronization points:
//! - a malformed declaration skips to the next `;`
//! - a malformed print argument list skips to the next `;`
//! - a malformed parenthesized expression or condition skips to the
//!   matching `)`
//! - a malformed call argument list skips to the matching `)`
//! - any other malformed instruction skips to the next `;`, stopping
//!   short of a `}` or `until` so the enclosing construct still closes

use crate::frontend::ast::*;
use crate::frontend::token::{Token, TokenKind, TypeName};
use crate::utils::{Error, Result, Span};

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Recovered syntax errors, in source order
    diagnostics: Vec<Error>,
}

impl Parser {
    /// Create a parser over a token stream. The stream is padded with an
    /// `Eof` token if the source did not provide one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            tokens.push(Token::eof(Span::dummy()));
        }
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        // new() guarantees a trailing Eof that advance() never passes
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current())
        }
    }

    /// Syntax error for the current token; end of input is its own,
    /// unrecoverable condition.
    fn error_at_current(&self) -> Error {
        let token = self.current();
        match &token.kind {
            TokenKind::Eof => Error::UnexpectedEof,
            kind => Error::Syntax {
                kind: kind.name().to_string(),
                value: kind.lexeme(),
                line: token.span.line,
                column: token.span.column,
            },
        }
    }

    /// Record a recovered diagnostic
    fn report(&mut self, error: Error) {
        self.diagnostics.push(error);
    }

    /// Recovered syntax errors, in source order
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Take ownership of the recovered diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.diagnostics)
    }

    // ==================== Recovery ====================

    /// Panic-mode recovery: discard tokens through the next `;`
    fn recover_to_semicolon(&mut self) -> Result<()> {
        loop {
            match self.current_kind() {
                TokenKind::Eof => return Err(Error::UnexpectedEof),
                TokenKind::Semicolon => {
                    self.advance();
                    return Ok(());
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Panic-mode recovery for instruction context: discard tokens
    /// through the next `;`, but stop *before* a `}` or `until` so the
    /// enclosing block or repeat can still close. Running out of input
    /// just stops; the caller's loop sees `Eof` and ends.
    fn recover_to_statement_boundary(&mut self) {
        loop {
            match self.current_kind() {
                TokenKind::Eof | TokenKind::RBrace | TokenKind::Until => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Panic-mode recovery: discard tokens through the `)` matching an
    /// already-consumed `(`, tracking nesting
    fn recover_to_rparen(&mut self) -> Result<()> {
        let mut depth = 1usize;
        loop {
            match self.current_kind() {
                TokenKind::Eof => return Err(Error::UnexpectedEof),
                TokenKind::LParen => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RParen => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete source unit.
    ///
    /// Returns the root `Program` even when recoverable syntax errors
    /// occurred; those accumulate in `diagnostics()`. Only
    /// `Error::UnexpectedEof` aborts the parse.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut program = Program::default();

        // declarations: TYPE not followed by `ID (`
        while matches!(self.current_kind(), TokenKind::Type(_)) && !self.at_fundef() {
            if let Some(decl) = self.parse_declaration()? {
                program.declarations.push(decl);
            }
        }

        // fundefs: any remaining top-level TYPE starts one
        while matches!(self.current_kind(), TokenKind::Type(_)) {
            match self.parse_fundef() {
                Ok(fundef) => program.fundefs.push(fundef),
                Err(Error::UnexpectedEof) => return Err(Error::UnexpectedEof),
                Err(e) => {
                    self.report(e);
                    self.recover_to_statement_boundary();
                }
            }
        }

        // instructions
        while !self.is_at_end() {
            let before = self.pos;
            match self.parse_instruction_in_list()? {
                Some(instr) => program.instructions.push(instr),
                // a closing delimiter with nothing to close
                None if self.pos == before => {
                    self.advance();
                }
                None => {}
            }
        }

        Ok(program)
    }

    /// Two-token lookahead: `TYPE ID (` starts a function definition
    fn at_fundef(&self) -> bool {
        matches!(self.peek_kind(1), Some(TokenKind::Ident(_)))
            && matches!(self.peek_kind(2), Some(TokenKind::LParen))
    }

    // -------------------- Declarations --------------------

    /// Parse one declaration, or recover at the next `;` and yield
    /// nothing (the `error ';'` production)
    fn parse_declaration(&mut self) -> Result<Option<Declaration>> {
        match self.parse_declaration_inner() {
            Ok(decl) => Ok(Some(decl)),
            Err(Error::UnexpectedEof) => Err(Error::UnexpectedEof),
            Err(e) => {
                self.report(e);
                self.recover_to_semicolon()?;
                Ok(None)
            }
        }
    }

    fn parse_declaration_inner(&mut self) -> Result<Declaration> {
        let ty = self.expect_type()?;

        let mut inits = vec![self.parse_init()?];
        while self.consume(&TokenKind::Comma) {
            inits.push(self.parse_init()?);
        }

        self.expect(TokenKind::Semicolon)?;
        Ok(Declaration { ty, inits })
    }

    fn parse_init(&mut self) -> Result<Init> {
        let name = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Ok(Init { name, value })
    }

    fn expect_type(&mut self) -> Result<TypeName> {
        match self.current_kind() {
            TokenKind::Type(ty) => {
                let ty = *ty;
                self.advance();
                Ok(ty)
            }
            _ => Err(self.error_at_current()),
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_at_current()),
        }
    }

    // -------------------- Instructions --------------------

    /// Parse one instruction inside a list, recovering at the next
    /// statement boundary on a syntax error with no closer
    /// synchronization point. When the error token itself is a closing
    /// delimiter, recovery makes no progress; the caller's loop must
    /// either terminate on that delimiter or skip it.
    fn parse_instruction_in_list(&mut self) -> Result<Option<Instruction>> {
        match self.parse_instruction() {
            Ok(instr) => Ok(Some(instr)),
            Err(Error::UnexpectedEof) => Err(Error::UnexpectedEof),
            Err(e) => {
                self.report(e);
                self.recover_to_statement_boundary();
                Ok(None)
            }
        }
    }

    fn parse_instruction(&mut self) -> Result<Instruction> {
        match self.current_kind() {
            TokenKind::Print => self.parse_print(),
            TokenKind::If => self.parse_choice(),
            TokenKind::While => self.parse_while(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Instruction::Break)
            }
            TokenKind::Continue => {
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Instruction::Continue)
            }
            TokenKind::LBrace => Ok(Instruction::Compound(self.parse_block()?)),
            TokenKind::Ident(_) => match self.peek_kind(1) {
                Some(TokenKind::Colon) => self.parse_labeled(),
                Some(TokenKind::Assign) => self.parse_assignment(),
                _ => self.parse_expr_instruction(),
            },
            _ => self.parse_expr_instruction(),
        }
    }

    /// print expr_list `;` — a malformed argument list recovers at the
    /// next `;` and keeps an argument-less print
    fn parse_print(&mut self) -> Result<Instruction> {
        self.expect(TokenKind::Print)?;

        let mut args = Vec::new();
        loop {
            match self.parse_expr() {
                Ok(expr) => args.push(expr),
                Err(Error::UnexpectedEof) => return Err(Error::UnexpectedEof),
                Err(e) => {
                    self.report(e);
                    self.recover_to_semicolon()?;
                    return Ok(Instruction::Print(Vec::new()));
                }
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        match self.expect(TokenKind::Semicolon) {
            Ok(_) => Ok(Instruction::Print(args)),
            Err(Error::UnexpectedEof) => Err(Error::UnexpectedEof),
            Err(e) => {
                self.report(e);
                self.recover_to_semicolon()?;
                Ok(Instruction::Print(Vec::new()))
            }
        }
    }

    fn parse_labeled(&mut self) -> Result<Instruction> {
        let label = self.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_instruction()?;
        Ok(Instruction::Labeled {
            label,
            body: Box::new(body),
        })
    }

    fn parse_assignment(&mut self) -> Result<Instruction> {
        let name = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Instruction::Assign { name, value })
    }

    /// if `(` condition `)` instruction [else instruction]
    ///
    /// The else always binds to the nearest open if: descent consumes a
    /// trailing `else` before returning to the enclosing level.
    fn parse_choice(&mut self) -> Result<Instruction> {
        self.expect(TokenKind::If)?;
        let cond = self.parse_paren_condition()?;
        let then_branch = Box::new(self.parse_instruction()?);

        let else_branch = if self.consume(&TokenKind::Else) {
            Some(Box::new(self.parse_instruction()?))
        } else {
            None
        };

        Ok(Instruction::Choice {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Instruction> {
        self.expect(TokenKind::While)?;
        let cond = self.parse_paren_condition()?;
        let body = Box::new(self.parse_instruction()?);
        Ok(Instruction::While { cond, body })
    }

    /// repeat instructions until condition `;`
    fn parse_repeat(&mut self) -> Result<Instruction> {
        self.expect(TokenKind::Repeat)?;

        let mut body = Vec::new();
        while !self.check(&TokenKind::Until) && !self.is_at_end() {
            let before = self.pos;
            match self.parse_instruction_in_list()? {
                Some(instr) => body.push(instr),
                // a `}` in a repeat body closes nothing here
                None if self.pos == before => {
                    self.advance();
                }
                None => {}
            }
        }

        self.expect(TokenKind::Until)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Instruction::RepeatUntil { body, cond })
    }

    fn parse_return(&mut self) -> Result<Instruction> {
        self.expect(TokenKind::Return)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Instruction::Return(value))
    }

    /// `{` declarations instructions `}`
    fn parse_block(&mut self) -> Result<Block> {
        self.expect(TokenKind::LBrace)?;

        let mut block = Block::default();

        while matches!(self.current_kind(), TokenKind::Type(_)) {
            if let Some(decl) = self.parse_declaration()? {
                block.declarations.push(decl);
            }
        }

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let before = self.pos;
            match self.parse_instruction_in_list()? {
                Some(instr) => block.instructions.push(instr),
                // an `until` in a plain block closes nothing here
                None if self.pos == before => {
                    self.advance();
                }
                None => {}
            }
        }

        self.expect(TokenKind::RBrace)?;
        Ok(block)
    }

    fn parse_expr_instruction(&mut self) -> Result<Instruction> {
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Instruction::Expr(expr))
    }

    // -------------------- Functions --------------------

    /// TYPE ID `(` args `)` compound
    fn parse_fundef(&mut self) -> Result<Fundef> {
        let ret_ty = self.expect_type()?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let ty = self.expect_type()?;
                let name = self.expect_ident()?;
                args.push(Argument { ty, name });
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(Fundef {
            ret_ty,
            name,
            args,
            body,
        })
    }

    // ==================== Expression Parsing (Pratt) ====================

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_bp(0)
    }

    /// Parse expression with binding power (Pratt parsing)
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        let mut left = self.parse_primary()?;

        loop {
            let op_kind = self.current_kind().clone();
            let Some(bp) = op_kind.binary_precedence() else {
                break;
            };
            if bp < min_bp {
                break;
            }

            self.advance();
            let op = Self::token_to_binop(&op_kind).ok_or_else(|| self.error_at_current())?;
            let right = self.parse_expr_bp(bp + 1)?;

            // The relational tier is non-associative: a second relational
            // operator directly after a relational expression cannot reduce
            if op_kind.is_relational() && self.current_kind().is_relational() {
                return Err(self.error_at_current());
            }

            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current_kind().clone() {
            TokenKind::IntLit(v) => {
                self.advance();
                Ok(Expr::Const(Const::Int(v)))
            }
            TokenKind::FloatLit(v) => {
                self.advance();
                Ok(Expr::Const(Const::Float(v)))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(Expr::Const(Const::Str(s)))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::LParen) {
                    self.parse_call(name)
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            TokenKind::LParen => {
                self.advance();
                self.parse_paren_expr()
            }
            _ => Err(self.error_at_current()),
        }
    }

    /// The remainder of `( expression )` after the `(` was consumed. A
    /// malformed inner expression recovers at the matching `)` and
    /// leaves an error placeholder.
    fn parse_paren_expr(&mut self) -> Result<Expr> {
        match self.parse_expr() {
            Ok(expr) => match self.expect(TokenKind::RParen) {
                Ok(_) => Ok(expr),
                Err(Error::UnexpectedEof) => Err(Error::UnexpectedEof),
                Err(e) => {
                    self.report(e);
                    self.recover_to_rparen()?;
                    Ok(Expr::Error)
                }
            },
            Err(Error::UnexpectedEof) => Err(Error::UnexpectedEof),
            Err(e) => {
                self.report(e);
                self.recover_to_rparen()?;
                Ok(Expr::Error)
            }
        }
    }

    /// `( condition )` for if and while headers; same recovery as any
    /// parenthesized expression
    fn parse_paren_condition(&mut self) -> Result<Expr> {
        self.expect(TokenKind::LParen)?;
        self.parse_paren_expr()
    }

    /// The remainder of `ID ( expr_list )` after the `(` was seen. A
    /// malformed argument list recovers at the matching `)` and keeps an
    /// argument-less call.
    fn parse_call(&mut self, name: String) -> Result<Expr> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                match self.parse_expr() {
                    Ok(expr) => args.push(expr),
                    Err(Error::UnexpectedEof) => return Err(Error::UnexpectedEof),
                    Err(e) => {
                        self.report(e);
                        self.recover_to_rparen()?;
                        return Ok(Expr::Call {
                            name,
                            args: Vec::new(),
                        });
                    }
                }
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }

        match self.expect(TokenKind::RParen) {
            Ok(_) => Ok(Expr::Call { name, args }),
            Err(Error::UnexpectedEof) => Err(Error::UnexpectedEof),
            Err(e) => {
                self.report(e);
                self.recover_to_rparen()?;
                Ok(Expr::Call {
                    name,
                    args: Vec::new(),
                })
            }
        }
    }

    fn token_to_binop(kind: &TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::Percent => Some(BinOp::Mod),
            TokenKind::Or => Some(BinOp::BitOr),
            TokenKind::And => Some(BinOp::BitAnd),
            TokenKind::Caret => Some(BinOp::BitXor),
            TokenKind::Shl => Some(BinOp::Shl),
            TokenKind::Shr => Some(BinOp::Shr),
            TokenKind::AndAnd => Some(BinOp::And),
            TokenKind::OrOr => Some(BinOp::Or),
            TokenKind::Eq => Some(BinOp::Eq),
            TokenKind::Neq => Some(BinOp::Neq),
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::Le => Some(BinOp::Le),
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::Ge => Some(BinOp::Ge),
            _ => None,
        }
    }
}
