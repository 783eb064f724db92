//! Tree printer - canonical indented dump of the AST
//!
//! Renders any node as deterministic, indentation-encoded text for
//! inspection and snapshot comparison. One `"| "` marker per depth
//! level. Printing is pure: the same node always yields byte-identical
//! output.
#![allow(dead_code)]

use std::fmt::Write;

use crate::frontend::ast::*;

/// Pretty printer for the AST
pub struct TreePrinter {
    output: String,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Print a program to string, starting at the given indentation depth
    pub fn print_program(&mut self, program: &Program, depth: usize) -> String {
        self.output.clear();
        self.emit_declarations(&program.declarations, depth);
        for fundef in &program.fundefs {
            self.emit_fundef(fundef, depth);
        }
        for instr in &program.instructions {
            self.emit_instruction(instr, depth);
        }
        self.output.clone()
    }

    /// Print a single instruction subtree
    pub fn print_instruction(&mut self, instr: &Instruction, depth: usize) -> String {
        self.output.clear();
        self.emit_instruction(instr, depth);
        self.output.clone()
    }

    /// Print a single expression subtree
    pub fn print_expr(&mut self, expr: &Expr, depth: usize) -> String {
        self.output.clear();
        self.emit_expr(expr, depth);
        self.output.clone()
    }

    /// One line at the given depth
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.output.push_str("| ");
        }
        writeln!(self.output, "{}", text).unwrap();
    }

    /// `DECL` header plus every init, only if there are declarations
    fn emit_declarations(&mut self, declarations: &[Declaration], depth: usize) {
        if declarations.is_empty() {
            return;
        }
        self.line(depth, "DECL");
        for decl in declarations {
            // a declaration has no line of its own, just its inits
            for init in &decl.inits {
                self.emit_init(init, depth + 1);
            }
        }
    }

    fn emit_init(&mut self, init: &Init, depth: usize) {
        self.line(depth, "=");
        self.line(depth + 1, &init.name);
        self.emit_expr(&init.value, depth + 1);
    }

    fn emit_instruction(&mut self, instr: &Instruction, depth: usize) {
        match instr {
            Instruction::Print(args) => {
                self.line(depth, "PRINT");
                for arg in args {
                    self.emit_expr(arg, depth + 1);
                }
            }
            Instruction::Labeled { label, body } => {
                self.line(depth, "LABEL");
                self.line(depth + 1, label);
                self.emit_instruction(body, depth + 1);
            }
            Instruction::Assign { name, value } => {
                self.line(depth, "=");
                self.line(depth + 1, name);
                self.emit_expr(value, depth + 1);
            }
            Instruction::Choice {
                cond,
                then_branch,
                else_branch,
            } => {
                self.line(depth, "IF");
                self.emit_expr(cond, depth + 1);
                self.emit_instruction(then_branch, depth + 1);
                if let Some(else_branch) = else_branch {
                    // ELSE sits at the same depth as its IF
                    self.line(depth, "ELSE");
                    self.emit_instruction(else_branch, depth + 1);
                }
            }
            Instruction::While { cond, body } => {
                self.line(depth, "WHILE");
                self.emit_expr(cond, depth + 1);
                // historical quirk: the body prints at the same depth as
                // the WHILE keyword
                self.emit_instruction(body, depth);
            }
            Instruction::RepeatUntil { body, cond } => {
                self.line(depth, "REPEAT");
                for instr in body {
                    self.emit_instruction(instr, depth + 1);
                }
                self.line(depth, "UNTIL");
                self.emit_expr(cond, depth + 1);
            }
            Instruction::Return(value) => {
                self.line(depth, "RETURN");
                self.emit_expr(value, depth + 1);
            }
            Instruction::Break => self.line(depth, "BREAK"),
            Instruction::Continue => self.line(depth, "CONTINUE"),
            Instruction::Compound(block) => self.emit_block(block, depth),
            Instruction::Expr(expr) => self.emit_expr(expr, depth),
        }
    }

    /// A block has no header line; declarations and instructions print
    /// at the block's own depth
    fn emit_block(&mut self, block: &Block, depth: usize) {
        self.emit_declarations(&block.declarations, depth);
        for instr in &block.instructions {
            self.emit_instruction(instr, depth);
        }
    }

    fn emit_expr(&mut self, expr: &Expr, depth: usize) {
        match expr {
            Expr::Const(value) => self.line(depth, &value.to_string()),
            Expr::Ident(name) => self.line(depth, name),
            Expr::Binary { op, left, right } => {
                self.line(depth, &op.to_string());
                self.emit_expr(left, depth + 1);
                self.emit_expr(right, depth + 1);
            }
            Expr::Call { name, args } => {
                self.line(depth, "FUNCALL");
                self.line(depth + 1, name);
                for arg in args {
                    self.emit_expr(arg, depth + 1);
                }
            }
            Expr::Error => self.line(depth, "ERROR"),
        }
    }

    fn emit_fundef(&mut self, fundef: &Fundef, depth: usize) {
        self.line(depth, "FUNDEF");
        self.line(depth + 1, &fundef.name);
        self.line(depth + 1, &format!("RET {}", fundef.ret_ty));
        for arg in &fundef.args {
            self.line(depth + 1, &format!("ARG {}", arg.name));
        }
        self.emit_block(&fundef.body, depth + 1);
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to print a program from depth 0
pub fn print_tree(program: &Program) -> String {
    let mut printer = TreePrinter::new();
    printer.print_program(program, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;
    use crate::frontend::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse_and_print(source: &str) -> String {
        let tokens = Lexer::new(source).tokenize();
        let mut parser = Parser::new(tokens);
        let program = parser.parse_program().expect("parse aborted");
        print_tree(&program)
    }

    #[test]
    fn test_print_empty_program() {
        assert_eq!(parse_and_print("  \n "), "");
    }

    #[test]
    fn test_print_precedence_shape() {
        assert_eq!(parse_and_print("1+2*3;"), "+\n| 1\n| *\n| | 2\n| | 3\n");
    }

    #[test]
    fn test_print_is_idempotent() {
        let tokens = Lexer::new("int x = 1; if (x) print x; else x = 0;").tokenize();
        let mut parser = Parser::new(tokens);
        let program = parser.parse_program().unwrap();

        let first = print_tree(&program);
        let second = print_tree(&program);
        assert_eq!(first, second);
    }

    #[test]
    fn test_print_declarations() {
        assert_eq!(
            parse_and_print("int a=1, b=2;"),
            "DECL\n\
             | =\n\
             | | a\n\
             | | 1\n\
             | =\n\
             | | b\n\
             | | 2\n"
        );
    }

    #[test]
    fn test_print_if_else_depths() {
        assert_eq!(
            parse_and_print("if (x) a=1; else b=2;"),
            "IF\n\
             | x\n\
             | =\n\
             | | a\n\
             | | 1\n\
             ELSE\n\
             | =\n\
             | | b\n\
             | | 2\n"
        );
    }

    #[test]
    fn test_print_while_body_at_keyword_depth() {
        assert_eq!(
            parse_and_print("while (x) y=1;"),
            "WHILE\n\
             | x\n\
             =\n\
             | y\n\
             | 1\n"
        );
    }

    #[test]
    fn test_print_repeat_until() {
        assert_eq!(
            parse_and_print("repeat x=1; until y;"),
            "REPEAT\n\
             | =\n\
             | | x\n\
             | | 1\n\
             UNTIL\n\
             | y\n"
        );
    }

    #[test]
    fn test_print_fundef() {
        assert_eq!(
            parse_and_print("int f(int a, float b) { return a; }"),
            "FUNDEF\n\
             | f\n\
             | RET int\n\
             | ARG a\n\
             | ARG b\n\
             | RETURN\n\
             | | a\n"
        );
    }

    #[test]
    fn test_print_funcall_and_print_instruction() {
        assert_eq!(
            parse_and_print(r#"print f(1, 2), "done";"#),
            "PRINT\n\
             | FUNCALL\n\
             | | f\n\
             | | 1\n\
             | | 2\n\
             | done\n"
        );
    }

    #[test]
    fn test_print_labeled_and_control_flow() {
        assert_eq!(
            parse_and_print("l: break;"),
            "LABEL\n\
             | l\n\
             | BREAK\n"
        );
        assert_eq!(parse_and_print("continue;"), "CONTINUE\n");
    }

    #[test]
    fn test_print_compound_has_no_header() {
        assert_eq!(
            parse_and_print("{ int i = 0; i = 1; }"),
            "DECL\n\
             | =\n\
             | | i\n\
             | | 0\n\
             =\n\
             | i\n\
             | 1\n"
        );
    }

    #[test]
    fn test_print_starting_depth() {
        let tokens = Lexer::new("1;").tokenize();
        let mut parser = Parser::new(tokens);
        let program = parser.parse_program().unwrap();

        let mut printer = TreePrinter::new();
        assert_eq!(printer.print_program(&program, 2), "| | 1\n");
    }

    #[test]
    fn test_print_error_placeholder() {
        let tokens = Lexer::new("x = (1 +);").tokenize();
        let mut parser = Parser::new(tokens);
        let program = parser.parse_program().unwrap();
        assert_eq!(parser.diagnostics().len(), 1);

        assert_eq!(print_tree(&program), "=\n| x\n| ERROR\n");
    }

    #[test]
    fn test_print_whole_program() {
        let source = "\
            int x = 2;\n\
            int twice(int a) { return a * 2; }\n\
            while (x < 10) x = twice(x);\n\
            print x;\n";
        assert_eq!(
            parse_and_print(source),
            "DECL\n\
             | =\n\
             | | x\n\
             | | 2\n\
             FUNDEF\n\
             | twice\n\
             | RET int\n\
             | ARG a\n\
             | RETURN\n\
             | | *\n\
             | | | a\n\
             | | | 2\n\
             WHILE\n\
             | <\n\
             | | x\n\
             | | 10\n\
             =\n\
             | x\n\
             | FUNCALL\n\
             | | twice\n\
             | | x\n\
             PRINT\n\
             | x\n"
        );
    }
}
