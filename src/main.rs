//! minic - front end for a small C-like imperative language
//!
//! Parses a source file and prints the canonical indented AST dump.

mod frontend;
mod report;
mod utils;

use clap::Parser as ClapParser;
use std::fs;
use std::path::PathBuf;
use std::process;

use frontend::lexer::Lexer;
use frontend::parser::Parser;
use frontend::printer::TreePrinter;
use report::Report;
use utils::Error;

/// minic front end - parse a source file and dump its syntax tree
#[derive(ClapParser, Debug)]
#[command(name = "minic")]
#[command(version = "0.1.0")]
#[command(about = "Parses a minic source file and prints the AST dump")]
struct Cli {
    /// Input source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Emit diagnostics as JSON on stdout instead of text on stderr
    #[arg(long)]
    json: bool,

    /// Starting indentation depth for the tree dump
    #[arg(long, default_value = "0")]
    indent: usize,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            let error = Error::Io(format!("{}: {}", cli.input.display(), e));
            emit_diagnostics(&[error], cli.json);
            process::exit(1);
        }
    };

    let tokens = Lexer::new(&source).tokenize();
    log::debug!("scanned {} tokens", tokens.len());

    let mut parser = Parser::new(tokens);
    let parsed = parser.parse_program();
    let mut diagnostics = parser.take_diagnostics();

    let program = match parsed {
        Ok(program) => Some(program),
        Err(e) => {
            diagnostics.push(e);
            None
        }
    };

    if !diagnostics.is_empty() {
        emit_diagnostics(&diagnostics, cli.json);
    }

    if let Some(program) = program {
        log::debug!(
            "parsed {} declarations, {} fundefs, {} instructions",
            program.declarations.len(),
            program.fundefs.len(),
            program.instructions.len()
        );
        let mut printer = TreePrinter::new();
        print!("{}", printer.print_program(&program, cli.indent));
    }

    if !diagnostics.is_empty() {
        process::exit(1);
    }
}

fn emit_diagnostics(diagnostics: &[Error], json: bool) {
    if json {
        let reports: Vec<Report> = diagnostics.iter().map(Report::from_error).collect();
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{}", out),
            Err(e) => eprintln!("Error serializing diagnostics: {}", e),
        }
    } else {
        for diagnostic in diagnostics {
            eprintln!("{}", diagnostic);
        }
    }
}
