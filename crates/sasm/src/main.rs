//! `sasm` — Solenoid assembly shell.
//!
//! Parses an inline-assembly source file (or stdin) in the chosen dialect,
//! prints every diagnostic with its line and column, and can re-render the
//! parsed tree to canonical one-line form.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};

use solenoid_core::diagnostics::ErrorReporter;
use solenoid_core::parser::printer::print_block;
use solenoid_core::parser::scanner::Scanner;
use solenoid_core::parser::{Dialect, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    /// Untyped inline assembly.
    Loose,
    /// Typed dialect; every literal and declared name carries `:type`.
    Typed,
    /// Typed dialect with the EVM instruction mnemonics as built-ins.
    Evm,
}

impl DialectArg {
    fn to_dialect(self) -> Dialect {
        match self {
            DialectArg::Loose => Dialect::loose(),
            DialectArg::Typed => Dialect::typed(),
            DialectArg::Evm => Dialect::evm(),
        }
    }
}

impl std::fmt::Display for DialectArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DialectArg::Loose => "loose",
            DialectArg::Typed => "typed",
            DialectArg::Evm => "evm",
        })
    }
}

#[derive(Debug, ClapParser)]
#[command(name = "sasm", about = "Solenoid assembly shell", version)]
struct Args {
    /// Source file to parse; `-` reads stdin.
    file: PathBuf,

    /// Dialect to parse in.
    #[arg(long, value_enum, default_value_t = DialectArg::Evm)]
    dialect: DialectArg,

    /// Re-render the parsed tree to stdout.
    #[arg(long)]
    print: bool,
}

fn read_source(path: &PathBuf) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("reading stdin")?;
        Ok(("<stdin>".to_string(), source))
    } else {
        let source =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Ok((path.display().to_string(), source))
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let (file_name, source) = read_source(&args.file)?;

    let dialect = args.dialect.to_dialect();
    let mut scanner = Scanner::new(&source);
    let mut reporter = ErrorReporter::new();
    let block = Parser::new(&mut scanner, &dialect, &mut reporter).parse(false);

    for diagnostic in reporter.errors() {
        eprintln!(
            "{}:{}:{}: {}: {}",
            file_name,
            diagnostic.span.start.line,
            diagnostic.span.start.column,
            diagnostic.kind,
            diagnostic.message
        );
    }

    match block {
        Some(block) => {
            if args.print {
                println!("{}", print_block(&block));
            }
            // Recoverable diagnostics still fail the run.
            if reporter.has_errors() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        None => Ok(ExitCode::FAILURE),
    }
}
