//! Wowza lexer CLI.

use std::process::ExitCode;

use clap::Parser;
use wowza_lexer::{ScanOptions, SymbolTable};
use wowzac::cli::{Cli, Command};
use wowzac::commands::{lex_file, print_symbols, trace_input};

fn main() -> ExitCode {
    wowzac::init_tracing();
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();

    let result = match cli.command {
        Command::Lex {
            path,
            keep_whitespace,
        } => lex_file(
            &path,
            ScanOptions { keep_whitespace },
            &mut stdout,
            &mut stderr,
        )
        .map(|errors| errors == 0),
        Command::Trace { input, from } => trace_input(&input, &from, &mut stdout).map(|()| true),
        Command::Symbols => print_symbols(SymbolTable::wowza(), &mut stdout).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
