//! Command handlers for the `wowza` CLI.
//!
//! Each handler writes its report to the given writers so it can be driven
//! from tests; `main.rs` passes stdout and stderr.

use wowza_lexer::ScanError;
use wowza_lexer_core::{FsmError, SymbolError};

mod lex;
mod symbols;
mod trace;

pub use lex::lex_file;
pub use symbols::print_symbols;
pub use trace::trace_input;

/// Failure that stops a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Fsm(#[from] FsmError),

    #[error(transparent)]
    Symbol(#[from] SymbolError),
}
