//! FSM-driven lexer for the Wowza language.
//!
//! The [`Scanner`] pulls characters from a line-buffered [`LineSource`],
//! feeds them to an owned [`Fsm`](wowza_lexer_core::Fsm), and cuts a
//! [`Token`] whenever the machine gets stuck in an accepting state.
//! [`wowza_fsm`] builds the machine for the standard symbol table.
//!
//! For whole strings, [`lex`] collects tokens and recoverable errors in one
//! pass.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod grammar;
mod scanner;
mod source;
mod token;

pub use error::ScanError;
pub use grammar::{wowza_fsm, INITIAL_STATE};
pub use scanner::{CancellationToken, ScanOptions, Scanner};
pub use source::LineSource;
pub use token::{Position, Token};

pub use wowza_lexer_core::{SymbolKind, SymbolTable};

/// Output of [`lex`].
#[derive(Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    /// Recoverable errors, in source order.
    pub errors: Vec<ScanError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex a whole string with the standard Wowza grammar.
///
/// Recoverable errors are collected and scanning continues past them.
/// Fatal errors end the scan and are returned as `Err`.
pub fn lex(source: &str, options: ScanOptions) -> Result<LexOutput, ScanError> {
    let mut scanner = Scanner::wowza(source.as_bytes(), options)?;
    let mut output = LexOutput::default();
    loop {
        match scanner.next_token() {
            Ok(Some(token)) => output.tokens.push(token),
            Ok(None) => break,
            Err(err) if err.is_recoverable() => output.errors.push(err),
            Err(err) => return Err(err),
        }
    }
    Ok(output)
}
