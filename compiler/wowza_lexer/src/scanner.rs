//! FSM-driven scanner.
//!
//! Each lexeme starts with the machine reset to its initial state. The
//! scanner peeks one character, steps the machine, and consumes the
//! character only if a transition fired (maximal munch). When the machine is
//! stuck:
//!
//! - with nothing accumulated, the character cannot start any token: it is
//!   consumed and reported as [`ScanError::UnrecognizedCharacter`];
//! - in an accepting state, the lexeme becomes a [`Token`] of that state's
//!   kind;
//! - otherwise the partial lexeme is reported as
//!   [`ScanError::IncompleteLexeme`].
//!
//! The read cursor never moves backwards.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wowza_lexer_core::{Fsm, FsmError, StateId, SymbolKind, SymbolTable};

use crate::grammar::{wowza_fsm, INITIAL_STATE};
use crate::{LineSource, Position, ScanError, Token};

/// Scanner configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Emit whitespace tokens. With this set, the lexemes of all tokens
    /// concatenate back to the input.
    pub keep_whitespace: bool,
}

/// Shared flag for stopping a scan from outside.
///
/// Checked before every character read.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Lazy token stream over one input source.
///
/// Owns its reader; dropping the scanner releases it.
pub struct Scanner<'t, R> {
    source: LineSource<R>,
    fsm: Fsm,
    initial: StateId,
    symbols: &'t SymbolTable,
    options: ScanOptions,
    cancel: Option<CancellationToken>,
    lexeme: String,
    start: Position,
    finished: bool,
}

impl<R: BufRead> Scanner<'static, R> {
    /// Scanner for the standard Wowza grammar.
    pub fn wowza(reader: R, options: ScanOptions) -> Result<Self, ScanError> {
        let symbols = SymbolTable::wowza();
        let fsm = wowza_fsm(symbols)?;
        Scanner::new(reader, fsm, INITIAL_STATE, symbols, options)
    }
}

impl<'t, R: BufRead> Scanner<'t, R> {
    /// Scanner driving `fsm` from the state named `initial`.
    ///
    /// Fails with [`FsmError::UnknownState`] if `initial` is not registered.
    pub fn new(
        reader: R,
        mut fsm: Fsm,
        initial: &str,
        symbols: &'t SymbolTable,
        options: ScanOptions,
    ) -> Result<Self, ScanError> {
        let initial = fsm.activate(initial)?;
        Ok(Scanner {
            source: LineSource::new(reader),
            fsm,
            initial,
            symbols,
            options,
            cancel: None,
            lexeme: String::new(),
            start: Position::START,
            finished: false,
        })
    }

    /// Stop with [`ScanError::Cancelled`] once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Next token, or `Ok(None)` once the input is exhausted.
    ///
    /// After a recoverable error the next call resumes past the bad input.
    /// After `Ok(None)` or a fatal error every call returns `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        loop {
            match self.scan_lexeme()? {
                Some(token) if token.kind().is_trivia() && !self.options.keep_whitespace => {}
                other => return Ok(other),
            }
        }
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.source.position()
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    /// Stop scanning and hand back the reader.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    fn scan_lexeme(&mut self) -> Result<Option<Token>, ScanError> {
        if self.finished {
            return Ok(None);
        }
        let result = self.scan_lexeme_inner();
        match &result {
            Err(err) if err.is_recoverable() => {
                tracing::debug!(%err, "recoverable scan error");
            }
            Err(err) => {
                tracing::debug!(%err, "scan aborted");
                self.finished = true;
            }
            Ok(None) => self.finished = true,
            Ok(Some(token)) => tracing::trace!(%token, "token"),
        }
        result
    }

    fn scan_lexeme_inner(&mut self) -> Result<Option<Token>, ScanError> {
        self.lexeme.clear();
        self.fsm.activate_id(self.initial)?;
        self.start = self.source.position();

        loop {
            self.check_cancelled()?;
            let Some(c) = self.source.peek()? else {
                if self.lexeme.is_empty() {
                    return Ok(None);
                }
                return self.finalize(None).map(Some);
            };

            if self.fsm.step(c)?.fired {
                self.source.advance()?;
                self.lexeme.push(c);
                continue;
            }

            if self.lexeme.is_empty() {
                let position = self.source.position();
                self.source.advance()?;
                return Err(ScanError::UnrecognizedCharacter { ch: c, position });
            }
            return self.finalize(Some(c)).map(Some);
        }
    }

    /// Turn the accumulated lexeme into a token, or report it as incomplete.
    fn finalize(&mut self, found: Option<char>) -> Result<Token, ScanError> {
        let lexeme = std::mem::take(&mut self.lexeme);
        let state = self.fsm.current_state().ok_or(FsmError::NotActivated)?;

        let Some(mut kind) = state.accepts() else {
            return Err(ScanError::IncompleteLexeme {
                lexeme,
                state: state.name().to_owned(),
                found,
                position: self.start,
            });
        };
        if kind == SymbolKind::Id && self.symbols.is_keyword(&lexeme) {
            kind = SymbolKind::Keyword;
        }
        self.symbols.lookup(kind)?;

        Ok(Token::new(kind, lexeme, self.start))
    }

    fn check_cancelled(&self) -> Result<(), ScanError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(ScanError::Cancelled),
            _ => Ok(()),
        }
    }
}

impl<R: BufRead> Iterator for Scanner<'_, R> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests;
