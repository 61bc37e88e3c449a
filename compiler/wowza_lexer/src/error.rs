//! Scanner errors.
//!
//! Two families:
//! - data errors (`UnrecognizedCharacter`, `IncompleteLexeme`) carry a
//!   position and are recoverable: the scanner has already moved past the
//!   offending input and the next call resumes scanning;
//! - structural errors (unknown state or kind), I/O failures, and
//!   cancellation are fatal and end the scan.

use wowza_lexer_core::{FsmError, SymbolError};

use crate::Position;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// No token can start with `ch`. The character is skipped.
    #[error("{position}: unrecognized character {ch:?}")]
    UnrecognizedCharacter { ch: char, position: Position },

    /// The machine got stuck in a non-accepting state. The partial lexeme
    /// is discarded.
    #[error(
        "{position}: incomplete lexeme {lexeme:?} (stuck in state `{state}` at {})",
        describe_found(.found)
    )]
    IncompleteLexeme {
        lexeme: String,
        state: String,
        /// Character that could not continue the lexeme; `None` at end of input.
        found: Option<char>,
        position: Position,
    },

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error(transparent)]
    Fsm(#[from] FsmError),

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("scan cancelled")]
    Cancelled,
}

fn describe_found(found: &Option<char>) -> String {
    match *found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_owned(),
    }
}

impl ScanError {
    /// Whether scanning can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScanError::UnrecognizedCharacter { .. } | ScanError::IncompleteLexeme { .. }
        )
    }

    /// Source position of a data error.
    pub fn position(&self) -> Option<Position> {
        match self {
            ScanError::UnrecognizedCharacter { position, .. }
            | ScanError::IncompleteLexeme { position, .. } => Some(*position),
            ScanError::Symbol(_) | ScanError::Fsm(_) | ScanError::Io(_) | ScanError::Cancelled => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wowza_lexer_core::SymbolKind;

    #[test]
    fn data_errors_are_recoverable() {
        let err = ScanError::UnrecognizedCharacter {
            ch: '@',
            position: Position::new(2, 5),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.position(), Some(Position::new(2, 5)));
        assert_eq!(err.to_string(), "2:5: unrecognized character '@'");
    }

    #[test]
    fn incomplete_lexeme_message() {
        let err = ScanError::IncompleteLexeme {
            lexeme: "0.".to_owned(),
            state: "num_dot".to_owned(),
            found: Some('x'),
            position: Position::new(1, 1),
        };
        assert_eq!(
            err.to_string(),
            "1:1: incomplete lexeme \"0.\" (stuck in state `num_dot` at 'x')"
        );

        let at_eof = ScanError::IncompleteLexeme {
            lexeme: "\"abc".to_owned(),
            state: "string_body".to_owned(),
            found: None,
            position: Position::new(4, 2),
        };
        assert!(at_eof.to_string().ends_with("at end of input)"));
    }

    #[test]
    fn structural_errors_are_fatal() {
        let errors = [
            ScanError::from(SymbolError::UnknownKind(SymbolKind::Id)),
            ScanError::from(FsmError::UnknownState("start".to_owned())),
            ScanError::Cancelled,
        ];
        for err in errors {
            assert!(!err.is_recoverable(), "{err} should be fatal");
            assert_eq!(err.position(), None);
        }
    }

    #[test]
    fn structural_messages_name_the_identifier() {
        let err = ScanError::from(FsmError::UnknownState("start".to_owned()));
        assert!(err.to_string().contains("`start`"));
        let err = ScanError::from(SymbolError::UnknownKind(SymbolKind::NumLit));
        assert!(err.to_string().contains("`num_lit`"));
    }
}
