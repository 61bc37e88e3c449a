//! Tokens emitted by the scanner.

use std::fmt;

use wowza_lexer_core::SymbolKind;

/// 1-based line and column of a character. Columns count `char`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };

    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A classified lexeme. Immutable once emitted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    kind: SymbolKind,
    lexeme: String,
    position: Position,
}

impl Token {
    pub(crate) fn new(kind: SymbolKind, lexeme: String, position: Position) -> Self {
        Token {
            kind,
            lexeme,
            position,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Position of the first character of the lexeme.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}", self.kind, self.lexeme, self.position)
    }
}
