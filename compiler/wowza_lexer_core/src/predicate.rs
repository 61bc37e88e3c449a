//! Transition predicates.
//!
//! A [`Predicate`] is a pure test over a single input character. It never
//! sees the FSM, so transitions can be built and tested in isolation.

use std::fmt;

/// Named character class.
///
/// The first six classes are the Wowza character-class table; the rest
/// cover keywords, identifier continuation, and whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `[A-Za-z_]`
    AlphaUnder,
    /// `[A-Z0-9_]`
    CapsNumsUnder,
    /// `"`
    Quote,
    /// `[^"]`
    AllButQuote,
    /// `[1-9]`
    Nonzero,
    /// `[0-9]`
    Nums,
    /// `[a-z]`
    Lower,
    /// `[A-Za-z0-9_]`
    IdentContinue,
    /// `[ \t\r\n]`
    Whitespace,
}

impl CharClass {
    pub const ALL: [CharClass; 9] = [
        CharClass::AlphaUnder,
        CharClass::CapsNumsUnder,
        CharClass::Quote,
        CharClass::AllButQuote,
        CharClass::Nonzero,
        CharClass::Nums,
        CharClass::Lower,
        CharClass::IdentContinue,
        CharClass::Whitespace,
    ];

    /// Whether `c` belongs to this class.
    #[inline]
    pub fn contains(self, c: char) -> bool {
        match self {
            CharClass::AlphaUnder => c.is_ascii_alphabetic() || c == '_',
            CharClass::CapsNumsUnder => c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_',
            CharClass::Quote => c == '"',
            CharClass::AllButQuote => c != '"',
            CharClass::Nonzero => matches!(c, '1'..='9'),
            CharClass::Nums => c.is_ascii_digit(),
            CharClass::Lower => c.is_ascii_lowercase(),
            CharClass::IdentContinue => c.is_ascii_alphanumeric() || c == '_',
            CharClass::Whitespace => matches!(c, ' ' | '\t' | '\r' | '\n'),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CharClass::AlphaUnder => "alpha_under",
            CharClass::CapsNumsUnder => "caps_nums_under",
            CharClass::Quote => "quote",
            CharClass::AllButQuote => "all_but_quote",
            CharClass::Nonzero => "nonzero",
            CharClass::Nums => "nums",
            CharClass::Lower => "lower",
            CharClass::IdentContinue => "ident_continue",
            CharClass::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Condition under which a transition fires.
#[derive(Clone, Copy)]
pub enum Predicate {
    /// Exact character equality.
    Char(char),
    /// Membership in a character class.
    Class(CharClass),
    /// Arbitrary pure test.
    Fn(fn(char) -> bool),
}

impl Predicate {
    /// Test `input` against this predicate.
    #[inline]
    pub fn evaluate(&self, input: char) -> bool {
        match *self {
            Predicate::Char(c) => input == c,
            Predicate::Class(class) => class.contains(input),
            Predicate::Fn(f) => f(input),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Char(c) => write!(f, "Char({c:?})"),
            Predicate::Class(class) => write!(f, "Class({class})"),
            Predicate::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

impl From<char> for Predicate {
    fn from(c: char) -> Self {
        Predicate::Char(c)
    }
}

impl From<CharClass> for Predicate {
    fn from(class: CharClass) -> Self {
        Predicate::Class(class)
    }
}
