//! Lexical symbol definitions for the Wowza language.
//!
//! The symbol table maps every [`SymbolKind`] to its [`Pattern`]: a literal
//! lexeme for operators and punctuation, or a regular expression for the
//! open-ended token classes (identifiers, keywords, literals, whitespace).
//! It also carries the reserved keyword list and the character-class
//! pattern table used to document the [`CharClass`] predicates.
//!
//! Tables are populated once at construction and never mutated afterwards.
//! The standard Wowza configuration is built lazily and shared process-wide
//! through [`SymbolTable::wowza`]; it is immutable, so sharing it is safe.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::CharClass;

/// Grammatical kind of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    // === Operators ===
    AssignOp,
    AddOp,
    SubOp,
    MulOp,
    DivOp,
    EqOp,
    NeqOp,
    NotOp,
    LtOp,
    LteOp,
    GtOp,
    GteOp,

    // === Punctuation ===
    BeginBlock,
    EndBlock,
    BeginParen,
    EndParen,
    CommaSep,
    EndStmt,

    // === Open classes ===
    Keyword,
    Id,
    StringLit,
    NumLit,

    // === Trivia ===
    Whitespace,
}

impl SymbolKind {
    /// Every kind, in table order.
    pub const ALL: [SymbolKind; 23] = [
        SymbolKind::AssignOp,
        SymbolKind::AddOp,
        SymbolKind::SubOp,
        SymbolKind::MulOp,
        SymbolKind::DivOp,
        SymbolKind::EqOp,
        SymbolKind::NeqOp,
        SymbolKind::NotOp,
        SymbolKind::LtOp,
        SymbolKind::LteOp,
        SymbolKind::GtOp,
        SymbolKind::GteOp,
        SymbolKind::BeginBlock,
        SymbolKind::EndBlock,
        SymbolKind::BeginParen,
        SymbolKind::EndParen,
        SymbolKind::CommaSep,
        SymbolKind::EndStmt,
        SymbolKind::Keyword,
        SymbolKind::Id,
        SymbolKind::StringLit,
        SymbolKind::NumLit,
        SymbolKind::Whitespace,
    ];

    /// The `snake_case` name used in symbol tables and state names.
    pub const fn name(self) -> &'static str {
        match self {
            SymbolKind::AssignOp => "assign_op",
            SymbolKind::AddOp => "add_op",
            SymbolKind::SubOp => "sub_op",
            SymbolKind::MulOp => "mul_op",
            SymbolKind::DivOp => "div_op",
            SymbolKind::EqOp => "eq_op",
            SymbolKind::NeqOp => "neq_op",
            SymbolKind::NotOp => "not_op",
            SymbolKind::LtOp => "lt_op",
            SymbolKind::LteOp => "lte_op",
            SymbolKind::GtOp => "gt_op",
            SymbolKind::GteOp => "gte_op",
            SymbolKind::BeginBlock => "begin_block",
            SymbolKind::EndBlock => "end_block",
            SymbolKind::BeginParen => "begin_paren",
            SymbolKind::EndParen => "end_paren",
            SymbolKind::CommaSep => "comma_sep",
            SymbolKind::EndStmt => "end_stmt",
            SymbolKind::Keyword => "keyword",
            SymbolKind::Id => "id",
            SymbolKind::StringLit => "string_lit",
            SymbolKind::NumLit => "num_lit",
            SymbolKind::Whitespace => "whitespace",
        }
    }

    /// Parse a kind from its `snake_case` name.
    pub fn from_name(name: &str) -> Option<SymbolKind> {
        SymbolKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether tokens of this kind carry no grammatical meaning.
    pub const fn is_trivia(self) -> bool {
        matches!(self, SymbolKind::Whitespace)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a symbol kind is spelled in source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Exact lexeme, e.g. `<=`.
    Literal(&'static str),
    /// Regular expression describing the lexeme set.
    Regex(&'static str),
}

impl Pattern {
    /// The raw pattern text.
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Pattern::Literal(s) | Pattern::Regex(s) => s,
        }
    }

    pub const fn is_literal(&self) -> bool {
        matches!(self, Pattern::Literal(_))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(s) => write!(f, "{s:?}"),
            Pattern::Regex(s) => write!(f, "/{s}/"),
        }
    }
}

/// One row of the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolEntry {
    pub kind: SymbolKind,
    pub pattern: Pattern,
}

impl SymbolEntry {
    pub const fn literal(kind: SymbolKind, text: &'static str) -> Self {
        SymbolEntry {
            kind,
            pattern: Pattern::Literal(text),
        }
    }

    pub const fn regex(kind: SymbolKind, re: &'static str) -> Self {
        SymbolEntry {
            kind,
            pattern: Pattern::Regex(re),
        }
    }
}

/// Error from a symbol table query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolError {
    /// The kind has no entry in the table.
    UnknownKind(SymbolKind),
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolError::UnknownKind(kind) => {
                write!(f, "unknown symbol kind `{kind}`: not defined in the symbol table")
            }
        }
    }
}

impl std::error::Error for SymbolError {}

/// Reserved words of the Wowza language, in alphabetical order.
const WOWZA_KEYWORDS: [&str; 15] = [
    "bool", "elif", "else", "false", "for", "from", "func", "if", "num", "print", "string", "to",
    "true", "void", "while",
];

const WOWZA_ENTRIES: [SymbolEntry; 23] = [
    SymbolEntry::literal(SymbolKind::AssignOp, "="),
    SymbolEntry::literal(SymbolKind::AddOp, "+"),
    SymbolEntry::literal(SymbolKind::SubOp, "-"),
    SymbolEntry::literal(SymbolKind::MulOp, "*"),
    SymbolEntry::literal(SymbolKind::DivOp, "/"),
    SymbolEntry::literal(SymbolKind::EqOp, "=="),
    SymbolEntry::literal(SymbolKind::NeqOp, "!="),
    SymbolEntry::literal(SymbolKind::NotOp, "!"),
    SymbolEntry::literal(SymbolKind::LtOp, "<"),
    SymbolEntry::literal(SymbolKind::LteOp, "<="),
    SymbolEntry::literal(SymbolKind::GtOp, ">"),
    SymbolEntry::literal(SymbolKind::GteOp, ">="),
    SymbolEntry::literal(SymbolKind::BeginBlock, "{"),
    SymbolEntry::literal(SymbolKind::EndBlock, "}"),
    SymbolEntry::literal(SymbolKind::BeginParen, "("),
    SymbolEntry::literal(SymbolKind::EndParen, ")"),
    SymbolEntry::literal(SymbolKind::CommaSep, ","),
    SymbolEntry::literal(SymbolKind::EndStmt, ";"),
    SymbolEntry::regex(SymbolKind::Keyword, r"^[a-z]+$"),
    SymbolEntry::regex(SymbolKind::Id, r"^[A-Za-z_][A-Za-z0-9_]*$"),
    SymbolEntry::regex(SymbolKind::StringLit, r#"^"[^"]*"$"#),
    SymbolEntry::regex(
        SymbolKind::NumLit,
        r"^(([1-9][0-9]*(\.[0-9]+)?)|(0\.[0-9]+)|0)$",
    ),
    SymbolEntry::regex(SymbolKind::Whitespace, r"^[ \t\r\n]+$"),
];

/// Character-class patterns, one per [`CharClass`].
const WOWZA_CHAR_CLASSES: [(CharClass, &str); 9] = [
    (CharClass::AlphaUnder, r"[A-Za-z_]"),
    (CharClass::CapsNumsUnder, r"[A-Z0-9_]"),
    (CharClass::Quote, r#"""#),
    (CharClass::AllButQuote, r#"[^"]"#),
    (CharClass::Nonzero, r"[1-9]"),
    (CharClass::Nums, r"[0-9]"),
    (CharClass::Lower, r"[a-z]"),
    (CharClass::IdentContinue, r"[A-Za-z0-9_]"),
    (CharClass::Whitespace, r"[ \t\r\n]"),
];

/// Read-only table of token definitions.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    keywords: Vec<&'static str>,
    keyword_set: FxHashSet<&'static str>,
    /// Entries in configuration order (first definition per kind).
    entries: Vec<SymbolEntry>,
    index: FxHashMap<SymbolKind, usize>,
    char_classes: Vec<(CharClass, &'static str)>,
}

impl SymbolTable {
    /// Build a table from explicit configuration.
    ///
    /// When a kind appears more than once, the first entry wins and later
    /// duplicates are ignored.
    pub fn from_entries(
        keywords: &[&'static str],
        entries: &[SymbolEntry],
        char_classes: &[(CharClass, &'static str)],
    ) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut index = FxHashMap::default();
        for entry in entries {
            if index.contains_key(&entry.kind) {
                continue;
            }
            index.insert(entry.kind, kept.len());
            kept.push(*entry);
        }

        SymbolTable {
            keywords: keywords.to_vec(),
            keyword_set: keywords.iter().copied().collect(),
            entries: kept,
            index,
            char_classes: char_classes.to_vec(),
        }
    }

    /// The standard Wowza symbol table.
    pub fn wowza() -> &'static SymbolTable {
        static TABLE: OnceLock<SymbolTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            SymbolTable::from_entries(&WOWZA_KEYWORDS, &WOWZA_ENTRIES, &WOWZA_CHAR_CLASSES)
        })
    }

    /// Look up the pattern defining `kind`.
    pub fn lookup(&self, kind: SymbolKind) -> Result<&Pattern, SymbolError> {
        self.index
            .get(&kind)
            .map(|&i| &self.entries[i].pattern)
            .ok_or(SymbolError::UnknownKind(kind))
    }

    /// Whether `kind` has an entry.
    pub fn contains(&self, kind: SymbolKind) -> bool {
        self.index.contains_key(&kind)
    }

    /// Whether `text` is a reserved keyword.
    pub fn is_keyword(&self, text: &str) -> bool {
        self.keyword_set.contains(text)
    }

    /// Reserved keywords in configuration order.
    pub fn keywords(&self) -> &[&'static str] {
        &self.keywords
    }

    /// All entries in configuration order.
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    /// Entries spelled as exact lexemes (operators and punctuation).
    pub fn operators(&self) -> impl Iterator<Item = (SymbolKind, &'static str)> + '_ {
        self.entries.iter().filter_map(|entry| match entry.pattern {
            Pattern::Literal(text) => Some((entry.kind, text)),
            Pattern::Regex(_) => None,
        })
    }

    /// The kind whose literal lexeme is exactly `text`, if any.
    pub fn kind_of_literal(&self, text: &str) -> Option<SymbolKind> {
        self.operators()
            .find(|&(_, literal)| literal == text)
            .map(|(kind, _)| kind)
    }

    /// Character-class pattern table.
    pub fn char_classes(&self) -> &[(CharClass, &'static str)] {
        &self.char_classes
    }

    /// Regex pattern documenting `class`, if configured.
    pub fn char_class_pattern(&self, class: CharClass) -> Option<&'static str> {
        self.char_classes
            .iter()
            .find(|(c, _)| *c == class)
            .map(|&(_, pattern)| pattern)
    }
}
