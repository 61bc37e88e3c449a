use super::*;
use pretty_assertions::assert_eq;
use wowza_lexer_core::{CharClass, SymbolEntry};

/// Helper: scan with the Wowza grammar and collect `(kind, lexeme)` pairs,
/// panicking on any error.
fn kinds(source: &str) -> Vec<(SymbolKind, String)> {
    Scanner::wowza(source.as_bytes(), ScanOptions::default())
        .unwrap()
        .map(|t| {
            let t = t.unwrap();
            (t.kind(), t.lexeme().to_owned())
        })
        .collect()
}

fn tok(kind: SymbolKind, lexeme: &str) -> (SymbolKind, String) {
    (kind, lexeme.to_owned())
}

/// Machine with only the comparison-operator demo rules.
fn demo_scanner(source: &str) -> Scanner<'static, &[u8]> {
    let mut fsm = Fsm::new();
    fsm.add_char_rule("unknown", "add_op", '+');
    fsm.add_char_rule("unknown", "lt_op", '<');
    fsm.add_char_rule("lt_op", "lte_op", '=');
    fsm.set_accepting("add_op", SymbolKind::AddOp);
    fsm.set_accepting("lt_op", SymbolKind::LtOp);
    fsm.set_accepting("lte_op", SymbolKind::LteOp);
    Scanner::new(
        source.as_bytes(),
        fsm,
        "unknown",
        SymbolTable::wowza(),
        ScanOptions::default(),
    )
    .unwrap()
}

// === Demo rules ===

#[test]
fn lte_is_one_token() {
    let mut scanner = demo_scanner("<=");
    let token = scanner.next_token().unwrap().unwrap();
    assert_eq!(token.kind(), SymbolKind::LteOp);
    assert_eq!(token.lexeme(), "<=");
    assert_eq!(token.position(), Position::START);
    assert_eq!(scanner.fsm().current_state().unwrap().name(), "lte_op");
    assert!(scanner.next_token().unwrap().is_none());
}

#[test]
fn plus_is_add_op() {
    let tokens: Vec<_> = demo_scanner("+").map(Result::unwrap).collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), SymbolKind::AddOp);
    assert_eq!(tokens[0].lexeme(), "+");
}

#[test]
fn unregistered_initial_state_is_rejected() {
    let result = Scanner::new(
        &b""[..],
        Fsm::new(),
        "unknown",
        SymbolTable::wowza(),
        ScanOptions::default(),
    );
    assert!(matches!(
        result,
        Err(ScanError::Fsm(FsmError::UnknownState(name))) if name == "unknown"
    ));
}

// === End of input ===

#[test]
fn empty_source_yields_nothing() {
    assert_eq!(kinds(""), vec![]);
}

#[test]
fn end_marker_is_sticky() {
    let mut scanner = Scanner::wowza(&b"x"[..], ScanOptions::default()).unwrap();
    assert!(scanner.next_token().unwrap().is_some());
    for _ in 0..3 {
        assert!(scanner.next_token().unwrap().is_none());
    }
}

#[test]
fn whitespace_only_source_yields_nothing_by_default() {
    assert_eq!(kinds(" \t\n\r\n  "), vec![]);
}

// === Token classes ===

#[test]
fn maximal_munch_on_operators() {
    assert_eq!(
        kinds("a==b!=c<=d>=e=!f<g>h"),
        vec![
            tok(SymbolKind::Id, "a"),
            tok(SymbolKind::EqOp, "=="),
            tok(SymbolKind::Id, "b"),
            tok(SymbolKind::NeqOp, "!="),
            tok(SymbolKind::Id, "c"),
            tok(SymbolKind::LteOp, "<="),
            tok(SymbolKind::Id, "d"),
            tok(SymbolKind::GteOp, ">="),
            tok(SymbolKind::Id, "e"),
            tok(SymbolKind::AssignOp, "="),
            tok(SymbolKind::NotOp, "!"),
            tok(SymbolKind::Id, "f"),
            tok(SymbolKind::LtOp, "<"),
            tok(SymbolKind::Id, "g"),
            tok(SymbolKind::GtOp, ">"),
            tok(SymbolKind::Id, "h"),
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("while whilex If if _if"),
        vec![
            tok(SymbolKind::Keyword, "while"),
            tok(SymbolKind::Id, "whilex"),
            tok(SymbolKind::Id, "If"),
            tok(SymbolKind::Keyword, "if"),
            tok(SymbolKind::Id, "_if"),
        ]
    );
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("0 7 42 3.14 0.5"),
        vec![
            tok(SymbolKind::NumLit, "0"),
            tok(SymbolKind::NumLit, "7"),
            tok(SymbolKind::NumLit, "42"),
            tok(SymbolKind::NumLit, "3.14"),
            tok(SymbolKind::NumLit, "0.5"),
        ]
    );
}

#[test]
fn leading_zero_splits() {
    assert_eq!(
        kinds("007"),
        vec![
            tok(SymbolKind::NumLit, "0"),
            tok(SymbolKind::NumLit, "0"),
            tok(SymbolKind::NumLit, "7"),
        ]
    );
}

#[test]
fn strings() {
    assert_eq!(
        kinds(r#"print("hi there", "")"#),
        vec![
            tok(SymbolKind::Keyword, "print"),
            tok(SymbolKind::BeginParen, "("),
            tok(SymbolKind::StringLit, "\"hi there\""),
            tok(SymbolKind::CommaSep, ","),
            tok(SymbolKind::StringLit, "\"\""),
            tok(SymbolKind::EndParen, ")"),
        ]
    );
}

#[test]
fn string_may_span_lines() {
    assert_eq!(
        kinds("\"a\nb\""),
        vec![tok(SymbolKind::StringLit, "\"a\nb\"")]
    );
}

// === Errors ===

#[test]
fn unrecognized_character_is_skipped() {
    let mut scanner = Scanner::wowza(&b"a @ b"[..], ScanOptions::default()).unwrap();
    assert_eq!(scanner.next_token().unwrap().unwrap().lexeme(), "a");
    let err = scanner.next_token().unwrap_err();
    assert!(matches!(
        err,
        ScanError::UnrecognizedCharacter { ch: '@', position } if position == Position::new(1, 3)
    ));
    assert_eq!(scanner.next_token().unwrap().unwrap().lexeme(), "b");
    assert!(scanner.next_token().unwrap().is_none());
}

#[test]
fn unterminated_string_is_incomplete() {
    let mut scanner = Scanner::wowza(&b"x = \"abc"[..], ScanOptions::default()).unwrap();
    assert_eq!(scanner.next_token().unwrap().unwrap().kind(), SymbolKind::Id);
    assert_eq!(scanner.next_token().unwrap().unwrap().kind(), SymbolKind::AssignOp);
    match scanner.next_token().unwrap_err() {
        ScanError::IncompleteLexeme {
            lexeme,
            state,
            found,
            position,
        } => {
            assert_eq!(lexeme, "\"abc");
            assert_eq!(state, "string_body");
            assert_eq!(found, None);
            assert_eq!(position, Position::new(1, 5));
        }
        other => panic!("expected IncompleteLexeme, got {other:?}"),
    }
    assert!(scanner.next_token().unwrap().is_none());
}

#[test]
fn dangling_dot_is_incomplete_and_scan_resumes() {
    let mut scanner = Scanner::wowza(&b"1.x"[..], ScanOptions::default()).unwrap();
    match scanner.next_token().unwrap_err() {
        ScanError::IncompleteLexeme { lexeme, found, .. } => {
            assert_eq!(lexeme, "1.");
            assert_eq!(found, Some('x'));
        }
        other => panic!("expected IncompleteLexeme, got {other:?}"),
    }
    let next = scanner.next_token().unwrap().unwrap();
    assert_eq!(next.lexeme(), "x");
    assert_eq!(next.position(), Position::new(1, 3));
}

#[test]
fn undefined_kind_is_fatal() {
    let symbols = SymbolTable::from_entries(&[], &[SymbolEntry::literal(SymbolKind::AddOp, "+")], &[]);
    let mut fsm = Fsm::new();
    fsm.add_char_rule("start", "plus", '+');
    fsm.add_char_rule("start", "minus", '-');
    fsm.set_accepting("plus", SymbolKind::AddOp);
    fsm.set_accepting("minus", SymbolKind::SubOp);

    let mut scanner =
        Scanner::new(&b"+-+"[..], fsm, "start", &symbols, ScanOptions::default()).unwrap();
    assert_eq!(scanner.next_token().unwrap().unwrap().kind(), SymbolKind::AddOp);
    assert!(matches!(
        scanner.next_token(),
        Err(ScanError::Symbol(wowza_lexer_core::SymbolError::UnknownKind(
            SymbolKind::SubOp
        )))
    ));
    // Fatal: the remaining `+` is never scanned.
    assert!(scanner.next_token().unwrap().is_none());
}

#[test]
fn iterator_ends_after_fatal_error() {
    let token = CancellationToken::new();
    token.cancel();
    let scanner = Scanner::wowza(&b"a b c"[..], ScanOptions::default())
        .unwrap()
        .with_cancellation(token);
    let items: Vec<_> = scanner.collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(ScanError::Cancelled)));
}

#[test]
fn cancellation_between_tokens() {
    let token = CancellationToken::new();
    let mut scanner = Scanner::wowza(&b"a b c"[..], ScanOptions::default())
        .unwrap()
        .with_cancellation(token.clone());
    assert_eq!(scanner.next_token().unwrap().unwrap().lexeme(), "a");
    token.cancel();
    assert!(matches!(scanner.next_token(), Err(ScanError::Cancelled)));
    assert!(scanner.next_token().unwrap().is_none());
}

// === Positions and whitespace ===

#[test]
fn positions_are_line_and_column() {
    let tokens: Vec<_> = Scanner::wowza(&b"num x;\n  x = 10;\n"[..], ScanOptions::default())
        .unwrap()
        .map(Result::unwrap)
        .map(|t| (t.lexeme().to_owned(), t.position()))
        .collect();
    assert_eq!(
        tokens,
        vec![
            ("num".to_owned(), Position::new(1, 1)),
            ("x".to_owned(), Position::new(1, 5)),
            (";".to_owned(), Position::new(1, 6)),
            ("x".to_owned(), Position::new(2, 3)),
            ("=".to_owned(), Position::new(2, 5)),
            ("10".to_owned(), Position::new(2, 7)),
            (";".to_owned(), Position::new(2, 9)),
        ]
    );
}

#[test]
fn kept_whitespace_round_trips() {
    let source = "func f(num a, num b) {\n\tprint(a <= b);\n}\n";
    let options = ScanOptions {
        keep_whitespace: true,
    };
    let rebuilt: String = Scanner::wowza(source.as_bytes(), options)
        .unwrap()
        .map(|t| t.unwrap().lexeme().to_owned())
        .collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn custom_machine_with_classes() {
    let mut fsm = Fsm::new();
    fsm.add_rule("start", "word", CharClass::Lower);
    fsm.add_rule("word", "word", CharClass::Lower);
    fsm.set_accepting("word", SymbolKind::Id);
    let mut scanner = Scanner::new(
        &b"abcD"[..],
        fsm,
        "start",
        SymbolTable::wowza(),
        ScanOptions::default(),
    )
    .unwrap();
    assert_eq!(scanner.next_token().unwrap().unwrap().lexeme(), "abc");
    assert!(matches!(
        scanner.next_token(),
        Err(ScanError::UnrecognizedCharacter { ch: 'D', .. })
    ));
    assert_eq!(scanner.position(), Position::new(1, 5));
}

#[test]
fn into_inner_releases_reader() {
    let mut scanner = Scanner::wowza(&b"a\nb\n"[..], ScanOptions::default()).unwrap();
    scanner.next_token().unwrap();
    let rest = scanner.into_inner();
    assert_eq!(rest, b"b\n");
}
