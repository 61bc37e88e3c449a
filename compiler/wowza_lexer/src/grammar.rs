//! The Wowza scanning machine.
//!
//! Built from a [`SymbolTable`]: operator and punctuation literals are
//! wired as a prefix trie out of [`INITIAL_STATE`], and the open token
//! classes get hand-written sub-machines:
//!
//! ```text
//! unknown --alpha_under--> id --ident_continue--> id
//! unknown --quote--> string_body --quote--> string_lit
//!                    string_body --all_but_quote--> string_body
//! unknown --'0'--> num_zero --'.'--> num_dot --nums--> num_frac --nums--> num_frac
//! unknown --nonzero--> num_int --nums--> num_int
//!                      num_int --'.'--> num_dot
//! unknown --whitespace--> whitespace --whitespace--> whitespace
//! ```
//!
//! A state that spells a complete operator is named after its kind, so the
//! walk for `<=` is `unknown`, `lt_op`, `lte_op`. Prefixes that are not
//! operators themselves are named `partial_op:<prefix>`.
//!
//! Keywords are not separate states: they scan as identifiers and the
//! scanner reclassifies them against the keyword list.

use wowza_lexer_core::{CharClass, Fsm, SymbolError, SymbolKind, SymbolTable};

/// Name of the state every lexeme starts from.
pub const INITIAL_STATE: &str = "unknown";

/// Build the scanning machine for `symbols`.
///
/// Fails with [`SymbolError::UnknownKind`] if the table lacks one of the
/// open token classes the machine accepts.
#[tracing::instrument(level = "debug", skip_all)]
pub fn wowza_fsm(symbols: &SymbolTable) -> Result<Fsm, SymbolError> {
    let mut fsm = Fsm::new();
    fsm.register_state(INITIAL_STATE);

    add_operators(&mut fsm, symbols);
    add_identifiers(&mut fsm, symbols)?;
    add_strings(&mut fsm, symbols)?;
    add_numbers(&mut fsm, symbols)?;
    add_whitespace(&mut fsm, symbols)?;

    fsm.seal();
    tracing::debug!(states = fsm.len(), "wowza machine built");
    Ok(fsm)
}

fn operator_state_name(symbols: &SymbolTable, prefix: &str) -> String {
    match symbols.kind_of_literal(prefix) {
        Some(kind) => kind.name().to_owned(),
        None => format!("partial_op:{prefix}"),
    }
}

fn add_operators(fsm: &mut Fsm, symbols: &SymbolTable) {
    // Every distinct prefix, shortest first, so each edge is added once and
    // parents exist before children.
    let mut prefixes: Vec<&str> = symbols
        .operators()
        .flat_map(|(_, literal)| {
            literal
                .char_indices()
                .map(move |(i, c)| &literal[..i + c.len_utf8()])
        })
        .collect();
    prefixes.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    prefixes.dedup();

    for prefix in prefixes {
        let Some(last) = prefix.chars().next_back() else {
            continue;
        };
        let parent = &prefix[..prefix.len() - last.len_utf8()];
        let source = if parent.is_empty() {
            INITIAL_STATE.to_owned()
        } else {
            operator_state_name(symbols, parent)
        };
        let target = operator_state_name(symbols, prefix);
        fsm.add_char_rule(&source, &target, last);
        if let Some(kind) = symbols.kind_of_literal(prefix) {
            fsm.set_accepting(&target, kind);
        }
    }
}

/// Register `state` as accepting `kind`, which must be defined in `symbols`.
fn accept(
    fsm: &mut Fsm,
    symbols: &SymbolTable,
    state: &str,
    kind: SymbolKind,
) -> Result<(), SymbolError> {
    symbols.lookup(kind)?;
    fsm.set_accepting(state, kind);
    Ok(())
}

fn add_identifiers(fsm: &mut Fsm, symbols: &SymbolTable) -> Result<(), SymbolError> {
    fsm.add_rule(INITIAL_STATE, "id", CharClass::AlphaUnder);
    fsm.add_rule("id", "id", CharClass::IdentContinue);
    accept(fsm, symbols, "id", SymbolKind::Id)
}

fn add_strings(fsm: &mut Fsm, symbols: &SymbolTable) -> Result<(), SymbolError> {
    fsm.add_rule(INITIAL_STATE, "string_body", CharClass::Quote);
    fsm.add_rule("string_body", "string_lit", CharClass::Quote);
    fsm.add_rule("string_body", "string_body", CharClass::AllButQuote);
    accept(fsm, symbols, "string_lit", SymbolKind::StringLit)
}

fn add_numbers(fsm: &mut Fsm, symbols: &SymbolTable) -> Result<(), SymbolError> {
    fsm.add_char_rule(INITIAL_STATE, "num_zero", '0');
    fsm.add_rule(INITIAL_STATE, "num_int", CharClass::Nonzero);
    fsm.add_char_rule("num_zero", "num_dot", '.');
    fsm.add_rule("num_int", "num_int", CharClass::Nums);
    fsm.add_char_rule("num_int", "num_dot", '.');
    fsm.add_rule("num_dot", "num_frac", CharClass::Nums);
    fsm.add_rule("num_frac", "num_frac", CharClass::Nums);
    for state in ["num_zero", "num_int", "num_frac"] {
        accept(fsm, symbols, state, SymbolKind::NumLit)?;
    }
    Ok(())
}

fn add_whitespace(fsm: &mut Fsm, symbols: &SymbolTable) -> Result<(), SymbolError> {
    fsm.add_rule(INITIAL_STATE, "whitespace", CharClass::Whitespace);
    fsm.add_rule("whitespace", "whitespace", CharClass::Whitespace);
    accept(fsm, symbols, "whitespace", SymbolKind::Whitespace)
}
