//! `wowza symbols`: dump the Wowza symbol table.

use std::io::Write;

use wowza_lexer_core::SymbolTable;

use super::CommandError;

pub fn print_symbols(symbols: &SymbolTable, out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "Keywords ({}):", symbols.keywords().len())?;
    writeln!(out, "  {}", symbols.keywords().join(" "))?;

    writeln!(out)?;
    writeln!(out, "Tokens ({}):", symbols.entries().len())?;
    let width = symbols
        .entries()
        .iter()
        .map(|e| e.kind.name().len())
        .max()
        .unwrap_or(0);
    for entry in symbols.entries() {
        writeln!(out, "  {:<width$}  {}", entry.kind.name(), entry.pattern)?;
    }

    writeln!(out)?;
    writeln!(out, "Character classes ({}):", symbols.char_classes().len())?;
    let width = symbols
        .char_classes()
        .iter()
        .map(|(class, _)| class.name().len())
        .max()
        .unwrap_or(0);
    for (class, pattern) in symbols.char_classes() {
        writeln!(out, "  {:<width$}  /{pattern}/", class.name())?;
    }
    Ok(())
}
