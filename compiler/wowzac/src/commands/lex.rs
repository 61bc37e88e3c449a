//! `wowza lex`: scan a file and display the token stream.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use wowza_lexer::{ScanOptions, Scanner};

use super::CommandError;

/// Lex `path`, printing tokens to `out` and recoverable errors to `err`.
///
/// Returns the number of recoverable errors. Fatal scan errors abort with
/// `Err`.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn lex_file(
    path: &Path,
    options: ScanOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<usize, CommandError> {
    let file = File::open(path).map_err(|source| CommandError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let scanner = Scanner::wowza(BufReader::new(file), options)?;

    let mut tokens = Vec::new();
    let mut errors = 0;
    for item in scanner {
        match item {
            Ok(token) => tokens.push(token),
            Err(e) if e.is_recoverable() => {
                errors += 1;
                writeln!(err, "error: {}: {e}", path.display())?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    writeln!(
        out,
        "Tokens for '{}' ({} tokens):",
        path.display(),
        tokens.len()
    )?;
    for token in &tokens {
        writeln!(
            out,
            "  {} {:?} @ {}",
            token.kind(),
            token.lexeme(),
            token.position()
        )?;
    }
    tracing::debug!(tokens = tokens.len(), errors, "lex complete");
    Ok(errors)
}
