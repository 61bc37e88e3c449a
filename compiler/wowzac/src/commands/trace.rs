//! `wowza trace`: step the Wowza machine one character at a time.

use std::io::Write;

use wowza_lexer::{wowza_fsm, SymbolTable};
use wowza_lexer_core::State;

use super::CommandError;

/// Step a fresh Wowza machine over `input` from state `from`, printing the
/// current state after every character.
///
/// Characters with no transition are reported and leave the state as is.
pub fn trace_input(input: &str, from: &str, out: &mut dyn Write) -> Result<(), CommandError> {
    let mut fsm = wowza_fsm(SymbolTable::wowza())?;
    fsm.activate(from)?;
    writeln!(out, "current state: {}", current_name(fsm.current_state()))?;

    for c in input.chars() {
        let step = fsm.step(c)?;
        if step.fired {
            writeln!(out, "{c:?} -> {}", current_name(fsm.current_state()))?;
        } else {
            writeln!(
                out,
                "{c:?} -> stuck in {}",
                current_name(fsm.current_state())
            )?;
        }
    }

    match fsm.current_state() {
        Some(state) => match state.accepts() {
            Some(kind) => writeln!(out, "final state: {state} (accepts {kind})")?,
            None => writeln!(out, "final state: {state} (not accepting)")?,
        },
        None => writeln!(out, "final state: <none>")?,
    }
    Ok(())
}

fn current_name(state: Option<&State>) -> &str {
    state.map_or("<none>", State::name)
}
