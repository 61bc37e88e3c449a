//! Standalone FSM engine and symbol tables for the Wowza lexer.
//!
//! This crate has no `wowza_*` dependencies. It provides:
//!
//! - [`SymbolTable`]: the read-only token definitions of the Wowza language
//! - [`Predicate`] and [`CharClass`]: pure character tests used as transitions
//! - [`Fsm`] and [`State`]: a named-state DFA with arena-indexed states
//!
//! The scanner that drives the FSM over real input lives in `wowza_lexer`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod dispatch;
mod fsm;
mod predicate;
mod symbols;

pub use fsm::{Fsm, FsmError, Resolution, State, StateId, Step, Transition};
pub use predicate::{CharClass, Predicate};
pub use symbols::{Pattern, SymbolEntry, SymbolError, SymbolKind, SymbolTable};
