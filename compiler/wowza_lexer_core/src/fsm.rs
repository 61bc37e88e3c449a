//! Named-state deterministic finite-state machine.
//!
//! States live in an arena owned by the [`Fsm`] and are addressed by
//! [`StateId`]. Names are resolved to ids once, when rules are added; the
//! stepping path only touches indices.
//!
//! # Semantics
//!
//! - States are identified by name, created lazily, and never removed.
//! - Each state owns an ordered transition list. The first transition whose
//!   predicate accepts the input wins.
//! - There is exactly one current state. The machine has no implicit start
//!   state: callers must [`activate`](Fsm::activate) one before stepping.
//! - A step that matches nothing leaves the current state unchanged and
//!   reports `fired == false`, so callers can tell "stuck" from a self-loop.
//!
//! # Dispatch table
//!
//! [`Fsm::seal`] precomputes an ASCII dispatch table (see `dispatch.rs`).
//! Sealed and unsealed machines resolve every input identically; any later
//! mutation drops the table.

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::dispatch::DispatchTable;
use crate::{Predicate, SymbolKind};

/// Index of a state in its machine's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Edge from the owning state to `target`, taken when `predicate` holds.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    target: StateId,
    predicate: Predicate,
}

impl Transition {
    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

/// Outcome of resolving one input character against a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    Matched(StateId),
    NoMatch,
}

impl Resolution {
    pub fn target(self) -> Option<StateId> {
        match self {
            Resolution::Matched(id) => Some(id),
            Resolution::NoMatch => None,
        }
    }
}

impl From<Option<StateId>> for Resolution {
    fn from(target: Option<StateId>) -> Self {
        target.map_or(Resolution::NoMatch, Resolution::Matched)
    }
}

/// A named node with an ordered transition list.
#[derive(Clone, Debug)]
pub struct State {
    name: String,
    transitions: SmallVec<[Transition; 4]>,
    /// Symbol kind recognized when a lexeme ends in this state.
    accepts: Option<SymbolKind>,
}

impl State {
    fn new(name: &str) -> Self {
        State {
            name: name.to_owned(),
            transitions: SmallVec::new(),
            accepts: None,
        }
    }

    /// Target of the first transition whose predicate accepts `input`.
    pub fn resolve_next(&self, input: char) -> Resolution {
        self.transitions
            .iter()
            .find(|t| t.predicate.evaluate(input))
            .map(|t| t.target)
            .into()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn accepts(&self) -> Option<SymbolKind> {
        self.accepts
    }

    pub fn is_accepting(&self) -> bool {
        self.accepts.is_some()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Result of [`Fsm::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub previous: StateId,
    pub next: StateId,
    /// `false` when no transition matched; `next == previous` in that case.
    pub fired: bool,
}

/// Structural FSM error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsmError {
    /// A state name or id that was never registered.
    UnknownState(String),
    /// [`Fsm::step`] called before any state was activated.
    NotActivated,
}

impl fmt::Display for FsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsmError::UnknownState(name) => {
                write!(f, "unknown state `{name}`: no state with this name was registered")
            }
            FsmError::NotActivated => {
                f.write_str("no active state: activate a state before stepping the machine")
            }
        }
    }
}

impl std::error::Error for FsmError {}

/// Deterministic finite-state machine over `char` input.
#[derive(Clone, Debug, Default)]
pub struct Fsm {
    states: Vec<State>,
    index: FxHashMap<String, StateId>,
    current: Option<StateId>,
    dispatch: Option<DispatchTable>,
}

impl Fsm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning its id. No-op if already registered.
    pub fn register_state(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let raw = u32::try_from(self.states.len())
            .unwrap_or_else(|_| panic!("state arena exceeds u32::MAX entries"));
        let id = StateId(raw);
        self.states.push(State::new(name));
        self.index.insert(name.to_owned(), id);
        self.dispatch = None;
        id
    }

    /// Id of a registered state.
    pub fn id_of(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    /// Make `name` the current state.
    pub fn activate(&mut self, name: &str) -> Result<StateId, FsmError> {
        let id = self
            .id_of(name)
            .ok_or_else(|| FsmError::UnknownState(name.to_owned()))?;
        self.current = Some(id);
        Ok(id)
    }

    /// Make the state with `id` current.
    pub fn activate_id(&mut self, id: StateId) -> Result<(), FsmError> {
        if id.index() >= self.states.len() {
            return Err(FsmError::UnknownState(id.to_string()));
        }
        self.current = Some(id);
        Ok(())
    }

    /// Append a transition `source --predicate--> target`, registering both
    /// states if needed.
    pub fn add_rule(&mut self, source: &str, target: &str, predicate: impl Into<Predicate>) {
        let source = self.register_state(source);
        let target = self.register_state(target);
        self.states[source.index()].transitions.push(Transition {
            target,
            predicate: predicate.into(),
        });
        self.dispatch = None;
    }

    /// Append a transition that fires on exactly `c`.
    pub fn add_char_rule(&mut self, source: &str, target: &str, c: char) {
        self.add_rule(source, target, Predicate::Char(c));
    }

    /// Mark `name` as accepting `kind`, registering it if needed.
    pub fn set_accepting(&mut self, name: &str, kind: SymbolKind) -> StateId {
        let id = self.register_state(name);
        self.states[id.index()].accepts = Some(kind);
        id
    }

    /// Feed one character, moving to the matched target if any.
    pub fn step(&mut self, input: char) -> Result<Step, FsmError> {
        let previous = self.current.ok_or(FsmError::NotActivated)?;
        let step = match self.resolve(previous, input) {
            Resolution::Matched(next) => {
                self.current = Some(next);
                Step {
                    previous,
                    next,
                    fired: true,
                }
            }
            Resolution::NoMatch => Step {
                previous,
                next: previous,
                fired: false,
            },
        };
        Ok(step)
    }

    /// Resolve `input` from the current state without moving.
    pub fn peek(&self, input: char) -> Result<Resolution, FsmError> {
        let current = self.current.ok_or(FsmError::NotActivated)?;
        Ok(self.resolve(current, input))
    }

    #[inline]
    fn resolve(&self, from: StateId, input: char) -> Resolution {
        if let Some(resolution) = self
            .dispatch
            .as_ref()
            .and_then(|table| table.lookup(from, input))
        {
            return resolution;
        }
        self.states[from.index()].resolve_next(input)
    }

    /// Precompute the ASCII dispatch table.
    #[tracing::instrument(level = "debug", skip_all, fields(states = self.states.len()))]
    pub fn seal(&mut self) {
        let table = DispatchTable::build(&self.states);
        tracing::debug!(classes = table.class_count(), "dispatch table built");
        self.dispatch = Some(table);
    }

    pub fn is_sealed(&self) -> bool {
        self.dispatch.is_some()
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn current_state(&self) -> Option<&State> {
        self.current.map(|id| &self.states[id.index()])
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
