//! ASCII dispatch table for sealed machines.
//!
//! ASCII bytes are partitioned into equivalence classes: two bytes share a
//! class when every state resolves them to the same target. Each state then
//! gets one row indexed by class id, so an ASCII transition is two array
//! reads. Non-ASCII input is not covered and falls back to the predicate scan.

use rustc_hash::FxHashMap;

use crate::{Resolution, State, StateId};

const ASCII: usize = 128;

#[derive(Clone, Debug)]
pub(crate) struct DispatchTable {
    /// Class id of each ASCII byte.
    class_of: [u8; ASCII],
    class_count: usize,
    /// Row-major `[state][class]` targets.
    targets: Vec<Option<StateId>>,
}

impl DispatchTable {
    pub(crate) fn build(states: &[State]) -> Self {
        let mut class_of = [0u8; ASCII];
        let mut signatures: FxHashMap<Vec<Option<StateId>>, u8> = FxHashMap::default();
        let mut columns: Vec<Vec<Option<StateId>>> = Vec::new();

        for byte in 0..=0x7Fu8 {
            let c = char::from(byte);
            let signature: Vec<Option<StateId>> =
                states.iter().map(|s| s.resolve_next(c).target()).collect();
            // At most 128 distinct columns, so the id always fits.
            let next_class = u8::try_from(signatures.len()).unwrap_or(u8::MAX);
            let class = *signatures.entry(signature.clone()).or_insert_with(|| {
                columns.push(signature);
                next_class
            });
            class_of[usize::from(byte)] = class;
        }

        let class_count = columns.len();
        let mut targets = vec![None; states.len() * class_count];
        for (class, column) in columns.iter().enumerate() {
            for (state, &target) in column.iter().enumerate() {
                targets[state * class_count + class] = target;
            }
        }

        DispatchTable {
            class_of,
            class_count,
            targets,
        }
    }

    /// Resolve `input` from `from`, or `None` when `input` is not ASCII.
    #[inline]
    pub(crate) fn lookup(&self, from: StateId, input: char) -> Option<Resolution> {
        let byte = usize::try_from(u32::from(input)).ok().filter(|&b| b < ASCII)?;
        let class = usize::from(self.class_of[byte]);
        self.targets
            .get(from.index() * self.class_count + class)
            .map(|&target| Resolution::from(target))
    }

    pub(crate) fn class_count(&self) -> usize {
        self.class_count
    }
}
