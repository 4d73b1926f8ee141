// Minimal automaton construction from sorted input.
//
// Sequences arrive in strictly ascending order. The builder keeps the path
// of the previous sequence open; when the next one arrives, every open state
// past the common prefix can no longer change, so it is frozen: looked up in
// the register of already frozen states and either replaced by an identical
// one or appended to the arc table.

use hashbrown::HashMap;
use log::debug;

use crate::FsaError;
use crate::fsa::Fsa;
use crate::transition::{StateId, Transition};

/// An arc of a state that is still open.
#[derive(Debug, Clone, Copy)]
struct OpenArc {
    label: u8,
    /// Placeholder until the target state is frozen.
    target: StateId,
    is_final: bool,
}

/// Signature of a frozen state: its arcs without the `last` flag.
type Signature = Vec<(u8, StateId, bool)>;

/// Incremental builder of minimal acyclic automata.
///
/// ```
/// use morfa_fsa::FsaBuilder;
///
/// let mut builder = FsaBuilder::new();
/// builder.add(b"cat").unwrap();
/// builder.add(b"cats").unwrap();
/// builder.add(b"dog").unwrap();
/// let fsa = builder.finish().unwrap();
/// assert!(fsa.contains(b"cats"));
/// ```
#[derive(Debug)]
pub struct FsaBuilder {
    /// `open[i]` is the state reached after `i` bytes of the previous
    /// sequence; its last arc leads to `open[i + 1]`.
    open: Vec<Vec<OpenArc>>,
    previous: Vec<u8>,
    arcs: Vec<Transition>,
    register: HashMap<Signature, StateId>,
    sequences: usize,
}

impl Default for FsaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FsaBuilder {
    pub fn new() -> Self {
        Self {
            open: vec![Vec::new()],
            previous: Vec::new(),
            arcs: Vec::new(),
            register: HashMap::new(),
            sequences: 0,
        }
    }

    /// Build an automaton from sequences that are already sorted.
    pub fn build<I>(sequences: I) -> Result<Fsa, FsaError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut builder = Self::new();
        for seq in sequences {
            builder.add(seq.as_ref())?;
        }
        builder.finish()
    }

    /// Number of sequences added so far.
    pub fn len(&self) -> usize {
        self.sequences
    }

    pub fn is_empty(&self) -> bool {
        self.sequences == 0
    }

    /// Add the next sequence.
    ///
    /// # Errors
    ///
    /// - [`FsaError::EmptySequence`] for an empty slice
    /// - [`FsaError::Duplicate`] if it equals the previous sequence
    /// - [`FsaError::Unsorted`] if it sorts before the previous sequence
    /// - [`FsaError::TooLarge`] if the arc table overflows
    ///
    /// A sequence rejected for its order leaves the builder unchanged.
    pub fn add(&mut self, sequence: &[u8]) -> Result<(), FsaError> {
        if sequence.is_empty() {
            return Err(FsaError::EmptySequence);
        }
        let common = self.check_order(sequence)?;

        self.freeze_down_to(common)?;

        for &label in &sequence[common..] {
            self.top().push(OpenArc {
                label,
                target: StateId::EMPTY,
                is_final: false,
            });
            self.open.push(Vec::new());
        }
        // The arc that consumed the last byte lives in the state one below the top.
        let depth = self.open.len() - 2;
        if let Some(arc) = self.open[depth].last_mut() {
            arc.is_final = true;
        }

        self.previous.clear();
        self.previous.extend_from_slice(sequence);
        self.sequences += 1;
        Ok(())
    }

    /// Freeze all remaining states and return the automaton.
    pub fn finish(mut self) -> Result<Fsa, FsaError> {
        self.freeze_down_to(0)?;
        let root_arcs = self.open.pop().unwrap_or_default();
        let root = self.freeze_state(root_arcs)?;
        debug!(
            "built automaton: {} sequences, {} arcs, {} distinct states",
            self.sequences,
            self.arcs.len(),
            self.register.len()
        );
        Ok(Fsa::from_parts(self.arcs, root))
    }

    /// Length of the common prefix with the previous sequence, after checking
    /// that `sequence` sorts strictly after it.
    fn check_order(&self, sequence: &[u8]) -> Result<usize, FsaError> {
        let common = self
            .previous
            .iter()
            .zip(sequence)
            .take_while(|(a, b)| a == b)
            .count();
        if self.sequences == 0 {
            return Ok(0);
        }
        if common == sequence.len() {
            // `sequence` is the previous sequence or a prefix of it.
            return Err(if common == self.previous.len() {
                FsaError::Duplicate(sequence.to_vec())
            } else {
                FsaError::Unsorted {
                    previous: self.previous.clone(),
                    current: sequence.to_vec(),
                }
            });
        }
        if common < self.previous.len() && sequence[common] < self.previous[common] {
            return Err(FsaError::Unsorted {
                previous: self.previous.clone(),
                current: sequence.to_vec(),
            });
        }
        Ok(common)
    }

    fn top(&mut self) -> &mut Vec<OpenArc> {
        let last = self.open.len() - 1;
        &mut self.open[last]
    }

    /// Freeze open states until only `depth + 1` remain.
    fn freeze_down_to(&mut self, depth: usize) -> Result<(), FsaError> {
        while self.open.len() > depth + 1 {
            let state = self.open.pop().unwrap_or_default();
            let frozen = self.freeze_state(state)?;
            if let Some(arc) = self.top().last_mut() {
                arc.target = frozen;
            }
        }
        Ok(())
    }

    /// Replace an open state with its canonical frozen equivalent.
    fn freeze_state(&mut self, state: Vec<OpenArc>) -> Result<StateId, FsaError> {
        if state.is_empty() {
            return Ok(StateId::EMPTY);
        }

        let signature: Signature = state
            .iter()
            .map(|a| (a.label, a.target, a.is_final))
            .collect();
        if let Some(&existing) = self.register.get(&signature) {
            return Ok(existing);
        }

        let start = self.arcs.len();
        if start + state.len() >= u32::MAX as usize {
            return Err(FsaError::TooLarge(u32::MAX as usize - 1));
        }
        let last = state.len() - 1;
        self.arcs.extend(
            state
                .iter()
                .enumerate()
                .map(|(i, a)| Transition::new(a.label, a.target, a.is_final, i == last)),
        );
        let id = StateId::from_index(start as u32);
        self.register.insert(signature, id);
        Ok(id)
    }
}
