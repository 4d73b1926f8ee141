// Immutable automaton: traversal primitives, statistics and binary loading.

use log::debug;

use crate::FsaError;
use crate::config::TraversalConfig;
use crate::format::{self, FsaHeader, HEADER_SIZE};
use crate::transition::{ARC_FINAL, ARC_LAST, StateId, Transition};

/// A deterministic, acyclic, minimal automaton over bytes.
///
/// All arcs live in one flat table. A state is the index of its first arc;
/// its arcs follow in ascending label order up to the one flagged `last`.
/// Every arc points to a state stored *before* it, which keeps the graph
/// acyclic by construction and lets loaders verify it in one pass.
///
/// The automaton is immutable once built, so it can be shared freely between
/// threads; each traversal owns its own [`TraversalConfig`].
#[derive(Clone, PartialEq, Eq)]
pub struct Fsa {
    arcs: Vec<Transition>,
    root: StateId,
}

impl std::fmt::Debug for Fsa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsa")
            .field("arc_count", &self.arcs.len())
            .field("root", &self.root)
            .finish()
    }
}

/// Result of walking a byte prefix from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    /// State reached after the last byte of the prefix.
    pub state: StateId,
    /// Whether the prefix itself is an accepted sequence.
    pub accepting: bool,
}

/// Size summary of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FsaStats {
    /// States with at least one outgoing arc.
    pub states: usize,
    /// Total number of arcs.
    pub arcs: usize,
    /// Number of accepted sequences.
    pub sequences: u64,
}

impl Fsa {
    /// Wrap an arc table after checking its structure.
    pub fn from_arcs(arcs: Vec<Transition>, root: StateId) -> Result<Self, FsaError> {
        validate(&arcs, root)?;
        Ok(Self { arcs, root })
    }

    /// Wrap an arc table produced by the builder, which is valid by construction.
    pub(crate) fn from_parts(arcs: Vec<Transition>, root: StateId) -> Self {
        debug_assert!(validate(&arcs, root).is_ok());
        Self { arcs, root }
    }

    /// Load an automaton from its binary layout.
    ///
    /// The arc records are copied into an owned table, since the source slice
    /// may not be aligned for a zero-copy cast.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        let header = format::parse_header(data)?;
        let expected = header.total_len();
        if data.len() < expected {
            return Err(FsaError::TooShort {
                expected,
                actual: data.len(),
            });
        }

        let count = header.arc_count as usize;
        let mut arcs = vec![Transition::new(0, StateId::EMPTY, false, false); count];
        bytemuck::cast_slice_mut::<Transition, u8>(&mut arcs)
            .copy_from_slice(&data[HEADER_SIZE..expected]);

        let root = if header.root == u32::MAX {
            StateId::EMPTY
        } else {
            StateId::from_index(header.root)
        };
        let fsa = Self::from_arcs(arcs, root)?;
        debug!("loaded automaton with {} arcs", fsa.arcs.len());
        Ok(fsa)
    }

    /// Serialize into the binary layout read by [`from_bytes`](Self::from_bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = FsaHeader {
            root: self.root.raw(),
            arc_count: self.arcs.len() as u32,
        };
        let mut out = Vec::with_capacity(header.total_len());
        format::write_header(&header, &mut out);
        out.extend_from_slice(bytemuck::cast_slice(&self.arcs));
        out
    }

    /// The start state.
    #[inline]
    pub fn root(&self) -> StateId {
        self.root
    }

    /// Number of arcs in the table.
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    #[inline]
    pub(crate) fn arc_at(&self, index: u32) -> Transition {
        self.arcs[index as usize]
    }

    /// The outgoing arcs of `state`, in ascending label order.
    pub fn arcs(&self, state: StateId) -> Arcs<'_> {
        Arcs {
            table: &self.arcs,
            next: state.first_arc(),
        }
    }

    /// The arc of `state` labeled `label`, if any.
    pub fn find_arc(&self, state: StateId, label: u8) -> Option<Transition> {
        for arc in self.arcs(state) {
            if arc.label() == label {
                return Some(arc);
            }
            if arc.label() > label {
                break;
            }
        }
        None
    }

    /// Follow the arc labeled `label` out of `state`.
    pub fn transition(&self, state: StateId, label: u8) -> Option<StateId> {
        self.find_arc(state, label).map(|arc| arc.target())
    }

    /// Walk `prefix` from the root.
    ///
    /// Returns `None` as soon as a byte has no matching arc. The empty prefix
    /// matches the root, which is never accepting.
    pub fn lookup_prefix(&self, prefix: &[u8]) -> Option<PrefixMatch> {
        let mut state = self.root;
        let mut accepting = false;
        for &label in prefix {
            let arc = self.find_arc(state, label)?;
            state = arc.target();
            accepting = arc.is_final();
        }
        Some(PrefixMatch { state, accepting })
    }

    /// Whether `sequence` is accepted.
    pub fn contains(&self, sequence: &[u8]) -> bool {
        !sequence.is_empty() && self.lookup_prefix(sequence).is_some_and(|m| m.accepting)
    }

    /// All sequences that complete a path into `state`, in ascending order.
    ///
    /// Each call starts a fresh traversal.
    pub fn completions(&self, state: StateId) -> Completions<'_> {
        let mut config = TraversalConfig::new();
        config.reset(state);
        Completions { fsa: self, config }
    }

    /// Every accepted sequence, in ascending order.
    pub fn sequences(&self) -> Completions<'_> {
        self.completions(self.root)
    }

    /// Count states, arcs and accepted sequences.
    pub fn stats(&self) -> FsaStats {
        // Targets always precede their referrers, so one forward pass sees
        // every target's count before it is needed.
        let mut below = vec![0u64; self.arcs.len()];
        let mut states = 0;
        let mut run_start = 0usize;
        let mut run_total = 0u64;
        for (i, arc) in self.arcs.iter().enumerate() {
            let mut count = u64::from(arc.is_final());
            if let Some(first) = arc.target().first_arc() {
                count = count.saturating_add(below[first as usize]);
            }
            run_total = run_total.saturating_add(count);
            if arc.is_last() {
                below[run_start] = run_total;
                states += 1;
                run_start = i + 1;
                run_total = 0;
            }
        }
        FsaStats {
            states,
            arcs: self.arcs.len(),
            sequences: self.root.first_arc().map_or(0, |r| below[r as usize]),
        }
    }
}

/// Iterator over the arcs of one state.
#[derive(Debug, Clone)]
pub struct Arcs<'a> {
    table: &'a [Transition],
    next: Option<u32>,
}

impl Iterator for Arcs<'_> {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        let index = self.next?;
        let arc = self.table[index as usize];
        self.next = (!arc.is_last()).then_some(index + 1);
        Some(arc)
    }
}

/// Lazy, owned-item iterator over completions. See [`Fsa::completions`].
#[derive(Debug, Clone)]
pub struct Completions<'a> {
    fsa: &'a Fsa,
    config: TraversalConfig,
}

impl Iterator for Completions<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        self.config.advance(self.fsa).map(<[u8]>::to_vec)
    }
}

/// Check that an arc table forms a well-formed automaton.
fn validate(arcs: &[Transition], root: StateId) -> Result<(), FsaError> {
    let is_state_start = |index: u32| index == 0 || arcs[index as usize - 1].is_last();

    if let Some(last) = arcs.last() {
        if !last.is_last() {
            return Err(FsaError::Corrupt("arc table ends mid-state".to_string()));
        }
    }

    let mut previous_label: Option<u8> = None;
    for (i, arc) in arcs.iter().enumerate() {
        if arc.flags() & !(ARC_FINAL | ARC_LAST) != 0 || arc.reserved() != 0 {
            return Err(FsaError::Corrupt(format!("arc {i} has unknown flag bits")));
        }
        if let Some(target) = arc.target().first_arc() {
            if target as usize >= i || !is_state_start(target) {
                return Err(FsaError::Corrupt(format!(
                    "arc {i} points to invalid state {target}"
                )));
            }
        } else if !arc.is_final() {
            return Err(FsaError::Corrupt(format!("arc {i} leads nowhere")));
        }
        if previous_label.is_some_and(|p| p >= arc.label()) {
            return Err(FsaError::Corrupt(format!("arc {i} is out of label order")));
        }
        previous_label = (!arc.is_last()).then_some(arc.label());
    }

    match root.first_arc() {
        None => Ok(()),
        Some(r) if (r as usize) < arcs.len() && is_state_start(r) => Ok(()),
        Some(r) => Err(FsaError::Corrupt(format!("invalid root state {r}"))),
    }
}
