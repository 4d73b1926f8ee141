// Arc records and state references.
//
// A state is the index of its first arc in the automaton's flat arc table.
// Its arcs are stored contiguously in ascending label order and the final
// one carries the `last` flag, so no per-state arc count is stored.

use bytemuck::{Pod, Zeroable};

/// Opaque reference to an automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    /// The state without outgoing arcs. Every path ends here.
    pub const EMPTY: StateId = StateId(u32::MAX);

    #[inline]
    pub(crate) fn from_index(index: u32) -> Self {
        StateId(index)
    }

    /// Index of the state's first arc, or `None` for [`StateId::EMPTY`].
    #[inline]
    pub fn first_arc(self) -> Option<u32> {
        (self != Self::EMPTY).then_some(self.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    #[inline]
    pub(crate) fn raw(self) -> u32 {
        self.0
    }
}

/// Flag bit: the path ending with this arc is an accepted sequence.
pub const ARC_FINAL: u8 = 0x01;
/// Flag bit: this is the last arc of its state.
pub const ARC_LAST: u8 = 0x02;

/// One labeled arc (8 bytes).
///
/// Layout:
/// - `target` (u32): index of the target state's first arc, `u32::MAX` for none
/// - `label` (u8): input byte
/// - `flags` (u8): [`ARC_FINAL`] | [`ARC_LAST`]
/// - `_reserved` (u16): zero
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Transition {
    target: u32,
    label: u8,
    flags: u8,
    _reserved: u16,
}

impl Transition {
    pub fn new(label: u8, target: StateId, is_final: bool, is_last: bool) -> Self {
        let mut flags = 0;
        if is_final {
            flags |= ARC_FINAL;
        }
        if is_last {
            flags |= ARC_LAST;
        }
        Self {
            target: target.raw(),
            label,
            flags,
            _reserved: 0,
        }
    }

    #[inline]
    pub fn label(&self) -> u8 {
        self.label
    }

    #[inline]
    pub fn target(&self) -> StateId {
        StateId(self.target)
    }

    /// Whether the path ending with this arc is accepted.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.flags & ARC_FINAL != 0
    }

    /// Whether this is the last arc of its state.
    #[inline]
    pub fn is_last(&self) -> bool {
        self.flags & ARC_LAST != 0
    }

    #[inline]
    pub(crate) fn flags(&self) -> u8 {
        self.flags
    }

    #[inline]
    pub(crate) fn reserved(&self) -> u16 {
        self._reserved
    }
}

const _: () = assert!(size_of::<Transition>() == 8);
