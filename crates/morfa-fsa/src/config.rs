// Traversal configuration / DFS stack
//
// Completions are enumerated with an explicit stack instead of recursion so
// that a caller can pull one sequence at a time and reuse the buffers
// across traversals.

use crate::fsa::Fsa;
use crate::transition::StateId;

/// Cursor state for a depth-first walk over an automaton.
///
/// `arc_stack[d]` holds the next arc to visit at depth `d` (`None` once the
/// state at that depth is exhausted); `path` holds the labels of the arcs
/// currently on the stack. Both are reused between calls to [`reset`].
///
/// [`reset`]: TraversalConfig::reset
#[derive(Debug, Clone, Default)]
pub struct TraversalConfig {
    arc_stack: Vec<Option<u32>>,
    path: Vec<u8>,
}

impl TraversalConfig {
    /// Create an empty configuration. Call [`reset`](Self::reset) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with room for paths of `depth` bytes.
    pub fn with_capacity(depth: usize) -> Self {
        Self {
            arc_stack: Vec::with_capacity(depth + 1),
            path: Vec::with_capacity(depth),
        }
    }

    /// Prepare to enumerate the completions of `state`.
    #[inline]
    pub fn reset(&mut self, state: StateId) {
        self.arc_stack.clear();
        self.path.clear();
        if let Some(first) = state.first_arc() {
            self.arc_stack.push(Some(first));
        }
    }

    /// Current stack depth.
    pub fn depth(&self) -> usize {
        self.arc_stack.len()
    }

    /// Yield the next accepted completion, relative to the reset state.
    ///
    /// Completions come in ascending byte order: a sequence precedes all of
    /// its extensions. The returned slice is overwritten by the next call.
    pub fn advance(&mut self, fsa: &Fsa) -> Option<&[u8]> {
        loop {
            let level = self.arc_stack.len().checked_sub(1)?;
            let Some(index) = self.arc_stack[level] else {
                // All arcs at this depth exhausted: backtrack.
                self.arc_stack.pop();
                continue;
            };

            let arc = fsa.arc_at(index);
            self.arc_stack[level] = (!arc.is_last()).then_some(index + 1);
            self.path.truncate(level);
            self.path.push(arc.label());

            if let Some(first) = arc.target().first_arc() {
                self.arc_stack.push(Some(first));
            }
            if arc.is_final() {
                return Some(&self.path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FsaBuilder;

    fn collect(fsa: &Fsa, config: &mut TraversalConfig) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(seq) = config.advance(fsa) {
            out.push(seq.to_vec());
        }
        out
    }

    #[test]
    fn new_config_is_empty() {
        let config = TraversalConfig::new();
        assert_eq!(config.depth(), 0);
    }

    #[test]
    fn enumerate_from_root() {
        let fsa = FsaBuilder::build(["ab", "abc", "b"]).unwrap();
        let mut config = TraversalConfig::with_capacity(8);
        config.reset(fsa.root());
        assert_eq!(
            collect(&fsa, &mut config),
            vec![b"ab".to_vec(), b"abc".to_vec(), b"b".to_vec()]
        );
        assert_eq!(config.depth(), 0);
    }

    #[test]
    fn reset_restarts_traversal() {
        let fsa = FsaBuilder::build(["x", "y"]).unwrap();
        let mut config = TraversalConfig::new();
        config.reset(fsa.root());
        assert_eq!(config.advance(&fsa), Some(&b"x"[..]));

        config.reset(fsa.root());
        assert_eq!(collect(&fsa, &mut config).len(), 2);
    }

    #[test]
    fn empty_state_yields_nothing() {
        let fsa = FsaBuilder::build(["a"]).unwrap();
        let mut config = TraversalConfig::new();
        config.reset(StateId::EMPTY);
        assert_eq!(config.advance(&fsa), None);
    }
}
