//! Split point discovery for merges
//!
//! The split point is the nearest common ancestor of two diverged branch
//! heads under full reachability, the base commit for three-way merge
//! classification.
//!
//! ## Algorithm
//!
//! 1. Collect the full ancestor set of the given head (both parents of
//!    merge commits included) and mark each member as visited from the
//!    given side.
//! 2. Walk the current head's ancestors in breadth-first commit order; the
//!    first commit already marked from the given side is the split point.
//!
//! The root commit is a universal ancestor, so the walk always terminates
//! with a result when both heads live in the same graph. Diamond histories
//! can hold several equally near common ancestors; the breadth-first order
//! is deterministic (first-parent edges are queued before merge-parent
//! edges), so the same history always yields the same split point.
//!
//! ## Debug Logging
//!
//! Build with `--features debug_split` to trace the traversal on stderr.

use crate::artifacts::graph::CommitGraph;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::HashMap;

/// Macro for debug logging enabled with the debug_split feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_split")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const FROM_CURRENT = 0b01;
        const FROM_GIVEN = 0b10;
        const FROM_BOTH = Self::FROM_CURRENT.bits() | Self::FROM_GIVEN.bits();
    }
}

/// Finds the nearest common ancestor of two branch heads
///
/// Borrows the commit graph for the duration of the search; the graph is
/// the sole source of truth for ancestry, so no per-branch history lists
/// are consulted.
// TODO: synthesize a virtual merge base when a diamond history leaves
// several equally near candidates, the way git's recursive strategy does
pub struct SplitPointFinder<'g> {
    graph: &'g CommitGraph,
}

impl<'g> SplitPointFinder<'g> {
    pub fn new(graph: &'g CommitGraph) -> Self {
        Self { graph }
    }

    /// Find the split point of `current` and `given`
    ///
    /// # Returns
    ///
    /// `Some(id)` of the nearest common ancestor; `None` only if the two
    /// heads share no history, which cannot happen for commits created
    /// through the same bootstrapped graph.
    pub fn find(&self, current: &ObjectId, given: &ObjectId) -> Option<ObjectId> {
        let mut states = HashMap::<ObjectId, VisitState>::new();

        for ancestor in self.graph.reachable(given) {
            states.insert(ancestor, VisitState::FROM_GIVEN);
        }

        for candidate in self.graph.reachable(current) {
            let state = states
                .entry(candidate.clone())
                .or_insert(VisitState::NONE);
            *state |= VisitState::FROM_CURRENT;

            debug_log!("split point: visiting {} ({:?})", candidate, state);

            if state.contains(VisitState::FROM_BOTH) {
                debug_log!("split point: found {}", candidate);
                return Some(candidate);
            }
        }

        None
    }
}
