//! Commit graph and ancestry queries
//!
//! The commit graph is an append-only set of immutable commit nodes keyed
//! by their content-derived identities. Every non-root commit references
//! 1-2 parents by identity; since a commit can only reference identities
//! that already exist in the map, the graph is acyclic by construction.
//!
//! Two traversal variants are provided:
//! - [`CommitGraph::ancestors`]: first-parent chain, used by the log
//! - [`CommitGraph::reachable`]: full reachability over both parents of
//!   merge commits, used for ancestry-membership tests and split point
//!   discovery
//!
//! Both are restartable, pure functions of the graph with no hidden cursor
//! state.

pub mod split_point;

use crate::artifacts::core::EngineError;
use crate::artifacts::objects::Manifest;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Append-only content-addressed map of commit nodes
///
/// Sole source of truth for ancestry. Branch heads are non-owning identity
/// references into this map.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CommitGraph {
    commits: HashMap<ObjectId, Commit>,
}

impl CommitGraph {
    /// Create a graph holding only the synthesized root commit
    ///
    /// # Returns
    ///
    /// The graph and the root commit's identity
    pub fn bootstrap() -> (Self, ObjectId) {
        let root = Commit::root();
        let root_id = root.object_id();

        let mut commits = HashMap::new();
        commits.insert(root_id.clone(), root);

        (CommitGraph { commits }, root_id)
    }

    /// Insert a new commit built from the given manifest, message and
    /// parents
    ///
    /// Identities are stable and content-derived, so re-creating an
    /// identical commit is idempotent. The root commit is synthesized
    /// through [`CommitGraph::bootstrap`] and is the only commit exempt
    /// from the non-blank message rule.
    pub fn create(
        &mut self,
        manifest: Manifest,
        message: String,
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(EngineError::EmptyMessage.into());
        }

        let commit = Commit::new(manifest, message, parents, timestamp);
        let commit_id = commit.object_id();
        self.commits.entry(commit_id.clone()).or_insert(commit);

        Ok(commit_id)
    }

    pub fn get(&self, id: &ObjectId) -> Option<&Commit> {
        self.commits.get(id)
    }

    /// Look up a commit, failing with `NoSuchCommit` if absent
    pub fn require(&self, id: &ObjectId) -> anyhow::Result<&Commit> {
        self.commits
            .get(id)
            .ok_or_else(|| EngineError::NoSuchCommit.into())
    }

    /// Iterate over every commit in the graph, in no particular order
    pub fn all(&self) -> impl Iterator<Item = (&ObjectId, &Commit)> {
        self.commits.iter()
    }

    /// Lazy first-parent chain: yields `id`, then its first parent, then
    /// that commit's first parent, terminating at the root
    pub fn ancestors<'g>(&'g self, id: &ObjectId) -> FirstParentAncestors<'g> {
        FirstParentAncestors {
            graph: self,
            next: Some(id.clone()),
        }
    }

    /// Full reachability traversal visiting both parents of merge commits
    ///
    /// Yields `id` first; every reachable commit exactly once, in
    /// breadth-first order with first-parent edges queued before
    /// merge-parent edges.
    pub fn reachable<'g>(&'g self, id: &ObjectId) -> Reachable<'g> {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        queue.push_back(id.clone());
        seen.insert(id.clone());

        Reachable {
            graph: self,
            queue,
            seen,
        }
    }

    /// True iff `ancestor` is reachable from `descendant` via full
    /// reachability, including merge-parent edges
    ///
    /// Works correctly across arbitrary merge history, not only linear
    /// branches.
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> bool {
        self.reachable(descendant).any(|id| &id == ancestor)
    }

    /// Resolve a possibly abbreviated commit id
    ///
    /// Fails with `AmbiguousPrefix` if multiple ids share the prefix,
    /// `NoSuchCommit` if none do.
    pub fn lookup_by_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let mut matches = self
            .commits
            .keys()
            .filter(|id| id.has_prefix(prefix))
            .cloned()
            .collect::<Vec<_>>();

        match matches.len() {
            0 => Err(EngineError::NoSuchCommit.into()),
            1 => Ok(matches.remove(0)),
            _ => Err(EngineError::AmbiguousPrefix(prefix.to_string()).into()),
        }
    }
}

/// Iterator over the first-parent chain of a commit
pub struct FirstParentAncestors<'g> {
    graph: &'g CommitGraph,
    next: Option<ObjectId>,
}

impl Iterator for FirstParentAncestors<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self
            .graph
            .get(&current)
            .and_then(|commit| commit.first_parent().cloned());

        Some(current)
    }
}

/// Iterator over every commit reachable through any parent edge
pub struct Reachable<'g> {
    graph: &'g CommitGraph,
    queue: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl Iterator for Reachable<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;

        if let Some(commit) = self.graph.get(&current) {
            for parent in commit.parents() {
                if self.seen.insert(parent.clone()) {
                    self.queue.push_back(parent.clone());
                }
            }
        }

        Some(current)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::build_graph;
    use super::*;
    use crate::artifacts::objects::Manifest;

    #[test]
    fn ancestors_starts_at_the_commit_and_ends_at_the_root() {
        let (graph, root_id, ids) =
            build_graph(&[("a", &["root"]), ("b", &["a"]), ("c", &["b"])]);

        let chain = graph.ancestors(&ids["c"]).collect::<Vec<_>>();

        assert_eq!(chain, vec![ids["c"].clone(), ids["b"].clone(), ids["a"].clone(), root_id]);
    }

    #[test]
    fn ancestors_is_restartable() {
        let (graph, _, ids) = build_graph(&[("a", &["root"]), ("b", &["a"])]);

        let first = graph.ancestors(&ids["b"]).collect::<Vec<_>>();
        let second = graph.ancestors(&ids["b"]).collect::<Vec<_>>();

        assert_eq!(first, second);
    }

    #[test]
    fn ancestors_follows_only_the_first_parent_of_merges() {
        let (graph, root_id, ids) = build_graph(&[
            ("a", &["root"]),
            ("b", &["a"]),
            ("c", &["a"]),
            ("m", &["b", "c"]),
        ]);

        let chain = graph.ancestors(&ids["m"]).collect::<Vec<_>>();

        assert_eq!(
            chain,
            vec![ids["m"].clone(), ids["b"].clone(), ids["a"].clone(), root_id]
        );
    }

    #[test]
    fn reachable_visits_merge_parents() {
        let (graph, _, ids) = build_graph(&[
            ("a", &["root"]),
            ("b", &["a"]),
            ("c", &["a"]),
            ("m", &["b", "c"]),
        ]);

        let reached = graph.reachable(&ids["m"]).collect::<HashSet<_>>();

        assert!(reached.contains(&ids["c"]));
        assert_eq!(reached.len(), 5);
    }

    #[test]
    fn root_is_an_ancestor_of_every_reachable_commit() {
        let (graph, root_id, ids) = build_graph(&[
            ("a", &["root"]),
            ("b", &["a"]),
            ("c", &["a"]),
            ("m", &["b", "c"]),
        ]);

        for name in ["a", "b", "c", "m"] {
            assert!(graph.is_ancestor(&root_id, &ids[name]), "root should reach {name}");
        }
        assert!(!graph.is_ancestor(&ids["m"], &ids["a"]));
    }

    #[test]
    fn is_ancestor_crosses_merge_parent_edges() {
        let (graph, _, ids) = build_graph(&[
            ("a", &["root"]),
            ("b", &["a"]),
            ("c", &["a"]),
            ("m", &["b", "c"]),
            ("d", &["m"]),
        ]);

        // c is only reachable through the merge's second parent
        assert!(graph.is_ancestor(&ids["c"], &ids["d"]));
    }

    #[test]
    fn create_rejects_blank_messages() {
        let (mut graph, root_id) = CommitGraph::bootstrap();

        let result = graph.create(
            Manifest::new(),
            "   ".to_string(),
            vec![root_id],
            Commit::root().timestamp(),
        );

        let error = result.unwrap_err();
        assert_eq!(
            error.downcast_ref::<EngineError>(),
            Some(&EngineError::EmptyMessage)
        );
    }

    #[test]
    fn create_is_idempotent_for_identical_commits() {
        let (mut graph, root_id) = CommitGraph::bootstrap();
        let timestamp = Commit::root().timestamp();

        let first = graph
            .create(Manifest::new(), "same".into(), vec![root_id.clone()], timestamp)
            .unwrap();
        let second = graph
            .create(Manifest::new(), "same".into(), vec![root_id], timestamp)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(graph.all().count(), 2);
    }

    #[test]
    fn lookup_by_prefix_resolves_unique_ids() {
        let (graph, _, ids) = build_graph(&[("a", &["root"]), ("b", &["a"])]);

        let full = ids["a"].as_ref();
        let resolved = graph.lookup_by_prefix(&full[..8]).unwrap();

        assert_eq!(resolved, ids["a"]);
    }

    #[test]
    fn lookup_by_prefix_reports_misses_and_ambiguity() {
        let (graph, _, _) = build_graph(&[("a", &["root"])]);

        let miss = graph.lookup_by_prefix("ffffffffffffffff").unwrap_err();
        assert_eq!(
            miss.downcast_ref::<EngineError>(),
            Some(&EngineError::NoSuchCommit)
        );

        // the empty prefix matches every commit
        let ambiguous = graph.lookup_by_prefix("").unwrap_err();
        assert!(matches!(
            ambiguous.downcast_ref::<EngineError>(),
            Some(EngineError::AmbiguousPrefix(_))
        ));
    }
}
