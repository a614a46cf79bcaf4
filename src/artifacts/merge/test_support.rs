//! Commit graph helpers shared by the merge test suites
//!
//! ## Debugging Helpers
//!
//! ```rust,ignore
//! let graph = linear_history();
//! graph.debug_print_graph();   // print every commit with its parents
//! format_oid(&commit_id);      // "commit_a" instead of hex
//! ```
//!
//! Tracing output from the algorithms themselves is visible with
//! `cargo test -- --nocapture` once a subscriber is installed in the test.

use crate::areas::database::{CommitLoader, DatabaseError, InMemoryDatabase};
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset, TimeZone};
use proptest::prelude::*;
use rstest::fixture;
use std::collections::{HashSet, VecDeque};

/// In-memory commit graph with deterministic timestamps
#[derive(Debug, Clone, Default)]
pub(crate) struct CommitGraph {
    database: InMemoryDatabase,
    added: i64,
}

impl CommitGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a commit one hour after the previously added one
    pub(crate) fn add_commit(&mut self, commit_id: ObjectId, parents: Vec<ObjectId>) {
        let timestamp = timestamp_at(self.added * 3600);
        self.add_commit_with_timestamp(commit_id, parents, timestamp);
    }

    pub(crate) fn add_commit_with_timestamp(
        &mut self,
        commit_id: ObjectId,
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
    ) {
        self.added += 1;
        self.database
            .insert_commit(SlimCommit::new(commit_id, parents, timestamp));
    }

    pub(crate) fn database(&self) -> &InMemoryDatabase {
        &self.database
    }

    pub(crate) fn parents(&self, commit_id: &ObjectId) -> Vec<ObjectId> {
        self.database
            .load_commit(commit_id)
            .map(|commit| commit.parents)
            .unwrap_or_default()
    }

    /// Print the entire commit graph for debugging
    #[allow(dead_code)]
    pub(crate) fn debug_print_graph(&self) {
        eprintln!("\n=== Commit Graph ===");
        for commit in self.database.commits() {
            let parents = commit.parents.iter().map(format_oid).collect::<Vec<_>>();
            if parents.is_empty() {
                eprintln!("{} (root)", format_oid(&commit.oid));
            } else {
                eprintln!("{} <- [{}]", format_oid(&commit.oid), parents.join(", "));
            }
        }
        eprintln!("===================\n");
    }
}

impl CommitLoader for CommitGraph {
    fn load_commit(&self, oid: &ObjectId) -> Result<SlimCommit, DatabaseError> {
        self.database.load_commit(oid)
    }
}

/// 2022-01-01T00:00:00Z plus `seconds`
pub(crate) fn timestamp_at(seconds: i64) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .timestamp_opt(1640995200 + seconds, 0)
        .unwrap()
}

/// Deterministic 40-character hex ObjectId encoding a readable name
pub(crate) fn create_oid(id: &str) -> ObjectId {
    let mut hex_string = id
        .as_bytes()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<String>();

    while hex_string.len() < 40 {
        hex_string.push('0');
    }
    hex_string.truncate(40);

    ObjectId::try_parse(hex_string).expect("Invalid test ObjectId")
}

/// Recover the readable name encoded by [`create_oid`]
pub(crate) fn format_oid(oid: &ObjectId) -> String {
    let hex = oid.to_string();
    let mut name = String::new();
    for i in (0..hex.len()).step_by(2) {
        if let Ok(byte) = u8::from_str_radix(&hex[i..i + 2], 16) {
            if byte == 0 {
                break;
            }
            if byte.is_ascii_graphic() {
                name.push(byte as char);
            }
        }
    }
    if name.is_empty() {
        oid.to_short_oid()
    } else {
        name
    }
}

/// `commit_a`, `commit_b`, ... for each letter
pub(crate) fn oids<const N: usize>(letters: [char; N]) -> [ObjectId; N] {
    letters.map(|letter| create_oid(&format!("commit_{letter}")))
}

/// Every commit reachable from `commit`, itself included (reference BFS)
pub(crate) fn ancestors_of(graph: &CommitGraph, commit: &ObjectId) -> HashSet<ObjectId> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([commit.clone()]);

    while let Some(current) = queue.pop_front() {
        if visited.insert(current.clone()) {
            queue.extend(graph.parents(&current));
        }
    }

    visited
}

/// Random DAG: commit `n` picks up to two parents among commits `0..n`
///
/// Commits are added in order, so every parent is older than its children.
/// Yields the graph and its size; commit `n` is `create_oid("node_{n}")`.
pub(crate) fn arbitrary_graph() -> impl Strategy<Value = (CommitGraph, usize)> {
    (2usize..12)
        .prop_flat_map(|size| {
            proptest::collection::vec(
                (any::<prop::sample::Index>(), any::<prop::sample::Index>(), 0u8..3),
                size,
            )
        })
        .prop_map(|picks| {
            let mut graph = CommitGraph::new();
            let ids = (0..picks.len())
                .map(|n| create_oid(&format!("node_{n}")))
                .collect::<Vec<_>>();

            for (n, (first, second, count)) in picks.iter().enumerate() {
                let mut parents = Vec::new();
                if n > 0 && *count > 0 {
                    parents.push(ids[first.index(n)].clone());
                    let extra = ids[second.index(n)].clone();
                    if *count > 1 && !parents.contains(&extra) {
                        parents.push(extra);
                    }
                }
                graph.add_commit(ids[n].clone(), parents);
            }

            let size = ids.len();
            (graph, size)
        })
}

/// Best common ancestors computed by brute force: common ancestors that are
/// not a strict ancestor of another common ancestor
pub(crate) fn reference_merge_bases(
    graph: &CommitGraph,
    one: &ObjectId,
    two: &ObjectId,
) -> HashSet<ObjectId> {
    let common = ancestors_of(graph, one)
        .intersection(&ancestors_of(graph, two))
        .cloned()
        .collect::<HashSet<_>>();

    common
        .iter()
        .filter(|candidate| {
            !common
                .iter()
                .any(|other| other != *candidate && ancestors_of(graph, other).contains(*candidate))
        })
        .cloned()
        .collect()
}

/// A <- B <- C <- D
#[fixture]
pub(crate) fn linear_history() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, b, c, d] = oids(['a', 'b', 'c', 'd']);

    graph.add_commit(a.clone(), vec![]);
    graph.add_commit(b.clone(), vec![a]);
    graph.add_commit(c.clone(), vec![b]);
    graph.add_commit(d, vec![c]);

    graph
}

//     A
//    / \
//   B   C
//    \ /
//     D (merge commit)
#[fixture]
pub(crate) fn simple_merge() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, b, c, d] = oids(['a', 'b', 'c', 'd']);

    graph.add_commit(a.clone(), vec![]);
    graph.add_commit(b.clone(), vec![a.clone()]);
    graph.add_commit(c.clone(), vec![a]);
    graph.add_commit(d, vec![b, c]);

    graph
}

//       A
//      /|\
//     B C D
//     | | |\
//     E F G H
//      \|/ /
//       I /
//        /
//       J (merge commit)
#[fixture]
pub(crate) fn complex_branching() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, b, c, d, e, f, g, h, i, j] =
        oids(['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j']);

    graph.add_commit(a.clone(), vec![]);
    graph.add_commit(b.clone(), vec![a.clone()]);
    graph.add_commit(c.clone(), vec![a.clone()]);
    graph.add_commit(d.clone(), vec![a]);
    graph.add_commit(e.clone(), vec![b]);
    graph.add_commit(f.clone(), vec![c]);
    graph.add_commit(g.clone(), vec![d.clone()]);
    graph.add_commit(h.clone(), vec![d]);
    graph.add_commit(i.clone(), vec![e, f, g]);
    graph.add_commit(j, vec![i, h]);

    graph
}

//     A
//    /|\
//   B C D
//   |X| |
//   E F G
//    \|/
//     H (triple merge)
#[fixture]
pub(crate) fn diamond_pattern() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, b, c, d, e, f, g, h] = oids(['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h']);

    graph.add_commit(a.clone(), vec![]);
    graph.add_commit(b.clone(), vec![a.clone()]);
    graph.add_commit(c.clone(), vec![a.clone()]);
    graph.add_commit(d.clone(), vec![a]);
    graph.add_commit(e.clone(), vec![b, c.clone()]);
    graph.add_commit(f.clone(), vec![c, d.clone()]);
    graph.add_commit(g.clone(), vec![d]);
    graph.add_commit(h, vec![e, f, g]);

    graph
}

//     A
//    / \
//   B   C
//   |\ /|
//   | X |
//   |/ \|
//   D   E
//   |   |
//   F   G
//    \ /
//     H
#[fixture]
pub(crate) fn criss_cross_merge() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, b, c, d, e, f, g, h] = oids(['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h']);

    graph.add_commit(a.clone(), vec![]);
    graph.add_commit(b.clone(), vec![a.clone()]);
    graph.add_commit(c.clone(), vec![a]);
    graph.add_commit(d.clone(), vec![b.clone(), c.clone()]);
    graph.add_commit(e.clone(), vec![c, b]);
    graph.add_commit(f.clone(), vec![d]);
    graph.add_commit(g.clone(), vec![e]);
    graph.add_commit(h, vec![f, g]);

    graph
}

//     A
//    / \
//   B   C
//   |   |
//   D   E
//   |   |
//   F   G
//   |   |
//   H   I
//    \ /
//     J (late merge)
#[fixture]
pub(crate) fn long_parallel_branches() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, b, c, d, e, f, g, h, i, j] =
        oids(['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j']);

    graph.add_commit(a.clone(), vec![]);
    graph.add_commit(b.clone(), vec![a.clone()]);
    graph.add_commit(c.clone(), vec![a]);
    graph.add_commit(d.clone(), vec![b]);
    graph.add_commit(e.clone(), vec![c]);
    graph.add_commit(f.clone(), vec![d]);
    graph.add_commit(g.clone(), vec![e]);
    graph.add_commit(h.clone(), vec![f]);
    graph.add_commit(i.clone(), vec![g]);
    graph.add_commit(j, vec![h, i]);

    graph
}

/// History whose clock skew leaves a redundant candidate behind after the
/// first search: X is an ancestor of Y, reached only through the old W.
///
/// ```text
///   A(0) <- X(10) <- W(1) <- Y(5)
///            ^                ^
///            Z(15) <--------- P(20)      Q(21) -> Y, X
/// ```
#[fixture]
pub(crate) fn skewed_descendant_history() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, w, x, y, z, p, q] = oids(['a', 'w', 'x', 'y', 'z', 'p', 'q']);
    let hour = |n: i64| timestamp_at(n * 3600);

    graph.add_commit_with_timestamp(a.clone(), vec![], hour(0));
    graph.add_commit_with_timestamp(x.clone(), vec![a], hour(10));
    graph.add_commit_with_timestamp(w.clone(), vec![x.clone()], hour(1));
    graph.add_commit_with_timestamp(y.clone(), vec![w], hour(5));
    graph.add_commit_with_timestamp(z.clone(), vec![x.clone()], hour(15));
    graph.add_commit_with_timestamp(p, vec![y.clone(), z], hour(20));
    graph.add_commit_with_timestamp(q, vec![y, x], hour(21));

    graph
}

/// Mirror image of [`skewed_descendant_history`]: the newer candidate X
/// descends from Y through the old W.
///
/// ```text
///   A(0) <- Y(5) <- W(1) <- X(10)
///            ^                ^
///            Z(15)            P(20) -> X, Z      Q(21) -> X, Y
/// ```
#[fixture]
pub(crate) fn skewed_ancestor_history() -> CommitGraph {
    let mut graph = CommitGraph::new();
    let [a, w, x, y, z, p, q] = oids(['a', 'w', 'x', 'y', 'z', 'p', 'q']);
    let hour = |n: i64| timestamp_at(n * 3600);

    graph.add_commit_with_timestamp(a.clone(), vec![], hour(0));
    graph.add_commit_with_timestamp(y.clone(), vec![a], hour(5));
    graph.add_commit_with_timestamp(w.clone(), vec![y.clone()], hour(1));
    graph.add_commit_with_timestamp(x.clone(), vec![w], hour(10));
    graph.add_commit_with_timestamp(z.clone(), vec![y.clone()], hour(15));
    graph.add_commit_with_timestamp(p, vec![x.clone(), z], hour(20));
    graph.add_commit_with_timestamp(q, vec![x, y], hour(21));

    graph
}
