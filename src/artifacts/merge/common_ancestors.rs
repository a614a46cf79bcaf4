//! Common ancestor search over the commit graph
//!
//! Given a primary commit and one or more other commits, the search walks
//! history from all of them at once and reports the best common ancestors:
//! commits reachable from the primary and from at least one of the others that
//! are not themselves ancestors of another such commit.
//!
//! ## Algorithm Overview
//!
//! Every commit seen so far carries a set of [`Flags`]:
//!
//! - `PARENT1`: reachable from the primary commit
//! - `PARENT2`: reachable from one of the other commits
//! - `STALE`: lies below a common ancestor that was already found
//! - `RESULT`: was reported as a common ancestor
//!
//! Commits wait in a queue ordered by commit timestamp, newest first (ties keep
//! insertion order). The search pops the newest commit and paints its flags
//! onto its parents. A commit that is painted from both sides becomes a result
//! and paints its parents `STALE` as well. The walk stops once every commit
//! still queued is stale, since nothing below them can produce a better
//! ancestor. Results that were later painted stale are dropped.
//!
//! Clock skew can leave a result that is an ancestor of another result
//! unpainted; [`MergeBases`](crate::artifacts::merge::bases::MergeBases) removes
//! those with one extra search per candidate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut search = CommonAncestors::new(&database, &head, &[upstream])?;
//! let ancestors = search.find()?;
//! let (ahead, behind) = search.counts();
//! ```
//!
//! ## Debug Logging
//!
//! Queue processing is logged at `trace` level and results at `debug` level
//! through `tracing`. The `bit-merge` binary reads the filter from
//! `BIT_MERGE_LOG`, e.g. `BIT_MERGE_LOG=bit_merge=trace`.

use crate::areas::database::CommitLoader;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use tracing::{debug, trace};

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        const PARENT1 = 0b0001;
        const PARENT2 = 0b0010;
        const BOTH_PARENTS = Self::PARENT1.bits() | Self::PARENT2.bits();
        const STALE = 0b0100;
        const RESULT = 0b1000;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(Flags::PARENT1) {
            flags.push("PARENT1");
        }
        if self.contains(Flags::PARENT2) {
            flags.push("PARENT2");
        }
        if self.contains(Flags::STALE) {
            flags.push("STALE");
        }
        if self.contains(Flags::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// State of one common ancestor query
///
/// The flag map and the queue belong to this instance alone. After a loader
/// error the state is incomplete and the instance should be dropped.
#[derive(Debug)]
pub struct CommonAncestors<'l, L: ?Sized> {
    loader: &'l L,
    flags: HashMap<ObjectId, Flags>,
    queue: VecDeque<SlimCommit>,
    results: VecDeque<SlimCommit>,
}

impl<'l, L> CommonAncestors<'l, L>
where
    L: CommitLoader + ?Sized,
{
    /// Seed a query with the primary commit and the commits it is compared to
    ///
    /// Every seed is loaded up front, so an unknown identifier fails here
    /// rather than halfway through [`find`](Self::find).
    pub fn new(loader: &'l L, primary: &ObjectId, others: &[ObjectId]) -> anyhow::Result<Self> {
        let mut search = Self {
            loader,
            flags: HashMap::new(),
            queue: VecDeque::new(),
            results: VecDeque::new(),
        };

        let commit = loader.load_commit(primary)?;
        insert_by_date(&mut search.queue, commit);
        search.mark(primary, Flags::PARENT1);

        for other in others {
            let commit = loader.load_commit(other)?;
            insert_by_date(&mut search.queue, commit);
            search.mark(other, Flags::PARENT2);
        }

        Ok(search)
    }

    /// Run the search to completion and return the best common ancestors,
    /// newest first
    pub fn find(&mut self) -> anyhow::Result<Vec<ObjectId>> {
        while !self.all_stale() {
            self.process_queue()?;
        }

        let ancestors = self
            .results
            .iter()
            .map(|commit| commit.oid.clone())
            .filter(|oid| !self.is_marked(oid, Flags::STALE))
            .collect::<Vec<_>>();

        debug!(
            "common ancestors: [{}]",
            ancestors
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ancestors)
    }

    /// Whether `oid` carries every flag in `flag`
    pub fn is_marked(&self, oid: &ObjectId, flag: Flags) -> bool {
        self.flags_of(oid).contains(flag)
    }

    /// Commits reachable only from the primary side and only from the other
    /// side, as `(ahead, behind)`
    ///
    /// Stale commits and commits reached from both sides count toward neither.
    /// Meaningful once [`find`](Self::find) has run.
    pub fn counts(&self) -> (usize, usize) {
        self.flags
            .values()
            .filter(|flags| !flags.intersects(Flags::STALE))
            .fold((0, 0), |(ahead, behind), flags| {
                let side = *flags & Flags::BOTH_PARENTS;
                if side == Flags::PARENT1 {
                    (ahead + 1, behind)
                } else if side == Flags::PARENT2 {
                    (ahead, behind + 1)
                } else {
                    (ahead, behind)
                }
            })
    }

    fn flags_of(&self, oid: &ObjectId) -> Flags {
        self.flags.get(oid).copied().unwrap_or_default()
    }

    fn mark(&mut self, oid: &ObjectId, flags: Flags) {
        *self.flags.entry(oid.clone()).or_default() |= flags;
    }

    fn all_stale(&self) -> bool {
        self.queue
            .iter()
            .all(|commit| self.is_marked(&commit.oid, Flags::STALE))
    }

    fn process_queue(&mut self) -> anyhow::Result<()> {
        let Some(commit) = self.queue.pop_front() else {
            return Ok(());
        };
        let flags = self.flags_of(&commit.oid);

        trace!("processing commit {}: flags={}", commit.oid.to_short_oid(), flags);

        if flags.contains(Flags::BOTH_PARENTS) && !flags.intersects(Flags::STALE | Flags::RESULT) {
            debug!("found common ancestor {}", commit.oid.to_short_oid());

            self.mark(&commit.oid, Flags::RESULT);
            insert_by_date(&mut self.results, commit.clone());
            self.add_parents(&commit, flags | Flags::STALE)
        } else {
            self.add_parents(&commit, flags - Flags::RESULT)
        }
    }

    fn add_parents(&mut self, commit: &SlimCommit, flags: Flags) -> anyhow::Result<()> {
        for parent_id in &commit.parents {
            if self.is_marked(parent_id, flags) {
                continue;
            }

            let parent = self.loader.load_commit(parent_id)?;
            self.mark(parent_id, flags);

            trace!(
                "  parent {} now {}",
                parent_id.to_short_oid(),
                self.flags_of(parent_id)
            );

            insert_by_date(&mut self.queue, parent);
        }

        Ok(())
    }
}

/// Insert before the first commit that is strictly older, so equal
/// timestamps keep their insertion order
fn insert_by_date(list: &mut VecDeque<SlimCommit>, commit: SlimCommit) {
    let index = list
        .iter()
        .position(|queued| queued.timestamp < commit.timestamp)
        .unwrap_or(list.len());
    list.insert(index, commit);
}
