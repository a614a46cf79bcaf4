//! Merge base selection
//!
//! [`CommonAncestors`] may report a candidate that is an ancestor of another
//! candidate when commit timestamps are out of order. [`MergeBases`] runs one
//! more search per candidate, comparing it against the remaining candidates,
//! and drops every candidate that turns out to be reachable from another.

use crate::areas::database::CommitLoader;
use crate::artifacts::merge::common_ancestors::{CommonAncestors, Flags};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;
use tracing::debug;

/// Best common ancestors of a primary commit and the commits it is merged with
#[derive(Debug)]
pub struct MergeBases<'l, L: ?Sized> {
    loader: &'l L,
    primary: ObjectId,
    others: Vec<ObjectId>,
    redundant: HashSet<ObjectId>,
}

impl<'l, L> MergeBases<'l, L>
where
    L: CommitLoader + ?Sized,
{
    pub fn new(loader: &'l L, primary: &ObjectId, others: &[ObjectId]) -> Self {
        Self {
            loader,
            primary: primary.clone(),
            others: others.to_vec(),
            redundant: HashSet::new(),
        }
    }

    /// The minimal set of merge bases, newest first
    pub fn find(mut self) -> anyhow::Result<Vec<ObjectId>> {
        let candidates = CommonAncestors::new(self.loader, &self.primary, &self.others)?.find()?;
        if candidates.len() <= 1 {
            return Ok(candidates);
        }

        for candidate in &candidates {
            if self.redundant.contains(candidate) {
                continue;
            }
            self.filter_candidate(candidate, &candidates)?;
        }

        Ok(candidates
            .into_iter()
            .filter(|candidate| !self.redundant.contains(candidate))
            .collect())
    }

    fn filter_candidate(
        &mut self,
        candidate: &ObjectId,
        candidates: &[ObjectId],
    ) -> anyhow::Result<()> {
        let others = candidates
            .iter()
            .filter(|other| *other != candidate && !self.redundant.contains(*other))
            .cloned()
            .collect::<Vec<_>>();

        let mut search = CommonAncestors::new(self.loader, candidate, &others)?;
        search.find()?;

        if search.is_marked(candidate, Flags::PARENT2) {
            debug!(
                "{} is reachable from another candidate",
                candidate.to_short_oid()
            );
            self.redundant.insert(candidate.clone());
        }

        for other in others {
            if search.is_marked(&other, Flags::PARENT1) {
                debug!(
                    "{} is reachable from {}",
                    other.to_short_oid(),
                    candidate.to_short_oid()
                );
                self.redundant.insert(other);
            }
        }

        Ok(())
    }
}

/// Merge bases of `primary` and `others` with redundant candidates removed
pub fn select_merge_base<L>(
    loader: &L,
    primary: &ObjectId,
    others: &[ObjectId],
) -> anyhow::Result<Vec<ObjectId>>
where
    L: CommitLoader + ?Sized,
{
    MergeBases::new(loader, primary, others).find()
}
