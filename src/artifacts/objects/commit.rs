//! Commit references consumed by the ancestor search
//!
//! The object store owns full commit objects (tree, author, message). The
//! merge engine only needs the shape of history, so loaders hand it a
//! [`SlimCommit`]: the identifier, the ordered parent list and the commit
//! timestamp used to order the traversal.

use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset};
use derive_new::new;

/// Slim representation of a commit
///
/// Contains only essential information for lightweight operations like merge base finding.
/// Owns its data so loaders can hand out copies from a cache.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs (empty for root commits)
    pub parents: Vec<ObjectId>,
    /// Commit timestamp (needed for comparison)
    pub timestamp: DateTime<FixedOffset>,
}

impl SlimCommit {
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

impl PartialOrd for SlimCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlimCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.oid.cmp(&other.oid))
    }
}
