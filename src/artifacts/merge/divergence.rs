use crate::areas::database::CommitLoader;
use crate::artifacts::merge::common_ancestors::CommonAncestors;
use crate::artifacts::objects::object_id::ObjectId;
use std::fmt;
use tracing::debug;

/// How far a local commit has moved away from its upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    upstream_name: String,
    pub ahead: usize,
    pub behind: usize,
    pub base: Option<ObjectId>,
}

impl Divergence {
    /// Compare `local` with `upstream`, named `upstream_name` when displayed
    pub fn compute<L>(
        loader: &L,
        local: &ObjectId,
        upstream: &ObjectId,
        upstream_name: impl Into<String>,
    ) -> anyhow::Result<Self>
    where
        L: CommitLoader + ?Sized,
    {
        let mut search = CommonAncestors::new(loader, local, std::slice::from_ref(upstream))?;
        let base = search.find()?.into_iter().next();
        let (ahead, behind) = search.counts();

        debug!(ahead, behind, "compared {} with {}", local.to_short_oid(), upstream.to_short_oid());

        Ok(Self {
            upstream_name: upstream_name.into(),
            ahead,
            behind,
            base,
        })
    }

    pub fn is_up_to_date(&self) -> bool {
        self.ahead == 0 && self.behind == 0
    }

    pub fn has_diverged(&self) -> bool {
        self.ahead > 0 && self.behind > 0
    }
}

fn commits(count: usize) -> &'static str {
    if count == 1 { "commit" } else { "commits" }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upstream = &self.upstream_name;
        match (self.ahead, self.behind) {
            (0, 0) => write!(f, "Your branch is up to date with '{upstream}'."),
            (ahead, 0) => write!(
                f,
                "Your branch is ahead of '{upstream}' by {ahead} {}.",
                commits(ahead)
            ),
            (0, behind) => write!(
                f,
                "Your branch is behind '{upstream}' by {behind} {}, and can be fast-forwarded.",
                commits(behind)
            ),
            (ahead, behind) => write!(
                f,
                "Your branch and '{upstream}' have diverged,\n\
                 and have {ahead} and {behind} different commits each, respectively."
            ),
        }
    }
}
