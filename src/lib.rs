//! Merge and diff engine of a git-like version control system
//!
//! - `artifacts::diff`: Myers' shortest edit script and unified-diff hunks
//! - `artifacts::merge`: diff3 merging, merge base search and divergence
//! - `areas::database`: the commit loading interface the search runs against
//! - `commands`: the operations behind the `bit-merge` binary

pub mod areas;
pub mod artifacts;
pub mod commands;
