//! Line diffing
//!
//! - `lines`: Numbered lines and the line splitter
//! - `myers`: Myers' shortest edit script over any comparable sequence
//! - `hunk`: Grouping of edit scripts into unified-diff hunks
//!
//! Diff3 merging builds on `myers` (see `artifacts::merge::diff3`).

pub mod hunk;
pub mod lines;
pub mod myers;
