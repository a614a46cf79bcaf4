//! Data structures and algorithms
//!
//! - `diff`: Line splitting, Myers' diff and unified-diff hunks
//! - `merge`: Three-way merging and merge base resolution
//! - `objects`: Object identifiers and the slim commit view of history

pub mod diff;
pub mod merge;
pub mod objects;
