//! Merge algorithms
//!
//! - `diff3`: Three-way line merge with conflict markers
//! - `common_ancestors`: Best common ancestor search over the commit graph
//! - `bases`: Removal of redundant merge base candidates
//! - `divergence`: Ahead/behind counts against an upstream commit

pub mod bases;
pub mod common_ancestors;
pub mod diff3;
pub mod divergence;

#[cfg(test)]
pub(crate) mod test_support;
