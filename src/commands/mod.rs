//! Operations behind the `bit-merge` binary
//!
//! - `diff`: Unified diff of two files
//! - `merge_file`: Three-way merge of a file with conflict markers
//!
//! Both are implemented on `Workspace`, which resolves paths and owns the
//! output stream.

pub mod diff;
pub mod merge_file;
