//! Collaborators around the merge engine
//!
//! - `database`: Commit loading from an object store
//! - `workspace`: Files read and written by the commands, and their output stream

pub mod database;
pub mod workspace;
