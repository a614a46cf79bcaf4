//! Object model consumed by the merge engine
//!
//! - `object_id`: Validated 40-hex object identifiers
//! - `object_type`: Kinds of stored objects (blob, tree, commit)
//! - `commit`: Slim commit references (oid, parents, timestamp)
//!
//! Full object serialization lives with the object store; this crate only
//! reads history through the `CommitLoader` collaborator.

pub mod commit;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
