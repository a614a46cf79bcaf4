//! Commit loading collaborators
//!
//! The ancestor search never touches storage directly. It asks a
//! [`CommitLoader`] for one commit at a time and gets back a [`SlimCommit`]
//! or a [`DatabaseError`]. Three loaders ship with the crate:
//!
//! - any closure `Fn(&ObjectId) -> Result<SlimCommit, DatabaseError>`
//! - [`CommitCache`], which memoises another loader for the length of a query
//! - [`InMemoryDatabase`], a commit graph held in a `HashMap`

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::cell::RefCell;
use std::collections::HashMap;

/// Failures reported by the object store when loading a commit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    /// No object is stored under the identifier.
    #[error("object {0} not found")]
    NotFound(ObjectId),

    /// The identifier resolves to an object of another kind.
    #[error("object {oid} is a {actual}, not a {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },
}

/// Loads commits by identifier
///
/// Implementations must be deterministic for the duration of a query: the
/// same identifier always yields the same parents and timestamp.
pub trait CommitLoader {
    fn load_commit(&self, oid: &ObjectId) -> Result<SlimCommit, DatabaseError>;
}

impl<F> CommitLoader for F
where
    F: Fn(&ObjectId) -> Result<SlimCommit, DatabaseError>,
{
    fn load_commit(&self, oid: &ObjectId) -> Result<SlimCommit, DatabaseError> {
        self(oid)
    }
}

/// Memoising wrapper around another loader
///
/// Redundancy elimination runs one sub-search per candidate over largely the
/// same part of history; the cache keeps each commit to a single load.
/// Interior mutability keeps `load_commit` on `&self`, so the cache is meant
/// for a single thread.
#[derive(Debug)]
pub struct CommitCache<'l, L: ?Sized> {
    loader: &'l L,
    commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl<'l, L> CommitCache<'l, L>
where
    L: CommitLoader + ?Sized,
{
    pub fn new(loader: &'l L) -> Self {
        Self {
            loader,
            commits: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct commits loaded so far
    pub fn len(&self) -> usize {
        self.commits.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.borrow().is_empty()
    }
}

impl<L> CommitLoader for CommitCache<'_, L>
where
    L: CommitLoader + ?Sized,
{
    fn load_commit(&self, oid: &ObjectId) -> Result<SlimCommit, DatabaseError> {
        if let Some(commit) = self.commits.borrow().get(oid) {
            return Ok(commit.clone());
        }

        // failures are not cached, the caller abandons the query anyway
        let commit = self.loader.load_commit(oid)?;
        self.commits
            .borrow_mut()
            .insert(oid.clone(), commit.clone());

        Ok(commit)
    }
}

#[derive(Debug, Clone)]
enum StoredObject {
    Commit(SlimCommit),
    Other(ObjectType),
}

/// Commit graph held entirely in memory
///
/// Non-commit objects can be registered by kind only, which lets callers
/// reproduce the type-mismatch failures of a real object store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    objects: HashMap<ObjectId, StoredObject>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_commit(&mut self, commit: SlimCommit) {
        self.objects
            .insert(commit.oid.clone(), StoredObject::Commit(commit));
    }

    /// Register a non-commit object under `oid`
    pub fn insert_object(&mut self, oid: ObjectId, object_type: ObjectType) -> anyhow::Result<()> {
        if object_type == ObjectType::Commit {
            anyhow::bail!("commits must be inserted with their parents and timestamp");
        }

        self.objects.insert(oid, StoredObject::Other(object_type));
        Ok(())
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.objects.contains_key(oid)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All stored commits, oldest first
    pub fn commits(&self) -> Vec<&SlimCommit> {
        let mut commits = self
            .objects
            .values()
            .filter_map(|object| match object {
                StoredObject::Commit(commit) => Some(commit),
                StoredObject::Other(_) => None,
            })
            .collect::<Vec<_>>();
        commits.sort();
        commits
    }
}

impl CommitLoader for InMemoryDatabase {
    fn load_commit(&self, oid: &ObjectId) -> Result<SlimCommit, DatabaseError> {
        match self.objects.get(oid) {
            Some(StoredObject::Commit(commit)) => Ok(commit.clone()),
            Some(StoredObject::Other(actual)) => Err(DatabaseError::TypeMismatch {
                oid: oid.clone(),
                expected: ObjectType::Commit,
                actual: *actual,
            }),
            None => Err(DatabaseError::NotFound(oid.clone())),
        }
    }
}
