use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Files the commands read and write, plus the stream they report to
///
/// Relative paths resolve against the workspace root; absolute paths are used
/// as given.
pub struct Workspace {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
}

impl Workspace {
    pub fn new(path: impl Into<PathBuf>, writer: Box<dyn Write>) -> Self {
        Workspace {
            path: path.into().into_boxed_path(),
            writer: RefCell::new(writer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<String> {
        let full_path = self.path.join(file_path);

        std::fs::read_to_string(&full_path)
            .with_context(|| format!("could not read {}", file_path.display()))
    }

    pub fn write_file(&self, file_path: &Path, content: &str) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        std::fs::write(&full_path, content)
            .with_context(|| format!("could not write {}", file_path.display()))
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace").field("path", &self.path).finish()
    }
}
