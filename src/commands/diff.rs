use crate::areas::workspace::Workspace;
use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::diff::myers::{DiffAlgorithm, Edit, MyersDiff};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Workspace {
    /// Print a unified diff of two files; identical files print nothing
    pub fn diff(&self, old: &Path, new: &Path) -> anyhow::Result<()> {
        let a = self.read_lines(old)?;
        let b = self.read_lines(new)?;

        let edits = MyersDiff::new(&a, &b).diff();
        let hunks = Hunk::filter(&edits);
        if hunks.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer(),
            "{}",
            format!("--- {}", Path::new("a").join(old).display()).bold()
        )?;
        writeln!(
            self.writer(),
            "{}",
            format!("+++ {}", Path::new("b").join(new).display()).bold()
        )?;

        for hunk in hunks {
            self.print_diff_hunk(&hunk)?;
        }

        Ok(())
    }

    fn read_lines(&self, file: &Path) -> anyhow::Result<Vec<String>> {
        Ok(self
            .read_file(file)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn print_diff_hunk(&self, hunk: &Hunk<String>) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", hunk.header().cyan())?;

        for edit in hunk.edits() {
            let line = edit.to_string();
            match edit {
                Edit::Equal { .. } => writeln!(self.writer(), "{line}")?,
                Edit::Delete { .. } => writeln!(self.writer(), "{}", line.red())?,
                Edit::Insert { .. } => writeln!(self.writer(), "{}", line.green())?,
            }
        }

        Ok(())
    }
}
