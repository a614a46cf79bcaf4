use crate::areas::workspace::Workspace;
use crate::artifacts::merge::diff3::merge_text;
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MergeFileOptions {
    /// Print the result instead of overwriting the current file
    pub stdout: bool,
    /// Labels for the current, base and other file, in that order
    pub labels: Vec<String>,
}

impl MergeFileOptions {
    fn label(&self, index: usize, file: &Path) -> String {
        self.labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| file.display().to_string())
    }
}

impl Workspace {
    /// Merge the changes from `base` to `other` into `current`
    ///
    /// Returns the number of conflicts left in the result.
    pub fn merge_file(
        &self,
        current: &Path,
        base: &Path,
        other: &Path,
        options: &MergeFileOptions,
    ) -> anyhow::Result<usize> {
        let current_text = self.read_file(current)?;
        let base_text = self.read_file(base)?;
        let other_text = self.read_file(other)?;

        let result = merge_text(&base_text, &current_text, &other_text);
        let current_label = options.label(0, current);
        let other_label = options.label(2, other);
        let merged = result.render(Some(&current_label), Some(&other_label));

        debug!(
            chunks = result.chunks().len(),
            conflicts = result.conflicts(),
            "merged {} and {}",
            current.display(),
            other.display()
        );

        if options.stdout {
            write!(self.writer(), "{merged}")?;
        } else {
            self.write_file(current, &merged)?;
        }

        let conflicts = result.conflicts();
        if conflicts > 0 {
            let noun = if conflicts == 1 { "conflict" } else { "conflicts" };
            eprintln!(
                "{}",
                format!("warning: {conflicts} {noun} in {}", current.display()).yellow()
            );
        }

        Ok(conflicts)
    }
}
