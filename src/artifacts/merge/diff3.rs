//! Three-way line merge
//!
//! Both derived documents are diffed against the base. Base lines that are
//! kept by both diffs act as synchronisation points; the stretches between
//! them become chunks. A chunk is clean when at most one side departs from
//! the base (or both depart identically), and a conflict otherwise.
//!
//! ## Usage
//!
//! ```rust
//! use bit_merge::artifacts::merge::diff3::merge;
//!
//! let result = merge(&["a", "b", "c"], &["d", "b", "c"], &["a", "b", "e"]);
//! assert!(result.is_clean());
//! assert_eq!(result.to_string(), "dbe");
//! ```

use crate::artifacts::diff::lines::split_lines;
use crate::artifacts::diff::myers::{Edit, diff};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

const MARKER_WIDTH: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Clean {
        lines: Vec<String>,
    },
    Conflict {
        o_lines: Vec<String>,
        a_lines: Vec<String>,
        b_lines: Vec<String>,
    },
}

impl Chunk {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Chunk::Conflict { .. })
    }

    fn render_into(&self, text: &mut String, a_label: Option<&str>, b_label: Option<&str>) {
        match self {
            Chunk::Clean { lines } => lines.iter().for_each(|line| text.push_str(line)),
            Chunk::Conflict {
                a_lines, b_lines, ..
            } => {
                separator(text, '<', a_label);
                a_lines.iter().for_each(|line| text.push_str(line));
                separator(text, '=', None);
                b_lines.iter().for_each(|line| text.push_str(line));
                separator(text, '>', b_label);
            }
        }
    }
}

fn separator(text: &mut String, marker: char, label: Option<&str>) {
    text.extend(std::iter::repeat_n(marker, MARKER_WIDTH));
    if let Some(label) = label {
        text.push(' ');
        text.push_str(label);
    }
    text.push('\n');
}

/// Outcome of a three-way merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    chunks: Vec<Chunk>,
}

impl MergeResult {
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn is_clean(&self) -> bool {
        !self.chunks.iter().any(Chunk::is_conflict)
    }

    pub fn conflicts(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.is_conflict()).count()
    }

    /// Render the merged text, labelling conflict markers when labels are given
    pub fn render(&self, a_label: Option<&str>, b_label: Option<&str>) -> String {
        let mut text = String::new();
        for chunk in &self.chunks {
            chunk.render_into(&mut text, a_label, b_label);
        }
        text
    }
}

impl fmt::Display for MergeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None, None))
    }
}

/// Three-way merge state: the documents, their alignments against the base,
/// and the last line emitted from each document
#[derive(Debug)]
pub struct Diff3<'d> {
    o: &'d [&'d str],
    a: &'d [&'d str],
    b: &'d [&'d str],
    match_a: HashMap<usize, usize>,
    match_b: HashMap<usize, usize>,
    line_o: usize,
    line_a: usize,
    line_b: usize,
    chunks: Vec<Chunk>,
}

impl<'d> Diff3<'d> {
    pub fn new(o: &'d [&'d str], a: &'d [&'d str], b: &'d [&'d str]) -> Self {
        Self {
            o,
            a,
            b,
            match_a: Self::match_set(o, a),
            match_b: Self::match_set(o, b),
            line_o: 0,
            line_a: 0,
            line_b: 0,
            chunks: Vec::new(),
        }
    }

    pub fn merge(mut self) -> MergeResult {
        self.generate_chunks();

        debug!(
            chunks = self.chunks.len(),
            conflicts = self.chunks.iter().filter(|c| c.is_conflict()).count(),
            "three-way merge complete"
        );

        MergeResult {
            chunks: self.chunks,
        }
    }

    /// Base line number -> derived line number, for lines both documents keep
    fn match_set(o: &[&str], file: &[&str]) -> HashMap<usize, usize> {
        diff(o, file)
            .into_iter()
            .filter_map(|edit| match edit {
                Edit::Equal { a_line, b_line } => Some((a_line.number, b_line.number)),
                _ => None,
            })
            .collect()
    }

    fn generate_chunks(&mut self) {
        // every pass but the last moves at least one cursor forward
        let bound = self.o.len() + self.a.len() + self.b.len() + 1;

        for _ in 0..bound {
            match self.find_next_mismatch() {
                Some(1) => match self.find_next_match() {
                    Some((o, a, b)) => self.emit_chunk(o, a, b),
                    None => {
                        self.emit_final_chunk();
                        return;
                    }
                },
                Some(i) => self.emit_chunk(self.line_o + i, self.line_a + i, self.line_b + i),
                None => {
                    self.emit_final_chunk();
                    return;
                }
            }
        }

        unreachable!("diff3 failed to consume its input within {bound} chunks")
    }

    fn find_next_mismatch(&self) -> Option<usize> {
        let mut i = 1;
        while self.in_bounds(i)
            && Self::is_match(&self.match_a, self.line_o, self.line_a, i)
            && Self::is_match(&self.match_b, self.line_o, self.line_b, i)
        {
            i += 1;
        }

        self.in_bounds(i).then_some(i)
    }

    fn in_bounds(&self, i: usize) -> bool {
        self.line_o + i <= self.o.len()
            || self.line_a + i <= self.a.len()
            || self.line_b + i <= self.b.len()
    }

    fn is_match(matches: &HashMap<usize, usize>, line_o: usize, offset: usize, i: usize) -> bool {
        matches.get(&(line_o + i)) == Some(&(offset + i))
    }

    fn find_next_match(&self) -> Option<(usize, usize, usize)> {
        ((self.line_o + 1)..=self.o.len()).find_map(|o| {
            match (self.match_a.get(&o), self.match_b.get(&o)) {
                (Some(&a), Some(&b)) => Some((o, a, b)),
                _ => None,
            }
        })
    }

    fn emit_chunk(&mut self, o: usize, a: usize, b: usize) {
        trace!(o, a, b, "emitting chunk up to synchronisation point");

        let (doc_o, doc_a, doc_b) = (self.o, self.a, self.b);
        self.write_chunk(
            &doc_o[self.line_o..o - 1],
            &doc_a[self.line_a..a - 1],
            &doc_b[self.line_b..b - 1],
        );
        (self.line_o, self.line_a, self.line_b) = (o - 1, a - 1, b - 1);
    }

    fn emit_final_chunk(&mut self) {
        trace!("emitting final chunk");

        let (doc_o, doc_a, doc_b) = (self.o, self.a, self.b);
        self.write_chunk(
            &doc_o[self.line_o..],
            &doc_a[self.line_a..],
            &doc_b[self.line_b..],
        );
    }

    fn write_chunk(&mut self, o: &[&str], a: &[&str], b: &[&str]) {
        if o.is_empty() && a.is_empty() && b.is_empty() {
            return;
        }

        let owned = |lines: &[&str]| -> Vec<String> {
            lines.iter().map(|line| line.to_string()).collect()
        };

        let chunk = if a == o || a == b {
            Chunk::Clean { lines: owned(b) }
        } else if b == o {
            Chunk::Clean { lines: owned(a) }
        } else {
            Chunk::Conflict {
                o_lines: owned(o),
                a_lines: owned(a),
                b_lines: owned(b),
            }
        };
        self.chunks.push(chunk);
    }
}

/// Merge line sequences `a` and `b`, both derived from `o`
pub fn merge<S: AsRef<str>>(o: &[S], a: &[S], b: &[S]) -> MergeResult {
    let o = o.iter().map(AsRef::as_ref).collect::<Vec<_>>();
    let a = a.iter().map(AsRef::as_ref).collect::<Vec<_>>();
    let b = b.iter().map(AsRef::as_ref).collect::<Vec<_>>();

    Diff3::new(&o, &a, &b).merge()
}

/// Merge raw texts line by line, keeping line terminators
pub fn merge_text(o: &str, a: &str, b: &str) -> MergeResult {
    merge(&split_lines(o), &split_lines(a), &split_lines(b))
}
