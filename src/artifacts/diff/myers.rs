//! Myers' shortest edit script
//!
//! Implements the greedy O((N+M)·D) algorithm from "An O(ND) Difference
//! Algorithm and Its Variations". The forward pass records a snapshot of the
//! furthest-reaching x per diagonal for every edit distance `d`; the backward
//! pass walks those snapshots from `(N, M)` to `(0, 0)` to recover the path.
//!
//! Tie-breaking follows the reference formulation: on an inner diagonal the
//! path moves down (insertion) only when the diagonal above reaches strictly
//! further, so deletions are preferred and appear before insertions in a
//! changed region.

use crate::artifacts::diff::lines::Line;
use derive_new::new;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Equal { a_line: Line<T>, b_line: Line<T> },
    Delete { a_line: Line<T> },
    Insert { b_line: Line<T> },
}

impl<T> Edit<T> {
    pub fn a_line(&self) -> Option<&Line<T>> {
        match self {
            Edit::Equal { a_line, .. } | Edit::Delete { a_line } => Some(a_line),
            Edit::Insert { .. } => None,
        }
    }

    pub fn b_line(&self) -> Option<&Line<T>> {
        match self {
            Edit::Equal { b_line, .. } | Edit::Insert { b_line } => Some(b_line),
            Edit::Delete { .. } => None,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal { .. })
    }

    /// The line this edit shows: the A side for equal and deleted lines
    pub fn line(&self) -> &Line<T> {
        match self {
            Edit::Equal { a_line, .. } | Edit::Delete { a_line } => a_line,
            Edit::Insert { b_line } => b_line,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Edit::Equal { .. } => ' ',
            Edit::Delete { .. } => '-',
            Edit::Insert { .. } => '+',
        }
    }
}

impl<T: Display> Display for Edit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.symbol(), self.line().text)
    }
}

pub trait DiffAlgorithm<'d, T> {
    type Trace;
    type EditPath;
    type EditScript;

    fn compute_shortest_edit(&self) -> Self::Trace;
    fn backtrack(&self) -> Self::EditPath;
    fn diff(&self) -> Self::EditScript;

    fn format_diff(&self) -> String
    where
        T: Display,
        Self::EditScript: AsRef<[Edit<T>]>,
    {
        self.diff()
            .as_ref()
            .iter()
            .map(|edit| edit.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One step of the recovered path: `(prev_x, prev_y, x, y)`
pub type Step = (isize, isize, isize, isize);

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T> MyersDiff<'_, T> {
    fn bounds(&self) -> (isize, isize) {
        (self.a.len() as isize, self.b.len() as isize)
    }

    /// Diagonal `k` lives at `v[k + offset]`; one spare slot on top holds
    /// the `v[1]` sentinel even when both inputs are empty.
    fn offset(&self) -> isize {
        let (n, m) = self.bounds();
        n + m
    }

    /// Whether the path into diagonal `k` at distance `d` came from `k + 1`
    fn moved_down(v: &[isize], offset: isize, k: isize, d: isize) -> bool {
        k == -d
            || (k != d && v[(offset + k - 1) as usize] < v[(offset + k + 1) as usize])
    }
}

impl<'d, T: Eq + Clone> DiffAlgorithm<'d, T> for MyersDiff<'d, T> {
    type Trace = Vec<Vec<isize>>;
    type EditPath = Vec<Step>;
    type EditScript = Vec<Edit<T>>;

    fn compute_shortest_edit(&self) -> Self::Trace {
        let (n, m) = self.bounds();
        let offset = self.offset();

        let mut v = vec![0; 2 * offset as usize + 2];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset + k) as usize;

                let mut x = if Self::moved_down(&v, offset, k, d) {
                    // came from k+1, an insertion
                    v[idx + 1]
                } else {
                    // came from k-1, a deletion
                    v[idx - 1] + 1
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        unreachable!("no edit path of length <= {} between sequences of {n} and {m}", n + m)
    }

    fn backtrack(&self) -> Self::EditPath {
        let (mut x, mut y) = self.bounds();
        let offset = self.offset();
        let mut edit_path = Vec::new();

        let trace = self.compute_shortest_edit();

        for (d, v) in trace.iter().enumerate().rev() {
            let d = d as isize;
            let k = x - y;

            let prev_k = if Self::moved_down(v, offset, k, d) {
                k + 1
            } else {
                k - 1
            };

            let prev_x = v[(offset + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edit_path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                edit_path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        edit_path
    }

    fn diff(&self) -> Self::EditScript {
        let line_a = |x: isize| Line::new(x as usize + 1, self.a[x as usize].clone());
        let line_b = |y: isize| Line::new(y as usize + 1, self.b[y as usize].clone());

        let mut diff = self
            .backtrack()
            .into_iter()
            .map(|(prev_x, prev_y, x, y)| {
                if x == prev_x {
                    Edit::Insert {
                        b_line: line_b(prev_y),
                    }
                } else if y == prev_y {
                    Edit::Delete {
                        a_line: line_a(prev_x),
                    }
                } else {
                    Edit::Equal {
                        a_line: line_a(prev_x),
                        b_line: line_b(prev_y),
                    }
                }
            })
            .collect::<Vec<_>>();

        diff.reverse();
        diff
    }
}

/// Minimal edit script turning `a` into `b`
pub fn diff<T: Eq + Clone>(a: &[T], b: &[T]) -> Vec<Edit<T>> {
    MyersDiff::new(a, b).diff()
}
