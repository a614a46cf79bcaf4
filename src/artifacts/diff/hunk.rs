use crate::artifacts::diff::myers::Edit;

/// Equal lines shown around each change
pub const HUNK_CONTEXT: usize = 3;

/// A run of edits with surrounding context, as printed by unified diffs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    a_start: usize,
    b_start: usize,
    edits: Vec<Edit<T>>,
}

impl<T: Clone> Hunk<T> {
    /// Group an edit script into hunks
    ///
    /// Changes closer than `2 * HUNK_CONTEXT + 1` equal lines share a hunk;
    /// an edit script without changes produces no hunks.
    pub fn filter(edits: &[Edit<T>]) -> Vec<Hunk<T>> {
        let mut hunks = Vec::new();
        let mut offset = 0usize;

        loop {
            while offset < edits.len() && edits[offset].is_equal() {
                offset += 1;
            }
            if offset >= edits.len() {
                return hunks;
            }

            // the first change is at `offset`; the hunk opens HUNK_CONTEXT lines earlier
            let start = offset.saturating_sub(HUNK_CONTEXT);
            let (a_start, b_start) = Self::starts_before(edits, start);

            let mut hunk = Hunk {
                a_start,
                b_start,
                edits: Vec::new(),
            };
            offset = hunk.build(edits, start);
            hunks.push(hunk);
        }
    }

    /// Line numbers preceding position `start` on each side, used as the
    /// header start when a side contributes no lines to the hunk
    fn starts_before(edits: &[Edit<T>], start: usize) -> (usize, usize) {
        let preceding = &edits[..start];
        let a_start = preceding
            .iter()
            .rev()
            .find_map(|edit| edit.a_line().map(|line| line.number))
            .unwrap_or(0);
        let b_start = preceding
            .iter()
            .rev()
            .find_map(|edit| edit.b_line().map(|line| line.number))
            .unwrap_or(0);
        (a_start, b_start)
    }

    /// Take edits from `start` until HUNK_CONTEXT equal lines follow the last
    /// change with no further change within reach; returns the next offset
    fn build(&mut self, edits: &[Edit<T>], start: usize) -> usize {
        let mut offset = start;
        // leading context sits within HUNK_CONTEXT of the first change
        let mut remaining = HUNK_CONTEXT;

        while offset < edits.len() {
            let upcoming = edits
                .get(offset + HUNK_CONTEXT)
                .is_some_and(|edit| !edit.is_equal());

            if !edits[offset].is_equal() || upcoming {
                remaining = HUNK_CONTEXT;
            } else if remaining == 0 {
                break;
            } else {
                remaining -= 1;
            }

            self.edits.push(edits[offset].clone());
            offset += 1;
        }

        offset
    }
}

impl<T> Hunk<T> {
    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    pub fn a_start(&self) -> usize {
        self.edits
            .iter()
            .find_map(|edit| edit.a_line().map(|line| line.number))
            .unwrap_or(self.a_start)
    }

    pub fn b_start(&self) -> usize {
        self.edits
            .iter()
            .find_map(|edit| edit.b_line().map(|line| line.number))
            .unwrap_or(self.b_start)
    }

    pub fn a_size(&self) -> usize {
        self.edits.iter().filter(|edit| edit.a_line().is_some()).count()
    }

    pub fn b_size(&self) -> usize {
        self.edits.iter().filter(|edit| edit.b_line().is_some()).count()
    }

    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.a_start(),
            self.a_size(),
            self.b_start(),
            self.b_size()
        )
    }
}
