use derive_new::new;
use std::fmt::Display;

/// A single element of a compared document
///
/// `number` is 1-based and increases in document order. When produced by
/// [`split_lines`] the text keeps its line terminator.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Line<T> {
    pub number: usize,
    pub text: T,
}

impl<T: Clone> Line<T> {
    /// Number every element of `items` starting from 1
    pub fn numbered(items: &[T]) -> Vec<Line<T>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| Line::new(index + 1, item.clone()))
            .collect()
    }
}

impl<T: Display> Display for Line<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Split raw text into lines, keeping each `\n` terminator
///
/// A trailing fragment without terminator is still a line; empty input
/// yields no lines at all.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}
