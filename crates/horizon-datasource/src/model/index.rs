//! Positions within a sectioned list.
//!
//! An `IndexPath` addresses a row by section and row number. Whether it
//! refers to the full model or to the visible projection depends on the
//! query it is passed to: every host-facing query takes visible positions,
//! while the visibility predicates receive positions in the full model.

use std::fmt;

/// Represents a row position within a sectioned list.
///
/// # Example
///
/// ```
/// use horizon_datasource::model::IndexPath;
///
/// let path = IndexPath::new(1, 3);
/// assert_eq!(path.section(), 1);
/// assert_eq!(path.row(), 3);
/// assert_eq!(path.with_row(0), IndexPath::new(1, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPath {
    section: usize,
    row: usize,
}

impl IndexPath {
    /// Creates a new index path.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the section number.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row number within the section.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns a path in the same section at another row.
    #[inline]
    pub const fn with_row(self, row: usize) -> Self {
        Self { row, ..self }
    }

    /// Returns a path at the same row number in another section.
    #[inline]
    pub const fn with_section(self, section: usize) -> Self {
        Self { section, ..self }
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_section_major() {
        let mut paths = vec![
            IndexPath::new(1, 0),
            IndexPath::new(0, 5),
            IndexPath::new(0, 1),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                IndexPath::new(0, 1),
                IndexPath::new(0, 5),
                IndexPath::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_display_and_conversion() {
        let path: IndexPath = (2, 7).into();
        assert_eq!(path.to_string(), "[2, 7]");
        assert_eq!(path.with_section(0), IndexPath::new(0, 7));
    }
}
