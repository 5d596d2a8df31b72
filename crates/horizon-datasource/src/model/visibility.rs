//! The visible projection of a sectioned model.
//!
//! The projection maps visible positions to positions in the full model, in
//! the same way a filtering proxy maps proxy rows to source rows. It is
//! rebuilt from scratch on every model replacement: there is no incremental
//! bookkeeping, so it can never go stale.

use std::sync::Arc;

use super::index::IndexPath;
use super::row::{Row, RowPredicate};
use super::section::{Section, SectionPredicate};

/// One visible section: where it sits in the full model and which of its
/// rows are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSection {
    source: usize,
    rows: Vec<usize>,
}

impl VisibleSection {
    /// Returns the index of this section in the full model.
    pub fn source_index(&self) -> usize {
        self.source
    }

    /// Returns the number of visible rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the full-model row index of the visible row at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count()`.
    pub fn source_row(&self, row: usize) -> usize {
        self.rows[row]
    }

    /// Returns the full-model row indices of all visible rows, in order.
    pub fn source_rows(&self) -> &[usize] {
        &self.rows
    }
}

/// Computes the visible projection of `sections`.
///
/// For every section, in declaration order:
/// 1. each row is hidden by its own override if it has one, else by
///    `row_hidden`, else it is visible;
/// 2. the section is hidden by its own override if it has one, else by
///    `section_hidden`, else it is visible;
/// 3. the section is kept only if it is not hidden and at least one of its
///    rows is visible.
///
/// Predicates receive full-model positions. The function is pure: the same
/// model and predicates always give the same projection.
pub fn compute_projection<T>(
    sections: &[Section<T>],
    row_hidden: Option<&RowPredicate<T>>,
    section_hidden: Option<&SectionPredicate<T>>,
) -> Vec<VisibleSection> {
    let mut visible = Vec::new();

    for (section_index, section) in sections.iter().enumerate() {
        let rows: Vec<usize> = section
            .rows()
            .iter()
            .enumerate()
            .filter(|&(row_index, row)| {
                let path = IndexPath::new(section_index, row_index);
                !row
                    .is_hidden_override(path)
                    .or_else(|| row_hidden.map(|hidden| hidden(row, path)))
                    .unwrap_or(false)
            })
            .map(|(row_index, _)| row_index)
            .collect();

        let is_hidden = section
            .is_hidden_override(section_index)
            .or_else(|| section_hidden.map(|hidden| hidden(section, section_index)))
            .unwrap_or(false);

        if !is_hidden && !rows.is_empty() {
            visible.push(VisibleSection {
                source: section_index,
                rows,
            });
        }
    }

    visible
}

/// The declared model together with its visible projection.
///
/// A snapshot is immutable. The data source swaps in a new one on every
/// replacement, so a snapshot obtained from
/// [`DataSource::snapshot`](crate::DataSource::snapshot) stays consistent
/// however the data source changes afterwards.
pub struct Snapshot<T> {
    sections: Arc<Vec<Section<T>>>,
    visible: Vec<VisibleSection>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(sections: Arc<Vec<Section<T>>>, visible: Vec<VisibleSection>) -> Self {
        Self { sections, visible }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Arc::new(Vec::new()), Vec::new())
    }

    pub(crate) fn shared_sections(&self) -> &Arc<Vec<Section<T>>> {
        &self.sections
    }

    /// Returns all declared sections.
    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    /// Returns the visible projection.
    pub fn visible(&self) -> &[VisibleSection] {
        &self.visible
    }

    /// Returns the number of visible sections.
    pub fn visible_section_count(&self) -> usize {
        self.visible.len()
    }

    /// Returns the total number of visible rows.
    pub fn visible_row_total(&self) -> usize {
        self.visible.iter().map(VisibleSection::row_count).sum()
    }

    /// Returns the section at `index` in the full model.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn section(&self, index: usize) -> &Section<T> {
        &self.sections[index]
    }

    /// Returns the row at `path` in the full model.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of range.
    pub fn row(&self, path: IndexPath) -> &Row<T> {
        self.sections[path.section()].row(path.row())
    }

    /// Returns the visible section at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range of the projection.
    pub fn visible_section(&self, index: usize) -> &Section<T> {
        &self.sections[self.visible[index].source]
    }

    /// Returns the number of visible rows in the visible section at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range of the projection.
    pub fn visible_row_count(&self, index: usize) -> usize {
        self.visible[index].row_count()
    }

    /// Maps a visible position to its position in the full model.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of range of the projection.
    pub fn source_path(&self, path: IndexPath) -> IndexPath {
        let visible = &self.visible[path.section()];
        IndexPath::new(visible.source, visible.source_row(path.row()))
    }

    /// Returns the row at a visible position.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of range of the projection.
    pub fn visible_row(&self, path: IndexPath) -> &Row<T> {
        self.row(self.source_path(path))
    }

    /// Returns the row at a visible position, or `None` if out of range.
    pub fn get_visible_row(&self, path: IndexPath) -> Option<&Row<T>> {
        let visible = self.visible.get(path.section())?;
        let row = *visible.rows.get(path.row())?;
        self.sections.get(visible.source)?.rows().get(row)
    }

    /// Maps a full-model position to its visible position, if it is visible.
    pub fn visible_path(&self, source: IndexPath) -> Option<IndexPath> {
        let section = self
            .visible
            .iter()
            .position(|visible| visible.source == source.section())?;
        let row = self.visible[section]
            .rows
            .binary_search(&source.row())
            .ok()?;
        Some(IndexPath::new(section, row))
    }
}

impl<T: Clone> Snapshot<T> {
    /// Returns copies of the visible sections with hidden rows removed.
    ///
    /// Useful for diffing two projections outside the data source.
    pub fn visible_sections(&self) -> Vec<Section<T>> {
        self.visible
            .iter()
            .map(|visible| self.sections[visible.source].project(&visible.rows))
            .collect()
    }
}

impl<T> std::fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("sections", &self.sections.len())
            .field("visible", &self.visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(kinds: &[&'static str]) -> Vec<Row<&'static str>> {
        kinds.iter().map(|kind| Row::new(*kind, *kind)).collect()
    }

    fn hide_items(names: &'static [&'static str]) -> RowPredicate<&'static str> {
        Arc::new(move |row: &Row<&'static str>, _: IndexPath| names.contains(row.item()))
    }

    #[test]
    fn test_no_predicates_everything_visible() {
        let sections = vec![Section::new(rows(&["a", "b"])), Section::new(rows(&["c"]))];
        let visible = compute_projection(&sections, None, None);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].source_rows(), &[0, 1]);
        assert_eq!(visible[1].source_index(), 1);
    }

    #[test]
    fn test_global_row_predicate_keeps_section_with_rows_left() {
        let sections = vec![Section::new(rows(&["r1", "r2"])), Section::new(rows(&["r3"]))];
        let hidden = hide_items(&["r2"]);
        let visible = compute_projection(&sections, Some(&hidden), None);

        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].source_rows(), &[0]);
        assert_eq!(visible[1].source_rows(), &[0]);
    }

    #[test]
    fn test_section_with_all_rows_hidden_collapses() {
        let sections = vec![
            Section::new(rows(&["r1"])),
            Section::new(rows(&["r4"])).with_hidden(|_, _| false),
        ];
        let hidden = hide_items(&["r4"]);
        let visible = compute_projection(&sections, Some(&hidden), None);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].source_index(), 0);
    }

    #[test]
    fn test_row_override_beats_global_predicate() {
        let sections = vec![Section::new(vec![
            Row::new("a", "a").with_hidden(|_, _| false),
            Row::new("b", "b"),
        ])];
        let hide_all: RowPredicate<&'static str> = Arc::new(|_: &Row<&'static str>, _: IndexPath| true);
        let visible = compute_projection(&sections, Some(&hide_all), None);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].source_rows(), &[0]);
    }

    #[test]
    fn test_section_override_beats_global_predicate() {
        let sections = vec![
            Section::new(rows(&["a"])).with_hidden(|_, _| false),
            Section::new(rows(&["b"])),
        ];
        let hide_all: SectionPredicate<&'static str> =
            Arc::new(|_: &Section<&'static str>, _: usize| true);
        let visible = compute_projection(&sections, None, Some(&hide_all));

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].source_index(), 0);
    }

    #[test]
    fn test_predicates_receive_source_positions() {
        let sections = vec![Section::new(rows(&["a", "b", "c"]))];
        let hide_middle: RowPredicate<&'static str> =
            Arc::new(|_: &Row<&'static str>, path: IndexPath| path == IndexPath::new(0, 1));
        let visible = compute_projection(&sections, Some(&hide_middle), None);
        assert_eq!(visible[0].source_rows(), &[0, 2]);
    }

    #[test]
    fn test_empty_section_is_never_visible() {
        let sections: Vec<Section<&'static str>> = vec![Section::new(Vec::new())];
        assert!(compute_projection(&sections, None, None).is_empty());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let sections = vec![
            Section::new(rows(&["a", "b", "c"])),
            Section::new(rows(&["d"])),
            Section::new(rows(&["e", "f"])),
        ];
        let hidden = hide_items(&["b", "d"]);
        let first = compute_projection(&sections, Some(&hidden), None);
        let second = compute_projection(&sections, Some(&hidden), None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_lookups() {
        let sections = vec![
            Section::new(rows(&["a", "b"])),
            Section::new(rows(&["c"])),
            Section::new(rows(&["d", "e"])),
        ];
        let hidden = hide_items(&["a", "c"]);
        let visible = compute_projection(&sections, Some(&hidden), None);
        let snapshot = Snapshot::new(Arc::new(sections), visible);

        assert_eq!(snapshot.visible_section_count(), 2);
        assert_eq!(snapshot.visible_row_total(), 3);
        assert_eq!(snapshot.visible_row(IndexPath::new(0, 0)).kind(), "b");
        assert_eq!(snapshot.source_path(IndexPath::new(1, 1)), IndexPath::new(2, 1));
        assert_eq!(snapshot.visible_path(IndexPath::new(2, 1)), Some(IndexPath::new(1, 1)));
        assert_eq!(snapshot.visible_path(IndexPath::new(1, 0)), None);
        assert!(snapshot.get_visible_row(IndexPath::new(2, 0)).is_none());

        let copies = snapshot.visible_sections();
        assert_eq!(copies.len(), 2);
        assert_eq!(copies[0].row_count(), 1);
        assert_eq!(copies[0].row(0).kind(), "b");
    }
}
