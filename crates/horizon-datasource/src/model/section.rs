//! Sections: ordered groups of rows with optional header and footer.

use std::fmt;
use std::sync::Arc;

use super::row::Row;

/// Type alias for a section visibility predicate.
///
/// Returns `true` if the section should be hidden. The index is the section's
/// position in the full model.
pub type SectionPredicate<T> = Arc<dyn Fn(&Section<T>, usize) -> bool + Send + Sync>;

/// A height reported to the host for a row, header or footer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Height {
    /// Let the host size the element itself.
    #[default]
    Automatic,
    /// Collapse the element.
    Zero,
    /// A fixed height in points.
    Value(f32),
}

impl Height {
    /// Smallest height hosts accept for a collapsed header or footer.
    ///
    /// Many list widgets treat an exact zero as "use the default height", so
    /// a collapsed element is reported as this value instead.
    pub const COLLAPSED: f32 = 1.0e-4;

    /// Converts to points, using `automatic` for [`Height::Automatic`].
    pub fn resolve(self, automatic: f32) -> f32 {
        match self {
            Self::Automatic => automatic,
            Self::Zero => Self::COLLAPSED,
            Self::Value(value) => value,
        }
    }
}

/// A custom header or footer view built by the host.
///
/// The core only carries the description. Instantiating and configuring the
/// view is left to the host glue.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFooterView {
    template: String,
    height: Height,
}

impl HeaderFooterView {
    /// Creates a view descriptor for the given host template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            height: Height::Automatic,
        }
    }

    /// Sets the height to report for this view.
    pub fn with_height(mut self, height: Height) -> Self {
        self.height = height;
        self
    }

    /// Returns the host template identifier.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the height to report.
    pub fn height(&self) -> Height {
        self.height
    }
}

/// The header or footer of a section.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HeaderFooter {
    /// Explicitly no header/footer.
    #[default]
    None,
    /// A plain text title rendered by the host.
    Title(String),
    /// A custom view.
    View(HeaderFooterView),
}

impl HeaderFooter {
    /// Creates a title header/footer.
    pub fn title(title: impl Into<String>) -> Self {
        Self::Title(title.into())
    }

    /// Returns the title if this is the [`HeaderFooter::Title`] variant.
    pub fn as_title(&self) -> Option<&str> {
        match self {
            Self::Title(title) => Some(title),
            _ => None,
        }
    }

    /// Returns the view descriptor if this is the [`HeaderFooter::View`] variant.
    pub fn as_view(&self) -> Option<&HeaderFooterView> {
        match self {
            Self::View(view) => Some(view),
            _ => None,
        }
    }

    /// Returns the height implied by this descriptor.
    ///
    /// Titles size automatically, views report their own height and an
    /// explicit `None` collapses.
    pub fn height(&self) -> Height {
        match self {
            Self::None => Height::Zero,
            Self::Title(_) => Height::Automatic,
            Self::View(view) => view.height(),
        }
    }
}

/// An ordered group of rows.
///
/// A section owns its rows. Its `key` is used by
/// [`DataSource::replace`](crate::DataSource::replace) to swap one section in
/// place. A header or footer that is left unset defers to the data source's
/// global header/footer hook.
///
/// # Example
///
/// ```
/// use horizon_datasource::model::{HeaderFooter, Row, Section};
///
/// let section = Section::new(vec![Row::new("text", "a"), Row::new("text", "b")])
///     .with_key("letters")
///     .with_header(HeaderFooter::title("Letters"));
///
/// assert_eq!(section.row_count(), 2);
/// assert_eq!(section.header().and_then(HeaderFooter::as_title), Some("Letters"));
/// ```
pub struct Section<T> {
    rows: Vec<Row<T>>,
    key: Option<String>,
    header: Option<HeaderFooter>,
    footer: Option<HeaderFooter>,
    hidden: Option<SectionPredicate<T>>,
}

impl<T> Section<T> {
    /// Creates a section with the given rows.
    pub fn new(rows: Vec<Row<T>>) -> Self {
        Self {
            rows,
            key: None,
            header: None,
            footer: None,
            hidden: None,
        }
    }

    /// Sets the section key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the header.
    pub fn with_header(mut self, header: HeaderFooter) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets the footer.
    pub fn with_footer(mut self, footer: HeaderFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Sets a per-section visibility override.
    pub fn with_hidden<F>(mut self, hidden: F) -> Self
    where
        F: Fn(&Section<T>, usize) -> bool + Send + Sync + 'static,
    {
        self.hidden = Some(Arc::new(hidden));
        self
    }

    /// Returns the section key.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the header, if one was set.
    pub fn header(&self) -> Option<&HeaderFooter> {
        self.header.as_ref()
    }

    /// Returns the footer, if one was set.
    pub fn footer(&self) -> Option<&HeaderFooter> {
        self.footer.as_ref()
    }

    /// Returns all rows in declaration order.
    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    /// Returns the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= row_count()`.
    #[inline]
    pub fn row(&self, index: usize) -> &Row<T> {
        &self.rows[index]
    }

    /// Returns the number of rows, hidden ones included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the section has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Evaluates the per-section visibility override.
    ///
    /// Returns `None` when the section has no override.
    pub fn is_hidden_override(&self, index: usize) -> Option<bool> {
        self.hidden.as_ref().map(|hidden| hidden(self, index))
    }
}

impl<T: Clone> Section<T> {
    /// Returns a copy of this section restricted to the given row indices.
    pub(crate) fn project(&self, rows: &[usize]) -> Self {
        Self {
            rows: rows.iter().map(|&index| self.rows[index].clone()).collect(),
            key: self.key.clone(),
            header: self.header.clone(),
            footer: self.footer.clone(),
            hidden: self.hidden.clone(),
        }
    }
}

impl<T: Clone> Clone for Section<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            key: self.key.clone(),
            header: self.header.clone(),
            footer: self.footer.clone(),
            hidden: self.hidden.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Section<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("rows", &self.rows)
            .field("hidden", &self.hidden.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_footer_heights() {
        assert_eq!(HeaderFooter::None.height(), Height::Zero);
        assert_eq!(HeaderFooter::title("A").height(), Height::Automatic);
        let view = HeaderFooterView::new("Banner").with_height(Height::Value(44.0));
        assert_eq!(HeaderFooter::View(view).height(), Height::Value(44.0));
    }

    #[test]
    fn test_height_resolve() {
        assert_eq!(Height::Automatic.resolve(28.0), 28.0);
        assert_eq!(Height::Zero.resolve(28.0), Height::COLLAPSED);
        assert_eq!(Height::Value(12.5).resolve(28.0), 12.5);
    }

    #[test]
    fn test_section_accessors() {
        let section = Section::new(vec![Row::new("a", 1), Row::new("b", 2)])
            .with_footer(HeaderFooter::title("done"))
            .with_hidden(|section, index| section.row_count() > 1 && index == 0);

        assert_eq!(section.row(1).kind(), "b");
        assert!(section.header().is_none());
        assert_eq!(section.footer().and_then(HeaderFooter::as_title), Some("done"));
        assert_eq!(section.is_hidden_override(0), Some(true));
        assert_eq!(section.is_hidden_override(1), Some(false));
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        let section = Section::new(vec![Row::new("a", ())]);
        let _ = section.row(1);
    }

    #[test]
    fn test_project_keeps_order_and_metadata() {
        let section = Section::new(vec![Row::new("a", 1), Row::new("b", 2), Row::new("c", 3)])
            .with_key("k");
        let projected = section.project(&[0, 2]);
        let kinds: Vec<_> = projected.rows().iter().map(|row| row.kind()).collect();
        assert_eq!(kinds, vec!["a", "c"]);
        assert_eq!(projected.key(), Some("k"));
    }
}
