//! Rows: a payload tagged with the kind that renders it.

use std::fmt;
use std::sync::Arc;

use super::index::IndexPath;

/// Type alias for a row visibility predicate.
///
/// Returns `true` if the row should be hidden. The path is the row's position
/// in the full model.
pub type RowPredicate<T> = Arc<dyn Fn(&Row<T>, IndexPath) -> bool + Send + Sync>;

/// A single list item: payload data plus the kind identifier that selects its
/// [`KindDescriptor`](super::KindDescriptor).
///
/// Rows are values. They are replaced with the whole model, never patched,
/// and whether a row is hidden is decided fresh on every visibility pass.
///
/// # Example
///
/// ```
/// use horizon_datasource::model::Row;
///
/// let row = Row::new("contact", "Ada Lovelace".to_string())
///     .with_key("contact-ada")
///     .with_hidden(|row, _path| row.item().is_empty());
///
/// assert_eq!(row.kind(), "contact");
/// assert_eq!(row.key(), Some("contact-ada"));
/// ```
pub struct Row<T> {
    kind: String,
    item: T,
    key: Option<String>,
    hidden: Option<RowPredicate<T>>,
}

/// How a row is identified across model replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowIdentity<'a> {
    /// The consumer supplied a stable key.
    Key(&'a str),
    /// No key: the kind identifier plus the row's position.
    Positional { kind: &'a str, path: IndexPath },
}

impl<T> Row<T> {
    /// Creates a row of the given kind.
    pub fn new(kind: impl Into<String>, item: T) -> Self {
        Self {
            kind: kind.into(),
            item,
            key: None,
            hidden: None,
        }
    }

    /// Sets a stable identity key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets a per-row visibility override.
    ///
    /// When set, it takes precedence over the data source's global row-hidden
    /// predicate.
    pub fn with_hidden<F>(mut self, hidden: F) -> Self
    where
        F: Fn(&Row<T>, IndexPath) -> bool + Send + Sync + 'static,
    {
        self.hidden = Some(Arc::new(hidden));
        self
    }

    /// Returns the kind identifier.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the payload.
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Consumes the row and returns its payload.
    pub fn into_item(self) -> T {
        self.item
    }

    /// Returns the stable identity key, if one was supplied.
    #[inline]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the identity of this row when it sits at `path`.
    pub fn identity(&self, path: IndexPath) -> RowIdentity<'_> {
        match &self.key {
            Some(key) => RowIdentity::Key(key),
            None => RowIdentity::Positional {
                kind: &self.kind,
                path,
            },
        }
    }

    /// Returns `true` if this row carries its own visibility predicate.
    pub fn has_hidden_override(&self) -> bool {
        self.hidden.is_some()
    }

    /// Evaluates the per-row visibility override.
    ///
    /// Returns `None` when the row has no override, so the caller falls back
    /// to the next tier.
    pub fn is_hidden_override(&self, path: IndexPath) -> Option<bool> {
        self.hidden.as_ref().map(|hidden| hidden(self, path))
    }
}

impl<T: Clone> Clone for Row<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            item: self.item.clone(),
            key: self.key.clone(),
            hidden: self.hidden.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Row<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("item", &self.item)
            .field("hidden", &self.hidden.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let keyed = Row::new("text", 1).with_key("k");
        assert_eq!(keyed.identity(IndexPath::new(0, 0)), RowIdentity::Key("k"));

        let positional = Row::new("text", 1);
        assert_eq!(
            positional.identity(IndexPath::new(2, 3)),
            RowIdentity::Positional {
                kind: "text",
                path: IndexPath::new(2, 3)
            }
        );
    }

    #[test]
    fn test_hidden_override() {
        let row = Row::new("text", 5);
        assert!(!row.has_hidden_override());
        assert_eq!(row.is_hidden_override(IndexPath::default()), None);

        let row = row.with_hidden(|row, path| *row.item() > 3 && path.row() == 0);
        assert_eq!(row.is_hidden_override(IndexPath::new(0, 0)), Some(true));
        assert_eq!(row.is_hidden_override(IndexPath::new(0, 1)), Some(false));
    }

    #[test]
    fn test_clone_keeps_predicate() {
        let row = Row::new("text", "a".to_string()).with_hidden(|_, _| true);
        let copy = row.clone();
        assert_eq!(copy.is_hidden_override(IndexPath::default()), Some(true));
        assert_eq!(copy.into_item(), "a");
    }
}
