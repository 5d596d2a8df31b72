//! Error types for the data source.

use crate::model::IndexPath;

/// Result type alias for data source queries.
pub type Result<T> = std::result::Result<T, DataSourceError>;

/// Configuration errors surfaced while resolving a query.
///
/// Both variants mean the declared model is inconsistent with the registered
/// kinds or handlers. They are reported on first use rather than aborting, so
/// the host glue decides whether to halt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataSourceError {
    /// A row references a kind that was never registered.
    #[error("no kind descriptor registered for kind '{kind}'{}", location(.path))]
    UnregisteredKind {
        kind: String,
        path: Option<IndexPath>,
    },

    /// A row must be rendered but no configure handler and no fallback data
    /// source is available.
    #[error("no configure handler and no fallback data source for kind '{kind}' at {path}")]
    MissingRenderer { kind: String, path: IndexPath },
}

impl DataSourceError {
    /// Create an unregistered kind error.
    pub fn unregistered_kind(kind: impl Into<String>, path: Option<IndexPath>) -> Self {
        Self::UnregisteredKind {
            kind: kind.into(),
            path,
        }
    }

    /// Create a missing renderer error.
    pub fn missing_renderer(kind: impl Into<String>, path: IndexPath) -> Self {
        Self::MissingRenderer {
            kind: kind.into(),
            path,
        }
    }

    /// Returns the kind identifier the error is about.
    pub fn kind(&self) -> &str {
        match self {
            Self::UnregisteredKind { kind, .. } | Self::MissingRenderer { kind, .. } => kind,
        }
    }
}

fn location(path: &Option<IndexPath>) -> String {
    path.map(|path| format!(" at {path}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DataSourceError::unregistered_kind("contact", Some(IndexPath::new(1, 2)));
        assert_eq!(
            err.to_string(),
            "no kind descriptor registered for kind 'contact' at [1, 2]"
        );

        let err = DataSourceError::unregistered_kind("contact", None);
        assert_eq!(err.to_string(), "no kind descriptor registered for kind 'contact'");

        let err = DataSourceError::missing_renderer("banner", IndexPath::new(0, 0));
        assert_eq!(err.kind(), "banner");
        assert!(err.to_string().contains("at [0, 0]"));
    }
}
