//! The host list widget, as seen by the data source.

use super::index::IndexPath;

/// The surface of the host list widget that the data source needs.
///
/// The host owns layout, scrolling and cell reuse. The data source only asks
/// it for cells and tells it when to reload.
///
/// # Example
///
/// ```
/// use horizon_datasource::model::{IndexPath, ListHost};
///
/// struct TextList;
///
/// impl ListHost for TextList {
///     type Cell = String;
///     type View = String;
///
///     fn dequeue_cell(&self, template: &str, _path: IndexPath) -> String {
///         format!("<{template}>")
///     }
/// }
/// ```
pub trait ListHost {
    /// The host's cell type. Handlers configure values of this type.
    type Cell;

    /// The host's section header and footer view type.
    type View;

    /// Returns a cell for `template`, ready to be configured for `path`.
    fn dequeue_cell(&self, template: &str, path: IndexPath) -> Self::Cell;

    /// Returns `true` if a template resource named `template` exists and can
    /// be registered.
    ///
    /// The default returns `false`, so nothing is registered.
    fn template_exists(&self, _template: &str) -> bool {
        false
    }

    /// Registers a template resource with the host.
    ///
    /// Called at most once per template, after `template_exists` returned
    /// `true`.
    fn register_template(&self, _template: &str) {}

    /// Reloads all data. Called by [`DataSource::update`](crate::DataSource::update).
    fn reload_data(&self) {}
}
