//! The data source: model ownership, visibility and query dispatch.
//!
//! Every row query resolves through the same chain:
//!
//! 1. the handler of the row's kind,
//! 2. the global handler,
//! 3. the fallback collaborator,
//! 4. a neutral default.
//!
//! Rendering is the exception: with no handler and no fallback it fails with
//! [`DataSourceError::MissingRenderer`].
//!
//! Host-facing queries take positions in the visible projection. Visibility
//! predicates and [`DataSource::validate`] work on positions in the full
//! model.

use std::fmt;
use std::sync::Arc;

use horizon_datasource_core::logging::{span_names, targets};
use horizon_datasource_core::{PerfSpan, Signal, ThreadAffinity, datasource_debug};
use parking_lot::RwLock;

use super::fallback::{DataSourceFallback, DelegateFallback, PrefetchFallback};
use super::handlers::{
    row_handler_setters, EditingStyle, GlobalHooks, RowAction, RowHandlers, SelectionResult,
    VisibilityHooks,
};
use super::host::ListHost;
use super::index::IndexPath;
use super::options::DataSourceOptions;
use super::registry::{KindDescriptor, KindRegistry, TemplateCache};
use super::row::Row;
use super::section::{HeaderFooter, HeaderFooterView, Height, Section};
use super::visibility::{Snapshot, compute_projection};
use crate::error::{DataSourceError, Result};

/// Signals emitted by a [`DataSource`].
pub struct DataSourceSignals {
    /// Emitted before the model or its projection is replaced.
    pub model_about_to_reset: Signal<()>,
    /// Emitted after the model or its projection was replaced.
    pub model_reset: Signal<()>,
    /// Emitted after a template was registered with the host.
    /// Args: the template identifier.
    pub template_registered: Signal<String>,
}

impl Default for DataSourceSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSourceSignals {
    /// Creates a new set of signals.
    pub fn new() -> Self {
        Self {
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
            template_registered: Signal::new(),
        }
    }

    fn emit_reset(&self, reset_fn: impl FnOnce()) {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}

impl fmt::Debug for DataSourceSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceSignals")
            .field("model_about_to_reset", &self.model_about_to_reset)
            .field("model_reset", &self.model_reset)
            .field("template_registered", &self.template_registered)
            .finish()
    }
}

static_assertions::assert_impl_all!(DataSourceSignals: Send, Sync);

/// A declarative sectioned data source for a host list widget.
///
/// The consumer declares [`Section`]s of [`Row`]s and registers one
/// [`KindDescriptor`] per row kind. The data source keeps the visible
/// projection of that model up to date and answers the host's queries by
/// resolving handlers through the override chain.
///
/// The model is replaced wholesale. Every replacement recomputes visibility
/// and emits `model_about_to_reset`/`model_reset`.
///
/// # Example
///
/// ```
/// use horizon_datasource::DataSource;
/// use horizon_datasource::model::{IndexPath, KindDescriptor, ListHost, Row, Section};
///
/// struct TextList;
///
/// impl ListHost for TextList {
///     type Cell = String;
///     type View = ();
///
///     fn dequeue_cell(&self, _template: &str, _path: IndexPath) -> String {
///         String::new()
///     }
/// }
///
/// let text = KindDescriptor::new("text")
///     .with_configure(|row: &Row<&'static str>, cell: &mut String, _| cell.push_str(row.item()));
///
/// let data_source = DataSource::<&'static str, TextList>::builder([text])
///     .with_row_hidden(|row, _| row.item().is_empty())
///     .with_sections(vec![Section::new(vec![
///         Row::new("text", "Hello"),
///         Row::new("text", ""),
///     ])])
///     .build();
///
/// assert_eq!(data_source.number_of_sections(), 1);
/// assert_eq!(data_source.number_of_rows(0), 1);
///
/// let cell = data_source.cell_for_row(&TextList, IndexPath::new(0, 0)).unwrap();
/// assert_eq!(cell, "Hello");
/// ```
pub struct DataSource<T, H: ListHost> {
    registry: KindRegistry<T, H::Cell>,
    snapshot: RwLock<Arc<Snapshot<T>>>,
    visibility: RwLock<VisibilityHooks<T>>,
    handlers: RowHandlers<T, H::Cell>,
    hooks: GlobalHooks<T, H::Cell, H::View>,
    fallback: Option<Arc<dyn DataSourceFallback<H>>>,
    delegate: Option<Arc<dyn DelegateFallback<H>>>,
    prefetch: Option<Arc<dyn PrefetchFallback>>,
    options: DataSourceOptions,
    templates: TemplateCache,
    signals: DataSourceSignals,
    affinity: ThreadAffinity,
}

/// Builder for [`DataSource`].
///
/// Carries the global handler table: every `with_*` row handler set here
/// applies to rows whose kind leaves that slot empty.
pub struct DataSourceBuilder<T, H: ListHost> {
    descriptors: Vec<KindDescriptor<T, H::Cell>>,
    sections: Vec<Section<T>>,
    handlers: RowHandlers<T, H::Cell>,
    hooks: GlobalHooks<T, H::Cell, H::View>,
    visibility: VisibilityHooks<T>,
    fallback: Option<Arc<dyn DataSourceFallback<H>>>,
    delegate: Option<Arc<dyn DelegateFallback<H>>>,
    prefetch: Option<Arc<dyn PrefetchFallback>>,
    options: DataSourceOptions,
}

impl<T, H: ListHost> DataSourceBuilder<T, H> {
    /// Sets the initial model.
    pub fn with_sections(mut self, sections: Vec<Section<T>>) -> Self {
        self.sections = sections;
        self
    }

    /// Sets the options.
    pub fn with_options(mut self, options: DataSourceOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the global row-hidden predicate.
    ///
    /// Rows with their own override ignore it.
    pub fn with_row_hidden<F>(mut self, hidden: F) -> Self
    where
        F: Fn(&Row<T>, IndexPath) -> bool + Send + Sync + 'static,
    {
        self.visibility.row_hidden = Some(Arc::new(hidden));
        self
    }

    /// Sets the global section-hidden predicate.
    ///
    /// Sections with their own override ignore it.
    pub fn with_section_hidden<F>(mut self, hidden: F) -> Self
    where
        F: Fn(&Section<T>, usize) -> bool + Send + Sync + 'static,
    {
        self.visibility.section_hidden = Some(Arc::new(hidden));
        self
    }

    /// Sets the section index titles hook.
    ///
    /// Returning `None` defers to the fallback data source.
    pub fn with_section_index_titles<F>(mut self, titles: F) -> Self
    where
        F: Fn() -> Option<Vec<String>> + Send + Sync + 'static,
    {
        self.hooks.section_index_titles = Some(Arc::new(titles));
        self
    }

    /// Sets the hook that maps a section index title to a section.
    pub fn with_section_for_section_index<F>(mut self, section_for: F) -> Self
    where
        F: Fn(&str, usize) -> usize + Send + Sync + 'static,
    {
        self.hooks.section_for_section_index = Some(Arc::new(section_for));
        self
    }

    /// Sets the estimated row height hook.
    ///
    /// It only receives a position, so estimating never touches the row.
    pub fn with_estimated_height<F>(mut self, estimate: F) -> Self
    where
        F: Fn(IndexPath) -> Height + Send + Sync + 'static,
    {
        self.hooks.estimated_height = Some(Arc::new(estimate));
        self
    }

    /// Sets the header hook, used for sections that declare no header.
    ///
    /// Receives the section and its visible index.
    pub fn with_section_header<F>(mut self, header: F) -> Self
    where
        F: Fn(&Section<T>, usize) -> HeaderFooter + Send + Sync + 'static,
    {
        self.hooks.section_header = Some(Arc::new(header));
        self
    }

    /// Sets the footer hook, used for sections that declare no footer.
    ///
    /// Receives the section and its visible index.
    pub fn with_section_footer<F>(mut self, footer: F) -> Self
    where
        F: Fn(&Section<T>, usize) -> HeaderFooter + Send + Sync + 'static,
    {
        self.hooks.section_footer = Some(Arc::new(footer));
        self
    }

    /// Sets the header height hook.
    pub fn with_section_header_height<F>(mut self, height: F) -> Self
    where
        F: Fn(&Section<T>, usize) -> Height + Send + Sync + 'static,
    {
        self.hooks.section_header_height = Some(Arc::new(height));
        self
    }

    /// Sets the footer height hook.
    pub fn with_section_footer_height<F>(mut self, height: F) -> Self
    where
        F: Fn(&Section<T>, usize) -> Height + Send + Sync + 'static,
    {
        self.hooks.section_footer_height = Some(Arc::new(height));
        self
    }

    /// Sets the hook called after a cell left the screen.
    pub fn with_did_end_displaying<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut H::Cell, IndexPath) + Send + Sync + 'static,
    {
        self.hooks.did_end_displaying = Some(Arc::new(handler));
        self
    }

    /// Sets the hook called before a section header view is displayed.
    ///
    /// Receives the visible section and its visible index.
    pub fn with_will_display_header<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Section<T>, &mut H::View, usize) + Send + Sync + 'static,
    {
        self.hooks.will_display_header = Some(Arc::new(handler));
        self
    }

    /// Sets the hook called before a section footer view is displayed.
    pub fn with_will_display_footer<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Section<T>, &mut H::View, usize) + Send + Sync + 'static,
    {
        self.hooks.will_display_footer = Some(Arc::new(handler));
        self
    }

    /// Sets the hook called after a section header view left the screen.
    pub fn with_did_end_displaying_header<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut H::View, usize) + Send + Sync + 'static,
    {
        self.hooks.did_end_displaying_header = Some(Arc::new(handler));
        self
    }

    /// Sets the hook called after a section footer view left the screen.
    pub fn with_did_end_displaying_footer<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut H::View, usize) + Send + Sync + 'static,
    {
        self.hooks.did_end_displaying_footer = Some(Arc::new(handler));
        self
    }

    /// Sets the prefetch hook.
    pub fn with_prefetch_rows<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[IndexPath]) + Send + Sync + 'static,
    {
        self.hooks.prefetch_rows = Some(Arc::new(handler));
        self
    }

    /// Sets the cancel-prefetching hook.
    pub fn with_cancel_prefetching<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[IndexPath]) + Send + Sync + 'static,
    {
        self.hooks.cancel_prefetching = Some(Arc::new(handler));
        self
    }

    /// Sets the fallback data source.
    pub fn with_fallback(mut self, fallback: impl DataSourceFallback<H> + 'static) -> Self {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Sets the fallback delegate.
    pub fn with_delegate_fallback(
        mut self,
        delegate: impl DelegateFallback<H> + 'static,
    ) -> Self {
        self.delegate = Some(Arc::new(delegate));
        self
    }

    /// Sets the fallback for prefetch notifications.
    pub fn with_prefetch_fallback(mut self, prefetch: impl PrefetchFallback + 'static) -> Self {
        self.prefetch = Some(Arc::new(prefetch));
        self
    }

    row_handler_setters!(T, H::Cell);

    /// Builds the data source and computes the initial projection.
    ///
    /// The calling thread becomes the thread the data source is confined to
    /// when thread checks are enabled.
    pub fn build(self) -> DataSource<T, H> {
        let data_source = DataSource {
            registry: KindRegistry::new(self.descriptors),
            snapshot: RwLock::new(Arc::new(Snapshot::empty())),
            visibility: RwLock::new(self.visibility),
            handlers: self.handlers,
            hooks: self.hooks,
            fallback: self.fallback,
            delegate: self.delegate,
            prefetch: self.prefetch,
            options: self.options,
            templates: TemplateCache::new(),
            signals: DataSourceSignals::new(),
            affinity: ThreadAffinity::current(),
        };

        datasource_debug!(
            kinds = data_source.registry.len(),
            global_handlers = ?data_source.handlers.configured(),
            "data source built"
        );

        data_source.apply(Arc::new(self.sections));
        data_source
    }
}

impl<T, H: ListHost> DataSource<T, H> {
    /// Starts building a data source for the given kinds.
    pub fn builder(
        descriptors: impl IntoIterator<Item = KindDescriptor<T, H::Cell>>,
    ) -> DataSourceBuilder<T, H> {
        DataSourceBuilder {
            descriptors: descriptors.into_iter().collect(),
            sections: Vec::new(),
            handlers: RowHandlers::new(),
            hooks: GlobalHooks::default(),
            visibility: VisibilityHooks::default(),
            fallback: None,
            delegate: None,
            prefetch: None,
            options: DataSourceOptions::default(),
        }
    }

    /// Creates a data source with no global handlers and no fallbacks.
    pub fn new(descriptors: impl IntoIterator<Item = KindDescriptor<T, H::Cell>>) -> Self {
        Self::builder(descriptors).build()
    }

    // =========================================================================
    // Model
    // =========================================================================

    /// Returns the current snapshot.
    ///
    /// The snapshot is immutable and stays valid after later replacements.
    pub fn snapshot(&self) -> Arc<Snapshot<T>> {
        self.snapshot.read().clone()
    }

    /// Replaces the whole model and recomputes visibility.
    pub fn set_sections(&self, sections: Vec<Section<T>>) {
        self.check_thread("set_sections");
        self.apply(Arc::new(sections));
    }

    /// Optionally replaces the model, recomputes visibility and asks the host
    /// to reload.
    pub fn update(&self, sections: Option<Vec<Section<T>>>, host: &H) {
        self.check_thread("update");
        let sections = match sections {
            Some(sections) => Arc::new(sections),
            None => self.snapshot().shared_sections().clone(),
        };
        self.apply(sections);
        host.reload_data();
    }

    /// Recomputes visibility without replacing the model.
    ///
    /// Use this after state read by a visibility predicate changed.
    pub fn refresh_visibility(&self) {
        self.check_thread("refresh_visibility");
        self.apply(self.snapshot().shared_sections().clone());
    }

    /// Replaces the global row-hidden predicate and recomputes visibility.
    pub fn set_row_hidden<F>(&self, hidden: F)
    where
        F: Fn(&Row<T>, IndexPath) -> bool + Send + Sync + 'static,
    {
        self.check_thread("set_row_hidden");
        self.visibility.write().row_hidden = Some(Arc::new(hidden));
        self.refresh_visibility();
    }

    /// Removes the global row-hidden predicate and recomputes visibility.
    pub fn clear_row_hidden(&self) {
        self.check_thread("clear_row_hidden");
        self.visibility.write().row_hidden = None;
        self.refresh_visibility();
    }

    /// Replaces the global section-hidden predicate and recomputes visibility.
    pub fn set_section_hidden<F>(&self, hidden: F)
    where
        F: Fn(&Section<T>, usize) -> bool + Send + Sync + 'static,
    {
        self.check_thread("set_section_hidden");
        self.visibility.write().section_hidden = Some(Arc::new(hidden));
        self.refresh_visibility();
    }

    /// Removes the global section-hidden predicate and recomputes visibility.
    pub fn clear_section_hidden(&self) {
        self.check_thread("clear_section_hidden");
        self.visibility.write().section_hidden = None;
        self.refresh_visibility();
    }

    /// Returns the number of visible sections.
    pub fn number_of_sections(&self) -> usize {
        self.snapshot().visible_section_count()
    }

    /// Returns the number of visible rows in the visible section `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn number_of_rows(&self, section: usize) -> usize {
        self.snapshot().visible_row_count(section)
    }

    /// Maps a visible position to its position in the full model.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of range of the projection.
    pub fn source_path(&self, path: IndexPath) -> IndexPath {
        self.snapshot().source_path(path)
    }

    /// Returns the registry.
    pub fn registry(&self) -> &KindRegistry<T, H::Cell> {
        &self.registry
    }

    /// Returns the descriptor of the row at a visible position.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of range of the projection.
    pub fn descriptor_at(&self, path: IndexPath) -> Result<&KindDescriptor<T, H::Cell>> {
        let snapshot = self.snapshot();
        self.registry
            .resolve(snapshot.visible_row(path).kind(), Some(path))
    }

    /// Returns the descriptor registered for `kind`.
    pub fn descriptor_for(&self, kind: &str) -> Result<&KindDescriptor<T, H::Cell>> {
        self.registry.resolve(kind, None)
    }

    /// Checks that every row of the full model has a registered kind.
    ///
    /// Errors carry full-model positions.
    pub fn validate(&self) -> Result<()> {
        let snapshot = self.snapshot();
        for (section_index, section) in snapshot.sections().iter().enumerate() {
            for (row_index, row) in section.rows().iter().enumerate() {
                let path = IndexPath::new(section_index, row_index);
                self.registry.resolve(row.kind(), Some(path))?;
            }
        }
        Ok(())
    }

    /// Returns the options.
    pub fn options(&self) -> &DataSourceOptions {
        &self.options
    }

    /// Returns the signals.
    pub fn signals(&self) -> &DataSourceSignals {
        &self.signals
    }

    /// Returns `true` if `template` was registered with the host.
    pub fn is_template_prepared(&self, template: &str) -> bool {
        self.templates.is_prepared(template)
    }

    fn check_thread(&self, operation: &'static str) {
        if self.options.thread_checks {
            self.affinity.assert_owner(operation);
        }
    }

    fn apply(&self, sections: Arc<Vec<Section<T>>>) {
        let _perf = PerfSpan::new(span_names::VISIBILITY);

        // Predicates run without any lock held so they may read the data source.
        let (row_hidden, section_hidden) = {
            let hooks = self.visibility.read();
            (hooks.row_hidden.clone(), hooks.section_hidden.clone())
        };
        let visible = compute_projection(&sections, row_hidden.as_ref(), section_hidden.as_ref());
        let snapshot = Arc::new(Snapshot::new(sections, visible));

        if self.options.log_visibility_passes {
            tracing::debug!(
                target: targets::VISIBILITY,
                sections = snapshot.sections().len(),
                visible_sections = snapshot.visible_section_count(),
                visible_rows = snapshot.visible_row_total(),
                "visibility recomputed"
            );
        }

        self.signals.emit_reset(|| {
            *self.snapshot.write() = snapshot;
        });
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn dispatch<F: ?Sized, R>(
        &self,
        query: &'static str,
        path: IndexPath,
        slot: impl Fn(&RowHandlers<T, H::Cell>) -> &Option<Arc<F>>,
        call: impl FnOnce(&F, &Row<T>) -> R,
        unresolved: impl FnOnce() -> R,
    ) -> Result<R> {
        let snapshot = self.snapshot();
        let row = snapshot.visible_row(path);
        let descriptor = self.registry.resolve(row.kind(), Some(path))?;

        match descriptor.handlers.layered(&self.handlers, slot) {
            Some((tier, handler)) => {
                tracing::trace!(target: targets::DISPATCH, query, %path, ?tier, "resolved");
                Ok(call(&**handler, row))
            }
            None => {
                tracing::trace!(target: targets::DISPATCH, query, %path, "unresolved");
                Ok(unresolved())
            }
        }
    }

    /// Produces the configured cell for the row at `path`.
    ///
    /// On first use of the row's template, and if template registration is
    /// enabled, asks the host to register it.
    ///
    /// # Errors
    ///
    /// Fails if the row's kind is unregistered, or if neither a configure
    /// handler nor a fallback data source can render it.
    pub fn cell_for_row(&self, host: &H, path: IndexPath) -> Result<H::Cell> {
        let _perf = PerfSpan::new(span_names::DISPATCH);

        let snapshot = self.snapshot();
        let row = snapshot.visible_row(path);
        let descriptor = self.registry.resolve(row.kind(), Some(path))?;
        let template = descriptor.template();

        if self.options.register_templates
            && self.templates.prepare(
                template,
                |template| host.template_exists(template),
                |template| host.register_template(template),
            )
        {
            tracing::debug!(target: targets::REGISTRY, template, "template registered");
            self.signals.template_registered.emit(template.to_owned());
        }

        let configure = descriptor
            .handlers
            .layered(&self.handlers, |handlers| &handlers.configure);
        if let Some((tier, configure)) = configure {
            tracing::trace!(target: targets::DISPATCH, %path, ?tier, template, "configuring cell");
            let mut cell = host.dequeue_cell(template, path);
            configure(row, &mut cell, path);
            return Ok(cell);
        }

        match &self.fallback {
            Some(fallback) => Ok(fallback.cell_for_row(host, path)),
            None => {
                tracing::error!(
                    target: targets::DISPATCH,
                    kind = row.kind(),
                    %path,
                    "no configure handler and no fallback data source"
                );
                Err(DataSourceError::missing_renderer(row.kind(), path))
            }
        }
    }

    /// Returns whether the row at `path` can be edited.
    pub fn can_edit(&self, path: IndexPath) -> Result<bool> {
        self.dispatch(
            "can_edit",
            path,
            |h| &h.can_edit,
            |handler, row| handler(row, path),
            || self.fallback.as_ref().is_some_and(|fallback| fallback.can_edit(path)),
        )
    }

    /// Returns whether the row at `path` can be moved.
    pub fn can_move(&self, path: IndexPath) -> Result<bool> {
        self.dispatch(
            "can_move",
            path,
            |h| &h.can_move,
            |handler, row| handler(row, path),
            || self.fallback.as_ref().is_some_and(|fallback| fallback.can_move(path)),
        )
    }

    /// Commits an edit of the row at `path`.
    pub fn commit_editing(&self, style: EditingStyle, path: IndexPath) -> Result<()> {
        self.dispatch(
            "commit_editing",
            path,
            |h| &h.commit_editing,
            |handler, row| handler(row, style, path),
            || {
                if let Some(fallback) = &self.fallback {
                    fallback.commit_editing(style, path);
                }
            },
        )
    }

    /// Moves the row at `from` to `to`. Resolves on the row at `from`.
    pub fn move_row(&self, from: IndexPath, to: IndexPath) -> Result<()> {
        self.dispatch(
            "move_row",
            from,
            |h| &h.move_row,
            |handler, row| handler(row, from, to),
            || {
                if let Some(fallback) = &self.fallback {
                    fallback.move_row(from, to);
                }
            },
        )
    }

    /// Returns the section index titles.
    pub fn section_index_titles(&self) -> Option<Vec<String>> {
        self.hooks
            .section_index_titles
            .as_ref()
            .and_then(|titles| titles())
            .or_else(|| {
                self.fallback
                    .as_ref()
                    .and_then(|fallback| fallback.section_index_titles())
            })
    }

    /// Maps a section index title and its position to a section.
    pub fn section_for_section_index_title(&self, title: &str, index: usize) -> usize {
        if let Some(section_for) = &self.hooks.section_for_section_index {
            return section_for(title, index);
        }
        self.fallback
            .as_ref()
            .map(|fallback| fallback.section_for_section_index_title(title, index))
            .unwrap_or(index)
    }

    // =========================================================================
    // Headers & footers
    // =========================================================================

    fn header_footer(&self, section: usize, footer: bool) -> Option<HeaderFooter> {
        let snapshot = self.snapshot();
        let declared = snapshot.visible_section(section);
        let own = if footer {
            declared.footer()
        } else {
            declared.header()
        };
        if let Some(own) = own {
            return Some(own.clone());
        }
        let hook = if footer {
            &self.hooks.section_footer
        } else {
            &self.hooks.section_header
        };
        hook.as_ref().map(|hook| hook(declared, section))
    }

    /// Returns the header title of the visible section `section`.
    ///
    /// Only a [`HeaderFooter::Title`] produces a title.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn title_for_header(&self, section: usize) -> Option<String> {
        self.header_footer(section, false)
            .and_then(|header| header.as_title().map(str::to_owned))
    }

    /// Returns the footer title of the visible section `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn title_for_footer(&self, section: usize) -> Option<String> {
        self.header_footer(section, true)
            .and_then(|footer| footer.as_title().map(str::to_owned))
    }

    /// Returns the custom header view of the visible section `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn view_for_header(&self, section: usize) -> Option<HeaderFooterView> {
        match self.header_footer(section, false) {
            Some(header) => header.as_view().cloned(),
            None => self
                .delegate
                .as_ref()
                .and_then(|delegate| delegate.view_for_header(section)),
        }
    }

    /// Returns the custom footer view of the visible section `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn view_for_footer(&self, section: usize) -> Option<HeaderFooterView> {
        match self.header_footer(section, true) {
            Some(footer) => footer.as_view().cloned(),
            None => self
                .delegate
                .as_ref()
                .and_then(|delegate| delegate.view_for_footer(section)),
        }
    }

    /// Returns the header height of the visible section `section`.
    ///
    /// The height hook wins. Otherwise the height follows from the resolved
    /// header, then the fallback delegate.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn header_height(&self, section: usize) -> Height {
        if let Some(height) = &self.hooks.section_header_height {
            let snapshot = self.snapshot();
            return height(snapshot.visible_section(section), section);
        }
        match self.header_footer(section, false) {
            Some(header) => header.height(),
            None => self
                .delegate
                .as_ref()
                .map(|delegate| delegate.header_height(section))
                .unwrap_or_default(),
        }
    }

    /// Returns the footer height of the visible section `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn footer_height(&self, section: usize) -> Height {
        if let Some(height) = &self.hooks.section_footer_height {
            let snapshot = self.snapshot();
            return height(snapshot.visible_section(section), section);
        }
        match self.header_footer(section, true) {
            Some(footer) => footer.height(),
            None => self
                .delegate
                .as_ref()
                .map(|delegate| delegate.footer_height(section))
                .unwrap_or_default(),
        }
    }

    /// Notifies that `view` is about to be displayed as the header of the
    /// visible section `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn will_display_header(&self, view: &mut H::View, section: usize) {
        if let Some(handler) = &self.hooks.will_display_header {
            let snapshot = self.snapshot();
            handler(snapshot.visible_section(section), view, section);
        } else if let Some(delegate) = &self.delegate {
            delegate.will_display_header(view, section);
        }
    }

    /// Notifies that `view` is about to be displayed as the footer of the
    /// visible section `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range of the projection.
    pub fn will_display_footer(&self, view: &mut H::View, section: usize) {
        if let Some(handler) = &self.hooks.will_display_footer {
            let snapshot = self.snapshot();
            handler(snapshot.visible_section(section), view, section);
        } else if let Some(delegate) = &self.delegate {
            delegate.will_display_footer(view, section);
        }
    }

    /// Notifies that a section header view left the screen.
    ///
    /// The section may already be gone, so it is not looked up.
    pub fn did_end_displaying_header(&self, view: &mut H::View, section: usize) {
        if let Some(handler) = &self.hooks.did_end_displaying_header {
            handler(view, section);
        } else if let Some(delegate) = &self.delegate {
            delegate.did_end_displaying_header(view, section);
        }
    }

    /// Notifies that a section footer view left the screen.
    pub fn did_end_displaying_footer(&self, view: &mut H::View, section: usize) {
        if let Some(handler) = &self.hooks.did_end_displaying_footer {
            handler(view, section);
        } else if let Some(delegate) = &self.delegate {
            delegate.did_end_displaying_footer(view, section);
        }
    }

    // =========================================================================
    // Delegate queries
    // =========================================================================

    /// Returns the height of the row at `path`.
    pub fn height(&self, path: IndexPath) -> Result<Height> {
        self.dispatch(
            "height",
            path,
            |h| &h.height,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .map(|delegate| delegate.height(path))
                    .unwrap_or_default()
            },
        )
    }

    /// Returns the estimated height of the row at `path`.
    ///
    /// Does not look at the row, so it never fails.
    pub fn estimated_height(&self, path: IndexPath) -> Height {
        if let Some(estimate) = &self.hooks.estimated_height {
            return estimate(path);
        }
        self.delegate
            .as_ref()
            .map(|delegate| delegate.estimated_height(path))
            .unwrap_or_default()
    }

    /// Returns whether the row at `path` can be highlighted.
    pub fn should_highlight(&self, path: IndexPath) -> Result<bool> {
        self.dispatch(
            "should_highlight",
            path,
            |h| &h.should_highlight,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .map(|delegate| delegate.should_highlight(path))
                    .unwrap_or(true)
            },
        )
    }

    /// Notifies that the row at `path` was highlighted.
    pub fn did_highlight(&self, path: IndexPath) -> Result<()> {
        self.dispatch(
            "did_highlight",
            path,
            |h| &h.did_highlight,
            |handler, row| handler(row, path),
            || {
                if let Some(delegate) = &self.delegate {
                    delegate.did_highlight(path);
                }
            },
        )
    }

    /// Notifies that the row at `path` was unhighlighted.
    pub fn did_unhighlight(&self, path: IndexPath) -> Result<()> {
        self.dispatch(
            "did_unhighlight",
            path,
            |h| &h.did_unhighlight,
            |handler, row| handler(row, path),
            || {
                if let Some(delegate) = &self.delegate {
                    delegate.did_unhighlight(path);
                }
            },
        )
    }

    /// Returns the path to select instead of `path`, or `None` to prevent the
    /// selection.
    pub fn will_select(&self, path: IndexPath) -> Result<Option<IndexPath>> {
        self.dispatch(
            "will_select",
            path,
            |h| &h.will_select,
            |handler, row| handler(row, path),
            || match &self.delegate {
                Some(delegate) => delegate.will_select(path),
                None => Some(path),
            },
        )
    }

    /// Returns the path to deselect instead of `path`, or `None` to prevent
    /// the deselection.
    pub fn will_deselect(&self, path: IndexPath) -> Result<Option<IndexPath>> {
        self.dispatch(
            "will_deselect",
            path,
            |h| &h.will_deselect,
            |handler, row| handler(row, path),
            || match &self.delegate {
                Some(delegate) => delegate.will_deselect(path),
                None => Some(path),
            },
        )
    }

    /// Notifies that the row at `path` was selected.
    ///
    /// [`SelectionResult::Deselect`] asks the host to deselect it right away.
    pub fn did_select(&self, path: IndexPath) -> Result<SelectionResult> {
        self.dispatch(
            "did_select",
            path,
            |h| &h.did_select,
            |handler, row| handler(row, path),
            || {
                if let Some(delegate) = &self.delegate {
                    delegate.did_select(path);
                }
                SelectionResult::KeepSelection
            },
        )
    }

    /// Notifies that the row at `path` was deselected.
    pub fn did_deselect(&self, path: IndexPath) -> Result<()> {
        self.dispatch(
            "did_deselect",
            path,
            |h| &h.did_deselect,
            |handler, row| handler(row, path),
            || {
                if let Some(delegate) = &self.delegate {
                    delegate.did_deselect(path);
                }
            },
        )
    }

    /// Notifies that `cell` is about to be displayed for the row at `path`.
    pub fn will_display(&self, cell: &mut H::Cell, path: IndexPath) -> Result<()> {
        let snapshot = self.snapshot();
        let row = snapshot.visible_row(path);
        let descriptor = self.registry.resolve(row.kind(), Some(path))?;

        match descriptor.handlers.layered(&self.handlers, |h| &h.will_display) {
            Some((tier, handler)) => {
                tracing::trace!(
                    target: targets::DISPATCH,
                    query = "will_display",
                    %path,
                    ?tier,
                    "resolved"
                );
                handler(row, cell, path);
            }
            None => {
                if let Some(delegate) = &self.delegate {
                    delegate.will_display(cell, path);
                }
            }
        }
        Ok(())
    }

    /// Notifies that `cell` left the screen.
    ///
    /// The row may already be gone from the model, so only the global hook
    /// and the fallback delegate are consulted.
    pub fn did_end_displaying(&self, cell: &mut H::Cell, path: IndexPath) {
        if let Some(handler) = &self.hooks.did_end_displaying {
            handler(cell, path);
        } else if let Some(delegate) = &self.delegate {
            delegate.did_end_displaying(cell, path);
        }
    }

    /// Returns the editing style of the row at `path`.
    ///
    /// Without a handler or a delegate answer, editable rows get
    /// [`EditingStyle::Delete`] and all others [`EditingStyle::None`].
    pub fn editing_style(&self, path: IndexPath) -> Result<EditingStyle> {
        let style = self.dispatch(
            "editing_style",
            path,
            |h| &h.editing_style,
            |handler, row| Some(handler(row, path)),
            || {
                self.delegate
                    .as_ref()
                    .and_then(|delegate| delegate.editing_style(path))
            },
        )?;
        match style {
            Some(style) => Ok(style),
            None if self.can_edit(path)? => Ok(EditingStyle::Delete),
            None => Ok(EditingStyle::None),
        }
    }

    /// Returns the title of the delete confirmation button.
    pub fn title_for_delete_confirmation(&self, path: IndexPath) -> Result<Option<String>> {
        self.dispatch(
            "title_for_delete_confirmation",
            path,
            |h| &h.title_for_delete_confirmation,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .and_then(|delegate| delegate.title_for_delete_confirmation(path))
            },
        )
    }

    /// Returns whether the row at `path` is indented while editing.
    pub fn should_indent_while_editing(&self, path: IndexPath) -> Result<bool> {
        self.dispatch(
            "should_indent_while_editing",
            path,
            |h| &h.should_indent_while_editing,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .map(|delegate| delegate.should_indent_while_editing(path))
                    .unwrap_or(true)
            },
        )
    }

    /// Notifies that the row at `path` is about to enter editing mode.
    pub fn will_begin_editing(&self, path: IndexPath) -> Result<()> {
        self.dispatch(
            "will_begin_editing",
            path,
            |h| &h.will_begin_editing,
            |handler, row| handler(row, path),
            || {
                if let Some(delegate) = &self.delegate {
                    delegate.will_begin_editing(path);
                }
            },
        )
    }

    /// Notifies that editing ended.
    ///
    /// With `None` the host no longer knows which row was edited: the kind
    /// tier is skipped and the global handler receives no row.
    pub fn did_end_editing(&self, path: Option<IndexPath>) -> Result<()> {
        match path {
            Some(path) => self.dispatch(
                "did_end_editing",
                path,
                |h| &h.did_end_editing,
                |handler, row| handler(Some(row), Some(path)),
                || {
                    if let Some(delegate) = &self.delegate {
                        delegate.did_end_editing(Some(path));
                    }
                },
            ),
            None => {
                if let Some(handler) = &self.handlers.did_end_editing {
                    handler(None, None);
                } else if let Some(delegate) = &self.delegate {
                    delegate.did_end_editing(None);
                }
                Ok(())
            }
        }
    }

    /// Returns where the row being moved from `from` lands when dropped at
    /// `proposed`. Resolves on the row at `from`.
    pub fn target_for_move(&self, from: IndexPath, proposed: IndexPath) -> Result<IndexPath> {
        self.dispatch(
            "target_for_move",
            from,
            |h| &h.target_for_move,
            |handler, row| handler(row, from, proposed),
            || match &self.delegate {
                Some(delegate) => delegate.target_for_move(from, proposed),
                None => proposed,
            },
        )
    }

    /// Returns the indentation level of the row at `path`.
    pub fn indentation_level(&self, path: IndexPath) -> Result<usize> {
        self.dispatch(
            "indentation_level",
            path,
            |h| &h.indentation_level,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .map(|delegate| delegate.indentation_level(path))
                    .unwrap_or(0)
            },
        )
    }

    /// Returns whether the row at `path` can receive focus.
    pub fn can_focus(&self, path: IndexPath) -> Result<bool> {
        self.dispatch(
            "can_focus",
            path,
            |h| &h.can_focus,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .map(|delegate| delegate.can_focus(path))
                    .unwrap_or(true)
            },
        )
    }

    /// Returns the swipe actions of the row at `path`.
    ///
    /// `None` leaves the host's default actions in place.
    pub fn edit_actions(&self, path: IndexPath) -> Result<Option<Vec<RowAction>>> {
        self.dispatch(
            "edit_actions",
            path,
            |h| &h.edit_actions,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .and_then(|delegate| delegate.edit_actions(path))
            },
        )
    }

    /// Returns whether the row at `path` shows the edit menu.
    pub fn should_show_menu(&self, path: IndexPath) -> Result<bool> {
        self.dispatch(
            "should_show_menu",
            path,
            |h| &h.should_show_menu,
            |handler, row| handler(row, path),
            || {
                self.delegate
                    .as_ref()
                    .is_some_and(|delegate| delegate.should_show_menu(path))
            },
        )
    }

    /// Returns whether the menu action `action` is offered for the row at
    /// `path`.
    pub fn can_perform_action(&self, action: &str, path: IndexPath) -> Result<bool> {
        self.dispatch(
            "can_perform_action",
            path,
            |h| &h.can_perform_action,
            |handler, row| handler(row, action, path),
            || {
                self.delegate
                    .as_ref()
                    .is_some_and(|delegate| delegate.can_perform_action(action, path))
            },
        )
    }

    /// Performs the action `action` on the row at `path`.
    ///
    /// Covers both menu actions and triggered [`RowAction`]s.
    pub fn perform_action(&self, action: &str, path: IndexPath) -> Result<()> {
        self.dispatch(
            "perform_action",
            path,
            |h| &h.perform_action,
            |handler, row| handler(row, action, path),
            || {
                if let Some(delegate) = &self.delegate {
                    delegate.perform_action(action, path);
                }
            },
        )
    }

    // =========================================================================
    // Prefetching
    // =========================================================================

    /// Notifies that the rows at `paths` will be displayed soon.
    pub fn prefetch_rows(&self, paths: &[IndexPath]) {
        if let Some(handler) = &self.hooks.prefetch_rows {
            handler(paths);
        } else if let Some(prefetch) = &self.prefetch {
            prefetch.prefetch_rows(paths);
        }
    }

    /// Notifies that the rows at `paths` no longer need prefetching.
    pub fn cancel_prefetching(&self, paths: &[IndexPath]) {
        if let Some(handler) = &self.hooks.cancel_prefetching {
            handler(paths);
        } else if let Some(prefetch) = &self.prefetch {
            prefetch.cancel_prefetching(paths);
        }
    }
}

impl<T: Clone, H: ListHost> DataSource<T, H> {
    /// Returns a copy of the full model.
    pub fn sections(&self) -> Vec<Section<T>> {
        self.snapshot().sections().to_vec()
    }

    /// Returns copies of the visible sections with hidden rows removed.
    pub fn visible_sections(&self) -> Vec<Section<T>> {
        self.snapshot().visible_sections()
    }

    /// Returns a copy of the section at `index` in the full model.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn section(&self, index: usize) -> Section<T> {
        self.snapshot().section(index).clone()
    }

    /// Returns a copy of the row at `path` in the full model.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of range.
    pub fn row(&self, path: IndexPath) -> Row<T> {
        self.snapshot().row(path).clone()
    }

    /// Returns a copy of the visible section at `index`, hidden rows included.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range of the projection.
    pub fn visible_section(&self, index: usize) -> Section<T> {
        self.snapshot().visible_section(index).clone()
    }

    /// Returns a copy of the row at a visible position.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of range of the projection.
    pub fn visible_row(&self, path: IndexPath) -> Row<T> {
        self.snapshot().visible_row(path).clone()
    }

    /// Replaces one section in place and recomputes visibility.
    ///
    /// The slot is the first section whose key equals `key`, or the
    /// replacement's own key when `key` is `None`. When neither is set, the
    /// first section without a key is replaced. Returns `false`, and changes
    /// nothing, when no section matches.
    pub fn replace(&self, key: Option<&str>, section: Section<T>) -> bool {
        self.check_thread("replace");

        let snapshot = self.snapshot();
        let target = key.or(section.key());
        let Some(index) = snapshot
            .sections()
            .iter()
            .position(|existing| existing.key() == target)
        else {
            datasource_debug!(key = ?target, "no section to replace");
            return false;
        };

        let mut sections = snapshot.sections().to_vec();
        sections[index] = section;
        self.apply(Arc::new(sections));
        true
    }
}

impl<T, H: ListHost> fmt::Debug for DataSource<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("registry", &self.registry)
            .field("snapshot", &self.snapshot())
            .field("handlers", &self.handlers)
            .field("fallback", &self.fallback.is_some())
            .field("delegate", &self.delegate.is_some())
            .field("prefetch", &self.prefetch.is_some())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use static_assertions::assert_impl_all;

    #[derive(Default)]
    struct Host {
        templates: Vec<&'static str>,
        registered: Mutex<Vec<String>>,
        reloads: Mutex<usize>,
    }

    impl ListHost for Host {
        type Cell = String;
        type View = String;

        fn dequeue_cell(&self, template: &str, _path: IndexPath) -> String {
            format!("{template}:")
        }

        fn template_exists(&self, template: &str) -> bool {
            self.templates.iter().any(|known| *known == template)
        }

        fn register_template(&self, template: &str) {
            self.registered.lock().push(template.to_owned());
        }

        fn reload_data(&self) {
            *self.reloads.lock() += 1;
        }
    }

    type Source = DataSource<&'static str, Host>;

    assert_impl_all!(Source: Send, Sync);

    fn text() -> KindDescriptor<&'static str, String> {
        KindDescriptor::<&'static str, String>::new("text")
            .with_configure(|row, cell, _| cell.push_str(row.item()))
    }

    fn section(key: &str, items: &[&'static str]) -> Section<&'static str> {
        Section::new(items.iter().map(|item| Row::new("text", *item)).collect()).with_key(key)
    }

    #[test]
    fn test_counts_follow_projection() {
        let source = Source::builder([text()])
            .with_row_hidden(|row, _| *row.item() == "r2")
            .with_sections(vec![section("a", &["r1", "r2"]), section("b", &["r3"])])
            .build();

        assert_eq!(source.number_of_sections(), 2);
        assert_eq!(source.number_of_rows(0), 1);
        assert_eq!(source.visible_row(IndexPath::new(0, 0)).item(), &"r1");
    }

    #[test]
    fn test_reset_signals_wrap_replacement() {
        let source = Source::new([text()]);
        let events = Arc::new(Mutex::new(Vec::new()));

        let recorder = events.clone();
        source.signals().model_about_to_reset.connect(move |_| {
            recorder.lock().push("about_to_reset");
        });
        let recorder = events.clone();
        source.signals().model_reset.connect(move |_| {
            recorder.lock().push("reset");
        });

        source.set_sections(vec![section("a", &["r1"])]);
        assert_eq!(*events.lock(), vec!["about_to_reset", "reset"]);
    }

    #[test]
    fn test_update_reloads_host() {
        let host = Host::default();
        let source = Source::new([text()]);

        source.update(Some(vec![section("a", &["r1"])]), &host);
        source.update(None, &host);

        assert_eq!(*host.reloads.lock(), 2);
        assert_eq!(source.number_of_sections(), 1);
    }

    #[test]
    fn test_set_row_hidden_recomputes() {
        let source = Source::builder([text()])
            .with_sections(vec![section("a", &["r1", "r2"])])
            .build();
        assert_eq!(source.number_of_rows(0), 2);

        source.set_row_hidden(|row, _| *row.item() == "r1");
        assert_eq!(source.number_of_rows(0), 1);

        source.clear_row_hidden();
        assert_eq!(source.number_of_rows(0), 2);
    }

    #[test]
    fn test_predicate_swap_off_owner_thread_is_rejected() {
        let source = Arc::new(
            Source::builder([text()])
                .with_options(DataSourceOptions::new().with_thread_checks(true))
                .with_sections(vec![section("a", &["r1", "r2"])])
                .build(),
        );

        let worker = source.clone();
        let result = std::thread::spawn(move || worker.set_row_hidden(|_, _| true)).join();
        assert!(result.is_err());
        assert_eq!(source.number_of_rows(0), 2);

        let worker = source.clone();
        let result = std::thread::spawn(move || worker.set_section_hidden(|_, _| true)).join();
        assert!(result.is_err());

        // The rejected predicates were never stored.
        source.refresh_visibility();
        assert_eq!(source.number_of_sections(), 1);
        assert_eq!(source.number_of_rows(0), 2);
    }

    #[test]
    fn test_cell_for_row_registers_template_once() {
        let host = Host {
            templates: vec!["text"],
            ..Host::default()
        };
        let source = Source::builder([text()])
            .with_sections(vec![section("a", &["r1", "r2"])])
            .build();

        let registered = Arc::new(Mutex::new(Vec::new()));
        let recorder = registered.clone();
        source.signals().template_registered.connect(move |template| {
            recorder.lock().push(template.clone());
        });

        assert_eq!(source.cell_for_row(&host, IndexPath::new(0, 0)).unwrap(), "text:r1");
        assert_eq!(source.cell_for_row(&host, IndexPath::new(0, 1)).unwrap(), "text:r2");

        assert_eq!(*host.registered.lock(), vec!["text".to_string()]);
        assert_eq!(*registered.lock(), vec!["text".to_string()]);
        assert!(source.is_template_prepared("text"));
    }

    #[test]
    fn test_template_registration_can_be_disabled() {
        let host = Host {
            templates: vec!["text"],
            ..Host::default()
        };
        let source = Source::builder([text()])
            .with_options(DataSourceOptions::new().with_register_templates(false))
            .with_sections(vec![section("a", &["r1"])])
            .build();

        source.cell_for_row(&host, IndexPath::new(0, 0)).unwrap();
        assert!(host.registered.lock().is_empty());
    }

    #[test]
    fn test_editing_style_derives_from_can_edit() {
        let editable = KindDescriptor::new("editable").with_can_edit(|_, _| true);
        let source = Source::builder([text(), editable])
            .with_sections(vec![Section::new(vec![
                Row::new("text", "a"),
                Row::new("editable", "b"),
            ])])
            .build();

        assert_eq!(source.editing_style(IndexPath::new(0, 0)).unwrap(), EditingStyle::None);
        assert_eq!(source.editing_style(IndexPath::new(0, 1)).unwrap(), EditingStyle::Delete);
    }

    #[test]
    fn test_header_title_prefers_own_descriptor() {
        let source = Source::builder([text()])
            .with_section_header(|_, index| HeaderFooter::title(format!("Section {index}")))
            .with_sections(vec![
                section("a", &["r1"]).with_header(HeaderFooter::title("Own")),
                section("b", &["r2"]),
                section("c", &["r3"]).with_header(HeaderFooter::None),
            ])
            .build();

        assert_eq!(source.title_for_header(0).as_deref(), Some("Own"));
        assert_eq!(source.title_for_header(1).as_deref(), Some("Section 1"));
        assert_eq!(source.title_for_header(2), None);
        assert_eq!(source.header_height(2), Height::Zero);
        assert_eq!(source.title_for_footer(0).as_deref(), None);
    }

    #[test]
    fn test_neutral_defaults() {
        let source = Source::builder([text()])
            .with_sections(vec![section("a", &["r1"])])
            .build();
        let path = IndexPath::new(0, 0);

        assert!(!source.can_edit(path).unwrap());
        assert!(!source.can_move(path).unwrap());
        assert!(source.should_highlight(path).unwrap());
        assert_eq!(source.will_select(path).unwrap(), Some(path));
        assert_eq!(source.did_select(path).unwrap(), SelectionResult::KeepSelection);
        assert_eq!(source.height(path).unwrap(), Height::Automatic);
        assert_eq!(source.estimated_height(path), Height::Automatic);
        assert_eq!(source.indentation_level(path).unwrap(), 0);
        assert!(source.can_focus(path).unwrap());
        assert!(source.should_indent_while_editing(path).unwrap());
        assert_eq!(
            source.target_for_move(path, IndexPath::new(0, 3)).unwrap(),
            IndexPath::new(0, 3)
        );
        assert_eq!(source.section_index_titles(), None);
        assert_eq!(source.section_for_section_index_title("A", 4), 4);
        assert_eq!(source.header_height(0), Height::Automatic);
        assert_eq!(source.view_for_header(0), None);
        assert_eq!(source.edit_actions(path).unwrap(), None);
        assert!(!source.should_show_menu(path).unwrap());
        assert!(!source.can_perform_action("copy", path).unwrap());
        source.perform_action("copy", path).unwrap();
    }

    #[test]
    fn test_section_view_hooks_see_visible_section() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let ended = seen.clone();

        let source = Source::builder([text()])
            .with_section_hidden(|section, _| section.key() == Some("hidden"))
            .with_will_display_header(move |section, view: &mut String, index| {
                view.push_str(section.key().unwrap_or_default());
                recorder.lock().push(format!("will {index}"));
            })
            .with_did_end_displaying_header(move |view: &mut String, index| {
                view.clear();
                ended.lock().push(format!("end {index}"));
            })
            .with_sections(vec![
                section("hidden", &["r0"]),
                section("a", &["r1"]),
                section("b", &["r2"]),
            ])
            .build();

        let mut view = String::new();
        source.will_display_header(&mut view, 1);
        assert_eq!(view, "b");

        // Ending display never looks the section up.
        source.did_end_displaying_header(&mut view, 7);
        assert!(view.is_empty());
        assert_eq!(*seen.lock(), vec!["will 1".to_string(), "end 7".to_string()]);

        // Footers have no hook here and no delegate, so nothing happens.
        source.will_display_footer(&mut view, 0);
        assert!(view.is_empty());
    }

    #[test]
    fn test_validate_reports_full_model_position() {
        let source = Source::builder([text()])
            .with_row_hidden(|row, _| row.kind() == "ghost")
            .with_sections(vec![Section::new(vec![
                Row::new("text", "a"),
                Row::new("ghost", "b"),
            ])])
            .build();

        assert_eq!(
            source.validate(),
            Err(DataSourceError::unregistered_kind("ghost", Some(IndexPath::new(0, 1))))
        );
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_query_panics() {
        let source = Source::new([text()]);
        let _ = source.can_edit(IndexPath::new(0, 0));
    }
}
