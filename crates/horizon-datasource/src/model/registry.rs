//! Kind descriptors and the registry that resolves them.

use std::collections::{HashMap, HashSet};
use std::fmt;

use parking_lot::Mutex;

use super::handlers::{row_handler_setters, RowHandlers};
use super::index::IndexPath;
use crate::error::{DataSourceError, Result};
use horizon_datasource_core::logging::targets;

/// Describes how rows of one kind are rendered and how they behave.
///
/// The template identifier is what the host dequeues cells by. It defaults
/// to the kind identifier.
///
/// # Example
///
/// ```
/// use horizon_datasource::model::{Height, KindDescriptor};
///
/// let contact = KindDescriptor::<String, String>::new("contact")
///     .with_template("ContactCell")
///     .with_configure(|row, cell, _path| *cell = row.item().clone())
///     .with_height(|_row, _path| Height::Value(56.0));
///
/// assert_eq!(contact.kind(), "contact");
/// assert_eq!(contact.template(), "ContactCell");
/// ```
pub struct KindDescriptor<T, C> {
    kind: String,
    template: String,
    pub(crate) handlers: RowHandlers<T, C>,
}

impl<T, C> KindDescriptor<T, C> {
    /// Creates a descriptor whose template is the kind identifier.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            template: kind.clone(),
            kind,
            handlers: RowHandlers::new(),
        }
    }

    /// Sets the host template identifier.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Returns the kind identifier.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the host template identifier.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the handler table.
    pub fn handlers(&self) -> &RowHandlers<T, C> {
        &self.handlers
    }

    row_handler_setters!(T, C);
}

impl<T, C> Clone for KindDescriptor<T, C> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            template: self.template.clone(),
            handlers: self.handlers.clone(),
        }
    }
}

impl<T, C> fmt::Debug for KindDescriptor<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindDescriptor")
            .field("kind", &self.kind)
            .field("template", &self.template)
            .field("handlers", &self.handlers)
            .finish()
    }
}

/// Maps kind identifiers to descriptors.
///
/// Built once when the data source is created and never changed afterwards.
pub struct KindRegistry<T, C> {
    descriptors: HashMap<String, KindDescriptor<T, C>>,
}

impl<T, C> KindRegistry<T, C> {
    /// Builds a registry from descriptors.
    ///
    /// If two descriptors share a kind identifier, the later one wins.
    pub fn new(descriptors: impl IntoIterator<Item = KindDescriptor<T, C>>) -> Self {
        let mut map = HashMap::new();
        for descriptor in descriptors {
            if let Some(previous) = map.insert(descriptor.kind.clone(), descriptor) {
                tracing::warn!(
                    target: targets::REGISTRY,
                    kind = previous.kind(),
                    "duplicate kind descriptor, keeping the later one"
                );
            }
        }
        Self { descriptors: map }
    }

    /// Looks up the descriptor for `kind`.
    ///
    /// `path` is only used to give the error a location.
    pub fn resolve(&self, kind: &str, path: Option<IndexPath>) -> Result<&KindDescriptor<T, C>> {
        self.descriptors.get(kind).ok_or_else(|| {
            tracing::error!(
                target: targets::REGISTRY,
                kind,
                path = ?path,
                "row references an unregistered kind"
            );
            DataSourceError::unregistered_kind(kind, path)
        })
    }

    /// Returns the descriptor for `kind`, if registered.
    pub fn get(&self, kind: &str) -> Option<&KindDescriptor<T, C>> {
        self.descriptors.get(kind)
    }

    /// Returns `true` if `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.descriptors.contains_key(kind)
    }

    /// Returns the number of registered kinds.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no kind is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns the registered kind identifiers, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl<T, C> fmt::Debug for KindRegistry<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Remembers which host templates were already prepared.
///
/// The first time a template is used, the host is asked whether a template
/// resource by that name exists and, if so, to register it. A template the
/// host reports as missing is not remembered, so it is checked again on the
/// next use.
#[derive(Debug, Default)]
pub struct TemplateCache {
    prepared: Mutex<HashSet<String>>,
}

impl TemplateCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares `template` once.
    ///
    /// On first use, calls `exists`; if it reports the template, calls
    /// `register` and remembers it. Returns `true` if `register` ran.
    pub fn prepare(
        &self,
        template: &str,
        exists: impl FnOnce(&str) -> bool,
        register: impl FnOnce(&str),
    ) -> bool {
        if self.prepared.lock().contains(template) {
            return false;
        }
        if !exists(template) {
            tracing::trace!(
                target: targets::REGISTRY,
                template,
                "template not found, will check again"
            );
            return false;
        }
        // Register outside the lock: the host may call back into the data source.
        register(template);
        self.prepared.lock().insert(template.to_owned());
        true
    }

    /// Returns `true` if `template` was prepared.
    pub fn is_prepared(&self, template: &str) -> bool {
        self.prepared.lock().contains(template)
    }

    /// Returns the number of prepared templates.
    pub fn len(&self) -> usize {
        self.prepared.lock().len()
    }

    /// Returns `true` if no template was prepared yet.
    pub fn is_empty(&self) -> bool {
        self.prepared.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_template_defaults_to_kind() {
        let descriptor: KindDescriptor<(), ()> = KindDescriptor::new("text");
        assert_eq!(descriptor.template(), "text");
        assert!(descriptor.handlers().configured().is_empty());
    }

    #[test]
    fn test_setters_fill_slots() {
        let descriptor = KindDescriptor::<u32, String>::new("number")
            .with_configure(|row, cell, _| *cell = row.item().to_string())
            .with_can_edit(|row, _| *row.item() > 1);

        assert_eq!(descriptor.handlers().configured(), vec!["configure", "can_edit"]);

        let mut cell = String::new();
        let configure = descriptor.handlers.configure.as_ref().unwrap();
        configure(&Row::new("number", 7), &mut cell, IndexPath::default());
        assert_eq!(cell, "7");
    }

    #[test]
    fn test_resolve_unregistered_kind() {
        let registry: KindRegistry<(), ()> = KindRegistry::new([KindDescriptor::new("a")]);
        assert!(registry.resolve("a", None).is_ok());

        let err = registry.resolve("b", Some(IndexPath::new(0, 2))).unwrap_err();
        assert_eq!(
            err,
            DataSourceError::unregistered_kind("b", Some(IndexPath::new(0, 2)))
        );
    }

    #[test]
    fn test_later_duplicate_wins() {
        let registry: KindRegistry<(), ()> = KindRegistry::new([
            KindDescriptor::new("a").with_template("First"),
            KindDescriptor::new("b"),
            KindDescriptor::new("a").with_template("Second"),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.kinds(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().template(), "Second");
    }

    #[test]
    fn test_template_cache_registers_once() {
        let cache = TemplateCache::new();
        let registered = AtomicUsize::new(0);
        let register = |_: &str| {
            registered.fetch_add(1, Ordering::SeqCst);
        };

        assert!(cache.prepare("Cell", |_| true, register));
        assert!(!cache.prepare("Cell", |_| true, register));
        assert_eq!(registered.load(Ordering::SeqCst), 1);
        assert!(cache.is_prepared("Cell"));
    }

    #[test]
    fn test_template_cache_rechecks_missing() {
        let cache = TemplateCache::new();
        let checks = AtomicUsize::new(0);
        let exists = |_: &str| {
            checks.fetch_add(1, Ordering::SeqCst);
            false
        };

        assert!(!cache.prepare("Missing", exists, |_| {}));
        assert!(!cache.prepare("Missing", exists, |_| {}));
        assert_eq!(checks.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }
}
