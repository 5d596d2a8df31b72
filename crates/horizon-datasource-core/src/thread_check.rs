//! Thread confinement checks for Horizon DataSource.
//!
//! A data source is driven by a host list widget, and the host only ever
//! calls it from the UI thread. Model replacement is not reentrant-safe and
//! nothing is locked across a query, so replacing the model from another
//! thread is a caller bug. [`ThreadAffinity`] records the owning thread and
//! lets mutations verify they run on it.
//!
//! ```
//! use horizon_datasource_core::ThreadAffinity;
//!
//! let owner = ThreadAffinity::current();
//! owner.assert_owner("set_sections");
//!
//! let moved = std::thread::spawn(move || owner.is_owner()).join().unwrap();
//! assert!(!moved);
//! ```

use std::thread::ThreadId;

/// The thread an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Binds to the calling thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            owner: std::thread::current().id(),
        }
    }

    /// The owning thread.
    #[inline]
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// Whether the calling thread is the owner.
    #[inline]
    pub fn is_owner(&self) -> bool {
        std::thread::current().id() == self.owner
    }

    /// Panics unless called on the owning thread.
    ///
    /// `operation` names the mutation in the panic message.
    ///
    /// # Panics
    ///
    /// Panics when called from any thread other than the owner.
    #[inline]
    pub fn assert_owner(&self, operation: &str) {
        if !self.is_owner() {
            self.violation(operation);
        }
    }

    #[cold]
    #[inline(never)]
    fn violation(&self, operation: &str) -> ! {
        let current = std::thread::current();
        tracing::error!(
            target: crate::logging::targets::CORE,
            operation,
            owner = ?self.owner,
            current = ?current.id(),
            "thread affinity violation"
        );

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            `{operation}` was called off the data source's owning thread.\n\
            \n\
            Owning thread: {:?}\n\
            Current thread: \"{}\" (ID: {:?})\n\
            \n\
            A data source must be mutated from the thread that drives its host\n\
            list view. Serialize model replacement onto that thread.\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.owner,
            current.name().unwrap_or("<unnamed>"),
            current.id(),
        )
    }
}
