//! Declarative sectioned model for host list widgets.
//!
//! This module separates *what* a list shows from *how* the host widget
//! shows it. The consumer declares sections of rows; each row names a kind,
//! and the kind's descriptor says how rows of that kind render and behave.
//!
//! # Core Types
//!
//! - [`IndexPath`]: a (section, row) position
//! - [`Row`] and [`Section`]: the declared model
//! - [`KindDescriptor`] and [`KindRegistry`]: per-kind rendering and handlers
//! - [`Snapshot`]: the model together with its visible projection
//! - [`DataSource`](crate::DataSource): owns the model and answers queries
//!
//! # Collaborators
//!
//! - [`ListHost`]: the host widget (dequeues cells, registers templates)
//! - [`DataSourceFallback`], [`DelegateFallback`], [`PrefetchFallback`]:
//!   consulted when no handler answers a query
//!
//! # Query Resolution
//!
//! ```text
//! host query ──> visible position ──> row ──> kind descriptor
//!                                              │
//!     ┌────────────────────────────────────────┘
//!     v
//! kind handler ──> global handler ──> fallback ──> neutral default
//! ```
//!
//! Rendering has no neutral default: a row nobody can render is reported
//! as [`DataSourceError::MissingRenderer`](crate::DataSourceError::MissingRenderer).
//!
//! # Global Hooks
//!
//! Section-level and position-only hooks have no kind tier. They are set
//! with the `with_*` methods of [`DataSourceBuilder`]; the table that holds
//! them is internal.
//!
//! ```compile_fail
//! use horizon_datasource::model::GlobalHooks;
//! ```

mod datasource;
mod debug;
mod fallback;
pub(crate) mod handlers;
mod host;
mod index;
mod options;
mod registry;
mod row;
mod section;
mod visibility;

pub use datasource::{DataSource, DataSourceBuilder, DataSourceSignals};
pub use debug::{SectionTreeDebug, TreeFormatOptions, TreeStyle};
pub use fallback::{DataSourceFallback, DelegateFallback, PrefetchFallback};
pub use handlers::{
    ActionFn, CellFn, CommitEditingFn, DidEndDisplayingFn, DidEndDisplayingViewFn,
    DidEndEditingFn, EditingStyle, IndexTitlesFn, MoveRowFn, PathFn, PathsFn, RowAction,
    RowActionStyle, RowFn, RowHandlers, SectionForIndexFn, SectionHeaderFooterFn,
    SectionHeightFn, SectionViewFn, SelectionResult, TargetForMoveFn,
};
pub use host::ListHost;
pub use index::IndexPath;
pub use options::DataSourceOptions;
pub use registry::{KindDescriptor, KindRegistry, TemplateCache};
pub use row::{Row, RowIdentity, RowPredicate};
pub use section::{HeaderFooter, HeaderFooterView, Height, Section, SectionPredicate};
pub use visibility::{Snapshot, VisibleSection, compute_projection};
