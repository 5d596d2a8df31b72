//! Prelude module for Horizon DataSource.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use horizon_datasource::prelude::*;
//! ```
//!
//! This provides access to:
//! - The data source and its builder (`DataSource`, `DataSourceBuilder`)
//! - The declared model (`Row`, `Section`, `HeaderFooter`, `IndexPath`)
//! - Kinds and collaborators (`KindDescriptor`, `ListHost`, fallbacks)

// ============================================================================
// Data Source
// ============================================================================

pub use crate::model::{DataSource, DataSourceBuilder, DataSourceOptions};
pub use crate::{DataSourceError, Result};

// ============================================================================
// Declared Model
// ============================================================================

pub use crate::model::{HeaderFooter, HeaderFooterView, Height, IndexPath, Row, Section};

// ============================================================================
// Kinds and Collaborators
// ============================================================================

pub use crate::model::{
    DataSourceFallback, DelegateFallback, EditingStyle, KindDescriptor, ListHost,
    PrefetchFallback, RowAction, RowActionStyle, SelectionResult,
};

// ============================================================================
// Signals
// ============================================================================

pub use horizon_datasource_core::Signal;
