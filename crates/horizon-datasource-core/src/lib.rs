//! Core systems for Horizon DataSource.
//!
//! This crate provides the runtime pieces the data source crate is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification for model resets
//!   and template registration
//! - **Thread Affinity**: Checks that a UI-confined object is mutated from the
//!   thread that created it
//! - **Logging**: `tracing` targets, span names and a performance span guard
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_datasource_core::Signal;
//!
//! let template_registered = Signal::<String>::new();
//!
//! let conn_id = template_registered.connect(|template| {
//!     println!("registered template {template}");
//! });
//!
//! template_registered.emit("ContactCell".to_string());
//! template_registered.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;
pub mod thread_check;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
