//! Logging facilities for Horizon DataSource.
//!
//! This module provides:
//! - Target and span names for the `tracing` crate
//! - A performance span guard for timing model passes
//! - `datasource_debug!` for the data source target
//!
//! # Tracing Integration
//!
//! Horizon DataSource uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_datasource=debug")
//!         .init();
//! }
//! ```

/// Span names used throughout Horizon DataSource for tracing.
pub mod span_names {
    /// Visibility recomputation span.
    pub const VISIBILITY: &str = "horizon_datasource::visibility";
    /// Query resolution span.
    pub const DISPATCH: &str = "horizon_datasource::dispatch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "horizon_datasource_core";
    /// Signal system target.
    pub const SIGNAL: &str = "horizon_datasource_core::signal";
    /// Data source target.
    pub const DATASOURCE: &str = "horizon_datasource";
    /// Visibility engine target.
    pub const VISIBILITY: &str = "horizon_datasource::visibility";
    /// Kind registry target.
    pub const REGISTRY: &str = "horizon_datasource::registry";
    /// Query resolution target.
    pub const DISPATCH: &str = "horizon_datasource::dispatch";
}

/// Keeps a `perf` span entered until dropped, so a subscriber with span
/// timing shows how long a visibility pass or a query took.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enters a span for `name`, one of the [`span_names`].
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_datasource::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Logs at debug level on the [`targets::DATASOURCE`] target.
///
/// The caller must depend on `tracing`.
#[macro_export]
macro_rules! datasource_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_datasource", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("horizon_datasource=trace")
            .with_test_writer()
            .try_init();
        let _span = PerfSpan::new(span_names::VISIBILITY);
        crate::datasource_debug!(sections = 2, "inside span");
    }

    #[test]
    fn test_targets_are_namespaced() {
        assert!(targets::VISIBILITY.starts_with(targets::DATASOURCE));
        assert!(targets::SIGNAL.starts_with(targets::CORE));
        assert_eq!(span_names::VISIBILITY, targets::VISIBILITY);
    }
}
