//! Data source configuration.

/// Options that control how a [`DataSource`](crate::DataSource) behaves.
///
/// With the `serde` feature, options can be loaded from a settings file;
/// missing fields take their default.
///
/// # Example
///
/// ```
/// use horizon_datasource::model::DataSourceOptions;
///
/// let options = DataSourceOptions::new()
///     .with_register_templates(false)
///     .with_log_visibility_passes(false);
///
/// assert!(!options.register_templates);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DataSourceOptions {
    /// Ask the host to register a cell template the first time it is used.
    pub register_templates: bool,
    /// Assert that every mutation happens on the thread that built the data
    /// source.
    pub thread_checks: bool,
    /// Log a summary of every visibility pass at debug level.
    pub log_visibility_passes: bool,
}

impl Default for DataSourceOptions {
    fn default() -> Self {
        Self {
            register_templates: true,
            thread_checks: cfg!(debug_assertions),
            log_visibility_passes: true,
        }
    }
}

impl DataSourceOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether templates are registered on first use.
    pub fn with_register_templates(mut self, enabled: bool) -> Self {
        self.register_templates = enabled;
        self
    }

    /// Sets whether mutations assert thread affinity.
    pub fn with_thread_checks(mut self, enabled: bool) -> Self {
        self.thread_checks = enabled;
        self
    }

    /// Sets whether visibility passes are logged.
    pub fn with_log_visibility_passes(mut self, enabled: bool) -> Self {
        self.log_visibility_passes = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DataSourceOptions::default();
        assert!(options.register_templates);
        assert!(options.log_visibility_passes);
        assert_eq!(options.thread_checks, cfg!(debug_assertions));
    }

    #[test]
    fn test_builder() {
        let options = DataSourceOptions::new().with_thread_checks(true);
        assert!(options.thread_checks);
        assert_eq!(
            options.with_thread_checks(false),
            DataSourceOptions {
                thread_checks: false,
                ..DataSourceOptions::default()
            }
        );
    }
}

// Settings-file round trip. Run with:
// cargo test -p horizon-datasource --features serde
#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_load_partial_json() {
        let options: DataSourceOptions =
            serde_json::from_str(r#"{ "register_templates": false }"#).unwrap();
        assert!(!options.register_templates);
        assert!(options.log_visibility_passes);
        assert_eq!(options.thread_checks, cfg!(debug_assertions));
    }

    #[test]
    fn test_save_writes_every_field() {
        let options = DataSourceOptions::new().with_thread_checks(false);
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "register_templates": true,
                "thread_checks": false,
                "log_visibility_passes": true,
            })
        );
    }
}
