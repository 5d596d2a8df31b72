//! Horizon DataSource - declarative sections and rows for host list widgets.
//!
//! Describe a scrollable list as sections of rows, give every row a kind,
//! and let the [`DataSource`] answer the host widget's rendering and
//! interaction queries. Each query resolves through a layered chain: the
//! handler of the row's kind, then the global handler, then an external
//! fallback, then a neutral default.
//!
//! # Example
//!
//! ```
//! use horizon_datasource::prelude::*;
//!
//! struct Labels;
//!
//! impl ListHost for Labels {
//!     type Cell = String;
//!     type View = ();
//!
//!     fn dequeue_cell(&self, _template: &str, _path: IndexPath) -> String {
//!         String::new()
//!     }
//! }
//!
//! fn main() -> horizon_datasource::Result<()> {
//!     let title = KindDescriptor::new("title")
//!         .with_configure(|row: &Row<String>, cell: &mut String, _| cell.push_str(row.item()))
//!         .with_can_edit(|_, _| true);
//!
//!     let data_source = DataSource::<String, Labels>::builder([title])
//!         .with_sections(vec![
//!             Section::new(vec![Row::new("title", "Inbox".to_string())])
//!                 .with_key("mailboxes")
//!                 .with_header(HeaderFooter::title("Mailboxes")),
//!         ])
//!         .build();
//!
//!     let path = IndexPath::new(0, 0);
//!     assert_eq!(data_source.cell_for_row(&Labels, path)?, "Inbox");
//!     assert!(data_source.can_edit(path)?);
//!     assert_eq!(data_source.title_for_header(0).as_deref(), Some("Mailboxes"));
//!     Ok(())
//! }
//! ```

pub use horizon_datasource_core::*;

mod error;
pub mod model;
pub mod prelude;

pub use error::{DataSourceError, Result};
pub use model::DataSource;
