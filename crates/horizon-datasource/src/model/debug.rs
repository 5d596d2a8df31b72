//! Debug visualization of a sectioned model.
//!
//! [`SectionTreeDebug`] renders every declared section and row, marking
//! which ones made it into the visible projection:
//!
//! ```text
//! Sections (2 total, 1 visible):
//! ├── [0] key=contacts (visible)
//! │   ├── [0, 0] contact key=ada (visible)
//! │   └── [0, 1] contact key=bob (hidden)
//! └── [1] key=empty (hidden)
//! ```

use super::host::ListHost;
use super::index::IndexPath;
use super::section::{HeaderFooter, Section};
use super::visibility::Snapshot;
use crate::DataSource;

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact, dash-prefixed lines.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show section and row keys.
    pub show_keys: bool,
    /// Whether to show header and footer titles.
    pub show_titles: bool,
    /// Whether to list hidden sections and rows.
    pub show_hidden: bool,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_keys: true,
            show_titles: false,
            show_hidden: true,
            indent_size: 3,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed output.
    pub fn detailed() -> Self {
        Self {
            show_titles: true,
            ..Default::default()
        }
    }

    /// Options that only list what is visible.
    pub fn visible_only() -> Self {
        Self {
            show_keys: false,
            show_hidden: false,
            ..Default::default()
        }
    }
}

/// Renders a [`Snapshot`] as a tree of sections and rows.
#[derive(Debug, Clone, Default)]
pub struct SectionTreeDebug {
    options: TreeFormatOptions,
}

impl SectionTreeDebug {
    /// Creates a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Formats the whole snapshot.
    pub fn format<T>(&self, snapshot: &Snapshot<T>) -> String {
        let mut output = format!(
            "Sections ({} total, {} visible):\n",
            snapshot.sections().len(),
            snapshot.visible_section_count()
        );

        let sections: Vec<(usize, &Section<T>, bool)> = snapshot
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| {
                let visible = snapshot
                    .visible()
                    .iter()
                    .any(|visible| visible.source_index() == index);
                (index, section, visible)
            })
            .filter(|&(_, _, visible)| visible || self.options.show_hidden)
            .collect();

        if sections.is_empty() {
            output.push_str("  (empty)\n");
            return output;
        }

        let section_count = sections.len();
        for (position, (index, section, visible)) in sections.into_iter().enumerate() {
            let last_section = position + 1 == section_count;
            output.push_str(&self.connector(last_section));
            output.push_str(&self.section_label(index, section, visible));
            output.push('\n');

            let rows: Vec<(IndexPath, &str, Option<&str>, bool)> = section
                .rows()
                .iter()
                .enumerate()
                .map(|(row_index, row)| {
                    let path = IndexPath::new(index, row_index);
                    let visible = snapshot.visible_path(path).is_some();
                    (path, row.kind(), row.key(), visible)
                })
                .filter(|&(_, _, _, visible)| visible || self.options.show_hidden)
                .collect();

            let row_count = rows.len();
            for (row_position, (path, kind, key, visible)) in rows.into_iter().enumerate() {
                output.push_str(&self.continuation(last_section));
                output.push_str(&self.connector(row_position + 1 == row_count));
                output.push_str(&format!("{path} {kind}"));
                if self.options.show_keys {
                    if let Some(key) = key {
                        output.push_str(&format!(" key={key}"));
                    }
                }
                output.push_str(state(visible));
                output.push('\n');
            }
        }

        output
    }

    fn section_label<T>(&self, index: usize, section: &Section<T>, visible: bool) -> String {
        let mut label = format!("[{index}]");
        if self.options.show_keys {
            if let Some(key) = section.key() {
                label.push_str(&format!(" key={key}"));
            }
        }
        if self.options.show_titles {
            if let Some(title) = section.header().and_then(HeaderFooter::as_title) {
                label.push_str(&format!(" header={title:?}"));
            }
            if let Some(title) = section.footer().and_then(HeaderFooter::as_title) {
                label.push_str(&format!(" footer={title:?}"));
            }
        }
        label.push_str(state(visible));
        label
    }

    /// Builds the connector in front of an entry.
    fn connector(&self, is_last: bool) -> String {
        let connector = match (self.options.style, is_last) {
            (TreeStyle::Ascii, false) => "+--",
            (TreeStyle::Ascii, true) => "`--",
            (TreeStyle::Unicode, false) => "\u{251c}\u{2500}\u{2500}",
            (TreeStyle::Unicode, true) => "\u{2514}\u{2500}\u{2500}",
            (TreeStyle::Compact, _) => "-",
        };
        format!("{connector} ")
    }

    /// Builds the indentation under a section for its rows.
    fn continuation(&self, parent_is_last: bool) -> String {
        let branch = match self.options.style {
            TreeStyle::Ascii => "|",
            TreeStyle::Unicode => "\u{2502}",
            TreeStyle::Compact => "",
        };
        let mut prefix = String::new();
        if parent_is_last || self.options.style == TreeStyle::Compact {
            prefix.push(' ');
        } else {
            prefix.push_str(branch);
        }
        for _ in 0..self.options.indent_size {
            prefix.push(' ');
        }
        prefix
    }
}

fn state(visible: bool) -> &'static str {
    if visible { " (visible)" } else { " (hidden)" }
}

impl<T, H: ListHost> DataSource<T, H> {
    /// Renders the current model as a tree, with default options.
    pub fn debug_tree(&self) -> String {
        SectionTreeDebug::new().format(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Row, RowPredicate, compute_projection};
    use std::sync::Arc;

    fn snapshot() -> Snapshot<&'static str> {
        let sections = vec![
            Section::new(vec![
                Row::new("contact", "ada").with_key("ada"),
                Row::new("contact", "bob").with_key("bob"),
            ])
            .with_key("contacts")
            .with_header(HeaderFooter::title("People")),
            Section::new(vec![Row::new("note", "")]).with_key("notes"),
        ];
        let hidden: RowPredicate<&'static str> =
            Arc::new(|row: &Row<&'static str>, _: IndexPath| *row.item() != "ada");
        let visible = compute_projection(&sections, Some(&hidden), None);
        Snapshot::new(Arc::new(sections), visible)
    }

    #[test]
    fn test_unicode_tree() {
        let output = SectionTreeDebug::new().format(&snapshot());
        let expected = "\
Sections (2 total, 1 visible):
\u{251c}\u{2500}\u{2500} [0] key=contacts (visible)
\u{2502}   \u{251c}\u{2500}\u{2500} [0, 0] contact key=ada (visible)
\u{2502}   \u{2514}\u{2500}\u{2500} [0, 1] contact key=bob (hidden)
\u{2514}\u{2500}\u{2500} [1] key=notes (hidden)
    \u{2514}\u{2500}\u{2500} [1, 0] note (hidden)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_visible_only_ascii() {
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::visible_only()
        };
        let output = SectionTreeDebug::with_options(options).format(&snapshot());
        let expected = "\
Sections (2 total, 1 visible):
`-- [0] (visible)
    `-- [0, 0] contact (visible)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_titles() {
        let output = SectionTreeDebug::with_options(TreeFormatOptions::detailed()).format(&snapshot());
        assert!(output.contains("[0] key=contacts header=\"People\" (visible)"));
    }

    #[test]
    fn test_empty() {
        let output = SectionTreeDebug::new().format(&Snapshot::<()>::empty());
        assert_eq!(output, "Sections (0 total, 0 visible):\n  (empty)\n");
    }
}
