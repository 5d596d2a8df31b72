//! External fallback collaborators.
//!
//! When neither the kind nor the global handler table answers a query, the
//! data source forwards it to one of these collaborators, if one is set.
//! Every method except [`DataSourceFallback::cell_for_row`] has a default
//! that returns the same neutral value the data source would use on its own,
//! so implementors only override what they care about.
//!
//! Results from a fallback are trusted as-is.

use super::handlers::{EditingStyle, RowAction};
use super::host::ListHost;
use super::index::IndexPath;
use super::section::{HeaderFooterView, Height};

/// Fallback for rendering and data queries.
pub trait DataSourceFallback<H: ListHost>: Send + Sync {
    /// Produces the cell for the row at `path`.
    ///
    /// Called when neither the row's kind nor the global table defines a
    /// configure handler.
    fn cell_for_row(&self, host: &H, path: IndexPath) -> H::Cell;

    /// Returns whether the row at `path` can be edited.
    fn can_edit(&self, _path: IndexPath) -> bool {
        false
    }

    /// Returns whether the row at `path` can be moved.
    fn can_move(&self, _path: IndexPath) -> bool {
        false
    }

    /// Commits an edit of the row at `path`.
    fn commit_editing(&self, _style: EditingStyle, _path: IndexPath) {}

    /// Moves the row at `from` to `to`.
    fn move_row(&self, _from: IndexPath, _to: IndexPath) {}

    /// Returns the section index titles.
    fn section_index_titles(&self) -> Option<Vec<String>> {
        None
    }

    /// Maps a section index title to a section.
    fn section_for_section_index_title(&self, _title: &str, index: usize) -> usize {
        index
    }
}

/// Fallback for interaction and layout queries.
///
/// Cells and section views are the host's own types.
#[allow(unused_variables)]
pub trait DelegateFallback<H: ListHost>: Send + Sync {
    /// Returns the row height.
    fn height(&self, path: IndexPath) -> Height {
        Height::Automatic
    }

    /// Returns the estimated row height.
    fn estimated_height(&self, path: IndexPath) -> Height {
        Height::Automatic
    }

    /// Returns the custom header view of a section.
    fn view_for_header(&self, section: usize) -> Option<HeaderFooterView> {
        None
    }

    /// Returns the custom footer view of a section.
    fn view_for_footer(&self, section: usize) -> Option<HeaderFooterView> {
        None
    }

    /// Returns the header height of a section.
    fn header_height(&self, section: usize) -> Height {
        Height::Automatic
    }

    /// Returns the footer height of a section.
    fn footer_height(&self, section: usize) -> Height {
        Height::Automatic
    }

    /// Returns whether the row can be highlighted.
    fn should_highlight(&self, path: IndexPath) -> bool {
        true
    }

    /// Called after the row was highlighted.
    fn did_highlight(&self, path: IndexPath) {}

    /// Called after the row was unhighlighted.
    fn did_unhighlight(&self, path: IndexPath) {}

    /// Returns the path to select instead, or `None` to prevent selection.
    fn will_select(&self, path: IndexPath) -> Option<IndexPath> {
        Some(path)
    }

    /// Returns the path to deselect instead, or `None` to prevent deselection.
    fn will_deselect(&self, path: IndexPath) -> Option<IndexPath> {
        Some(path)
    }

    /// Called after the row was selected.
    fn did_select(&self, path: IndexPath) {}

    /// Called after the row was deselected.
    fn did_deselect(&self, path: IndexPath) {}

    /// Called before the cell is displayed.
    fn will_display(&self, cell: &mut H::Cell, path: IndexPath) {}

    /// Called after the cell left the screen.
    fn did_end_displaying(&self, cell: &mut H::Cell, path: IndexPath) {}

    /// Called before a section header view is displayed.
    fn will_display_header(&self, view: &mut H::View, section: usize) {}

    /// Called before a section footer view is displayed.
    fn will_display_footer(&self, view: &mut H::View, section: usize) {}

    /// Called after a section header view left the screen.
    fn did_end_displaying_header(&self, view: &mut H::View, section: usize) {}

    /// Called after a section footer view left the screen.
    fn did_end_displaying_footer(&self, view: &mut H::View, section: usize) {}

    /// Returns the editing style of the row.
    ///
    /// `None` lets the data source derive the style from `can_edit`.
    fn editing_style(&self, path: IndexPath) -> Option<EditingStyle> {
        None
    }

    /// Returns the title of the delete confirmation button.
    fn title_for_delete_confirmation(&self, path: IndexPath) -> Option<String> {
        None
    }

    /// Returns whether the row is indented while editing.
    fn should_indent_while_editing(&self, path: IndexPath) -> bool {
        true
    }

    /// Called before the row enters editing mode.
    fn will_begin_editing(&self, path: IndexPath) {}

    /// Called after editing ended.
    fn did_end_editing(&self, path: Option<IndexPath>) {}

    /// Returns where a row being moved from `from` would land.
    fn target_for_move(&self, from: IndexPath, proposed: IndexPath) -> IndexPath {
        proposed
    }

    /// Returns the indentation level of the row.
    fn indentation_level(&self, path: IndexPath) -> usize {
        0
    }

    /// Returns whether the row can receive focus.
    fn can_focus(&self, path: IndexPath) -> bool {
        true
    }

    /// Returns the swipe actions of the row, or `None` for the host's own.
    fn edit_actions(&self, path: IndexPath) -> Option<Vec<RowAction>> {
        None
    }

    /// Returns whether the row shows the edit menu on long press.
    fn should_show_menu(&self, path: IndexPath) -> bool {
        false
    }

    /// Returns whether the menu action `action` is offered for the row.
    fn can_perform_action(&self, action: &str, path: IndexPath) -> bool {
        false
    }

    /// Performs the action `action` on the row.
    fn perform_action(&self, action: &str, path: IndexPath) {}
}

/// Fallback for prefetch notifications.
pub trait PrefetchFallback: Send + Sync {
    /// Called with rows that will be displayed soon.
    fn prefetch_rows(&self, paths: &[IndexPath]);

    /// Called with rows that no longer need prefetching.
    fn cancel_prefetching(&self, _paths: &[IndexPath]) {}
}
