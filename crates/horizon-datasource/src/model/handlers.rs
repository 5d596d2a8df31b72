//! Behavior handler tables.
//!
//! Every row query has one optional handler slot. [`RowHandlers`] is used
//! twice: once per kind (inside a [`KindDescriptor`](super::KindDescriptor))
//! and once globally (inside the [`DataSource`](crate::DataSource)). A query
//! resolves by checking the kind table first, then the global table, then
//! the fallback collaborator.
//!
//! `GlobalHooks` holds the handlers that have no per-kind tier:
//! section-level queries and position-only queries. The visibility
//! predicates sit apart in `VisibilityHooks`.

use std::fmt;
use std::sync::Arc;

use super::index::IndexPath;
use super::row::{Row, RowPredicate};
use super::section::{HeaderFooter, Height, Section, SectionPredicate};

/// Editing style of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditingStyle {
    /// The row shows no editing control.
    #[default]
    None,
    /// The row can be deleted.
    Delete,
    /// A row can be inserted here.
    Insert,
}

/// What the host should do with the selection after `did_select`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionResult {
    /// Leave the row selected.
    #[default]
    KeepSelection,
    /// Deselect the row right away.
    Deselect,
}

/// Configures a dequeued cell for a row. Also used for `will_display`.
pub type CellFn<T, C> = Arc<dyn Fn(&Row<T>, &mut C, IndexPath) + Send + Sync>;

/// Style of a [`RowAction`] button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RowActionStyle {
    /// A regular action.
    #[default]
    Normal,
    /// An action that removes or destroys data.
    Destructive,
}

/// A swipe action offered for a row while it is edited.
///
/// The action only describes the button. When the user triggers it, the host
/// reports the action's id through
/// [`DataSource::perform_action`](crate::DataSource::perform_action).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowAction {
    id: String,
    title: String,
    style: RowActionStyle,
}

impl RowAction {
    /// Creates a normal action.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            style: RowActionStyle::Normal,
        }
    }

    /// Creates a destructive action.
    pub fn destructive(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title).with_style(RowActionStyle::Destructive)
    }

    /// Sets the style.
    pub fn with_style(mut self, style: RowActionStyle) -> Self {
        self.style = style;
        self
    }

    /// The id reported back when the action is triggered.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The button title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The button style.
    pub fn style(&self) -> RowActionStyle {
        self.style
    }
}

/// A query about a row at a position.
pub type RowFn<T, R> = Arc<dyn Fn(&Row<T>, IndexPath) -> R + Send + Sync>;

/// Commits an edit of the given style.
pub type CommitEditingFn<T> = Arc<dyn Fn(&Row<T>, EditingStyle, IndexPath) + Send + Sync>;

/// Moves a row from the first position to the second.
pub type MoveRowFn<T> = Arc<dyn Fn(&Row<T>, IndexPath, IndexPath) + Send + Sync>;

/// Retargets a proposed move destination.
pub type TargetForMoveFn<T> = Arc<dyn Fn(&Row<T>, IndexPath, IndexPath) -> IndexPath + Send + Sync>;

/// Called when editing ends. The row and path are absent when the host no
/// longer knows which row was being edited.
pub type DidEndEditingFn<T> = Arc<dyn Fn(Option<&Row<T>>, Option<IndexPath>) + Send + Sync>;

/// A query about an action on a row. The action is an opaque id chosen by
/// the host.
pub type ActionFn<T, R> = Arc<dyn Fn(&Row<T>, &str, IndexPath) -> R + Send + Sync>;

/// Returns the header or footer for a section.
pub type SectionHeaderFooterFn<T> = Arc<dyn Fn(&Section<T>, usize) -> HeaderFooter + Send + Sync>;

/// Returns the header or footer height for a section.
pub type SectionHeightFn<T> = Arc<dyn Fn(&Section<T>, usize) -> Height + Send + Sync>;

/// Returns the section index titles.
pub type IndexTitlesFn = Arc<dyn Fn() -> Option<Vec<String>> + Send + Sync>;

/// Maps a section index title and its position to a section.
pub type SectionForIndexFn = Arc<dyn Fn(&str, usize) -> usize + Send + Sync>;

/// A query that only needs a position.
pub type PathFn<R> = Arc<dyn Fn(IndexPath) -> R + Send + Sync>;

/// Called after a cell left the screen.
pub type DidEndDisplayingFn<C> = Arc<dyn Fn(&mut C, IndexPath) + Send + Sync>;

/// Called before a section header or footer view is displayed.
pub type SectionViewFn<T, V> = Arc<dyn Fn(&Section<T>, &mut V, usize) + Send + Sync>;

/// Called after a section header or footer view left the screen.
pub type DidEndDisplayingViewFn<V> = Arc<dyn Fn(&mut V, usize) + Send + Sync>;

/// Called with a batch of positions.
pub type PathsFn = Arc<dyn Fn(&[IndexPath]) + Send + Sync>;

/// The handler tier that answered a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    Kind,
    Global,
}

/// Per-row behavior handlers. Every slot is optional.
pub struct RowHandlers<T, C> {
    pub(crate) configure: Option<CellFn<T, C>>,
    pub(crate) height: Option<RowFn<T, Height>>,
    pub(crate) can_edit: Option<RowFn<T, bool>>,
    pub(crate) can_move: Option<RowFn<T, bool>>,
    pub(crate) commit_editing: Option<CommitEditingFn<T>>,
    pub(crate) move_row: Option<MoveRowFn<T>>,
    pub(crate) should_highlight: Option<RowFn<T, bool>>,
    pub(crate) did_highlight: Option<RowFn<T, ()>>,
    pub(crate) did_unhighlight: Option<RowFn<T, ()>>,
    pub(crate) will_select: Option<RowFn<T, Option<IndexPath>>>,
    pub(crate) will_deselect: Option<RowFn<T, Option<IndexPath>>>,
    pub(crate) did_select: Option<RowFn<T, SelectionResult>>,
    pub(crate) did_deselect: Option<RowFn<T, ()>>,
    pub(crate) will_display: Option<CellFn<T, C>>,
    pub(crate) editing_style: Option<RowFn<T, EditingStyle>>,
    pub(crate) title_for_delete_confirmation: Option<RowFn<T, Option<String>>>,
    pub(crate) should_indent_while_editing: Option<RowFn<T, bool>>,
    pub(crate) will_begin_editing: Option<RowFn<T, ()>>,
    pub(crate) did_end_editing: Option<DidEndEditingFn<T>>,
    pub(crate) target_for_move: Option<TargetForMoveFn<T>>,
    pub(crate) indentation_level: Option<RowFn<T, usize>>,
    pub(crate) can_focus: Option<RowFn<T, bool>>,
    pub(crate) edit_actions: Option<RowFn<T, Option<Vec<RowAction>>>>,
    pub(crate) should_show_menu: Option<RowFn<T, bool>>,
    pub(crate) can_perform_action: Option<ActionFn<T, bool>>,
    pub(crate) perform_action: Option<ActionFn<T, ()>>,
}

impl<T, C> Default for RowHandlers<T, C> {
    fn default() -> Self {
        Self {
            configure: None,
            height: None,
            can_edit: None,
            can_move: None,
            commit_editing: None,
            move_row: None,
            should_highlight: None,
            did_highlight: None,
            did_unhighlight: None,
            will_select: None,
            will_deselect: None,
            did_select: None,
            did_deselect: None,
            will_display: None,
            editing_style: None,
            title_for_delete_confirmation: None,
            should_indent_while_editing: None,
            will_begin_editing: None,
            did_end_editing: None,
            target_for_move: None,
            indentation_level: None,
            can_focus: None,
            edit_actions: None,
            should_show_menu: None,
            can_perform_action: None,
            perform_action: None,
        }
    }
}

impl<T, C> Clone for RowHandlers<T, C> {
    fn clone(&self) -> Self {
        Self {
            configure: self.configure.clone(),
            height: self.height.clone(),
            can_edit: self.can_edit.clone(),
            can_move: self.can_move.clone(),
            commit_editing: self.commit_editing.clone(),
            move_row: self.move_row.clone(),
            should_highlight: self.should_highlight.clone(),
            did_highlight: self.did_highlight.clone(),
            did_unhighlight: self.did_unhighlight.clone(),
            will_select: self.will_select.clone(),
            will_deselect: self.will_deselect.clone(),
            did_select: self.did_select.clone(),
            did_deselect: self.did_deselect.clone(),
            will_display: self.will_display.clone(),
            editing_style: self.editing_style.clone(),
            title_for_delete_confirmation: self.title_for_delete_confirmation.clone(),
            should_indent_while_editing: self.should_indent_while_editing.clone(),
            will_begin_editing: self.will_begin_editing.clone(),
            did_end_editing: self.did_end_editing.clone(),
            target_for_move: self.target_for_move.clone(),
            indentation_level: self.indentation_level.clone(),
            can_focus: self.can_focus.clone(),
            edit_actions: self.edit_actions.clone(),
            should_show_menu: self.should_show_menu.clone(),
            can_perform_action: self.can_perform_action.clone(),
            perform_action: self.perform_action.clone(),
        }
    }
}

impl<T, C> RowHandlers<T, C> {
    /// Creates an empty handler table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks a handler from this table, or from `global` if this table leaves
    /// the slot empty. Also reports which of the two answered.
    pub(crate) fn layered<'a, F: ?Sized>(
        &'a self,
        global: &'a Self,
        slot: impl Fn(&'a Self) -> &'a Option<Arc<F>>,
    ) -> Option<(Tier, &'a Arc<F>)> {
        slot(self)
            .as_ref()
            .map(|handler| (Tier::Kind, handler))
            .or_else(|| slot(global).as_ref().map(|handler| (Tier::Global, handler)))
    }

    /// Returns the names of the slots that hold a handler.
    pub fn configured(&self) -> Vec<&'static str> {
        let slots = [
            ("configure", self.configure.is_some()),
            ("height", self.height.is_some()),
            ("can_edit", self.can_edit.is_some()),
            ("can_move", self.can_move.is_some()),
            ("commit_editing", self.commit_editing.is_some()),
            ("move_row", self.move_row.is_some()),
            ("should_highlight", self.should_highlight.is_some()),
            ("did_highlight", self.did_highlight.is_some()),
            ("did_unhighlight", self.did_unhighlight.is_some()),
            ("will_select", self.will_select.is_some()),
            ("will_deselect", self.will_deselect.is_some()),
            ("did_select", self.did_select.is_some()),
            ("did_deselect", self.did_deselect.is_some()),
            ("will_display", self.will_display.is_some()),
            ("editing_style", self.editing_style.is_some()),
            (
                "title_for_delete_confirmation",
                self.title_for_delete_confirmation.is_some(),
            ),
            (
                "should_indent_while_editing",
                self.should_indent_while_editing.is_some(),
            ),
            ("will_begin_editing", self.will_begin_editing.is_some()),
            ("did_end_editing", self.did_end_editing.is_some()),
            ("target_for_move", self.target_for_move.is_some()),
            ("indentation_level", self.indentation_level.is_some()),
            ("can_focus", self.can_focus.is_some()),
            ("edit_actions", self.edit_actions.is_some()),
            ("should_show_menu", self.should_show_menu.is_some()),
            ("can_perform_action", self.can_perform_action.is_some()),
            ("perform_action", self.perform_action.is_some()),
        ];
        slots
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }
}

impl<T, C> fmt::Debug for RowHandlers<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowHandlers")
            .field("configured", &self.configured())
            .finish()
    }
}

/// Handlers without a per-kind tier.
///
/// `C` is the host cell type and `V` the host header/footer view type.
pub(crate) struct GlobalHooks<T, C, V> {
    pub(crate) section_index_titles: Option<IndexTitlesFn>,
    pub(crate) section_for_section_index: Option<SectionForIndexFn>,
    pub(crate) estimated_height: Option<PathFn<Height>>,
    pub(crate) section_header: Option<SectionHeaderFooterFn<T>>,
    pub(crate) section_footer: Option<SectionHeaderFooterFn<T>>,
    pub(crate) section_header_height: Option<SectionHeightFn<T>>,
    pub(crate) section_footer_height: Option<SectionHeightFn<T>>,
    pub(crate) did_end_displaying: Option<DidEndDisplayingFn<C>>,
    pub(crate) will_display_header: Option<SectionViewFn<T, V>>,
    pub(crate) will_display_footer: Option<SectionViewFn<T, V>>,
    pub(crate) did_end_displaying_header: Option<DidEndDisplayingViewFn<V>>,
    pub(crate) did_end_displaying_footer: Option<DidEndDisplayingViewFn<V>>,
    pub(crate) prefetch_rows: Option<PathsFn>,
    pub(crate) cancel_prefetching: Option<PathsFn>,
}

impl<T, C, V> Default for GlobalHooks<T, C, V> {
    fn default() -> Self {
        Self {
            section_index_titles: None,
            section_for_section_index: None,
            estimated_height: None,
            section_header: None,
            section_footer: None,
            section_header_height: None,
            section_footer_height: None,
            did_end_displaying: None,
            will_display_header: None,
            will_display_footer: None,
            did_end_displaying_header: None,
            did_end_displaying_footer: None,
            prefetch_rows: None,
            cancel_prefetching: None,
        }
    }
}

/// The two visibility predicates.
///
/// They live apart from the other global hooks because they can be swapped
/// at runtime, which recomputes the projection.
pub(crate) struct VisibilityHooks<T> {
    pub(crate) row_hidden: Option<RowPredicate<T>>,
    pub(crate) section_hidden: Option<SectionPredicate<T>>,
}

impl<T> Default for VisibilityHooks<T> {
    fn default() -> Self {
        Self {
            row_hidden: None,
            section_hidden: None,
        }
    }
}

/// Generates the `with_*` builder methods for every [`RowHandlers`] slot on a
/// type with a `handlers: RowHandlers<$t, $c>` field.
macro_rules! row_handler_setters {
    (@emit $($(#[$meta:meta])* $method:ident, $slot:ident, ($($arg:ty),*) -> $ret:ty;)*) => {
        $(
            $(#[$meta])*
            pub fn $method<F>(mut self, handler: F) -> Self
            where
                F: Fn($($arg),*) -> $ret + Send + Sync + 'static,
            {
                self.handlers.$slot = Some(::std::sync::Arc::new(handler));
                self
            }
        )*
    };
    ($t:ty, $c:ty) => {
        $crate::model::handlers::row_handler_setters! {
            @emit
            /// Sets the handler that configures a dequeued cell for a row.
            with_configure, configure, (&$crate::model::Row<$t>, &mut $c, $crate::model::IndexPath) -> ();
            /// Sets the row height handler.
            with_height, height, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> $crate::model::Height;
            /// Sets the can-edit predicate.
            with_can_edit, can_edit, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> bool;
            /// Sets the can-move predicate.
            with_can_move, can_move, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> bool;
            /// Sets the commit-editing action.
            with_commit_editing, commit_editing, (&$crate::model::Row<$t>, $crate::model::EditingStyle, $crate::model::IndexPath) -> ();
            /// Sets the move-row action. Receives the source and destination paths.
            with_move_row, move_row, (&$crate::model::Row<$t>, $crate::model::IndexPath, $crate::model::IndexPath) -> ();
            /// Sets the should-highlight predicate.
            with_should_highlight, should_highlight, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> bool;
            /// Sets the did-highlight action.
            with_did_highlight, did_highlight, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> ();
            /// Sets the did-unhighlight action.
            with_did_unhighlight, did_unhighlight, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> ();
            /// Sets the will-select handler. Returning `None` vetoes the selection.
            with_will_select, will_select, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> Option<$crate::model::IndexPath>;
            /// Sets the will-deselect handler. Returning `None` vetoes the deselection.
            with_will_deselect, will_deselect, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> Option<$crate::model::IndexPath>;
            /// Sets the did-select handler.
            with_did_select, did_select, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> $crate::model::SelectionResult;
            /// Sets the did-deselect action.
            with_did_deselect, did_deselect, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> ();
            /// Sets the will-display action.
            with_will_display, will_display, (&$crate::model::Row<$t>, &mut $c, $crate::model::IndexPath) -> ();
            /// Sets the editing style handler.
            with_editing_style, editing_style, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> $crate::model::EditingStyle;
            /// Sets the delete confirmation title handler.
            with_title_for_delete_confirmation, title_for_delete_confirmation, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> Option<String>;
            /// Sets the should-indent-while-editing predicate.
            with_should_indent_while_editing, should_indent_while_editing, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> bool;
            /// Sets the will-begin-editing action.
            with_will_begin_editing, will_begin_editing, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> ();
            /// Sets the did-end-editing action.
            with_did_end_editing, did_end_editing, (Option<&$crate::model::Row<$t>>, Option<$crate::model::IndexPath>) -> ();
            /// Sets the move target handler. Receives the source and proposed paths.
            with_target_for_move, target_for_move, (&$crate::model::Row<$t>, $crate::model::IndexPath, $crate::model::IndexPath) -> $crate::model::IndexPath;
            /// Sets the indentation level handler.
            with_indentation_level, indentation_level, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> usize;
            /// Sets the can-focus predicate.
            with_can_focus, can_focus, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> bool;
            /// Sets the edit actions handler. Returning `None` keeps the host's default actions.
            with_edit_actions, edit_actions, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> Option<Vec<$crate::model::RowAction>>;
            /// Sets the should-show-menu predicate.
            with_should_show_menu, should_show_menu, (&$crate::model::Row<$t>, $crate::model::IndexPath) -> bool;
            /// Sets the can-perform-action predicate. Receives the action id.
            with_can_perform_action, can_perform_action, (&$crate::model::Row<$t>, &str, $crate::model::IndexPath) -> bool;
            /// Sets the perform-action handler. Receives the action id.
            with_perform_action, perform_action, (&$crate::model::Row<$t>, &str, $crate::model::IndexPath) -> ();
        }
    };
}

pub(crate) use row_handler_setters;
