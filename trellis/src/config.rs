//! Table configuration and host callbacks.

use std::sync::Arc;

use crate::action::Action;
use crate::model::Row;
use crate::state::TableState;

/// Predicate deciding whether a row may be selected at all.
pub type CanSelectRow = Arc<dyn Fn(&Row) -> bool + Send + Sync>;

/// Veto gate invoked before a selection mutation with the row and the
/// proposed value. Returning false discards the mutation.
pub type OnSelectRow = Arc<dyn Fn(&Row, bool) -> bool + Send + Sync>;

/// Predicate deciding whether the active row may change out from under
/// a navigational action (paging, sorting, filtering). Receives the
/// current active row, if any.
pub type CanChangeRow = Arc<dyn Fn(Option<&Row>) -> bool + Send + Sync>;

/// Veto gate invoked when a new active row is proposed, with the new
/// and old rows. Returning false keeps the previous active row.
pub type OnChangeRow = Arc<dyn Fn(Option<&Row>, Option<&Row>) -> bool + Send + Sync>;

/// Notification fired once per completed column layout change.
pub type OnChangeColumn = Arc<dyn Fn(&TableState, &Action) + Send + Sync>;

/// Predicate exempting rows from filtering entirely. A row for which
/// this returns false is never hidden.
pub type CanFilterRow = Arc<dyn Fn(&Row) -> bool + Send + Sync>;

/// Which keying the active row uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveRowMode {
    /// Keyed by stable row id; survives filter/sort/paging while the
    /// id still exists.
    #[default]
    Id,
    /// Keyed by position within the current page; navigational actions
    /// can be vetoed to protect it.
    Index,
}

/// Matching mode of the default text filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMatch {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Case-insensitive prefix match.
    Prefix,
}

/// Table configuration: options, initial state, host callbacks.
///
/// All callbacks default to permissive no-ops. Callbacks run
/// synchronously inside reduction and must not dispatch further
/// actions; that re-entrancy is undefined behavior by contract, not a
/// checked invariant.
///
/// # Example
///
/// ```
/// use trellis::config::TableConfig;
///
/// let config = TableConfig::new("people")
///     .multiselect(true)
///     .select_sub_rows(true)
///     .can_select_row(|row| !row.has_children());
/// ```
#[derive(Clone)]
pub struct TableConfig {
    /// Display name, for diagnostics only.
    pub table_name: String,
    /// Prepend the synthetic selection column and allow multi-row
    /// selection.
    pub multiselect: bool,
    /// Propagate selection toggles depth-first to descendants.
    pub select_sub_rows: bool,
    /// Active row keying.
    pub active_row_mode: ActiveRowMode,
    /// Reset the selection to the initial set whenever the data
    /// changes.
    pub auto_reset_selected_rows: bool,
    /// Reset the active row whenever the data changes.
    pub auto_reset_active_row: bool,
    /// Matching mode of the default text filter.
    pub text_match: TextMatch,
    /// State seeded by `Init` and restored by the reset actions.
    pub initial_state: TableState,
    /// May this row be selected.
    pub can_select_row: CanSelectRow,
    /// Selection veto gate.
    pub on_select_row: OnSelectRow,
    /// May the active row change under a navigational action.
    pub can_change_row: CanChangeRow,
    /// Active-row change veto gate.
    pub on_change_row: OnChangeRow,
    /// Column layout change notification.
    pub on_change_column: OnChangeColumn,
    /// May this row be hidden by filters.
    pub can_filter_row: CanFilterRow,
}

impl TableConfig {
    /// Create a configuration with permissive defaults.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            multiselect: false,
            select_sub_rows: false,
            active_row_mode: ActiveRowMode::default(),
            auto_reset_selected_rows: true,
            auto_reset_active_row: true,
            text_match: TextMatch::default(),
            initial_state: TableState::default(),
            can_select_row: Arc::new(|_row: &Row| true),
            on_select_row: Arc::new(|_row: &Row, _will_select: bool| true),
            can_change_row: Arc::new(|_row: Option<&Row>| true),
            on_change_row: Arc::new(|_new: Option<&Row>, _old: Option<&Row>| true),
            on_change_column: Arc::new(|_state: &TableState, _action: &Action| {}),
            can_filter_row: Arc::new(|_row: &Row| true),
        }
    }

    /// Enable or disable multi-select.
    pub fn multiselect(mut self, enabled: bool) -> Self {
        self.multiselect = enabled;
        self
    }

    /// Enable or disable selection propagation to descendants.
    pub fn select_sub_rows(mut self, enabled: bool) -> Self {
        self.select_sub_rows = enabled;
        self
    }

    /// Set the active row keying.
    pub fn active_row_mode(mut self, mode: ActiveRowMode) -> Self {
        self.active_row_mode = mode;
        self
    }

    /// Enable or disable the selection auto-reset on data change.
    pub fn auto_reset_selected_rows(mut self, enabled: bool) -> Self {
        self.auto_reset_selected_rows = enabled;
        self
    }

    /// Enable or disable the active-row auto-reset on data change.
    pub fn auto_reset_active_row(mut self, enabled: bool) -> Self {
        self.auto_reset_active_row = enabled;
        self
    }

    /// Set the default text filter matching mode.
    pub fn text_match(mut self, mode: TextMatch) -> Self {
        self.text_match = mode;
        self
    }

    /// Set the initial state seeded at construction and restored by
    /// resets.
    pub fn initial_state(mut self, state: TableState) -> Self {
        self.initial_state = state;
        self
    }

    /// Set the can-select predicate.
    pub fn can_select_row(mut self, f: impl Fn(&Row) -> bool + Send + Sync + 'static) -> Self {
        self.can_select_row = Arc::new(f);
        self
    }

    /// Set the selection veto gate.
    pub fn on_select_row(
        mut self,
        f: impl Fn(&Row, bool) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.on_select_row = Arc::new(f);
        self
    }

    /// Set the navigational veto predicate.
    pub fn can_change_row(
        mut self,
        f: impl Fn(Option<&Row>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.can_change_row = Arc::new(f);
        self
    }

    /// Set the active-row change veto gate.
    pub fn on_change_row(
        mut self,
        f: impl Fn(Option<&Row>, Option<&Row>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.on_change_row = Arc::new(f);
        self
    }

    /// Set the column layout change notification.
    pub fn on_change_column(
        mut self,
        f: impl Fn(&TableState, &Action) + Send + Sync + 'static,
    ) -> Self {
        self.on_change_column = Arc::new(f);
        self
    }

    /// Set the filter exemption predicate.
    pub fn can_filter_row(mut self, f: impl Fn(&Row) -> bool + Send + Sync + 'static) -> Self {
        self.can_filter_row = Arc::new(f);
        self
    }
}
