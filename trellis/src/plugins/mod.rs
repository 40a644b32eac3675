//! The plugin pipeline: reducer fragments and instance decorators.

mod active_row;
mod column_utilities;
mod expansion;
mod hierarchy_filters;
mod row_select;
mod sort_by;

pub use active_row::ActiveRowPlugin;
pub use column_utilities::ColumnUtilitiesPlugin;
pub use expansion::ExpansionPlugin;
pub use hierarchy_filters::HierarchyFiltersPlugin;
pub use row_select::RowSelectPlugin;
pub use sort_by::SortByPlugin;

use crate::action::Action;
use crate::config::TableConfig;
use crate::filters::FilterTypes;
use crate::instance::Instance;
use crate::model::Column;
use crate::state::TableState;

/// Context handed to reducer fragments.
///
/// `instance` is the instance of the previous cycle; fragments use it
/// to resolve rows for the host callbacks they gate mutations on.
pub struct ReduceContext<'a> {
    /// Table configuration and host callbacks.
    pub config: &'a TableConfig,
    /// The configured columns, in configuration order.
    pub columns: &'a [Column],
    /// The last computed instance.
    pub instance: &'a Instance,
}

/// Context handed to instance decorators.
pub struct DecorateContext<'a> {
    /// Table configuration and host callbacks.
    pub config: &'a TableConfig,
    /// The filter-type registry.
    pub filter_types: &'a FilterTypes,
}

/// One composable behavior: a reducer fragment and an instance
/// decorator.
///
/// Fragments run in registration order, each returning the
/// progressively updated state; a fragment must not assume it is the
/// only one touching an action, and actions it does not own pass
/// through unchanged. Decorators run in the same order and only add or
/// overwrite instance fields.
pub trait TablePlugin: Send + Sync {
    /// Plugin name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Reducer fragment. The default passes the state through.
    fn reduce(
        &self,
        state: TableState,
        _action: &Action,
        _previous: &TableState,
        _cx: &ReduceContext<'_>,
    ) -> TableState {
        state
    }

    /// Instance decorator. Decorators may normalize their own state
    /// slice (clamping a page index, auto-selecting an active row);
    /// they never touch another plugin's slice.
    fn decorate(
        &self,
        _instance: &mut Instance,
        _state: &mut TableState,
        _cx: &DecorateContext<'_>,
    ) {
    }
}

/// An explicit, ordered list of plugins.
///
/// Passed at construction; there is no global registration. Order is
/// behavior: filtering substitutes the row set before selection and
/// active-row tracking consume it.
pub struct Pipeline {
    plugins: Vec<Box<dyn TablePlugin>>,
}

impl Pipeline {
    /// Create a pipeline from an ordered plugin list.
    pub fn new(plugins: Vec<Box<dyn TablePlugin>>) -> Self {
        Self { plugins }
    }

    /// The standard pipeline: hierarchy filters, sorting, expansion
    /// and paging, row selection, active row, column utilities.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(HierarchyFiltersPlugin),
            Box::new(SortByPlugin),
            Box::new(ExpansionPlugin),
            Box::new(RowSelectPlugin),
            Box::new(ActiveRowPlugin),
            Box::new(ColumnUtilitiesPlugin),
        ])
    }

    /// Plugin names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub(crate) fn reduce(
        &self,
        mut state: TableState,
        action: &Action,
        previous: &TableState,
        cx: &ReduceContext<'_>,
    ) -> TableState {
        for plugin in &self.plugins {
            state = plugin.reduce(state, action, previous, cx);
        }
        state
    }

    pub(crate) fn decorate(
        &self,
        instance: &mut Instance,
        state: &mut TableState,
        cx: &DecorateContext<'_>,
    ) {
        for plugin in &self.plugins {
            plugin.decorate(instance, state, cx);
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("plugins", &self.names())
            .finish()
    }
}
