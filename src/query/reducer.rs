//! The query-state reducer.

use super::{QueryState, SortDirective, Transition};
use crate::criteria::{CriterionSet, CriterionValue};
use crate::resource::ResourceConfig;
use crate::scope::{Scope, enforce_lock};

// =============================================================================
// Actions
// =============================================================================

/// A user-level change to the committed query state.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAction {
    /// Sets a criterion, or clears it when `value` is `None`.
    SetCriterion {
        /// The criterion name.
        name: String,
        /// The new value. Empty values clear the criterion.
        value: Option<CriterionValue>,
    },
    /// Clears a criterion. Same effect as `SetCriterion` with `None`.
    RemoveCriterion(String),
    /// Sorts by a column, flipping direction if it is already the sort column.
    SetSort(String),
    /// Moves to a page.
    SetPage(u32),
    /// Changes the page size.
    SetPageSize(u32),
    /// Clears all criteria and restores the default sort.
    ResetFilters,
}

impl QueryAction {
    /// Shorthand for `SetCriterion` with a value.
    #[must_use]
    pub fn set(name: impl Into<String>, value: CriterionValue) -> Self {
        Self::SetCriterion {
            name: name.into(),
            value: Some(value),
        }
    }

    /// Shorthand for `RemoveCriterion`.
    #[must_use]
    pub fn remove(name: impl Into<String>) -> Self {
        Self::RemoveCriterion(name.into())
    }

    /// Returns the criterion this action writes, if any.
    #[must_use]
    pub fn criterion_name(&self) -> Option<&str> {
        match self {
            Self::SetCriterion { name, .. } | Self::RemoveCriterion(name) => Some(name),
            Self::SetSort(_) | Self::SetPage(_) | Self::SetPageSize(_) | Self::ResetFilters => {
                None
            }
        }
    }
}

// =============================================================================
// Context
// =============================================================================

/// What the reducer needs to know besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    config: &'a ResourceConfig,
    scope: &'a Scope,
    last_page: Option<u32>,
}

impl<'a> ReduceContext<'a> {
    /// Creates a context with no server-reported last page.
    #[must_use]
    pub const fn new(config: &'a ResourceConfig, scope: &'a Scope) -> Self {
        Self {
            config,
            scope,
            last_page: None,
        }
    }

    /// Bounds `SetPage` by the last page the server reported.
    #[must_use]
    pub const fn with_last_page(mut self, last_page: Option<u32>) -> Self {
        self.last_page = last_page;
        self
    }

    /// The resource configuration.
    #[must_use]
    pub const fn config(&self) -> &'a ResourceConfig {
        self.config
    }

    /// The current scope.
    #[must_use]
    pub const fn scope(&self) -> &'a Scope {
        self.scope
    }

    /// Returns `true` if `name` is pinned by the current scope.
    #[must_use]
    pub fn is_locked(&self, name: &str) -> bool {
        self.scope.is_tenant() && self.config.is_lock_criterion(name)
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Produces the next committed state.
///
/// Writes to the lock criterion while it is pinned are ignored and return
/// the state unchanged. Every other action goes through its transition and
/// the lock is re-asserted afterwards.
///
/// # Examples
///
/// ```rust
/// use admin_query::prelude::*;
///
/// let config = catalog::products();
/// let scope = Scope::tenant("shopA");
/// let context = ReduceContext::new(&config, &scope);
/// let state = QueryState::initial(&config, &scope);
///
/// let attempted = reduce(&state, QueryAction::remove("shop"), &context);
/// assert_eq!(attempted, state);
///
/// let reset = reduce(&state, QueryAction::ResetFilters, &context);
/// assert_eq!(reset.criteria().get("shop"), Some(&CriterionValue::text("shopA")));
/// ```
#[must_use]
pub fn reduce(state: &QueryState, action: QueryAction, context: &ReduceContext<'_>) -> QueryState {
    if let Some(name) = action.criterion_name()
        && context.is_locked(name)
    {
        tracing::debug!(
            resource = context.config.name(),
            criterion = name,
            "ignored write to scope-locked criterion"
        );
        return state.clone();
    }

    let transition = match action {
        QueryAction::SetCriterion { name, value } => set_criterion(name, value),
        QueryAction::RemoveCriterion(name) => set_criterion(name, None),
        QueryAction::SetSort(column) => set_sort(column),
        QueryAction::SetPage(page) => set_page(page, context.last_page),
        QueryAction::SetPageSize(page_size) => set_page_size(page_size),
        QueryAction::ResetFilters => reset_filters(context.config.default_sort().clone()),
    };

    enforce_lock(transition.run(state.clone()), context.scope, context.config)
}

// =============================================================================
// Transitions
// =============================================================================

fn first_page() -> Transition<QueryState> {
    Transition::modify(|mut state: QueryState| {
        state.page = 1;
        state
    })
}

fn set_criterion(name: String, value: Option<CriterionValue>) -> Transition<QueryState> {
    Transition::modify(move |mut state: QueryState| {
        state.criteria = match &value {
            Some(value) => state.criteria.with(name.clone(), value.clone()),
            None => state.criteria.without(&name),
        };
        state
    })
    .then(first_page())
}

fn set_sort(column: String) -> Transition<QueryState> {
    Transition::modify(move |mut state: QueryState| {
        state.sort = state.sort.toggle(&column);
        state
    })
}

fn set_page(page: u32, last_page: Option<u32>) -> Transition<QueryState> {
    Transition::modify(move |mut state: QueryState| {
        let lower_bounded = page.max(1);
        state.page = last_page.map_or(lower_bounded, |last| lower_bounded.min(last.max(1)));
        state
    })
}

fn set_page_size(page_size: u32) -> Transition<QueryState> {
    Transition::modify(move |mut state: QueryState| {
        state.page_size = page_size.max(1);
        state
    })
    .then(first_page())
}

fn reset_filters(default_sort: SortDirective) -> Transition<QueryState> {
    Transition::modify(move |mut state: QueryState| {
        state.criteria = CriterionSet::new();
        state.sort = default_sort.clone();
        state
    })
    .then(first_page())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::catalog;
    use rstest::{fixture, rstest};

    #[fixture]
    fn orders() -> ResourceConfig {
        catalog::orders()
    }

    fn on_page(state: QueryState, page: u32) -> QueryState {
        QueryState { page, ..state }
    }

    #[rstest]
    fn test_set_criterion_resets_page(orders: ResourceConfig) {
        let scope = Scope::Admin;
        let context = ReduceContext::new(&orders, &scope);
        let state = on_page(QueryState::defaults(&orders), 4);

        let next = reduce(
            &state,
            QueryAction::set("financialStatus", CriterionValue::text("paid")),
            &context,
        );
        assert_eq!(next.page(), 1);
        assert_eq!(
            next.criteria().get("financialStatus"),
            Some(&CriterionValue::text("paid"))
        );
    }

    #[rstest]
    fn test_remove_matches_clear(orders: ResourceConfig) {
        let scope = Scope::Admin;
        let context = ReduceContext::new(&orders, &scope);
        let state = reduce(
            &QueryState::defaults(&orders),
            QueryAction::set("financialStatus", CriterionValue::text("paid")),
            &context,
        );

        let removed = reduce(&state, QueryAction::remove("financialStatus"), &context);
        let cleared = reduce(
            &state,
            QueryAction::SetCriterion {
                name: "financialStatus".to_string(),
                value: None,
            },
            &context,
        );
        assert_eq!(removed, cleared);
        assert!(removed.criteria().is_empty());
    }

    #[rstest]
    fn test_set_sort_keeps_page(orders: ResourceConfig) {
        let scope = Scope::Admin;
        let context = ReduceContext::new(&orders, &scope);
        let state = on_page(QueryState::defaults(&orders), 3);

        let next = reduce(&state, QueryAction::SetSort("total".to_string()), &context);
        assert_eq!(next.page(), 3);
        assert_eq!(next.sort(), &SortDirective::descending("total"));
    }

    #[rstest]
    #[case(0, None, 1)]
    #[case(7, None, 7)]
    #[case(7, Some(5), 5)]
    #[case(3, Some(5), 3)]
    #[case(3, Some(0), 1)]
    fn test_set_page_is_clamped(
        orders: ResourceConfig,
        #[case] requested: u32,
        #[case] last_page: Option<u32>,
        #[case] expected: u32,
    ) {
        let scope = Scope::Admin;
        let context = ReduceContext::new(&orders, &scope).with_last_page(last_page);
        let next = reduce(
            &QueryState::defaults(&orders),
            QueryAction::SetPage(requested),
            &context,
        );
        assert_eq!(next.page(), expected);
    }

    #[rstest]
    fn test_set_page_size_resets_page(orders: ResourceConfig) {
        let scope = Scope::Admin;
        let context = ReduceContext::new(&orders, &scope);
        let state = on_page(QueryState::defaults(&orders), 6);

        let next = reduce(&state, QueryAction::SetPageSize(100), &context);
        assert_eq!(next.page_size(), 100);
        assert_eq!(next.page(), 1);

        let zero = reduce(&state, QueryAction::SetPageSize(0), &context);
        assert_eq!(zero.page_size(), 1);
    }

    #[rstest]
    fn test_reset_restores_default_sort(orders: ResourceConfig) {
        let scope = Scope::Admin;
        let context = ReduceContext::new(&orders, &scope);
        let state = reduce(
            &QueryState::defaults(&orders),
            QueryAction::SetSort("total".to_string()),
            &context,
        );
        let state = reduce(
            &state,
            QueryAction::set("search", CriterionValue::text("mug")),
            &context,
        );

        let reset = reduce(&state, QueryAction::ResetFilters, &context);
        assert_eq!(reset.sort(), orders.default_sort());
        assert!(reset.criteria().is_empty());
        assert_eq!(reset.page_size(), state.page_size());
    }

    #[rstest]
    fn test_locked_criterion_write_is_ignored(orders: ResourceConfig) {
        let scope = Scope::tenant("shopA");
        let context = ReduceContext::new(&orders, &scope);
        let state = on_page(QueryState::initial(&orders, &scope), 2);

        let edited = reduce(
            &state,
            QueryAction::set("shop", CriterionValue::text("shopB")),
            &context,
        );
        assert_eq!(edited, state);
    }

    #[rstest]
    fn test_lock_criterion_is_editable_in_admin_scope(orders: ResourceConfig) {
        let scope = Scope::Admin;
        let context = ReduceContext::new(&orders, &scope);
        let next = reduce(
            &QueryState::defaults(&orders),
            QueryAction::set("shop", CriterionValue::text("shopB")),
            &context,
        );
        assert_eq!(next.criteria().get("shop"), Some(&CriterionValue::text("shopB")));
    }
}
