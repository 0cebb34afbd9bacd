//! Property-based tests for the query-state reducer.
//!
//! ## Reducer Laws
//! - Criteria change: any effective criterion write leaves the page at 1
//! - Page size change: leaves the page at 1
//! - Sort involution: sorting twice by the sort column restores the directive
//! - Page bounds: the page is at least 1 and at most the reported last page
//! - Reset idempotence: reset(reset(s)) == reset(s)
//! - Normalisation: an empty text value is the same as clearing
//!
//! ## Scope Laws
//! - Lock invariant: under tenant scope the lock criterion survives any
//!   sequence of actions
//! - Unlock: leaving tenant scope always yields the resource defaults

use admin_query::prelude::*;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

const NAMES: [&str; 6] = ["shop", "search", "email", "financialStatus", "minTotal", "tag"];
const COLUMNS: [&str; 3] = ["created_at", "total", "name"];

fn criterion_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NAMES.to_vec())
}

fn column() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COLUMNS.to_vec())
}

fn action() -> impl Strategy<Value = QueryAction> {
    prop_oneof![
        (criterion_name(), "[a-z ]{0,6}")
            .prop_map(|(name, text)| QueryAction::set(name, CriterionValue::text(text))),
        criterion_name().prop_map(|name| QueryAction::remove(name)),
        column().prop_map(|column| QueryAction::SetSort(column.to_string())),
        (0u32..40).prop_map(QueryAction::SetPage),
        (0u32..200).prop_map(QueryAction::SetPageSize),
        Just(QueryAction::ResetFilters),
    ]
}

fn scope() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Admin),
        "shop[A-C]".prop_map(|tenant| Scope::tenant(tenant)),
    ]
}

fn run_all(
    config: &ResourceConfig,
    scope: &Scope,
    last_page: Option<u32>,
    actions: Vec<QueryAction>,
) -> QueryState {
    let context = ReduceContext::new(config, scope).with_last_page(last_page);
    actions
        .into_iter()
        .fold(QueryState::initial(config, scope), |state, action| {
            reduce(&state, action, &context)
        })
}

// =============================================================================
// Reducer Laws
// =============================================================================

proptest! {
    /// An effective criterion write always lands on page 1.
    #[test]
    fn prop_criterion_change_resets_page(
        actions in prop::collection::vec(action(), 0..12),
        name in criterion_name(),
        text in "[a-z]{1,6}",
    ) {
        let config = catalog::orders();
        let scope = Scope::Admin;
        let state = run_all(&config, &scope, None, actions);

        let next = reduce(
            &state,
            QueryAction::set(name, CriterionValue::text(text)),
            &ReduceContext::new(&config, &scope),
        );
        if next.criteria() != state.criteria() {
            prop_assert_eq!(next.page(), 1);
        }
    }

    /// Any page size change lands on page 1.
    #[test]
    fn prop_page_size_change_resets_page(
        actions in prop::collection::vec(action(), 0..12),
        page_size in 0u32..500,
    ) {
        let config = catalog::orders();
        let scope = Scope::Admin;
        let state = run_all(&config, &scope, None, actions);

        let next = reduce(&state, QueryAction::SetPageSize(page_size), &ReduceContext::new(&config, &scope));
        prop_assert_eq!(next.page(), 1);
        prop_assert_eq!(next.page_size(), page_size.max(1));
    }

    /// Sorting twice by the current sort column restores the directive.
    #[test]
    fn prop_sort_toggle_is_involution(actions in prop::collection::vec(action(), 0..12)) {
        let config = catalog::orders();
        let scope = Scope::Admin;
        let context = ReduceContext::new(&config, &scope);
        let state = run_all(&config, &scope, None, actions);
        let column = state.sort().column.clone();

        let once = reduce(&state, QueryAction::SetSort(column.clone()), &context);
        let twice = reduce(&once, QueryAction::SetSort(column), &context);

        prop_assert_ne!(once.sort(), state.sort());
        prop_assert_eq!(twice, state);
    }

    /// The page never leaves `[1, last_page]`.
    #[test]
    fn prop_page_stays_in_bounds(
        actions in prop::collection::vec(action(), 0..16),
        last_page in 1u32..20,
    ) {
        let config = catalog::orders();
        let state = run_all(&config, &Scope::Admin, Some(last_page), actions);
        prop_assert!(state.page() >= 1);
        prop_assert!(state.page() <= last_page);
    }

    /// Resetting twice is the same as resetting once.
    #[test]
    fn prop_reset_is_idempotent(
        actions in prop::collection::vec(action(), 0..12),
        scope in scope(),
    ) {
        let config = catalog::orders();
        let context = ReduceContext::new(&config, &scope);
        let state = run_all(&config, &scope, None, actions);

        let once = reduce(&state, QueryAction::ResetFilters, &context);
        let twice = reduce(&once, QueryAction::ResetFilters, &context);
        prop_assert_eq!(&once, &twice);

        let initial = QueryState::initial(&config, &scope);
        prop_assert_eq!(once.criteria(), initial.criteria());
        prop_assert_eq!(once.sort(), initial.sort());
        prop_assert_eq!(once.page_size(), state.page_size());
    }

    /// Setting a blank text value is the same as removing the criterion.
    #[test]
    fn prop_blank_text_clears(
        actions in prop::collection::vec(action(), 0..12),
        name in criterion_name(),
        blank in "[ \t]{0,4}",
        scope in scope(),
    ) {
        let config = catalog::orders();
        let context = ReduceContext::new(&config, &scope);
        let state = run_all(&config, &scope, None, actions);

        let set_blank = reduce(&state, QueryAction::set(name, CriterionValue::text(blank)), &context);
        let removed = reduce(&state, QueryAction::remove(name), &context);
        prop_assert_eq!(set_blank, removed);
    }
}

// =============================================================================
// Scope Laws
// =============================================================================

proptest! {
    /// Under tenant scope the lock criterion equals the tenant after any
    /// sequence of actions.
    #[test]
    fn prop_lock_survives_any_actions(
        actions in prop::collection::vec(action(), 0..24),
        tenant in "shop[A-Z]",
    ) {
        let config = catalog::orders();
        let scope = Scope::tenant(tenant.clone());
        let state = run_all(&config, &scope, None, actions);
        prop_assert_eq!(state.criteria().get("shop"), Some(&CriterionValue::text(tenant)));
    }

    /// Leaving tenant scope yields the defaults, whatever the view held.
    #[test]
    fn prop_unlock_yields_defaults(
        actions in prop::collection::vec(action(), 0..16),
        tenant in "shop[A-Z]",
    ) {
        let config = catalog::products();
        let previous = Scope::tenant(tenant);
        let state = run_all(&config, &previous, None, actions);

        let outcome = synchronize(&state, Some(&previous), &Scope::Admin, &config);
        prop_assert_eq!(outcome.action, SyncAction::Unlocked);
        prop_assert_eq!(outcome.state, QueryState::defaults(&config));
    }

    /// Entering a tenant leaves exactly the lock criterion.
    #[test]
    fn prop_lock_yields_only_lock_criterion(
        actions in prop::collection::vec(action(), 0..16),
        from in scope(),
        tenant in "shop[D-F]",
    ) {
        let config = catalog::orders();
        let state = run_all(&config, &from, None, actions);
        let current = Scope::tenant(tenant.clone());

        let outcome = synchronize(&state, Some(&from), &current, &config);
        let expected = CriterionSet::new().with("shop", CriterionValue::text(tenant));
        prop_assert_eq!(outcome.state.criteria(), &expected);
        prop_assert_eq!(outcome.state.page(), 1);
    }
}
