//! Scope synchronizer rules.
//!
//! Only genuine scope changes (and mounts) drive [`synchronize`]; the writes
//! it makes to a query state never count as scope changes themselves, so
//! the rules cannot feed back into one another.

use super::Scope;
use crate::query::{QueryAction, QueryState, ReduceContext, reduce};
use crate::resource::ResourceConfig;

/// What the synchronizer did to the committed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Entered tenant scope: lock injected. Filters are reset too, unless
    /// the view is only mounting.
    Locked,
    /// Moved between tenants: filters reset and the new lock injected.
    Relocked,
    /// Left tenant scope: filters reset.
    Unlocked,
    /// Same tenant, but the lock had gone missing and was put back.
    Reasserted,
    /// Nothing to do.
    Unchanged,
}

/// The synchronized state together with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// The state after synchronization.
    pub state: QueryState,
    /// The rule applied.
    pub action: SyncAction,
}

/// Ensures the lock criterion is present and current under `scope`.
///
/// Outside tenant scope, or for resources without a lock criterion, the
/// state is returned unchanged. Injecting the lock resets the page to 1.
///
/// # Examples
///
/// ```rust
/// use admin_query::prelude::*;
///
/// let config = catalog::products();
/// let dropped = QueryState::defaults(&config);
///
/// let restored = enforce_lock(dropped.clone(), &Scope::tenant("shopA"), &config);
/// assert_eq!(restored.criteria().get("shop"), Some(&CriterionValue::text("shopA")));
///
/// assert_eq!(enforce_lock(dropped.clone(), &Scope::Admin, &config), dropped);
/// ```
#[must_use]
pub fn enforce_lock(state: QueryState, scope: &Scope, config: &ResourceConfig) -> QueryState {
    let (Some(tenant), Some(lock)) = (scope.locked_tenant(), config.lock_criterion()) else {
        return state;
    };
    let value = lock.value_for(tenant);
    if state.criteria.get(lock.name()) == Some(&value) {
        return state;
    }
    QueryState {
        criteria: state.criteria.with(lock.name(), value),
        page: 1,
        ..state
    }
}

/// Applies the synchronizer rules for a move from `previous` to `current`.
///
/// `previous` is `None` on mount.
///
/// # Examples
///
/// ```rust
/// use admin_query::prelude::*;
///
/// let config = catalog::products();
/// let admin = Scope::Admin;
/// let state = reduce(
///     &QueryState::defaults(&config),
///     QueryAction::set("status", CriterionValue::text("draft")),
///     &ReduceContext::new(&config, &admin),
/// );
///
/// let outcome = synchronize(&state, Some(&admin), &Scope::tenant("shopA"), &config);
/// assert_eq!(outcome.action, SyncAction::Locked);
/// assert_eq!(outcome.state.criteria().len(), 1);
/// assert_eq!(
///     outcome.state.criteria().get("shop"),
///     Some(&CriterionValue::text("shopA"))
/// );
/// ```
#[must_use]
pub fn synchronize(
    state: &QueryState,
    previous: Option<&Scope>,
    current: &Scope,
    config: &ResourceConfig,
) -> SyncOutcome {
    let reset = || {
        reduce(
            state,
            QueryAction::ResetFilters,
            &ReduceContext::new(config, current),
        )
    };

    let (next, action) = match (previous, current) {
        (Some(Scope::Admin), Scope::Tenant(_)) => (reset(), SyncAction::Locked),
        (Some(Scope::Tenant(before)), Scope::Tenant(after)) if before != after => {
            (reset(), SyncAction::Relocked)
        }
        (Some(Scope::Tenant(_)), Scope::Admin) => (reset(), SyncAction::Unlocked),
        (None, Scope::Tenant(_)) => {
            let enforced = enforce_lock(state.clone(), current, config);
            let action = if enforced == *state {
                SyncAction::Unchanged
            } else {
                SyncAction::Locked
            };
            (enforced, action)
        }
        (Some(Scope::Tenant(_)), Scope::Tenant(_)) => {
            let enforced = enforce_lock(state.clone(), current, config);
            let action = if enforced == *state {
                SyncAction::Unchanged
            } else {
                SyncAction::Reasserted
            };
            (enforced, action)
        }
        (None | Some(Scope::Admin), Scope::Admin) => (state.clone(), SyncAction::Unchanged),
    };

    tracing::debug!(
        resource = config.name(),
        scope = %current,
        action = ?action,
        "scope synchronized"
    );
    SyncOutcome {
        state: next,
        action,
    }
}
