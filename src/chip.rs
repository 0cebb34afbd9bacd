//! Filter chip projection.
//!
//! Chips are a read-only view of the committed criteria: one chip per
//! constrained criterion, keyed by criterion name. Removing a chip is the
//! same transition as clearing the criterion through its form control
//! ([`QueryAction::RemoveCriterion`](crate::query::QueryAction::RemoveCriterion)).
//!
//! Internal criteria never become chips. The scope-lock criterion is shown
//! while the scope pins it, but without a removal affordance.
//!
//! # Examples
//!
//! ```rust
//! use admin_query::prelude::*;
//!
//! let config = catalog::products();
//! let scope = Scope::tenant("shopA");
//! let state = reduce(
//!     &QueryState::initial(&config, &scope),
//!     QueryAction::set("status", CriterionValue::text("draft")),
//!     &ReduceContext::new(&config, &scope),
//! );
//!
//! let chips = project(state.criteria(), &config, &scope);
//! assert_eq!(chips.len(), 2);
//! assert_eq!(chips[0].key, "shop");
//! assert!(!chips[0].removable);
//! assert_eq!(chips[1].key, "status");
//! assert!(chips[1].removable);
//! ```

use smallvec::SmallVec;

use crate::criteria::CriterionSet;
use crate::resource::ResourceConfig;
use crate::scope::Scope;

/// A removable token for one active criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    /// The criterion name. Stable across re-renders; removal targets it.
    pub key: String,
    /// The criterion label.
    pub label: String,
    /// The value as displayed.
    pub value: String,
    /// Whether the chip offers a remove control.
    pub removable: bool,
}

/// The chips of one list view. Most views show only a handful.
pub type ChipList = SmallVec<[FilterChip; 8]>;

/// Projects committed criteria into chips.
///
/// Declared criteria come first, in declaration order; criteria the
/// resource does not declare follow in name order, labelled by name.
#[must_use]
pub fn project(criteria: &CriterionSet, config: &ResourceConfig, scope: &Scope) -> ChipList {
    let pinned = |name: &str| scope.is_tenant() && config.is_lock_criterion(name);

    let declared = config.criteria().iter().filter_map(|spec| {
        let value = criteria.get(spec.name())?;
        (!spec.is_internal()).then(|| FilterChip {
            key: spec.name().to_string(),
            label: spec.label().to_string(),
            value: value.to_string(),
            removable: !pinned(spec.name()),
        })
    });

    let undeclared = criteria
        .iter()
        .filter(|(name, _)| config.spec(name).is_none())
        .map(|(name, value)| FilterChip {
            key: name.to_string(),
            label: name.to_string(),
            value: value.to_string(),
            removable: !pinned(name),
        });

    declared.chain(undeclared).collect()
}
