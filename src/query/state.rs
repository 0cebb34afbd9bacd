//! The committed query state of one list view.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::SortDirective;
use crate::criteria::CriterionSet;
use crate::resource::ResourceConfig;
use crate::scope::{Scope, enforce_lock};

/// Filter criteria, sort directive and pagination window of one list view.
///
/// Created when the view mounts, changed only by the reducer and the scope
/// synchronizer, discarded when the view unmounts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", try_from = "StoredQueryState")
)]
pub struct QueryState {
    pub(crate) criteria: CriterionSet,
    pub(crate) sort: SortDirective,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

impl QueryState {
    /// Returns the default state of `config` with no scope applied.
    #[must_use]
    pub fn defaults(config: &ResourceConfig) -> Self {
        Self {
            criteria: CriterionSet::new(),
            sort: config.default_sort().clone(),
            page: 1,
            page_size: config.default_page_size(),
        }
    }

    /// Returns the state a view starts with under `scope`.
    ///
    /// In single-tenant scope the lock criterion is already applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::prelude::*;
    ///
    /// let config = catalog::products();
    /// let state = QueryState::initial(&config, &Scope::tenant("shopA"));
    /// assert_eq!(state.criteria().get("shop"), Some(&CriterionValue::text("shopA")));
    /// assert_eq!(state.page(), 1);
    /// ```
    #[must_use]
    pub fn initial(config: &ResourceConfig, scope: &Scope) -> Self {
        enforce_lock(Self::defaults(config), scope, config)
    }

    /// The filter criteria.
    #[must_use]
    pub const fn criteria(&self) -> &CriterionSet {
        &self.criteria
    }

    /// The sort directive.
    #[must_use]
    pub const fn sort(&self) -> &SortDirective {
        &self.sort
    }

    /// The 1-indexed page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The number of records per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns `true` if both states ask for the same result set, whatever
    /// page they are on.
    pub(crate) fn same_query(&self, other: &Self) -> bool {
        self.criteria == other.criteria
            && self.sort == other.sort
            && self.page_size == other.page_size
    }

    /// Flattens the state into request parameters.
    ///
    /// The order is `page`, `limit`, `sortBy`, `sortOrder`, then criteria by
    /// name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::prelude::*;
    ///
    /// let config = catalog::orders();
    /// let params = QueryState::defaults(&config).to_params();
    /// assert_eq!(params[0], ("page".to_string(), "1".to_string()));
    /// assert_eq!(params[2], ("sortBy".to_string(), "created_at".to_string()));
    /// ```
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
            ("sortBy".to_string(), self.sort.column.clone()),
            (
                "sortOrder".to_string(),
                self.sort.direction.as_param().to_string(),
            ),
        ];
        for (name, value) in self.criteria.iter() {
            params.extend(value.to_params(name));
        }
        params
    }
}

// =============================================================================
// Stored form
// =============================================================================

/// A persisted state whose pagination window is invalid.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("{field} must be at least 1")]
pub struct InvalidStoredState {
    /// The offending field.
    pub field: &'static str,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredQueryState {
    criteria: CriterionSet,
    sort: SortDirective,
    page: u32,
    page_size: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredQueryState> for QueryState {
    type Error = InvalidStoredState;

    fn try_from(stored: StoredQueryState) -> Result<Self, Self::Error> {
        if stored.page == 0 {
            return Err(InvalidStoredState { field: "page" });
        }
        if stored.page_size == 0 {
            return Err(InvalidStoredState { field: "pageSize" });
        }
        Ok(Self {
            criteria: stored.criteria,
            sort: stored.sort,
            page: stored.page,
            page_size: stored.page_size,
        })
    }
}
