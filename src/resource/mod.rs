//! Per-resource configuration.
//!
//! One [`ResourceConfig`] describes everything that differs between list
//! views: the default sort, the default page size, the criteria the view
//! offers and which of them (at most one) is pinned by single-tenant scope.
//! The [`catalog`] module holds the configurations of the built-in
//! resources.
//!
//! # Examples
//!
//! ```rust
//! use admin_query::prelude::*;
//!
//! let config = ResourceConfig::new("refunds", SortDirective::descending("created_at"))
//!     .page_size(25)
//!     .lock(LockCriterion::new("shop"))
//!     .criterion(CriterionSpec::text("search", "Search").debounced());
//!
//! assert_eq!(config.default_page_size(), 25);
//! assert!(config.is_lock_criterion("shop"));
//! assert!(config.spec("search").unwrap().is_debounced());
//! ```

pub mod catalog;
mod config;

pub use config::{LockCriterion, ResourceConfig};
