//! # admin-query
//!
//! The query-state controller behind the list views of a multi-tenant
//! commerce admin dashboard: filter criteria, sort directive and pagination
//! window for one resource list, kept consistent with a process-wide
//! admin / single-tenant viewing scope.
//!
//! ## Overview
//!
//! - **Criteria**: typed criterion values and the input boundary that parses
//!   raw text into them
//! - **Query**: the committed query state and the pure reducer over it
//! - **Resource**: per-resource configuration (default sort, lock criterion,
//!   criterion kinds) and the built-in catalog
//! - **Scope**: the shared scope context and the synchronizer that pins the
//!   tenant-lock criterion
//! - **Chip**: the removable filter chips projected from committed criteria
//! - **Debounce**: the gate that coalesces free-text keystrokes
//! - **Fetch**: the fetch collaborator contract and the stale-response guard
//! - **Controller**: one isolated controller instance per mounted view
//!
//! ## Feature Flags
//!
//! - `async` (default): fetch orchestration and the controller (tokio)
//! - `serde`: `Serialize`/`Deserialize` for state and settings
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use admin_query::prelude::*;
//!
//! let config = catalog::orders();
//! let scope = Scope::Admin;
//! let state = QueryState::initial(&config, &scope);
//!
//! let next = reduce(
//!     &state,
//!     QueryAction::set("financialStatus", CriterionValue::text("paid")),
//!     &ReduceContext::new(&config, &scope),
//! );
//! assert_eq!(next.page(), 1);
//! assert_eq!(
//!     next.criteria().get("financialStatus"),
//!     Some(&CriterionValue::text("paid"))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use admin_query::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chip::*;
    pub use crate::criteria::*;
    pub use crate::debounce::*;
    pub use crate::notice::*;
    pub use crate::query::*;
    pub use crate::resource::*;
    pub use crate::scope::*;
    pub use crate::settings::*;

    #[cfg(feature = "async")]
    pub use crate::controller::*;

    #[cfg(feature = "async")]
    pub use crate::fetch::*;
}

pub mod chip;
pub mod criteria;
pub mod debounce;
pub mod notice;
pub mod query;
pub mod resource;
pub mod scope;
pub mod settings;

#[cfg(feature = "async")]
pub mod fetch;

#[cfg(feature = "async")]
pub mod controller;
