//! Committed query state and the reducer over it.
//!
//! A [`QueryState`] is the authoritative filter/sort/pagination value of one
//! list view. It only changes through [`reduce`], which is pure and total:
//! every [`QueryAction`] yields a valid next state, and applying an action
//! that changes nothing yields a state equal to the input.
//!
//! # Invariants
//!
//! - Any change to criteria or page size resets the page to 1.
//! - Sorting does not reset the page.
//! - The page is never below 1, nor above the last page once the server has
//!   reported one.
//! - While the scope is single-tenant, the resource's lock criterion is
//!   present and equal to the locked tenant after every transition.
//!
//! # Examples
//!
//! ```rust
//! use admin_query::prelude::*;
//!
//! let config = catalog::orders();
//! let scope = Scope::Admin;
//! let context = ReduceContext::new(&config, &scope);
//! let state = QueryState::initial(&config, &scope);
//!
//! let sorted = reduce(&state, QueryAction::SetSort("created_at".into()), &context);
//! assert_eq!(sorted.sort().direction, SortDirection::Ascending);
//!
//! let back = reduce(&sorted, QueryAction::SetSort("created_at".into()), &context);
//! assert_eq!(back.sort(), state.sort());
//! ```

mod pagination;
mod reducer;
mod sort;
mod state;
mod transition;

pub use pagination::PaginationMeta;
pub use reducer::{QueryAction, ReduceContext, reduce};
pub use sort::{SortDirection, SortDirective};
pub use state::QueryState;
#[cfg(feature = "serde")]
pub use state::InvalidStoredState;
pub use transition::Transition;
