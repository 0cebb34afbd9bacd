//! Viewing scope and its synchronization with list views.
//!
//! The dashboard is browsed either as an administrator, seeing every tenant,
//! or locked to a single tenant. The [`ScopeContext`] is the one shared,
//! process-wide holder of the current [`Scope`]; it changes only through
//! [`ScopeContext::switch_scope`] and notifies subscribed list views of each
//! genuine change.
//!
//! The synchronizer rules that keep a view's committed state consistent
//! with the scope are pure functions over `(state, change)`:
//!
//! | previous → current | effect |
//! |---|---|
//! | mount into tenant | inject the lock criterion |
//! | admin → tenant | reset filters, inject the lock criterion |
//! | tenant A → tenant B | reset filters, inject B's lock criterion |
//! | tenant → same tenant | re-inject the lock criterion if it went missing |
//! | tenant → admin | reset filters |
//! | admin → admin | nothing |
//!
//! # Examples
//!
//! ```rust
//! use admin_query::scope::{Scope, ScopeContext, ScopeMode};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let context = ScopeContext::new(Scope::Admin);
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! let _subscription = context.subscribe(move |change| {
//!     assert_eq!(change.current.mode(), ScopeMode::Tenant);
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! context.switch_scope(Scope::tenant("shopA"));
//! context.switch_scope(Scope::tenant("shopA"));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

mod context;
mod synchronizer;

pub use context::{Scope, ScopeChange, ScopeContext, ScopeMode, ScopeSubscription, TenantId};
pub use synchronizer::{SyncAction, SyncOutcome, enforce_lock, synchronize};
