//! The shared scope context.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Scope
// =============================================================================

/// Identifier of a tenant (shop).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// The two browsing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScopeMode {
    /// All tenants are visible.
    Admin,
    /// Locked to one tenant.
    Tenant,
}

/// The current viewing scope.
///
/// The locked tenant exists exactly when the mode is [`ScopeMode::Tenant`];
/// the enum makes any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", content = "lockedTenant", rename_all = "lowercase"))]
pub enum Scope {
    /// Browsing as an administrator.
    #[default]
    Admin,
    /// Browsing locked to one tenant.
    Tenant(TenantId),
}

impl Scope {
    /// Creates a single-tenant scope.
    #[must_use]
    pub fn tenant(id: impl Into<String>) -> Self {
        Self::Tenant(TenantId::new(id))
    }

    /// Builds a scope from a mode and an optional locked tenant.
    ///
    /// # Panics
    ///
    /// Panics if a tenant is given in admin mode or missing in tenant mode.
    /// Such a pair is a programming error, not a recoverable condition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::scope::{Scope, ScopeMode, TenantId};
    ///
    /// let scope = Scope::from_parts(ScopeMode::Tenant, Some(TenantId::new("shopA")));
    /// assert_eq!(scope, Scope::tenant("shopA"));
    /// ```
    #[must_use]
    pub fn from_parts(mode: ScopeMode, locked_tenant: Option<TenantId>) -> Self {
        match (mode, locked_tenant) {
            (ScopeMode::Admin, None) => Self::Admin,
            (ScopeMode::Tenant, Some(tenant)) => Self::Tenant(tenant),
            (ScopeMode::Admin, Some(tenant)) => {
                panic!("inconsistent scope: admin mode with locked tenant {tenant}")
            }
            (ScopeMode::Tenant, None) => {
                panic!("inconsistent scope: tenant mode without a locked tenant")
            }
        }
    }

    /// The browsing mode.
    #[must_use]
    pub const fn mode(&self) -> ScopeMode {
        match self {
            Self::Admin => ScopeMode::Admin,
            Self::Tenant(_) => ScopeMode::Tenant,
        }
    }

    /// The locked tenant, in tenant mode.
    #[must_use]
    pub const fn locked_tenant(&self) -> Option<&TenantId> {
        match self {
            Self::Admin => None,
            Self::Tenant(tenant) => Some(tenant),
        }
    }

    /// Returns `true` in tenant mode.
    #[must_use]
    pub const fn is_tenant(&self) -> bool {
        matches!(self, Self::Tenant(_))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => formatter.write_str("admin"),
            Self::Tenant(tenant) => write!(formatter, "tenant:{tenant}"),
        }
    }
}

/// A genuine scope change, delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeChange {
    /// The scope before the switch.
    pub previous: Scope,
    /// The scope after the switch.
    pub current: Scope,
}

// =============================================================================
// Scope Context
// =============================================================================

type Observer = Arc<dyn Fn(&ScopeChange) + Send + Sync>;

struct ScopeInner {
    current: RwLock<Scope>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_id: AtomicU64,
    switching: ReentrantMutex<Cell<bool>>,
}

/// Process-wide holder of the current scope.
///
/// Cloning yields another handle to the same scope. The only way to change
/// the scope is [`switch_scope`](Self::switch_scope).
#[derive(Clone)]
pub struct ScopeContext {
    inner: Arc<ScopeInner>,
}

impl ScopeContext {
    /// Creates a context starting in `initial`.
    #[must_use]
    pub fn new(initial: Scope) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                current: RwLock::new(initial),
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                switching: ReentrantMutex::new(Cell::new(false)),
            }),
        }
    }

    /// Returns the current scope.
    #[must_use]
    pub fn current(&self) -> Scope {
        self.inner.current.read().clone()
    }

    /// Switches to `next` and notifies subscribers in subscription order.
    ///
    /// Returns the change, or `None` when `next` equals the current scope.
    /// Switches are serialized: a second switch from another thread waits
    /// until every subscriber has seen the first. A switch attempted from
    /// inside a subscriber is refused and returns `None`.
    pub fn switch_scope(&self, next: Scope) -> Option<ScopeChange> {
        let guard = self.inner.switching.lock();
        if guard.get() {
            tracing::warn!(scope = %next, "scope switch from inside a scope observer refused");
            return None;
        }

        let change = {
            let mut current = self.inner.current.write();
            if *current == next {
                return None;
            }
            let previous = std::mem::replace(&mut *current, next.clone());
            ScopeChange {
                previous,
                current: next,
            }
        };
        tracing::info!(previous = %change.previous, current = %change.current, "scope switched");

        let observers: Vec<Observer> = self
            .inner
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        let _notifying = Notifying::enter(&guard);
        for observer in observers {
            observer(&change);
        }

        Some(change)
    }

    /// Registers an observer for scope changes.
    ///
    /// The observer stays registered until the returned subscription is
    /// dropped.
    pub fn subscribe<F>(&self, observer: F) -> ScopeSubscription
    where
        F: Fn(&ScopeChange) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.observers.lock().push((id, Arc::new(observer)));
        ScopeSubscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.lock().len()
    }
}

impl Default for ScopeContext {
    fn default() -> Self {
        Self::new(Scope::Admin)
    }
}

impl fmt::Debug for ScopeContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScopeContext")
            .field("current", &*self.inner.current.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

struct Notifying<'a>(&'a Cell<bool>);

impl<'a> Notifying<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for Notifying<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Keeps an observer registered. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct ScopeSubscription {
    id: u64,
    inner: Weak<ScopeInner>,
}

impl Drop for ScopeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.observers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for ScopeSubscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScopeSubscription")
            .field("id", &self.id)
            .finish()
    }
}
