//! Resource configuration.

use crate::criteria::{CriterionSpec, CriterionValue};
use crate::query::SortDirective;
use crate::scope::TenantId;

const DEFAULT_PAGE_SIZE: u32 = 50;

/// The criterion a single-tenant scope pins.
///
/// `value_of` maps the locked tenant to the value the resource filters on;
/// by default the tenant identifier itself, as text.
#[derive(Debug, Clone)]
pub struct LockCriterion {
    name: String,
    value_of: fn(&TenantId) -> CriterionValue,
}

impl LockCriterion {
    /// Pins `name` to the tenant identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::mapped(name, |tenant| CriterionValue::text(tenant.as_str()))
    }

    /// Pins `name` to a value derived from the tenant identifier.
    #[must_use]
    pub fn mapped(name: impl Into<String>, value_of: fn(&TenantId) -> CriterionValue) -> Self {
        Self {
            name: name.into(),
            value_of,
        }
    }

    /// The pinned criterion name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value pinned for `tenant`.
    #[must_use]
    pub fn value_for(&self, tenant: &TenantId) -> CriterionValue {
        (self.value_of)(tenant)
    }
}

/// Configuration of one resource list.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    name: String,
    default_sort: SortDirective,
    default_page_size: u32,
    lock: Option<LockCriterion>,
    criteria: Vec<CriterionSpec>,
}

impl ResourceConfig {
    /// Creates a configuration with no criteria and no lock.
    #[must_use]
    pub fn new(name: impl Into<String>, default_sort: SortDirective) -> Self {
        Self {
            name: name.into(),
            default_sort,
            default_page_size: DEFAULT_PAGE_SIZE,
            lock: None,
            criteria: Vec::new(),
        }
    }

    /// Sets the default page size. Zero is raised to one.
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    /// Designates the scope-lock criterion, replacing any earlier one.
    ///
    /// A criterion spec with the same name is declared if none exists, so
    /// the lock shows up in the chip list.
    #[must_use]
    pub fn lock(mut self, lock: LockCriterion) -> Self {
        if self.spec(lock.name()).is_none() {
            self.criteria
                .push(CriterionSpec::text(lock.name(), lock.name()));
        }
        self.lock = Some(lock);
        self
    }

    /// Declares a criterion. A later declaration with the same name replaces
    /// the earlier one.
    #[must_use]
    pub fn criterion(mut self, spec: CriterionSpec) -> Self {
        match self
            .criteria
            .iter_mut()
            .find(|existing| existing.name() == spec.name())
        {
            Some(existing) => *existing = spec,
            None => self.criteria.push(spec),
        }
        self
    }

    /// The resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sort used when the user has not chosen one.
    #[must_use]
    pub const fn default_sort(&self) -> &SortDirective {
        &self.default_sort
    }

    /// The initial page size.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// The scope-lock criterion, if the resource has one.
    #[must_use]
    pub const fn lock_criterion(&self) -> Option<&LockCriterion> {
        self.lock.as_ref()
    }

    /// Returns `true` if `name` is the scope-lock criterion.
    #[must_use]
    pub fn is_lock_criterion(&self, name: &str) -> bool {
        self.lock.as_ref().is_some_and(|lock| lock.name() == name)
    }

    /// The declared criteria, in declaration order.
    #[must_use]
    pub fn criteria(&self) -> &[CriterionSpec] {
        &self.criteria
    }

    /// Looks up a declared criterion.
    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&CriterionSpec> {
        self.criteria.iter().find(|spec| spec.name() == name)
    }
}
