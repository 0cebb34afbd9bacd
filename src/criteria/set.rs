//! The criterion set.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::CriterionValue;

/// Mapping from criterion name to value.
///
/// Operations return new sets rather than mutating in place, so a
/// transition can always compare the previous and next committed state.
/// Iteration is ordered by criterion name.
///
/// # Examples
///
/// ```rust
/// use admin_query::criteria::{CriterionSet, CriterionValue};
///
/// let base = CriterionSet::new().with("search", CriterionValue::text("mug"));
/// let cleared = base.with("search", CriterionValue::text(""));
///
/// assert_eq!(base.len(), 1);
/// assert!(cleared.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CriterionSet {
    entries: BTreeMap<String, CriterionValue>,
}

impl CriterionSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CriterionValue> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` is constrained.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of constrained criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a set with `name` set to `value`.
    ///
    /// An empty value removes the criterion instead.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, value: CriterionValue) -> Self {
        let name = name.into();
        if value.is_empty() {
            return self.without(&name);
        }
        let mut entries = self.entries.clone();
        entries.insert(name, value);
        Self { entries }
    }

    /// Returns a set without `name`.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        if !self.entries.contains_key(name) {
            return self.clone();
        }
        let mut entries = self.entries.clone();
        entries.remove(name);
        Self { entries }
    }

    /// Returns a set holding only `name`, if it was present.
    #[must_use]
    pub fn only(&self, name: &str) -> Self {
        self.entries
            .get_key_value(name)
            .map(|(key, value)| (key.clone(), value.clone()))
            .into_iter()
            .collect()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CriterionValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, CriterionValue)> for CriterionSet {
    fn from_iter<I: IntoIterator<Item = (String, CriterionValue)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CriterionSet {
    type Item = (&'a String, &'a CriterionValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, CriterionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
