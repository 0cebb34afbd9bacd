//! Criterion values.

use std::fmt;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An inclusive date window. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateRange {
    /// First day included, if bounded.
    pub from: Option<NaiveDate>,
    /// Last day included, if bounded.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Returns `true` when neither side is bounded.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (Some(from), Some(to)) => write!(formatter, "{from} – {to}"),
            (Some(from), None) => write!(formatter, "from {from}"),
            (None, Some(to)) => write!(formatter, "until {to}"),
            (None, None) => Ok(()),
        }
    }
}

/// A single filter criterion value.
///
/// Values are already validated: they are produced by
/// [`CriterionSpec::parse`](super::CriterionSpec::parse) or built directly by
/// code that knows the value is well formed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "camelCase"))]
pub enum CriterionValue {
    /// Free text or an enumerated choice.
    Text(String),
    /// A finite number.
    Number(f64),
    /// A boolean toggle.
    Flag(bool),
    /// A single calendar day.
    Date(NaiveDate),
    /// A date window.
    DateRange(DateRange),
}

impl CriterionValue {
    /// Creates a text value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::criteria::CriterionValue;
    ///
    /// assert_eq!(CriterionValue::text("paid"), CriterionValue::Text("paid".to_string()));
    /// ```
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a numeric value.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a boolean value.
    #[must_use]
    pub const fn flag(value: bool) -> Self {
        Self::Flag(value)
    }

    /// Creates a date value.
    #[must_use]
    pub const fn date(value: NaiveDate) -> Self {
        Self::Date(value)
    }

    /// Creates a date range value.
    #[must_use]
    pub const fn range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self::DateRange(DateRange::new(from, to))
    }

    /// Returns `true` if this value constrains nothing.
    ///
    /// Blank text and unbounded ranges are empty. Numbers, flags and single
    /// dates never are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::criteria::CriterionValue;
    ///
    /// assert!(CriterionValue::text("  ").is_empty());
    /// assert!(CriterionValue::range(None, None).is_empty());
    /// assert!(!CriterionValue::flag(false).is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::DateRange(range) => range.is_unbounded(),
            Self::Number(_) | Self::Flag(_) | Self::Date(_) => false,
        }
    }

    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Flattens the value into request parameters under `name`.
    ///
    /// Date ranges expand into `<name>From` and `<name>To`, omitting an open
    /// side.
    #[must_use]
    pub fn to_params(&self, name: &str) -> Vec<(String, String)> {
        match self {
            Self::DateRange(range) => {
                let mut params = Vec::with_capacity(2);
                if let Some(from) = range.from {
                    params.push((format!("{name}From"), from.to_string()));
                }
                if let Some(to) = range.to {
                    params.push((format!("{name}To"), to.to_string()));
                }
                params
            }
            other => vec![(name.to_string(), other.to_string())],
        }
    }
}

impl fmt::Display for CriterionValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(formatter, "{text}"),
            Self::Number(number) => write!(formatter, "{number}"),
            Self::Flag(flag) => write!(formatter, "{flag}"),
            Self::Date(date) => write!(formatter, "{date}"),
            Self::DateRange(range) => write!(formatter, "{range}"),
        }
    }
}

impl From<&str> for CriterionValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CriterionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CriterionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}
