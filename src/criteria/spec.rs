//! Criterion declarations and raw-input validation.

use chrono::NaiveDate;
use thiserror::Error;

use super::CriterionValue;

const DATE_FORMAT: &str = "%Y-%m-%d";
const RANGE_SEPARATOR: &str = "..";

// =============================================================================
// Input Error
// =============================================================================

/// Raw input that cannot become a criterion value.
///
/// These are reported next to the offending field and never reach the
/// committed query state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The resource declares no criterion with this name.
    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),

    /// The input is not a finite number.
    #[error("{criterion}: '{raw}' is not a number")]
    InvalidNumber {
        /// The criterion the input was meant for.
        criterion: String,
        /// The rejected input, trimmed.
        raw: String,
    },

    /// The input is not a boolean.
    #[error("{criterion}: '{raw}' is not true or false")]
    InvalidBoolean {
        /// The criterion the input was meant for.
        criterion: String,
        /// The rejected input, trimmed.
        raw: String,
    },

    /// The input is not one of the allowed options.
    #[error("{criterion}: '{raw}' is not an allowed option")]
    InvalidChoice {
        /// The criterion the input was meant for.
        criterion: String,
        /// The rejected input, trimmed.
        raw: String,
    },

    /// The input is not an ISO `YYYY-MM-DD` date.
    #[error("{criterion}: '{raw}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The criterion the input was meant for.
        criterion: String,
        /// The rejected input, trimmed.
        raw: String,
    },

    /// The range starts after it ends.
    #[error("{criterion}: {from} is after {to}")]
    InvertedRange {
        /// The date-range criterion.
        criterion: String,
        /// The requested start.
        from: NaiveDate,
        /// The requested end.
        to: NaiveDate,
    },

    /// The criterion is pinned by the current scope.
    #[error("{0} is locked by the current scope")]
    NotEditable(String),
}

// =============================================================================
// Criterion Kind
// =============================================================================

/// The shape of values a criterion accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionKind {
    /// Free text. Debounced text is committed through the debounce gate.
    Text {
        /// Whether keystrokes are coalesced before committing.
        debounced: bool,
    },
    /// A finite number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// One of a fixed list of options.
    Choice(Vec<String>),
    /// A single `YYYY-MM-DD` day.
    Date,
    /// A `YYYY-MM-DD..YYYY-MM-DD` window, either side optional.
    DateRange,
}

// =============================================================================
// Criterion Spec
// =============================================================================

/// Declaration of one filterable criterion of a resource.
///
/// # Examples
///
/// ```rust
/// use admin_query::criteria::{CriterionSpec, CriterionValue};
///
/// let search = CriterionSpec::text("search", "Search").debounced();
/// assert!(search.is_debounced());
/// assert_eq!(search.parse(" mug ").unwrap(), Some(CriterionValue::text("mug")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionSpec {
    name: String,
    label: String,
    kind: CriterionKind,
    internal: bool,
}

impl CriterionSpec {
    /// Declares a criterion of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: CriterionKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            internal: false,
        }
    }

    /// Declares a free-text criterion.
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, CriterionKind::Text { debounced: false })
    }

    /// Declares a numeric criterion.
    #[must_use]
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, CriterionKind::Number)
    }

    /// Declares a boolean criterion.
    #[must_use]
    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, CriterionKind::Boolean)
    }

    /// Declares an enumerated criterion.
    #[must_use]
    pub fn choice<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            label,
            CriterionKind::Choice(options.into_iter().map(Into::into).collect()),
        )
    }

    /// Declares a single-date criterion.
    #[must_use]
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, CriterionKind::Date)
    }

    /// Declares a date-range criterion.
    #[must_use]
    pub fn date_range(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, CriterionKind::DateRange)
    }

    /// Marks a text criterion as debounced. No effect on other kinds.
    #[must_use]
    pub fn debounced(mut self) -> Self {
        if let CriterionKind::Text { debounced } = &mut self.kind {
            *debounced = true;
        }
        self
    }

    /// Marks the criterion as internal: it filters, but is never shown as a
    /// chip.
    #[must_use]
    pub const fn internal(mut self) -> Self {
        self.internal = true;
        self
    }

    /// The criterion name used in state and requests.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The accepted value shape.
    #[must_use]
    pub const fn kind(&self) -> &CriterionKind {
        &self.kind
    }

    /// Returns `true` if the criterion is hidden from the chip list.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.internal
    }

    /// Returns `true` if keystrokes go through the debounce gate.
    #[must_use]
    pub const fn is_debounced(&self) -> bool {
        matches!(self.kind, CriterionKind::Text { debounced: true })
    }

    /// Parses raw input into a value.
    ///
    /// Returns `Ok(None)` when the input is blank, meaning "clear this
    /// criterion".
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] describing why the input was rejected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::criteria::{CriterionSpec, CriterionValue, InputError};
    ///
    /// let total = CriterionSpec::number("minTotal", "Minimum total");
    /// assert_eq!(total.parse("12.5").unwrap(), Some(CriterionValue::number(12.5)));
    /// assert!(matches!(total.parse("twelve"), Err(InputError::InvalidNumber { .. })));
    /// ```
    pub fn parse(&self, raw: &str) -> Result<Option<CriterionValue>, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let value = match &self.kind {
            CriterionKind::Text { .. } => CriterionValue::text(trimmed),
            CriterionKind::Number => CriterionValue::number(self.parse_number(trimmed)?),
            CriterionKind::Boolean => CriterionValue::flag(self.parse_boolean(trimmed)?),
            CriterionKind::Choice(options) => {
                if !options.iter().any(|option| option == trimmed) {
                    return Err(InputError::InvalidChoice {
                        criterion: self.name.clone(),
                        raw: trimmed.to_string(),
                    });
                }
                CriterionValue::text(trimmed)
            }
            CriterionKind::Date => CriterionValue::date(self.parse_date(trimmed)?),
            CriterionKind::DateRange => {
                let (from, to) = trimmed
                    .split_once(RANGE_SEPARATOR)
                    .unwrap_or((trimmed, ""));
                return self.parse_range(from, to);
            }
        };
        Ok(Some(value))
    }

    /// Parses the two sides of a date-range input.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidDate`] for a malformed side and
    /// [`InputError::InvertedRange`] when `from` is after `to`.
    pub fn parse_range(&self, from: &str, to: &str) -> Result<Option<CriterionValue>, InputError> {
        let from = self.parse_optional_date(from)?;
        let to = self.parse_optional_date(to)?;
        if let (Some(start), Some(end)) = (from, to)
            && start > end
        {
            return Err(InputError::InvertedRange {
                criterion: self.name.clone(),
                from: start,
                to: end,
            });
        }
        let value = CriterionValue::range(from, to);
        Ok((!value.is_empty()).then_some(value))
    }

    fn parse_number(&self, raw: &str) -> Result<f64, InputError> {
        raw.parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| InputError::InvalidNumber {
                criterion: self.name.clone(),
                raw: raw.to_string(),
            })
    }

    fn parse_boolean(&self, raw: &str) -> Result<bool, InputError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(InputError::InvalidBoolean {
                criterion: self.name.clone(),
                raw: raw.to_string(),
            }),
        }
    }

    fn parse_date(&self, raw: &str) -> Result<NaiveDate, InputError> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| InputError::InvalidDate {
            criterion: self.name.clone(),
            raw: raw.to_string(),
        })
    }

    fn parse_optional_date(&self, raw: &str) -> Result<Option<NaiveDate>, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            self.parse_date(trimmed).map(Some)
        }
    }
}
