//! Sort directives.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first. Newly selected columns start here.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Returns the request parameter spelling (`asc` / `desc`).
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_param())
    }
}

/// A `(column, direction)` pair.
///
/// # Examples
///
/// ```rust
/// use admin_query::query::{SortDirection, SortDirective};
///
/// let sort = SortDirective::descending("created_at");
/// assert_eq!(sort.toggle("created_at").direction, SortDirection::Ascending);
/// assert_eq!(sort.toggle("total").column, "total");
/// assert_eq!(sort.toggle("total").direction, SortDirection::Descending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortDirective {
    /// The column sorted on.
    pub column: String,
    /// The direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Creates a directive.
    #[must_use]
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Creates an ascending directive.
    #[must_use]
    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    /// Creates a descending directive.
    #[must_use]
    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }

    /// Returns the directive after the user clicks `column`.
    ///
    /// The same column flips direction; any other column starts descending.
    #[must_use]
    pub fn toggle(&self, column: &str) -> Self {
        if self.column == column {
            Self::new(column, self.direction.toggled())
        } else {
            Self::descending(column)
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", self.column, self.direction)
    }
}
