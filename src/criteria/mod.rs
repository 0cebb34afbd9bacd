//! Filter criteria and the input boundary.
//!
//! A [`CriterionSet`] maps criterion names to [`CriterionValue`]s. Absence of
//! a key means "unconstrained"; the set never stores an empty value, so an
//! empty search string or an unbounded date range is the same as no
//! criterion at all.
//!
//! Raw text typed into a form control never reaches a set directly. It goes
//! through [`CriterionSpec::parse`], which either produces a value, reports
//! that the input clears the criterion, or rejects it with an
//! [`InputError`] for inline field feedback.
//!
//! # Examples
//!
//! ```rust
//! use admin_query::criteria::{CriterionSet, CriterionSpec, CriterionValue};
//!
//! let status = CriterionSpec::choice("financialStatus", "Payment", ["paid", "pending"]);
//! let value = status.parse("paid").unwrap();
//!
//! let set = CriterionSet::new().with("financialStatus", value.unwrap());
//! assert_eq!(set.get("financialStatus"), Some(&CriterionValue::text("paid")));
//!
//! // Empty input clears instead of storing an empty string.
//! assert_eq!(status.parse("   ").unwrap(), None);
//! assert!(status.parse("refunded-twice").is_err());
//! ```

mod set;
mod spec;
mod value;

pub use set::CriterionSet;
pub use spec::{CriterionKind, CriterionSpec, InputError};
pub use value::{CriterionValue, DateRange};
