//! The fetch collaborator contract.

use std::fmt;

use futures::future::BoxFuture;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::criteria::CriterionSet;
use crate::query::{PaginationMeta, QueryState, SortDirective};

// =============================================================================
// Fetch Error
// =============================================================================

/// Broad category of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FetchErrorKind {
    /// The service could not be reached.
    Network,
    /// The request took too long.
    Timeout,
    /// The session is not allowed to read this resource.
    Unauthorized,
    /// The service answered with an error.
    Server,
    /// The response could not be understood.
    Decode,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Network => "network error",
            Self::Timeout => "timed out",
            Self::Unauthorized => "not authorized",
            Self::Server => "server error",
            Self::Decode => "unreadable response",
        };
        formatter.write_str(text)
    }
}

/// A failed fetch, as reported by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[error("{kind}: {message}")]
pub struct FetchError {
    /// Failure category.
    pub kind: FetchErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl FetchError {
    /// Creates a fetch error.
    #[must_use]
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a [`FetchErrorKind::Network`] error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    /// Shorthand for a [`FetchErrorKind::Server`] error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Server, message)
    }
}

// =============================================================================
// Request / Response
// =============================================================================

/// Everything the data layer needs to load one page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    resource: String,
    state: QueryState,
}

impl FetchRequest {
    /// Creates a request for `resource` under `state`.
    #[must_use]
    pub fn new(resource: impl Into<String>, state: QueryState) -> Self {
        Self {
            resource: resource.into(),
            state,
        }
    }

    /// The resource name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The filter criteria.
    #[must_use]
    pub const fn criteria(&self) -> &CriterionSet {
        self.state.criteria()
    }

    /// The sort directive.
    #[must_use]
    pub const fn sort(&self) -> &SortDirective {
        self.state.sort()
    }

    /// The requested page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.state.page()
    }

    /// The requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.state.page_size()
    }

    /// The committed state this request was issued for.
    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// Flat request parameters, as [`QueryState::to_params`].
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        self.state.to_params()
    }
}

/// One page of records as returned by the data layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FetchPage<R, S> {
    /// The records, in display order.
    pub records: Vec<R>,
    /// Pagination metadata for this page.
    pub pagination: PaginationMeta,
    /// Optional aggregate over the whole result (e.g. totals).
    pub summary: Option<S>,
}

impl<R, S> FetchPage<R, S> {
    /// Creates a page without a summary.
    #[must_use]
    pub const fn new(records: Vec<R>, pagination: PaginationMeta) -> Self {
        Self {
            records,
            pagination,
            summary: None,
        }
    }

    /// Attaches a summary.
    #[must_use]
    pub fn with_summary(mut self, summary: S) -> Self {
        self.summary = Some(summary);
        self
    }
}

/// The result a collaborator resolves to.
pub type FetchResult<R, S> = Result<FetchPage<R, S>, FetchError>;

// =============================================================================
// Collaborator
// =============================================================================

/// Loads pages of one resource from the data layer.
///
/// The returned future must not borrow from `self`; it is driven on the
/// controller's runtime after the call returns.
pub trait FetchCollaborator: Send + Sync + 'static {
    /// The record type of the resource.
    type Record: Clone + Send + Sync + 'static;
    /// The summary type, `()` if the resource has none.
    type Summary: Clone + Send + Sync + 'static;

    /// Fetches the page described by `request`.
    fn fetch(
        &self,
        request: FetchRequest,
    ) -> BoxFuture<'static, FetchResult<Self::Record, Self::Summary>>;
}
