//! Request bookkeeping for one view.

use std::fmt;

use super::{FetchError, FetchRequest, FetchResult, FetchView};
use crate::query::QueryState;

/// Identifies one issued request. Tokens grow monotonically per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// How a response was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The response was canonical and is now displayed.
    Applied,
    /// The canonical request failed; displayed records were kept.
    Failed(FetchError),
    /// The response belonged to a superseded request and was dropped.
    Discarded,
}

/// Tags requests and drops responses of superseded ones.
///
/// Only the most recently issued request is canonical. Responses may arrive
/// in any order; a response whose token is not the latest never reaches the
/// view.
///
/// The displayed pagination bounds pages only for the query it was reported
/// for. Once criteria, sort or page size change, the last page is unknown
/// until the new query's first response arrives.
///
/// # Examples
///
/// ```rust
/// use admin_query::prelude::*;
///
/// let config = catalog::orders();
/// let mut orchestrator: FetchOrchestrator<&str, ()> = FetchOrchestrator::new("orders");
///
/// let (first, _) = orchestrator.begin(&QueryState::defaults(&config)).unwrap();
/// let (second, _) = orchestrator.begin(&QueryState::defaults(&config)).unwrap();
///
/// let page = FetchPage::new(vec!["fresh"], PaginationMeta::new(1, 50, 1));
/// assert_eq!(orchestrator.complete(second, Ok(page)), Completion::Applied);
///
/// let stale = FetchPage::new(vec!["stale"], PaginationMeta::new(1, 50, 1));
/// assert_eq!(orchestrator.complete(first, Ok(stale)), Completion::Discarded);
/// assert_eq!(orchestrator.view().records, vec!["fresh"]);
/// ```
#[derive(Debug, Clone)]
pub struct FetchOrchestrator<R, S> {
    resource: String,
    issued: u64,
    latest: Option<RequestToken>,
    in_flight: Option<QueryState>,
    reported: Option<QueryState>,
    view: FetchView<R, S>,
}

impl<R, S> FetchOrchestrator<R, S> {
    /// Creates an orchestrator for `resource` with an empty view.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            issued: 0,
            latest: None,
            in_flight: None,
            reported: None,
            view: FetchView::default(),
        }
    }

    /// Issues a request for `state`, superseding any request in flight.
    ///
    /// Returns `None` without issuing anything when the server has already
    /// reported that `state`'s page does not exist.
    pub fn begin(&mut self, state: &QueryState) -> Option<(RequestToken, FetchRequest)> {
        if let Some(last_page) = self.last_page(state)
            && state.page() > last_page
        {
            tracing::debug!(
                resource = %self.resource,
                page = state.page(),
                last_page,
                "skipped fetch for out-of-range page"
            );
            return None;
        }

        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest = Some(token);
        self.in_flight = Some(state.clone());
        self.view.start();
        tracing::debug!(resource = %self.resource, token = token.get(), "fetch issued");
        Some((token, FetchRequest::new(self.resource.clone(), state.clone())))
    }

    /// Handles the response of the request tagged `token`.
    pub fn complete(&mut self, token: RequestToken, result: FetchResult<R, S>) -> Completion {
        if self.latest != Some(token) {
            tracing::debug!(
                resource = %self.resource,
                token = token.get(),
                latest = self.latest.map(RequestToken::get),
                "discarded stale response"
            );
            return Completion::Discarded;
        }
        self.latest = None;
        let requested = self.in_flight.take();

        match result {
            Ok(page) => {
                self.view.succeed(page);
                self.reported = requested;
                Completion::Applied
            }
            Err(error) => {
                tracing::warn!(
                    resource = %self.resource,
                    token = token.get(),
                    kind = ?error.kind,
                    error = %error.message,
                    "fetch failed"
                );
                self.view.fail(error.clone());
                Completion::Failed(error)
            }
        }
    }

    /// The last page of `state`'s query, if the displayed pagination was
    /// reported for it. The page number itself is not compared.
    #[must_use]
    pub fn last_page(&self, state: &QueryState) -> Option<u32> {
        self.reported
            .as_ref()
            .filter(|reported| reported.same_query(state))
            .and(self.view.pagination)
            .map(|pagination| pagination.last_page())
    }

    /// Returns `true` while the canonical request is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// The token of the canonical request, if one is in flight.
    #[must_use]
    pub const fn latest(&self) -> Option<RequestToken> {
        self.latest
    }

    /// The displayed outcome.
    #[must_use]
    pub const fn view(&self) -> &FetchView<R, S> {
        &self.view
    }
}
