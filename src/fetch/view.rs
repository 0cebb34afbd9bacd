//! What a list view displays.

use super::{FetchError, FetchPage};
use crate::query::PaginationMeta;

/// The latest fetch outcome of one view.
///
/// Successful fetches replace records, pagination and summary together. A
/// failure keeps whatever was displayed before and only sets `error`; if
/// nothing was ever loaded the view stays empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchView<R, S> {
    /// The displayed records.
    pub records: Vec<R>,
    /// Pagination of the displayed records.
    pub pagination: Option<PaginationMeta>,
    /// Summary of the displayed result.
    pub summary: Option<S>,
    /// The failure of the latest fetch, shown as a banner.
    pub error: Option<FetchError>,
    /// Whether the canonical request is still in flight.
    pub loading: bool,
    /// Whether any fetch has ever succeeded.
    pub loaded: bool,
}

impl<R, S> Default for FetchView<R, S> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            pagination: None,
            summary: None,
            error: None,
            loading: false,
            loaded: false,
        }
    }
}

impl<R, S> FetchView<R, S> {
    pub(crate) fn start(&mut self) {
        self.loading = true;
    }

    pub(crate) fn succeed(&mut self, page: FetchPage<R, S>) {
        *self = Self {
            records: page.records,
            pagination: Some(page.pagination),
            summary: page.summary,
            error: None,
            loading: false,
            loaded: true,
        };
    }

    pub(crate) fn fail(&mut self, error: FetchError) {
        self.error = Some(error);
        self.loading = false;
    }

    /// Returns `true` if the view has nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
