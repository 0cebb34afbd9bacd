//! Shared fixtures for controller tests.

#![allow(dead_code)]

use std::sync::Arc;

use admin_query::prelude::*;
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use tokio::sync::oneshot;

/// A row as returned by the fake backend: `"<resource>#<page>"` plus a tag.
pub type Row = String;

/// Total records reported by echoed pages.
pub const ECHO_TOTAL: u64 = 500;

// =============================================================================
// Backend
// =============================================================================

/// A fetch collaborator that records every request.
///
/// In manual mode each request waits until the test answers it with
/// [`Backend::respond`]; in echo mode it resolves immediately with a page
/// describing the request.
#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<BackendInner>>,
}

#[derive(Default)]
struct BackendInner {
    echo: bool,
    requests: Vec<FetchRequest>,
    responders: Vec<Option<oneshot::Sender<FetchResult<Row, u64>>>>,
}

impl Backend {
    /// A backend that holds every request until answered.
    pub fn manual() -> Self {
        Self::default()
    }

    /// A backend that answers every request at once.
    pub fn echo() -> Self {
        let backend = Self::default();
        backend.inner.lock().echo = true;
        backend
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.inner.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().requests.len()
    }

    pub fn last_request(&self) -> FetchRequest {
        self.inner
            .lock()
            .requests
            .last()
            .cloned()
            .expect("no request was issued")
    }

    /// Answers request `index` (0-based, in issue order).
    pub fn respond(&self, index: usize, result: FetchResult<Row, u64>) {
        let responder = self.inner.lock().responders[index]
            .take()
            .expect("request already answered");
        let _ = responder.send(result);
    }

    /// Answers request `index` with the page [`echo_page`] builds for it.
    pub fn respond_echo(&self, index: usize, tag: &str) {
        let request = self.inner.lock().requests[index].clone();
        self.respond(index, Ok(echo_page(&request, tag)));
    }
}

impl FetchCollaborator for Backend {
    type Record = Row;
    type Summary = u64;

    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, FetchResult<Row, u64>> {
        let mut inner = self.inner.lock();
        inner.requests.push(request.clone());
        if inner.echo {
            inner.responders.push(None);
            return futures::future::ready(Ok(echo_page(&request, "echo"))).boxed();
        }

        let (sender, receiver) = oneshot::channel();
        inner.responders.push(Some(sender));
        async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(FetchError::network("request dropped")))
        }
        .boxed()
    }
}

/// A page whose single row names the resource, page and `tag`.
pub fn echo_page(request: &FetchRequest, tag: &str) -> FetchPage<Row, u64> {
    FetchPage::new(
        vec![format!("{}#{}:{tag}", request.resource(), request.page())],
        PaginationMeta::new(request.page(), request.page_size(), ECHO_TOTAL),
    )
    .with_summary(ECHO_TOTAL)
}

/// Looks up a request parameter.
pub fn param(request: &FetchRequest, name: &str) -> Option<String> {
    request
        .params()
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

// =============================================================================
// Notices
// =============================================================================

/// Collects notices raised by a controller.
#[derive(Clone, Default)]
pub struct Notices {
    received: Arc<Mutex<Vec<Notice>>>,
}

impl Notices {
    pub fn sink(&self) -> impl NotificationSink + 'static {
        let received = Arc::clone(&self.received);
        move |notice: Notice| received.lock().push(notice)
    }

    pub fn all(&self) -> Vec<Notice> {
        self.received.lock().clone()
    }
}

// =============================================================================
// Runtime helpers
// =============================================================================

/// Lets spawned fetch tasks run to completion.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Mounts `config` against `backend` with notices collected in `notices`.
pub fn mount(
    config: ResourceConfig,
    backend: &Backend,
    notices: &Notices,
    scope: &ScopeContext,
) -> ListController<Backend> {
    ListController::builder(config, backend.clone())
        .notifier(notices.sink())
        .mount(scope)
        .expect("mounted inside a runtime")
}
