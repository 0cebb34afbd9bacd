//! One isolated query-state controller per mounted list view.
//!
//! A [`ListController`] is built from a [`ResourceConfig`] and the resource's
//! [`FetchCollaborator`]. It owns the committed [`QueryState`], runs every
//! user action through the reducer, follows the shared [`ScopeContext`],
//! debounces free-text input and keeps the [`FetchView`] in step with the
//! latest committed state.
//!
//! All methods are synchronous. Fetches and debounce timers run as tasks on
//! the tokio runtime the controller was mounted in; their results are
//! observable through [`ListController::view`] and [`ListController::watch`].
//!
//! # Examples
//!
//! ```rust
//! use admin_query::prelude::*;
//! use futures::future::{BoxFuture, FutureExt};
//!
//! struct Orders;
//!
//! impl FetchCollaborator for Orders {
//!     type Record = String;
//!     type Summary = ();
//!
//!     fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, FetchResult<String, ()>> {
//!         let records = vec![format!("page {}", request.page())];
//!         async move { Ok(FetchPage::new(records, PaginationMeta::new(1, 50, 1))) }.boxed()
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scope = ScopeContext::new(Scope::Admin);
//! let controller = ListController::builder(catalog::orders(), Orders).mount(&scope)?;
//!
//! let mut updates = controller.watch();
//! updates.wait_for(|view| view.loaded).await?;
//! assert_eq!(controller.view().records, vec!["page 1".to_string()]);
//!
//! controller.set_raw_criterion("financialStatus", "paid")?;
//! assert_eq!(controller.chips().len(), 1);
//! # Ok(())
//! # }
//! ```

mod builder;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::Instant;

pub use builder::{ControllerError, ListControllerBuilder};

use crate::chip::{ChipList, project};
use crate::criteria::{CriterionSet, CriterionSpec, CriterionValue, InputError};
use crate::debounce::DebounceGate;
use crate::fetch::{
    Completion, FetchCollaborator, FetchOrchestrator, FetchRequest, FetchResult, FetchView,
    RequestToken,
};
use crate::notice::{Notice, NotificationSink};
use crate::query::{QueryAction, QueryState, ReduceContext, reduce};
use crate::resource::ResourceConfig;
use crate::scope::{Scope, ScopeContext, ScopeSubscription, synchronize};
use crate::settings::Settings;

/// The fetch view type of collaborator `C`.
pub type ViewOf<C> =
    FetchView<<C as FetchCollaborator>::Record, <C as FetchCollaborator>::Summary>;

// =============================================================================
// List Controller
// =============================================================================

/// The query-state controller of one mounted list view.
///
/// Dropping the controller unmounts the view: it stops following the scope
/// and responses still in flight are ignored.
pub struct ListController<C: FetchCollaborator> {
    shared: Arc<Shared<C>>,
    _subscription: ScopeSubscription,
}

impl<C: FetchCollaborator> ListController<C> {
    /// Starts configuring a controller for `config`, fetching through
    /// `collaborator`.
    pub fn builder(config: ResourceConfig, collaborator: C) -> ListControllerBuilder<C> {
        ListControllerBuilder::new(config, collaborator)
    }

    /// Mounts a controller with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoRuntime`] when called outside a tokio
    /// runtime.
    pub fn mount(
        config: ResourceConfig,
        collaborator: C,
        scope: &ScopeContext,
    ) -> Result<Self, ControllerError> {
        Self::builder(config, collaborator).mount(scope)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Applies `action` to the committed state.
    ///
    /// Returns `true` if the state changed, in which case a fetch for the new
    /// state has been issued.
    pub fn dispatch(&self, action: QueryAction) -> bool {
        Shared::run(&self.shared, |core, config| core.apply(config, action))
    }

    /// Sets a criterion to an already-validated value.
    pub fn set_criterion(&self, name: impl Into<String>, value: CriterionValue) -> bool {
        self.dispatch(QueryAction::set(name, value))
    }

    /// Clears a criterion.
    pub fn clear_criterion(&self, name: impl Into<String>) -> bool {
        self.dispatch(QueryAction::remove(name))
    }

    /// Sorts by `column`, flipping the direction if it is already sorted on.
    pub fn set_sort(&self, column: impl Into<String>) -> bool {
        self.dispatch(QueryAction::SetSort(column.into()))
    }

    /// Moves to `page`.
    pub fn set_page(&self, page: u32) -> bool {
        self.dispatch(QueryAction::SetPage(page))
    }

    /// Changes the page size.
    pub fn set_page_size(&self, page_size: u32) -> bool {
        self.dispatch(QueryAction::SetPageSize(page_size))
    }

    /// Clears every criterion the scope does not pin and restores the
    /// default sort.
    pub fn reset_filters(&self) -> bool {
        self.dispatch(QueryAction::ResetFilters)
    }

    /// Removes the chip keyed `key`. Pinned chips cannot be removed.
    pub fn remove_chip(&self, key: &str) -> bool {
        self.dispatch(QueryAction::remove(key))
    }

    /// Re-issues the fetch for the unchanged committed state.
    pub fn refresh(&self) {
        Shared::refresh(&self.shared);
    }

    // -------------------------------------------------------------------------
    // Input boundary
    // -------------------------------------------------------------------------

    /// Parses raw form input for `name` and commits it.
    ///
    /// Blank input clears the criterion. Returns whether the committed state
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the criterion is unknown, pinned by the
    /// scope, or the input does not parse. Nothing is committed then.
    pub fn set_raw_criterion(&self, name: &str, raw: &str) -> Result<bool, InputError> {
        let value = self.shared.editable_spec(name)?.parse(raw)?;
        Ok(self.dispatch(QueryAction::SetCriterion {
            name: name.to_string(),
            value,
        }))
    }

    /// Parses the two ends of a date range for `name` and commits it.
    ///
    /// # Errors
    ///
    /// As [`set_raw_criterion`](Self::set_raw_criterion); an inverted range
    /// is rejected too.
    pub fn set_raw_range(&self, name: &str, from: &str, to: &str) -> Result<bool, InputError> {
        let value = self.shared.editable_spec(name)?.parse_range(from, to)?;
        Ok(self.dispatch(QueryAction::SetCriterion {
            name: name.to_string(),
            value,
        }))
    }

    /// Records a keystroke in a free-text input.
    ///
    /// Debounced criteria commit once the configured quiet interval passes
    /// without further keystrokes; other text criteria commit at once.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the criterion is unknown or pinned by
    /// the scope.
    pub fn type_text(&self, name: &str, raw: &str) -> Result<(), InputError> {
        let spec = self.shared.editable_spec(name)?;
        if !spec.is_debounced() {
            return self.set_raw_criterion(name, raw).map(|_| ());
        }
        Shared::debounce(&self.shared, name, raw);
        Ok(())
    }

    /// Commits the draft of `name` now, skipping the rest of the quiet
    /// interval. Returns whether the committed state changed.
    pub fn submit_text(&self, name: &str) -> bool {
        Shared::run(&self.shared, |core, config| {
            match core.drafts.get_mut(name).and_then(DebounceGate::submit) {
                Some(text) => core.commit_draft(config, name, &text),
                None => Committed::default(),
            }
        })
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The text shown in the input for `name`.
    #[must_use]
    pub fn draft(&self, name: &str) -> String {
        let core = self.shared.core.lock();
        core.drafts.get(name).map_or_else(
            || committed_text(core.state.criteria(), name).to_string(),
            |gate| gate.draft().to_string(),
        )
    }

    /// The committed query state.
    #[must_use]
    pub fn state(&self) -> QueryState {
        self.shared.core.lock().state.clone()
    }

    /// The scope this view currently follows.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.shared.core.lock().scope.clone()
    }

    /// The chips of the committed criteria.
    #[must_use]
    pub fn chips(&self) -> ChipList {
        let core = self.shared.core.lock();
        project(core.state.criteria(), &self.shared.config, &core.scope)
    }

    /// The latest fetch outcome.
    #[must_use]
    pub fn view(&self) -> ViewOf<C> {
        self.shared.view.borrow().clone()
    }

    /// A receiver notified of every change to the fetch outcome.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<ViewOf<C>> {
        self.shared.view.subscribe()
    }

    /// The resource configuration in effect.
    #[must_use]
    pub fn config(&self) -> &ResourceConfig {
        &self.shared.config
    }

    /// The settings in effect.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.shared.settings
    }
}

impl<C: FetchCollaborator> std::fmt::Debug for ListController<C> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.shared.core.lock();
        formatter
            .debug_struct("ListController")
            .field("resource", &self.shared.config.name())
            .field("scope", &core.scope)
            .field("state", &core.state)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Shared state
// =============================================================================

struct Shared<C: FetchCollaborator> {
    config: ResourceConfig,
    settings: Settings,
    collaborator: C,
    notifier: Arc<dyn NotificationSink>,
    runtime: Handle,
    core: Mutex<Core<C::Record, C::Summary>>,
    view: watch::Sender<ViewOf<C>>,
}

struct Core<R, S> {
    state: QueryState,
    scope: Scope,
    drafts: BTreeMap<String, DebounceGate>,
    orchestrator: FetchOrchestrator<R, S>,
}

/// The result of one step on the locked core.
#[derive(Default)]
struct Committed {
    changed: bool,
    request: Option<(RequestToken, FetchRequest)>,
}

impl<R, S> Core<R, S> {
    fn apply(&mut self, config: &ResourceConfig, action: QueryAction) -> Committed {
        let context = ReduceContext::new(config, &self.scope)
            .with_last_page(self.orchestrator.last_page(&self.state));
        let next = reduce(&self.state, action, &context);
        self.commit(config, next)
    }

    /// Commits a released draft through the same parsing as form input.
    fn commit_draft(&mut self, config: &ResourceConfig, name: &str, text: &str) -> Committed {
        let value = match config.spec(name).map(|spec| spec.parse(text)) {
            Some(Ok(value)) => value,
            Some(Err(error)) => {
                tracing::debug!(resource = config.name(), criterion = name, %error, "draft rejected");
                return Committed::default();
            }
            None => return Committed::default(),
        };
        self.apply(
            config,
            QueryAction::SetCriterion {
                name: name.to_string(),
                value,
            },
        )
    }

    /// Pulls the page back inside the end the server just reported.
    fn clamp_to_reported_end(&mut self, config: &ResourceConfig) -> Committed {
        match self.orchestrator.last_page(&self.state) {
            Some(last_page) if self.state.page() > last_page => {
                tracing::debug!(
                    resource = config.name(),
                    page = self.state.page(),
                    last_page,
                    "page beyond reported end"
                );
                self.apply(config, QueryAction::SetPage(last_page))
            }
            _ => Committed::default(),
        }
    }

    fn commit(&mut self, config: &ResourceConfig, next: QueryState) -> Committed {
        if next == self.state {
            return Committed::default();
        }
        self.state = next;
        tracing::debug!(
            resource = config.name(),
            page = self.state.page(),
            criteria = self.state.criteria().len(),
            sort = %self.state.sort(),
            "query state committed"
        );

        let criteria = self.state.criteria();
        for (name, gate) in &mut self.drafts {
            gate.sync(committed_text(criteria, name));
        }

        Committed {
            changed: true,
            request: self.orchestrator.begin(&self.state),
        }
    }
}

impl<C: FetchCollaborator> Shared<C> {
    /// Runs `step` on the locked core, publishes the view and issues the
    /// fetch it requested once the lock is released.
    fn run<F>(shared: &Arc<Self>, step: F) -> bool
    where
        F: FnOnce(&mut Core<C::Record, C::Summary>, &ResourceConfig) -> Committed,
    {
        let committed = {
            let mut core = shared.core.lock();
            let committed = step(&mut *core, &shared.config);
            if committed.changed || committed.request.is_some() {
                shared.publish(&core);
            }
            committed
        };
        if let Some((token, request)) = committed.request {
            Self::spawn_fetch(shared, token, request);
        }
        committed.changed
    }

    fn refresh(shared: &Arc<Self>) {
        Self::run(shared, |core, _| Committed {
            changed: false,
            request: core.orchestrator.begin(&core.state),
        });
    }

    fn follow_scope(shared: &Arc<Self>, current: &Scope) {
        Self::run(shared, |core, config| {
            if core.scope == *current {
                return Committed::default();
            }
            let previous = std::mem::replace(&mut core.scope, current.clone());
            let outcome = synchronize(&core.state, Some(&previous), current, config);
            core.commit(config, outcome.state)
        });
    }

    fn debounce(shared: &Arc<Self>, name: &str, raw: &str) {
        let deadline = {
            let mut core = shared.core.lock();
            let committed = committed_text(core.state.criteria(), name).to_string();
            let quiet = shared.settings.debounce;
            core.drafts
                .entry(name.to_string())
                .or_insert_with(|| DebounceGate::new(quiet, committed))
                .input(raw, Instant::now().into_std())
        };

        let weak = Arc::downgrade(shared);
        let name = name.to_string();
        shared.runtime.spawn(async move {
            tokio::time::sleep_until(Instant::from_std(deadline)).await;
            if let Some(shared) = weak.upgrade() {
                Self::flush(&shared, &name);
            }
        });
    }

    fn flush(shared: &Arc<Self>, name: &str) {
        Self::run(shared, |core, config| {
            let now = Instant::now().into_std();
            match core.drafts.get_mut(name).and_then(|gate| gate.poll(now)) {
                Some(text) => core.commit_draft(config, name, &text),
                None => Committed::default(),
            }
        });
    }

    fn spawn_fetch(shared: &Arc<Self>, token: RequestToken, request: FetchRequest) {
        let response = shared.collaborator.fetch(request);
        let weak = Arc::downgrade(shared);
        shared.runtime.spawn(async move {
            let result = response.await;
            if let Some(shared) = weak.upgrade() {
                Self::complete(&shared, token, result);
            }
        });
    }

    fn complete(
        shared: &Arc<Self>,
        token: RequestToken,
        result: FetchResult<C::Record, C::Summary>,
    ) {
        let (failure, follow_up) = {
            let mut core = shared.core.lock();
            let outcome = match core.orchestrator.complete(token, result) {
                Completion::Discarded => return,
                Completion::Applied => (None, core.clamp_to_reported_end(&shared.config).request),
                Completion::Failed(error) => (Some(error), None),
            };
            shared.publish(&core);
            outcome
        };

        if let Some((token, request)) = follow_up {
            Self::spawn_fetch(shared, token, request);
        }
        if let Some(error) = failure
            && shared.settings.notify_on_failure
        {
            shared
                .notifier
                .notify(Notice::fetch_failed(shared.config.name(), &error));
        }
    }

    fn publish(&self, core: &Core<C::Record, C::Summary>) {
        self.view.send_replace(core.orchestrator.view().clone());
    }

    fn editable_spec(&self, name: &str) -> Result<&CriterionSpec, InputError> {
        let spec = self
            .config
            .spec(name)
            .ok_or_else(|| InputError::UnknownCriterion(name.to_string()))?;
        let scope = self.core.lock().scope.clone();
        if ReduceContext::new(&self.config, &scope).is_locked(name) {
            return Err(InputError::NotEditable(name.to_string()));
        }
        Ok(spec)
    }
}

fn committed_text<'a>(criteria: &'a CriterionSet, name: &str) -> &'a str {
    criteria
        .get(name)
        .and_then(CriterionValue::as_text)
        .unwrap_or("")
}
