//! Mounting a controller.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;

use super::{Core, ListController, Shared};
use crate::fetch::{FetchCollaborator, FetchOrchestrator, FetchView};
use crate::notice::{NotificationSink, TracingNotifier};
use crate::query::QueryState;
use crate::resource::ResourceConfig;
use crate::scope::{ScopeContext, synchronize};
use crate::settings::Settings;

/// Errors raised while mounting a controller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Mounting happened outside a tokio runtime.
    #[error("list controllers must be mounted inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Configures and mounts a [`ListController`].
pub struct ListControllerBuilder<C> {
    config: ResourceConfig,
    collaborator: C,
    settings: Settings,
    notifier: Arc<dyn NotificationSink>,
}

impl<C: FetchCollaborator> ListControllerBuilder<C> {
    pub(super) fn new(config: ResourceConfig, collaborator: C) -> Self {
        Self {
            config,
            collaborator,
            settings: Settings::default(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Uses `settings` instead of the defaults.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Sends failure notices to `notifier` instead of the log.
    #[must_use]
    pub fn notifier(mut self, notifier: impl NotificationSink + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Mounts the view under `scope` and issues its first fetch.
    ///
    /// The controller follows every later scope switch until it is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoRuntime`] when called outside a tokio
    /// runtime.
    pub fn mount(self, scope: &ScopeContext) -> Result<ListController<C>, ControllerError> {
        let runtime = Handle::try_current()?;

        let config = match self.settings.page_size_override {
            Some(page_size) => self.config.page_size(page_size),
            None => self.config,
        };
        let current = scope.current();
        let state = synchronize(&QueryState::defaults(&config), None, &current, &config).state;
        let (view, _) = watch::channel(FetchView::default());

        let shared = Arc::new(Shared {
            core: Mutex::new(Core {
                orchestrator: FetchOrchestrator::new(config.name()),
                state,
                scope: current,
                drafts: BTreeMap::new(),
            }),
            config,
            settings: self.settings,
            collaborator: self.collaborator,
            notifier: self.notifier,
            runtime,
            view,
        });

        let observer: Weak<Shared<C>> = Arc::downgrade(&shared);
        let subscription = scope.subscribe(move |change| {
            if let Some(shared) = observer.upgrade() {
                Shared::follow_scope(&shared, &change.current);
            }
        });

        tracing::debug!(resource = shared.config.name(), scope = %scope.current(), "list view mounted");
        Shared::refresh(&shared);
        // Catch up with a switch made between reading the scope and subscribing.
        Shared::follow_scope(&shared, &scope.current());

        Ok(ListController {
            shared,
            _subscription: subscription,
        })
    }
}
