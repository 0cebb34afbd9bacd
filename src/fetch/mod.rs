//! Fetching pages for a list view.
//!
//! The data layer itself lives outside this crate. A resource's data source
//! plugs in as a [`FetchCollaborator`]; the [`FetchOrchestrator`] tags every
//! request it issues with a [`RequestToken`] and lets only the response of
//! the latest request reach the [`FetchView`].

mod collaborator;
mod orchestrator;
mod view;

pub use collaborator::{
    FetchCollaborator, FetchError, FetchErrorKind, FetchPage, FetchRequest, FetchResult,
};
pub use orchestrator::{Completion, FetchOrchestrator, RequestToken};
pub use view::FetchView;
