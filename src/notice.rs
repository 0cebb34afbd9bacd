//! Transient notifications.
//!
//! Presenting notifications is the host's business. Controllers hand each
//! [`Notice`] to a [`NotificationSink`]; the default sink,
//! [`TracingNotifier`], only logs them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// Something went wrong but the view is still usable.
    Warning,
    /// An operation failed.
    Error,
}

/// A dismissable, transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Short headline.
    pub title: String,
    /// Detail text.
    pub message: String,
    /// Whether the user can dismiss it.
    pub dismissable: bool,
}

impl Notice {
    /// Creates a dismissable notice.
    #[must_use]
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            dismissable: true,
        }
    }

    /// The notice raised when a list fails to load.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::notice::{Notice, NoticeLevel};
    ///
    /// let notice = Notice::fetch_failed("orders", &"server returned 502");
    /// assert_eq!(notice.level, NoticeLevel::Error);
    /// assert_eq!(notice.title, "Could not load orders");
    /// assert!(notice.dismissable);
    /// ```
    #[must_use]
    pub fn fetch_failed(resource: &str, error: &impl fmt::Display) -> Self {
        Self::new(
            NoticeLevel::Error,
            format!("Could not load {resource}"),
            error.to_string(),
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.title, self.message)
    }
}

/// Receives notices raised by controllers.
pub trait NotificationSink: Send + Sync {
    /// Presents `notice` to the user.
    fn notify(&self, notice: Notice);
}

impl<F> NotificationSink for F
where
    F: Fn(Notice) + Send + Sync,
{
    fn notify(&self, notice: Notice) {
        self(notice);
    }
}

/// A sink that writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Warning => tracing::warn!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Error => tracing::error!(title = %notice.title, "{}", notice.message),
        }
    }
}
