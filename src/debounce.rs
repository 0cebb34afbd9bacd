//! Debounce gate for free-text criteria.
//!
//! A [`DebounceGate`] holds the draft text a user is typing and the value
//! last committed for the same criterion. Keystrokes update the draft at
//! once; the draft is released for commit only after a quiet interval with
//! no further keystrokes, or immediately on an explicit submit.
//!
//! The gate is a plain state machine driven with explicit instants, so it
//! can be exercised without a timer. The controller owns the timer.
//!
//! # Examples
//!
//! ```rust
//! use admin_query::debounce::DebounceGate;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut gate = DebounceGate::new(Duration::from_millis(300), "");
//!
//! gate.input("a", start);
//! gate.input("ab", start + Duration::from_millis(100));
//! let deadline = gate.input("abc", start + Duration::from_millis(200));
//!
//! assert_eq!(gate.poll(start + Duration::from_millis(400)), None);
//! assert_eq!(gate.poll(deadline), Some("abc".to_string()));
//! assert_eq!(gate.poll(deadline), None);
//! ```

use std::time::{Duration, Instant};

/// Coalesces rapid text input into single commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceGate {
    quiet: Duration,
    draft: String,
    committed: String,
    deadline: Option<Instant>,
}

impl DebounceGate {
    /// Creates a gate whose draft starts at the committed value.
    #[must_use]
    pub fn new(quiet: Duration, committed: impl Into<String>) -> Self {
        let committed = committed.into();
        Self {
            quiet,
            draft: committed.clone(),
            committed,
            deadline: None,
        }
    }

    /// Records a keystroke at `now` and returns the new commit deadline.
    ///
    /// Every call pushes the deadline back to `now + quiet`.
    pub fn input(&mut self, raw: impl Into<String>, now: Instant) -> Instant {
        self.draft = raw.into();
        let deadline = now + self.quiet;
        self.deadline = Some(deadline);
        deadline
    }

    /// Releases the draft if the quiet interval has elapsed by `now`.
    ///
    /// Returns `None` while input is still settling, when nothing is
    /// pending, or when the draft already equals the committed value.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.release(),
            _ => None,
        }
    }

    /// Releases the draft immediately, skipping the rest of the interval.
    pub fn submit(&mut self) -> Option<String> {
        self.release()
    }

    /// Resynchronizes with the committed value.
    ///
    /// When the committed value changed from elsewhere, the draft follows it
    /// and any pending commit is dropped. Committed values are trimmed, so a
    /// released draft that differs only in surrounding whitespace is kept.
    pub fn sync(&mut self, committed: &str) {
        if self.committed.trim() == committed {
            return;
        }
        self.committed = committed.to_string();
        self.draft = committed.to_string();
        self.deadline = None;
    }

    /// The text currently shown in the input.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The value last committed.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The pending commit deadline, if input is still settling.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` while a commit is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    fn release(&mut self) -> Option<String> {
        self.deadline = None;
        if self.draft == self.committed {
            return None;
        }
        self.committed.clone_from(&self.draft);
        Some(self.draft.clone())
    }
}
