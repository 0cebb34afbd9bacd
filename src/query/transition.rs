//! Composable state transitions.
//!
//! A `Transition<S>` wraps a function `S -> S`. Reducer operations are built
//! by chaining small transitions with [`Transition::then`], so that shared
//! steps such as "go back to the first page" are written once.
//!
//! # Laws
//!
//! - Left Identity: `Transition::identity().then(t)` behaves as `t`
//! - Right Identity: `t.then(Transition::identity())` behaves as `t`
//! - Associativity: `a.then(b).then(c)` behaves as `a.then(b.then(c))`
//!
//! # Examples
//!
//! ```rust
//! use admin_query::query::Transition;
//!
//! let double = Transition::modify(|value: i32| value * 2);
//! let increment = Transition::modify(|value: i32| value + 1);
//!
//! assert_eq!(double.clone().then(increment.clone()).run(5), 11);
//! assert_eq!(increment.then(double).run(5), 12);
//! ```

use std::sync::Arc;

/// A pure state transition `S -> S`.
///
/// Cloning is cheap: the wrapped function is reference counted.
pub struct Transition<S>
where
    S: 'static,
{
    run_function: Arc<dyn Fn(S) -> S + Send + Sync>,
}

impl<S> Transition<S>
where
    S: 'static,
{
    /// Creates a transition from a function.
    pub fn modify<F>(function: F) -> Self
    where
        F: Fn(S) -> S + Send + Sync + 'static,
    {
        Self {
            run_function: Arc::new(function),
        }
    }

    /// The transition that returns its input unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::modify(|state| state)
    }

    /// Runs `self`, then `next` on the result.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        let first = self.run_function;
        let second = next.run_function;
        Self::modify(move |state| second(first(state)))
    }

    /// Applies the transition to `state`.
    pub fn run(&self, state: S) -> S {
        (self.run_function)(state)
    }
}

impl<S> Clone for Transition<S>
where
    S: 'static,
{
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<S> std::fmt::Debug for Transition<S>
where
    S: 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Transition(<function>)")
    }
}
