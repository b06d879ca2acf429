//! Tagged-variant dispatch.
//!
//! The original shape of this problem is conditional child rendering: each
//! branch checks "am I the active variant?" and renders or not. Here that
//! becomes a single dispatch table: compute the assignment once, then look up
//! the branch keyed by the active variant name. One lookup, no per-branch
//! comparisons scattered through the tree.

use std::collections::BTreeMap;

use crate::{Experiment, VariantOption};

/// A mapping from variant name to a branch value (a handler, a config, a
/// widget — whatever the caller dispatches on).
///
/// # Example
///
/// ```rust
/// use kumi::{Experiment, VariantMap, VariantOption};
///
/// let exp = Experiment::new(
///     "user123",
///     vec![
///         VariantOption::new("control", 50.0),
///         VariantOption::new("treatment", 50.0),
///     ],
/// )?;
///
/// let headline = VariantMap::new()
///     .on("control", "Welcome back")
///     .on("treatment", "Check out what's new");
/// assert_eq!(headline.dispatch(&exp), Some(&"Check out what's new"));
/// # Ok::<(), kumi::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VariantMap<T> {
    branches: BTreeMap<String, T>,
}

impl<T> VariantMap<T> {
    /// An empty dispatch table.
    pub fn new() -> Self {
        Self {
            branches: BTreeMap::new(),
        }
    }

    /// Builder-style insert: register `branch` for `name`.
    ///
    /// Registering the same name twice keeps the last branch.
    #[must_use]
    pub fn on(mut self, name: impl Into<String>, branch: T) -> Self {
        self.branches.insert(name.into(), branch);
        self
    }

    /// Register `branch` for `name`, returning any branch it replaced.
    pub fn insert(&mut self, name: impl Into<String>, branch: T) -> Option<T> {
        self.branches.insert(name.into(), branch)
    }

    /// The branch registered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.branches.get(name)
    }

    /// Number of registered branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether no branches are registered.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Registered variant names, in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    /// The branch for the experiment's active variant, if one is registered.
    pub fn dispatch(&self, experiment: &Experiment) -> Option<&T> {
        self.branches.get(experiment.assigned())
    }

    /// Like [`dispatch`](Self::dispatch), but falls back to `default` when the
    /// active variant has no registered branch.
    pub fn dispatch_or<'a>(&'a self, experiment: &Experiment, default: &'a T) -> &'a T {
        self.dispatch(experiment).unwrap_or(default)
    }

    /// Variants in `variants` that have no registered branch.
    ///
    /// Audit helper: a non-empty answer means some share of traffic dispatches
    /// to nothing.
    pub fn unhandled<'a>(&self, variants: &'a [VariantOption]) -> Vec<&'a str> {
        variants
            .iter()
            .filter(|v| !self.branches.contains_key(&v.name))
            .map(|v| v.name.as_str())
            .collect()
    }
}

impl<T> Default for VariantMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
