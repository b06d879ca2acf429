//! `kumi`: deterministic weighted variant assignment (sticky experiment-arm bucketing).
//!
//! Designed for "which arm does this user see" problems: you have a small set
//! of named variants (experiment arms, feature branches, rollout cohorts —
//! anything a user is placed into once and should stay in), each with a
//! relative weight, and you need the same identifier to land on the same arm
//! every time without storing anything anywhere.
//!
//! The core is two pure functions:
//!
//! - [`hash32`]: a stable, non-cryptographic 32-bit hash of the identifier
//!   (djb2-style multiply-and-add over UTF-16 code units, wrapping signed
//!   arithmetic — the overflow behavior is part of the contract).
//! - [`determine_variant`]: maps `hash mod total_weight` into one of the
//!   supplied variants via cumulative-weight interval lookup.
//!
//! **Goals:**
//! - **Deterministic by default**: same identifier + same ordered variant set
//!   → same arm, across calls, sessions, and platforms.
//! - **Stateless**: no persistence, no cache, no shared mutable anything; safe
//!   to call from any number of threads without coordination.
//! - **Auditable**: every selection has an `_explain` form
//!   ([`determine_variant_explain`]) returning the hash, target, and interval
//!   layout as a log-ready payload (serde under the `serde` feature).
//! - **Small K**: designed for a handful of arms per experiment; selection is
//!   O(n) in the arm count and returns immediately.
//!
//! **Session plumbing:**
//! - [`Experiment`]: an explicit context object that resolves the assignment
//!   once and is threaded through whatever consumes it — the replacement for
//!   ambient provider state. Supports a validated manual override and
//!   recompute-on-identifier-change.
//! - [`VariantMap`]: tagged-variant dispatch — one table from arm name to
//!   branch value, replacing per-branch "am I active?" checks.
//!
//! **Non-goals:**
//! - Not an experimentation platform: no assignment persistence, no exposure
//!   pipelines, no re-weighting of a live experiment (changing weights changes
//!   assignments — that is by construction).
//! - No cryptographic guarantees on the hash, and no composite identifiers;
//!   one string in, one arm out.
//!
//! # Example
//!
//! ```rust
//! use kumi::{Experiment, VariantMap, VariantOption};
//!
//! let exp = Experiment::new(
//!     "user123",
//!     vec![
//!         VariantOption::new("control", 1.0),
//!         VariantOption::new("treatment", 2.0),
//!     ],
//! )?;
//!
//! let flow = VariantMap::new()
//!     .on("control", "legacy checkout")
//!     .on("treatment", "one-page checkout");
//! assert_eq!(flow.dispatch(&exp), Some(&"one-page checkout"));
//! # Ok::<(), kumi::Error>(())
//! ```

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod stable_hash;
pub use stable_hash::*;

mod assign;
pub use assign::*;

mod experiment;
pub use experiment::*;

mod dispatch;
pub use dispatch::*;

pub const KUMI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One selectable experiment arm: a name and its relative probability mass.
///
/// Selection probability is `weight / sum(weights)` over the identifier
/// population. Weights may be integers or floats; a zero weight makes the arm
/// unreachable (useful for draining an arm without renumbering the rest).
/// Immutable once handed to the selector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantOption {
    /// Arm name (non-empty, unique within its set).
    pub name: String,
    /// Relative probability mass (finite, ≥ 0).
    pub weight: f64,
}

impl VariantOption {
    /// Construct an arm. Validation happens at selection time, against the
    /// whole set (uniqueness is a set property, not an arm property).
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}
