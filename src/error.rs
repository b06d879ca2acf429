//! Error taxonomy for variant-set validation and overrides.
//!
//! All errors are synchronous and local: there is no retry, no partial failure.
//! A malformed variant set is a configuration bug and is surfaced to the caller
//! rather than silently defaulted (e.g. to the first arm), which would mask it.

use thiserror::Error;

/// Errors surfaced by variant-set validation and assignment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The variant sequence was empty.
    #[error("variant set is empty")]
    EmptyVariants,

    /// A variant had an empty name.
    #[error("variant at index {index} has an empty name")]
    EmptyVariantName {
        /// Position of the offending variant in the input order.
        index: usize,
    },

    /// Two variants in the same set shared a name.
    #[error("duplicate variant name {name:?}")]
    DuplicateVariant {
        /// The repeated name.
        name: String,
    },

    /// A weight was negative, NaN, or infinite.
    #[error("variant {name:?} has invalid weight {weight}")]
    InvalidWeight {
        /// Name of the offending variant.
        name: String,
        /// The rejected weight.
        weight: f64,
    },

    /// Every weight was zero, so no bucket interval has any mass.
    #[error("variant weights sum to zero")]
    ZeroTotalWeight,

    /// An override named a variant not present in the set.
    #[error("unknown variant {name:?}")]
    UnknownVariant {
        /// The name that was not found.
        name: String,
    },
}
