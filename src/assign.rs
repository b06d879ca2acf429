//! Deterministic cumulative-weight bucket selection.
//!
//! The selector maps `hash32(identifier) mod total_weight` into one of the
//! supplied variants via cumulative-weight interval lookup. For a fixed
//! identifier and a fixed variant sequence (same order, same weights) the
//! result is always the same arm — this is what makes assignment "sticky"
//! across repeated calls and sessions without storing anything.

use std::collections::{BTreeMap, BTreeSet};

use crate::{hash32, Error, VariantOption};

/// One cumulative-weight interval in an [`AssignmentDecision`].
///
/// The variant owns the half-open interval `[cumulative_end - weight, cumulative_end)`
/// on the `[0, total_weight)` line; the arm whose interval contains `target` wins.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantSpan {
    /// Variant name.
    pub name: String,
    /// The variant's own weight.
    pub weight: f64,
    /// Upper bound of the variant's interval (running sum of weights so far).
    pub cumulative_end: f64,
}

/// Output of [`determine_variant_explain`] (chosen arm + audit context).
///
/// This exists because callers frequently need more than "which arm": exposure
/// logging wants the raw hash and target, and debugging a surprising split
/// wants the interval layout. The payload is log-ready (serde under the
/// `serde` feature) so it can be shipped to whatever sink the caller uses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentDecision {
    /// The selected variant.
    pub chosen: String,
    /// Raw identifier hash (`hash32`).
    pub hash: u32,
    /// Sum of all weights.
    pub total_weight: f64,
    /// `hash mod total_weight` — the point looked up on the interval line.
    pub target: f64,
    /// Per-variant intervals, in the input order.
    pub spans: Vec<VariantSpan>,
    /// True if the interval walk completed without containing `target` and the
    /// last variant was returned. Unreachable under well-formed integer
    /// weights; can only fire through floating-point cumulative mismatch.
    pub fallback_used: bool,
}

/// Validate a variant set and return the total weight.
///
/// Invariants enforced: non-empty set, non-empty unique names, finite
/// non-negative weights, positive total. A single zero weight is fine (that
/// arm is simply unreachable); an all-zero set is not.
fn validated_total(variants: &[VariantOption]) -> Result<f64, Error> {
    if variants.is_empty() {
        return Err(Error::EmptyVariants);
    }
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut total = 0.0f64;
    for (index, v) in variants.iter().enumerate() {
        if v.name.is_empty() {
            return Err(Error::EmptyVariantName { index });
        }
        if !seen.insert(v.name.as_str()) {
            return Err(Error::DuplicateVariant {
                name: v.name.clone(),
            });
        }
        if !v.weight.is_finite() || v.weight < 0.0 {
            return Err(Error::InvalidWeight {
                name: v.name.clone(),
                weight: v.weight,
            });
        }
        total += v.weight;
    }
    if total <= 0.0 {
        return Err(Error::ZeroTotalWeight);
    }
    Ok(total)
}

/// Deterministically assign `identifier` to one of the weighted `variants`.
///
/// Selection probability of each arm is `weight / total_weight` over the
/// identifier population. The hash is an integer, so `target` only takes
/// integer values in `[0, total_weight)`: fractional weights still split
/// traffic, but at the granularity of how the total partitions those integers
/// (weights `0.5`/`1.5` behave as a 1-in-2 split, not 1-in-4).
///
/// # Errors
///
/// Rejects empty sets, empty or duplicate names, negative/non-finite weights,
/// and all-zero weights. See [`Error`].
///
/// # Example
///
/// ```rust
/// use kumi::{determine_variant, VariantOption};
///
/// let variants = vec![
///     VariantOption::new("control", 50.0),
///     VariantOption::new("treatment", 50.0),
/// ];
/// let chosen = determine_variant("user123", &variants)?;
/// assert_eq!(chosen, "treatment");
///
/// // Same identifier, same set → same answer, every time.
/// assert_eq!(determine_variant("user123", &variants)?, chosen);
/// # Ok::<(), kumi::Error>(())
/// ```
pub fn determine_variant(identifier: &str, variants: &[VariantOption]) -> Result<String, Error> {
    Ok(determine_variant_explain(identifier, variants)?.chosen)
}

/// Like [`determine_variant`], but also returns the hash, target, and interval
/// layout behind the choice.
pub fn determine_variant_explain(
    identifier: &str,
    variants: &[VariantOption],
) -> Result<AssignmentDecision, Error> {
    let total_weight = validated_total(variants)?;
    let hash = hash32(identifier);
    let target = f64::from(hash) % total_weight;

    let mut spans = Vec::with_capacity(variants.len());
    let mut cumulative = 0.0f64;
    let mut chosen: Option<&str> = None;
    for v in variants {
        cumulative += v.weight;
        spans.push(VariantSpan {
            name: v.name.clone(),
            weight: v.weight,
            cumulative_end: cumulative,
        });
        if chosen.is_none() && target < cumulative {
            chosen = Some(v.name.as_str());
        }
    }

    let fallback_used = chosen.is_none();
    let chosen = chosen
        .unwrap_or_else(|| variants[variants.len() - 1].name.as_str())
        .to_string();
    Ok(AssignmentDecision {
        chosen,
        hash,
        total_weight,
        target,
        spans,
        fallback_used,
    })
}

/// Stable normalized selection probabilities (`weight / total_weight`) for a
/// variant set, keyed by name.
///
/// Same validation as [`determine_variant`]; the returned map iterates in
/// name order, independent of input order.
pub fn selection_probabilities(
    variants: &[VariantOption],
) -> Result<BTreeMap<String, f64>, Error> {
    let total = validated_total(variants)?;
    Ok(variants
        .iter()
        .map(|v| (v.name.clone(), v.weight / total))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(pairs: &[(&str, f64)]) -> Vec<VariantOption> {
        pairs
            .iter()
            .map(|(n, w)| VariantOption::new(*n, *w))
            .collect()
    }

    #[test]
    fn even_split_lands_per_hash() {
        // hash32("user123") = 147_178_873 → 73 mod 100 → second arm.
        let d = determine_variant_explain("user123", &opts(&[("A", 50.0), ("B", 50.0)])).unwrap();
        assert_eq!(d.hash, 147_178_873);
        assert_eq!(d.target, 73.0);
        assert_eq!(d.chosen, "B");
        assert!(!d.fallback_used);
    }

    #[test]
    fn heavy_first_arm_captures_target() {
        // 147_178_873 mod 540 = 253 < 500 → first arm.
        let d = determine_variant_explain("user123", &opts(&[("A", 500.0), ("B", 40.0)])).unwrap();
        assert_eq!(d.target, 253.0);
        assert_eq!(d.chosen, "A");
    }

    #[test]
    fn single_variant_always_wins() {
        let v = opts(&[("only", 1.0)]);
        for id in ["", "user123", "🎲", "anything-at-all"] {
            assert_eq!(determine_variant(id, &v).unwrap(), "only");
        }
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(determine_variant("u", &[]), Err(Error::EmptyVariants));
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let v = opts(&[("A", 0.0), ("B", 0.0)]);
        assert_eq!(determine_variant("u", &v), Err(Error::ZeroTotalWeight));
    }

    #[test]
    fn bad_weights_are_rejected() {
        for w in [-1.0, f64::NAN, f64::INFINITY] {
            let v = opts(&[("A", w), ("B", 1.0)]);
            assert!(matches!(
                determine_variant("u", &v),
                Err(Error::InvalidWeight { .. })
            ));
        }
    }

    #[test]
    fn bad_names_are_rejected() {
        let v = opts(&[("A", 1.0), ("", 1.0)]);
        assert_eq!(
            determine_variant("u", &v),
            Err(Error::EmptyVariantName { index: 1 })
        );

        let v = opts(&[("A", 1.0), ("A", 2.0)]);
        assert!(matches!(
            determine_variant("u", &v),
            Err(Error::DuplicateVariant { .. })
        ));
    }

    #[test]
    fn zero_weight_arm_is_unreachable() {
        let v = opts(&[("dead", 0.0), ("live", 1.0)]);
        for i in 0..50 {
            assert_eq!(determine_variant(&format!("user{i}"), &v).unwrap(), "live");
        }
    }

    #[test]
    fn fractional_weights_split_at_integer_granularity() {
        // total = 2.0, so target ∈ {0.0, 1.0}: a 1-in-2 split despite the 0.5/1.5 weights.
        let v = opts(&[("A", 0.5), ("B", 1.5)]);
        for i in 0..50 {
            let d = determine_variant_explain(&format!("user{i}"), &v).unwrap();
            assert!(d.target == 0.0 || d.target == 1.0);
            assert_eq!(d.chosen, if d.target < 0.5 { "A" } else { "B" });
        }
    }

    #[test]
    fn spans_tile_the_weight_line() {
        let v = opts(&[("A", 2.0), ("B", 0.0), ("C", 3.0)]);
        let d = determine_variant_explain("user123", &v).unwrap();
        assert_eq!(d.spans.len(), 3);
        assert_eq!(d.spans[0].cumulative_end, 2.0);
        assert_eq!(d.spans[1].cumulative_end, 2.0);
        assert_eq!(d.spans[2].cumulative_end, 5.0);
        assert_eq!(d.total_weight, 5.0);
    }

    #[test]
    fn probabilities_are_normalized() {
        let p = selection_probabilities(&opts(&[("A", 1.0), ("B", 3.0)])).unwrap();
        assert_eq!(p["A"], 0.25);
        assert_eq!(p["B"], 0.75);
        assert_eq!(
            selection_probabilities(&[]),
            Err(Error::EmptyVariants)
        );
    }
}
