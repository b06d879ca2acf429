//! Session-scoped assignment context.
//!
//! The original shape of this problem is a UI provider holding the active
//! variant in ambient shared state, with descendants reading it implicitly.
//! Here that becomes an explicit value: an [`Experiment`] computes the
//! assignment exactly once at construction, is threaded (by reference) through
//! whatever consumes it, and is dropped when that scope ends. No globals, no
//! re-evaluation on read.

use crate::{determine_variant_explain, AssignmentDecision, Error, VariantOption};

/// An identifier's resolved assignment against a fixed variant set.
///
/// Holds the full [`AssignmentDecision`] for auditing, plus an optional manual
/// override (the "force this user into arm X" escape hatch). The override must
/// name a variant in the set, so downstream dispatch stays total.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experiment {
    identifier: String,
    variants: Vec<VariantOption>,
    decision: AssignmentDecision,
    overridden: Option<String>,
}

impl Experiment {
    /// Resolve `identifier` against `variants` and hold the result.
    ///
    /// # Errors
    ///
    /// Fails on a malformed variant set (see [`Error`]); an experiment is
    /// never constructed half-valid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kumi::{Experiment, VariantOption};
    ///
    /// let exp = Experiment::new(
    ///     "user123",
    ///     vec![
    ///         VariantOption::new("control", 50.0),
    ///         VariantOption::new("treatment", 50.0),
    ///     ],
    /// )?;
    /// assert_eq!(exp.assigned(), "treatment");
    /// assert!(exp.is_active("treatment"));
    /// # Ok::<(), kumi::Error>(())
    /// ```
    pub fn new(identifier: impl Into<String>, variants: Vec<VariantOption>) -> Result<Self, Error> {
        let identifier = identifier.into();
        let decision = determine_variant_explain(&identifier, &variants)?;
        Ok(Self {
            identifier,
            variants,
            decision,
            overridden: None,
        })
    }

    /// The identifier this experiment was resolved for.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The variant set, in the order it was supplied.
    pub fn variants(&self) -> &[VariantOption] {
        &self.variants
    }

    /// The full decision behind the computed assignment (ignores overrides).
    pub fn decision(&self) -> &AssignmentDecision {
        &self.decision
    }

    /// The active variant name: the override if one is set, else the computed
    /// assignment.
    pub fn assigned(&self) -> &str {
        self.overridden.as_deref().unwrap_or(&self.decision.chosen)
    }

    /// Whether `name` is the active variant.
    pub fn is_active(&self, name: &str) -> bool {
        self.assigned() == name
    }

    /// Whether a manual override is in effect.
    pub fn overridden(&self) -> bool {
        self.overridden.is_some()
    }

    /// Force the active variant to `name`, which must be in the set.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVariant`] if `name` is not one of the experiment's
    /// variants.
    pub fn override_assigned(&mut self, name: impl Into<String>) -> Result<(), Error> {
        let name = name.into();
        if !self.variants.iter().any(|v| v.name == name) {
            return Err(Error::UnknownVariant { name });
        }
        self.overridden = Some(name);
        Ok(())
    }

    /// Drop any manual override, restoring the computed assignment.
    pub fn clear_override(&mut self) {
        self.overridden = None;
    }

    /// Re-resolve for a new identifier (e.g. the session's user changed),
    /// clearing any override.
    ///
    /// The variant set is unchanged, so this cannot fail on set validation;
    /// it recomputes the decision only.
    pub fn set_identifier(&mut self, identifier: impl Into<String>) -> Result<(), Error> {
        let identifier = identifier.into();
        self.decision = determine_variant_explain(&identifier, &self.variants)?;
        self.identifier = identifier;
        self.overridden = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fifty_fifty() -> Vec<VariantOption> {
        vec![
            VariantOption::new("control", 50.0),
            VariantOption::new("treatment", 50.0),
        ]
    }

    #[test]
    fn assignment_is_computed_once_and_held() {
        let exp = Experiment::new("user123", fifty_fifty()).unwrap();
        assert_eq!(exp.assigned(), "treatment");
        assert_eq!(exp.decision().hash, 147_178_873);
        // Reading twice does not re-evaluate anything.
        assert_eq!(exp.assigned(), exp.assigned());
    }

    #[test]
    fn override_must_name_a_known_variant() {
        let mut exp = Experiment::new("user123", fifty_fifty()).unwrap();
        assert_eq!(
            exp.override_assigned("holdout"),
            Err(Error::UnknownVariant {
                name: "holdout".to_string()
            })
        );
        assert!(!exp.overridden());

        exp.override_assigned("control").unwrap();
        assert!(exp.overridden());
        assert_eq!(exp.assigned(), "control");
        // The computed decision is untouched underneath.
        assert_eq!(exp.decision().chosen, "treatment");

        exp.clear_override();
        assert_eq!(exp.assigned(), "treatment");
    }

    #[test]
    fn identifier_change_recomputes_and_drops_override() {
        let mut exp = Experiment::new("user123", fifty_fifty()).unwrap();
        exp.override_assigned("control").unwrap();

        exp.set_identifier("user124").unwrap();
        assert!(!exp.overridden());
        assert_eq!(exp.identifier(), "user124");
        // Whatever the new assignment is, it is the set's own answer.
        assert_eq!(
            exp.assigned(),
            crate::determine_variant("user124", exp.variants()).unwrap()
        );
    }
}
