//! Minimal end-to-end walkthrough: resolve an assignment, dispatch on it.
//!
//! Run with: `cargo run --example quickstart`

use kumi::{Experiment, VariantMap, VariantOption};

fn main() -> Result<(), kumi::Error> {
    // One third of users keep the old checkout, two thirds get the new one.
    let variants = vec![
        VariantOption::new("control", 1.0),
        VariantOption::new("treatment", 2.0),
    ];

    for user in ["user123", "user124", "user125"] {
        let exp = Experiment::new(user, variants.clone())?;

        let screen = VariantMap::new()
            .on("control", "legacy checkout")
            .on("treatment", "one-page checkout");

        let d = exp.decision();
        println!(
            "{user}: {} (hash={}, target={:.0}/{:.0})",
            screen.dispatch_or(&exp, &"legacy checkout"),
            d.hash,
            d.target,
            d.total_weight,
        );
    }

    Ok(())
}
