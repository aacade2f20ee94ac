//! Fuzz target for condition parsing and evaluation.
//!
//! Goal: parsing and evaluating a condition should **never panic** on any input.
//! Unparseable clauses simply evaluate to false.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_condition
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use resguard_domain::Condition;
use resguard_types::{Provider, Resource};

/// Structured input: a condition plus the resource fields it is most likely to touch.
#[derive(Arbitrary, Debug)]
struct ConditionInput {
    condition: String,
    cost: f64,
    age_days: u32,
    size_gb: f64,
    tags: Vec<(String, String)>,
}

fuzz_target!(|input: ConditionInput| {
    if input.condition.len() > 1024 || input.tags.len() > 16 {
        return;
    }

    let resource = input.tags.into_iter().fold(
        Resource::new(Provider::Aws, "volume", "vol-1", "fuzz", "us-east-1")
            .with_estimated_monthly_cost(input.cost)
            .with_age_days(input.age_days)
            .with_size_gb(input.size_gb),
        |r, (k, v)| r.with_tag(k, v),
    );

    let condition = Condition::parse(&input.condition);
    let _ = condition.matches(&resource);
});
