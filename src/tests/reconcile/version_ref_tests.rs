use super::*;

#[test]
fn token_is_preferred_over_positional() {
    assert_eq!(version_ref(3, Some("v-abc")), "v-abc");
}

#[test]
fn positional_is_only_a_fallback() {
    assert_eq!(version_ref(3, None), "3");
    assert_eq!(version_ref(3, Some("")), "3");
}

// `expect_err` on mutation results prints the Ok value, so the outcome pair
// must be debug-formattable.
#[test]
fn outcome_pairs_are_debug_formattable() {
    let outcome = MutationOutcome {
        message: "update triggered".to_string(),
    };
    let agg = Aggregate {
        channels: Vec::new(),
        notes: Vec::new(),
    };
    let rendered = format!("{:?}", (outcome, agg));
    assert!(rendered.contains("update triggered"));
}
