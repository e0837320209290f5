//! Property-based tests for sieve using proptest.

use proptest::prelude::*;
use serde_json::json;
use sieve::{build_matcher, FilterOptions, Matcher, Pattern, Query, Strategy as MatchStrategy, Term};

// ============================================================================
// Test helpers
// ============================================================================

fn match_strategy() -> impl Strategy<Value = MatchStrategy> {
    prop::sample::select(MatchStrategy::ALL.to_vec())
}

// Literals heavy on regex metacharacters.
fn literal_strategy() -> impl Strategy<Value = String> {
    r"[a-z .*+?()\[\]{}|^$\\-]{0,12}"
}

fn compile(options: serde_json::Value) -> Query {
    let options = FilterOptions::from_value(options).unwrap();
    Query::new().apply(options.spec()).unwrap()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Every text pattern accepts the term it was built from.
    #[test]
    fn pattern_is_reflexive(strategy in match_strategy(), literal in literal_strategy()) {
        let pattern = Pattern::new(strategy, &literal).unwrap();
        prop_assert!(pattern.is_match(&literal));
    }

    /// Patterns agree with plain string operations, metacharacters included.
    #[test]
    fn pattern_agrees_with_str_methods(
        literal in literal_strategy(),
        prefix in literal_strategy(),
        suffix in literal_strategy(),
    ) {
        let candidate = format!("{prefix}{literal}{suffix}");

        let contains = Pattern::new(MatchStrategy::Contains, &literal).unwrap();
        prop_assert_eq!(contains.is_match(&candidate), candidate.contains(&literal));
        prop_assert!(contains.is_match(&candidate));

        let starts = Pattern::new(MatchStrategy::StartsWith, &literal).unwrap();
        prop_assert_eq!(starts.is_match(&candidate), candidate.starts_with(&literal));

        let ends = Pattern::new(MatchStrategy::EndsWith, &literal).unwrap();
        prop_assert_eq!(ends.is_match(&candidate), candidate.ends_with(&literal));

        let exact = Pattern::new(MatchStrategy::Exact, &literal).unwrap();
        prop_assert_eq!(exact.is_match(&candidate), candidate == literal);
    }

    /// Non-text terms are passed through untouched under every strategy.
    #[test]
    fn non_text_terms_are_values(strategy in match_strategy(), n in any::<i64>(), b in any::<bool>()) {
        prop_assert_eq!(
            build_matcher(strategy, &Term::from(n)).unwrap(),
            Matcher::Value(Term::from(n))
        );
        prop_assert_eq!(
            build_matcher(strategy, &Term::from(b)).unwrap(),
            Matcher::Value(Term::from(b))
        );
    }

    /// An optional list of N elements yields one group of N alternatives,
    /// each accepting its own element.
    #[test]
    fn optional_list_expands(values in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let query = compile(json!({"filters": {"optional": {"exact": {"name": values}}}}));

        prop_assert_eq!(query.disjunctive_groups().len(), 1);
        let group = &query.disjunctive_groups()[0];
        prop_assert_eq!(group.len(), values.len());
        for (clause, value) in group.iter().zip(&values) {
            prop_assert!(clause.matcher.is_match_str(value));
        }
    }

    /// A mandatory list is never expanded.
    #[test]
    fn mandatory_list_stays_whole(values in prop::collection::vec("[a-z]{1,8}", 0..10)) {
        let query = compile(json!({"filters": {"mandatory": {"exact": {"name": values}}}}));

        prop_assert_eq!(query.conjunctive().len(), 1);
        prop_assert!(query.disjunctive_groups().is_empty());
        prop_assert!(!query.conjunctive()[0].1.is_pattern());
    }

    /// Compiling the same spec twice yields identical queries.
    #[test]
    fn compile_is_idempotent(
        strategy in match_strategy(),
        name in literal_strategy(),
        colors in prop::collection::vec("[a-z]{1,8}", 0..5),
        id in any::<i64>(),
    ) {
        let options = json!({
            "filters": {
                "mandatory": {strategy.as_str(): {"name": name}, "exact": {"id": id}},
                "optional": {strategy.as_str(): {"features.color": colors}}
            }
        });

        prop_assert_eq!(compile(options.clone()), compile(options));
    }

    /// Optional groups never exceed the number of distinct strategies.
    #[test]
    fn at_most_one_group_per_strategy(
        fields in prop::collection::btree_map("[a-z]{1,6}", "[a-z]{1,6}", 0..6),
    ) {
        let mut optional = serde_json::Map::new();
        for strategy in MatchStrategy::ALL {
            optional.insert(strategy.as_str().to_string(), json!(fields));
        }
        let query = compile(json!({"filters": {"optional": optional}}));

        let expected_groups = if fields.is_empty() { 0 } else { MatchStrategy::ALL.len() };
        prop_assert_eq!(query.disjunctive_groups().len(), expected_groups);
        for group in query.disjunctive_groups() {
            prop_assert_eq!(group.len(), fields.len());
        }
    }
}
