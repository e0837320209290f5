//! Clause types for compiled predicates.
//!
//! A [`Clause`] pairs a field path with a [`Matcher`]: either a compiled
//! text pattern or a literal value compared by equality.

use std::cmp::Ordering;

use crate::pattern::Pattern;
use crate::value::{FieldValue, Term};

/// The right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Text pattern tested against string field values.
    Pattern(Pattern),
    /// Literal compared by equality.
    Value(Term),
}

impl Matcher {
    /// Returns `true` if this is a `Pattern` matcher.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Matcher::Pattern(_))
    }

    /// Extracts the pattern, if present.
    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Matcher::Pattern(p) => Some(p),
            Matcher::Value(_) => None,
        }
    }

    /// Extracts the equality value, if present.
    pub fn as_value(&self) -> Option<&Term> {
        match self {
            Matcher::Value(term) => Some(term),
            Matcher::Pattern(_) => None,
        }
    }

    /// Tests a candidate string.
    ///
    /// Patterns test the string; equality values only accept it when they
    /// are the identical text.
    pub fn is_match_str(&self, candidate: &str) -> bool {
        self.matches(&FieldValue::String(candidate))
    }

    /// Evaluates this matcher against a field value.
    ///
    /// A list field matches when any of its elements matches, except that a
    /// list equality value is first compared against the whole list.
    pub fn matches(&self, field: &FieldValue<'_>) -> bool {
        match (self, field) {
            (Matcher::Pattern(p), FieldValue::String(s)) => p.is_match(s),
            (Matcher::Pattern(_), FieldValue::List(items)) => {
                items.iter().any(|item| self.matches(item))
            }
            (Matcher::Pattern(_), _) => false,
            (Matcher::Value(term), field) => term_matches(term, field),
        }
    }
}

fn term_matches(term: &Term, field: &FieldValue<'_>) -> bool {
    match (term, field) {
        (Term::List(terms), FieldValue::List(items)) => {
            let whole = terms.len() == items.len()
                && terms
                    .iter()
                    .zip(items)
                    .all(|(term, item)| scalar_matches(term, item));
            whole
                || items
                    .iter()
                    .any(|item| matches!(item, FieldValue::List(_)) && term_matches(term, item))
        }
        (Term::List(_), _) => false,
        (term, FieldValue::List(items)) => items.iter().any(|item| scalar_matches(term, item)),
        (term, field) => scalar_matches(term, field),
    }
}

fn scalar_matches(term: &Term, field: &FieldValue<'_>) -> bool {
    match (term, field) {
        (Term::Null, FieldValue::Null) => true,
        (Term::Bool(a), FieldValue::Bool(b)) => a == b,
        (Term::Number(a), FieldValue::Number(b)) => a.compare(*b) == Some(Ordering::Equal),
        (Term::Text(a), FieldValue::String(b)) => a == b,
        _ => false,
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Pattern(p) => write!(f, "{p}"),
            Matcher::Value(term) => write!(f, "{term}"),
        }
    }
}

/// A single-field predicate.
///
/// # Example
///
/// ```
/// use sieve::{Clause, FieldValue, Strategy};
///
/// let clause = Clause::new("name", Strategy::Contains, "cat").unwrap();
/// assert!(clause.matches(&FieldValue::String("a cat exists")));
/// assert!(!clause.matches(&FieldValue::String("dog")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Dotted field path, passed through verbatim.
    pub field: String,
    /// How the field value is tested.
    pub matcher: Matcher,
}

impl Clause {
    /// Builds a clause from a strategy and a term.
    pub fn new(
        field: impl Into<String>,
        strategy: crate::Strategy,
        term: impl Into<Term>,
    ) -> crate::Result<Self> {
        let matcher = crate::pattern::build_matcher(strategy, &term.into())?;
        Ok(Clause::with_matcher(field, matcher))
    }

    /// Builds a clause from an already constructed matcher.
    pub fn with_matcher(field: impl Into<String>, matcher: Matcher) -> Self {
        Clause {
            field: field.into(),
            matcher,
        }
    }

    /// Evaluates this clause against the value of its field.
    pub fn matches(&self, field_value: &FieldValue<'_>) -> bool {
        self.matcher.matches(field_value)
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.matcher)
    }
}
