//! In-memory query accumulation handle.
//!
//! [`Query`] is the crate's own [`QuerySink`]: it records what the compiler
//! hands it, exposes the result for inspection, and can test single
//! documents against the accumulated predicates.

use crate::clause::{Clause, Matcher};
use crate::compiler::FilterCompiler;
use crate::error::FilterError;
use crate::spec::FilterSpec;
use crate::traits::{Document, QuerySink};

/// Accumulated predicates of a document query.
///
/// The match logic is:
/// ```text
/// match = (every conjunctive predicate matches)
///       ∧ (for each disjunctive group: at least one clause matches)
/// ```
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sieve::{FilterSpec, Query, Strategy};
///
/// let spec = FilterSpec::new()
///     .mandatory(Strategy::Contains, "name", "cat")
///     .optional(Strategy::Exact, "features.color", vec!["brindle", "tabby"]);
///
/// let query = Query::new().apply(Some(&spec)).unwrap();
///
/// assert!(query.matches(&json!({"name": "cool cat", "features": {"color": "tabby"}})));
/// assert!(!query.matches(&json!({"name": "cool cat", "features": {"color": "black"}})));
/// assert!(!query.matches(&json!({"name": "dog", "features": {"color": "brindle"}})));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conjunctive: Vec<(String, Matcher)>,
    disjunctive: Vec<Vec<Clause>>,
}

impl Query {
    /// Creates an empty query.
    ///
    /// An empty query matches every document.
    pub fn new() -> Self {
        Query::default()
    }

    /// Compiles `spec` into this query with the default compiler.
    ///
    /// `None` returns the query unchanged.
    pub fn apply(self, spec: Option<&FilterSpec>) -> Result<Self, FilterError> {
        self.apply_with(&FilterCompiler::default(), spec)
    }

    /// Compiles `spec` into this query with the given compiler.
    pub fn apply_with(
        mut self,
        compiler: &FilterCompiler,
        spec: Option<&FilterSpec>,
    ) -> Result<Self, FilterError> {
        compiler.compile(spec, &mut self)?;
        Ok(self)
    }

    /// Returns the conjunctive predicates, in first-seen field order.
    pub fn conjunctive(&self) -> &[(String, Matcher)] {
        &self.conjunctive
    }

    /// Returns the matcher registered for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Matcher> {
        self.conjunctive
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, matcher)| matcher)
    }

    /// Returns the disjunctive groups, in registration order.
    pub fn disjunctive_groups(&self) -> &[Vec<Clause>] {
        &self.disjunctive
    }

    /// Returns `true` if no predicate has been added.
    pub fn is_empty(&self) -> bool {
        self.conjunctive.is_empty() && self.disjunctive.is_empty()
    }

    /// Tests a single document against the accumulated predicates.
    pub fn matches<D: Document + ?Sized>(&self, doc: &D) -> bool {
        let and_pass = self
            .conjunctive
            .iter()
            .all(|(field, matcher)| matcher.matches(&doc.field_value(field)));

        if !and_pass {
            return false;
        }

        // An empty group can only come from a hand-built sink call; it
        // constrains nothing.
        self.disjunctive.iter().all(|group| {
            group.is_empty()
                || group
                    .iter()
                    .any(|clause| clause.matches(&doc.field_value(&clause.field)))
        })
    }
}

impl QuerySink for Query {
    type Error = FilterError;

    /// Sets the predicate for `field`, replacing an earlier one in place.
    fn add_conjunctive(&mut self, field: &str, matcher: Matcher) -> Result<(), FilterError> {
        match self.conjunctive.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = matcher,
            None => self.conjunctive.push((field.to_string(), matcher)),
        }
        Ok(())
    }

    fn add_disjunctive_group(&mut self, clauses: Vec<Clause>) -> Result<(), FilterError> {
        self.disjunctive.push(clauses);
        Ok(())
    }
}

impl std::fmt::Display for Query {
    /// One line per predicate: `and <clause>` for conjunctive entries,
    /// `or[<group>] <clause>` for each alternative of a group.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "(match all)");
        }
        let mut lines = Vec::new();
        for (field, matcher) in &self.conjunctive {
            lines.push(format!("and {field}: {matcher}"));
        }
        for (index, group) in self.disjunctive.iter().enumerate() {
            for clause in group {
                lines.push(format!("or[{index}] {clause}"));
            }
        }
        write!(f, "{}", lines.join("\n"))
    }
}
