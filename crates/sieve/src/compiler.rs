//! The clause compiler.
//!
//! [`FilterCompiler`] walks both scopes of a [`FilterSpec`] and turns every
//! `(strategy, field, term)` entry into a predicate:
//!
//! ```text
//! mandatory: every (field -> matcher) merged into one AND map,
//!            a field written twice keeps the later matcher
//! optional:  one OR group per strategy; a single term adds one
//!            alternative, a list term adds one alternative per element
//!
//! result = (all mandatory) ∧ (any of group 1) ∧ (any of group 2) ∧ ...
//! ```
//!
//! The whole spec is compiled before anything reaches the sink, so a strict
//! failure never leaves a half-applied query behind.

use crate::clause::{Clause, Matcher};
use crate::config::CompilerConfig;
use crate::error::{json_type_name, FilterError, Result};
use crate::pattern::build_matcher;
use crate::spec::{FilterSpec, Scope};
use crate::strategy::Strategy;
use crate::traits::QuerySink;
use crate::value::Term;

const MANDATORY: &str = "mandatory";
const OPTIONAL: &str = "optional";

/// Predicates compiled from a spec, not yet handed to a sink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    conjunctive: Vec<(String, Matcher)>,
    disjunctive: Vec<Vec<Clause>>,
}

impl CompiledFilter {
    /// Returns the merged mandatory predicates in first-seen field order.
    pub fn conjunctive(&self) -> &[(String, Matcher)] {
        &self.conjunctive
    }

    /// Returns the optional groups, one per strategy that produced clauses.
    pub fn disjunctive_groups(&self) -> &[Vec<Clause>] {
        &self.disjunctive
    }

    /// Returns `true` if nothing was compiled.
    pub fn is_empty(&self) -> bool {
        self.conjunctive.is_empty() && self.disjunctive.is_empty()
    }

    /// Hands every predicate to `sink`: one `add_conjunctive` call per
    /// mandatory field, then one `add_disjunctive_group` call per group.
    ///
    /// Stops at the first sink error and returns it unchanged.
    pub fn apply<S: QuerySink>(self, sink: &mut S) -> std::result::Result<&mut S, S::Error> {
        for (field, matcher) in self.conjunctive {
            sink.add_conjunctive(&field, matcher)?;
        }
        for group in self.disjunctive {
            sink.add_disjunctive_group(group)?;
        }
        Ok(sink)
    }

    fn merge_conjunctive(&mut self, field: &str, matcher: Matcher) {
        match self.conjunctive.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = matcher,
            None => self.conjunctive.push((field.to_string(), matcher)),
        }
    }
}

/// Compiles filter specs into query predicates.
///
/// The compiler holds no state besides its configuration and can be shared
/// freely between threads; each call needs its own sink.
///
/// # Example
///
/// ```
/// use sieve::{FilterCompiler, FilterOptions, Query};
///
/// let options = FilterOptions::from_json_str(r#"{
///     "filters": {
///         "mandatory": { "contains": { "name": "cat" } },
///         "optional": { "exact": { "features.color": "brindle" } }
///     }
/// }"#).unwrap();
///
/// let mut query = Query::new();
/// FilterCompiler::default().compile(options.spec(), &mut query).unwrap();
///
/// assert!(query.get("name").unwrap().is_match_str("a cat exists"));
/// assert_eq!(query.disjunctive_groups().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCompiler {
    config: CompilerConfig,
}

impl FilterCompiler {
    /// Creates a compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        FilterCompiler { config }
    }

    /// Returns the compiler's configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles `spec` and applies the result to `sink`, returning the sink
    /// for chaining.
    ///
    /// A `None` or empty spec leaves the sink untouched.
    pub fn compile<'q, S: QuerySink>(
        &self,
        spec: Option<&FilterSpec>,
        sink: &'q mut S,
    ) -> std::result::Result<&'q mut S, S::Error> {
        let compiled = self.compile_clauses(spec)?;
        compiled.apply(sink)
    }

    /// Compiles `spec` without applying it.
    pub fn compile_clauses(&self, spec: Option<&FilterSpec>) -> Result<CompiledFilter> {
        let mut compiled = CompiledFilter::default();
        let Some(spec) = spec else {
            tracing::debug!("no filter supplied");
            return Ok(compiled);
        };

        for (strategy, entries) in self.groups(MANDATORY, spec.mandatory.as_ref())? {
            for (field, term) in entries {
                if let Some(matcher) = self.matcher(strategy, &term)? {
                    compiled.merge_conjunctive(&field, matcher);
                }
            }
        }

        for (strategy, entries) in self.groups(OPTIONAL, spec.optional.as_ref())? {
            let mut alternatives = Vec::new();
            for (field, term) in entries {
                let elements = match term {
                    Term::List(items) => items,
                    single => vec![single],
                };
                for element in &elements {
                    if let Some(matcher) = self.matcher(strategy, element)? {
                        alternatives.push(Clause::with_matcher(field.as_str(), matcher));
                    }
                }
            }
            if !alternatives.is_empty() {
                compiled.disjunctive.push(alternatives);
            }
        }

        tracing::debug!(
            conjunctive = compiled.conjunctive.len(),
            disjunctive_groups = compiled.disjunctive.len(),
            mode = ?self.config.mode,
            "compiled filter"
        );
        Ok(compiled)
    }

    /// Resolves the strategy groups of a scope, in insertion order.
    fn groups(
        &self,
        scope_name: &'static str,
        scope: Option<&Scope>,
    ) -> Result<Vec<(Strategy, Vec<(String, Term)>)>> {
        let groups = match scope.map(Scope::as_value) {
            None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
            Some(serde_json::Value::Object(groups)) => groups,
            Some(other) => {
                self.reject(FilterError::MalformedScope {
                    scope: scope_name,
                    found: json_type_name(other),
                })?;
                return Ok(Vec::new());
            }
        };

        let mut resolved = Vec::with_capacity(groups.len());
        for (name, group) in groups {
            let strategy = match name.parse::<Strategy>() {
                Ok(strategy) => strategy,
                Err(_) => {
                    self.reject(FilterError::UnknownStrategy {
                        scope: scope_name,
                        name: name.clone(),
                    })?;
                    continue;
                }
            };
            let fields = match group {
                serde_json::Value::Object(fields) => fields,
                serde_json::Value::Null => continue,
                other => {
                    self.reject(FilterError::MalformedGroup {
                        scope: scope_name,
                        strategy: name.clone(),
                        found: json_type_name(other),
                    })?;
                    continue;
                }
            };

            let mut entries = Vec::with_capacity(fields.len());
            for (field, raw) in fields {
                match Term::from_json(raw) {
                    Some(term) => entries.push((field.clone(), term)),
                    None => self.reject(FilterError::MalformedTerm {
                        field: field.clone(),
                        found: json_type_name(raw),
                    })?,
                }
            }
            resolved.push((strategy, entries));
        }
        Ok(resolved)
    }

    fn matcher(&self, strategy: Strategy, term: &Term) -> Result<Option<Matcher>> {
        match build_matcher(strategy, term) {
            Ok(matcher) => Ok(Some(matcher)),
            Err(err) => self.reject(err).map(|()| None),
        }
    }

    /// Fails in strict mode; logs and carries on in lenient mode.
    fn reject(&self, err: FilterError) -> Result<()> {
        if self.config.is_strict() {
            return Err(err);
        }
        tracing::warn!(error = %err, "skipping filter entry");
        Ok(())
    }
}

/// Compiles `spec` into `sink` with the default, lenient compiler.
pub fn compile_filter<'q, S: QuerySink>(
    spec: Option<&FilterSpec>,
    sink: &'q mut S,
) -> std::result::Result<&'q mut S, S::Error> {
    FilterCompiler::default().compile(spec, sink)
}
