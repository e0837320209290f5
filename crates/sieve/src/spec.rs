//! Filter specification types.
//!
//! The wire shape is:
//!
//! ```text
//! {
//!   "filters": {
//!     "mandatory": { "<strategy>": { "<field>": <term>, ... }, ... },
//!     "optional":  { "<strategy>": { "<field>": <term>, ... }, ... }
//!   }
//! }
//! ```
//!
//! Scopes are kept as raw JSON objects. Nothing is validated on decode; the
//! compiler decides what to do with unknown strategies and malformed
//! entries according to its [`ValidationMode`](crate::ValidationMode).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::strategy::Strategy;
use crate::value::Term;

/// One scope of a filter: strategy name -> field path -> term.
///
/// Entries keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(serde_json::Value);

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Scope(serde_json::Value::Object(serde_json::Map::new()))
    }

    /// Wraps a raw JSON value. Non-object values are accepted and left for
    /// the compiler to judge.
    pub fn from_value(value: serde_json::Value) -> Self {
        Scope(value)
    }

    /// Returns the raw JSON value.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Sets the term for `field` under `strategy`, replacing any previous
    /// term for that pair.
    ///
    /// A raw scope that is not an object, or whose group for `strategy` is
    /// not an object, is replaced by a well-formed one.
    pub fn insert(&mut self, strategy: Strategy, field: impl Into<String>, term: impl Into<Term>) {
        if !self.0.is_object() {
            self.0 = serde_json::Value::Object(serde_json::Map::new());
        }
        let serde_json::Value::Object(groups) = &mut self.0 else {
            return;
        };
        let group = groups
            .entry(strategy.as_str())
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
        if !group.is_object() {
            *group = serde_json::Value::Object(serde_json::Map::new());
        }
        if let serde_json::Value::Object(fields) = group {
            fields.insert(field.into(), term.into().to_json());
        }
    }

    /// Returns `true` if the scope holds no field terms.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Object(groups) => groups.values().all(|group| match group {
                serde_json::Value::Object(fields) => fields.is_empty(),
                serde_json::Value::Null => true,
                _ => false,
            }),
            serde_json::Value::Null => true,
            _ => false,
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::new()
    }
}

/// A declarative filter: mandatory predicates that must all hold, and
/// optional groups of which at least one alternative must hold.
///
/// # Example
///
/// ```
/// use sieve::{FilterSpec, Strategy};
///
/// let spec = FilterSpec::new()
///     .mandatory(Strategy::Contains, "name", "cat")
///     .optional(Strategy::Exact, "features.color", "brindle");
///
/// let json = serde_json::to_value(&spec).unwrap();
/// assert_eq!(json["mandatory"]["contains"]["name"], "cat");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Predicates combined by AND.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<Scope>,
    /// Per-strategy groups, each combined by OR internally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<Scope>,
}

impl FilterSpec {
    /// Creates a spec with no predicates.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    /// Adds a mandatory term.
    pub fn mandatory(
        mut self,
        strategy: Strategy,
        field: impl Into<String>,
        term: impl Into<Term>,
    ) -> Self {
        self.mandatory
            .get_or_insert_with(Scope::new)
            .insert(strategy, field, term);
        self
    }

    /// Adds an optional term. A list term contributes one alternative per
    /// element.
    pub fn optional(
        mut self,
        strategy: Strategy,
        field: impl Into<String>,
        term: impl Into<Term>,
    ) -> Self {
        self.optional
            .get_or_insert_with(Scope::new)
            .insert(strategy, field, term);
        self
    }

    /// Returns `true` if neither scope holds a term.
    pub fn is_empty(&self) -> bool {
        self.mandatory.as_ref().is_none_or(Scope::is_empty)
            && self.optional.as_ref().is_none_or(Scope::is_empty)
    }
}

/// The request envelope carrying a filter under `filters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// The filter; `null` or absent means no filtering.
    #[serde(default)]
    pub filters: Option<FilterSpec>,
}

impl FilterOptions {
    /// Parses an envelope from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes an envelope from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the filter, if any.
    pub fn spec(&self) -> Option<&FilterSpec> {
        self.filters.as_ref()
    }
}
