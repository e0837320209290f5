//! Sieve - compile declarative filter specifications into query predicates.
//!
//! A filter specification names, per scope and per matching strategy, the
//! terms that document fields must match. Sieve turns it into predicates and
//! hands them to a query-accumulation handle:
//!
//! - Text terms become escaped, anchored, case-sensitive patterns
//! - Numbers, booleans, null and lists become equality values
//! - `mandatory` predicates are merged into one conjunctive map
//! - `optional` predicates form one disjunctive group per strategy
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sieve::{FilterOptions, Query};
//!
//! let options = FilterOptions::from_value(json!({
//!     "filters": {
//!         "mandatory": { "contains": { "name": "cat" } },
//!         "optional": { "exact": { "features.color": ["brindle", "tabby"] } }
//!     }
//! }))
//! .unwrap();
//!
//! let query = Query::new().apply(options.spec()).unwrap();
//!
//! assert!(query.get("name").unwrap().is_match_str("a cat exists"));
//! assert_eq!(query.disjunctive_groups()[0].len(), 2);
//!
//! let kitteh = json!({ "name": "cool cat", "features": { "color": "tabby" } });
//! assert!(query.matches(&kitteh));
//! ```
//!
//! # Composition
//!
//! ```text
//! match = (all mandatory predicates)
//!       ∧ (any alternative of optional group 1)
//!       ∧ (any alternative of optional group 2) ...
//! ```
//!
//! A list term under `optional` adds one alternative per element. Under
//! `mandatory` it is kept whole and compared by equality.
//!
//! # Strategies
//!
//! | Strategy | Pattern | Accepts for term `cat` | Rejects |
//! |----------|---------|------------------------|---------|
//! | `contains` | `cat` | `a cat exists` | `dog` |
//! | `startsWith` | `^cat` | `cat exists` | `this cat is sick` |
//! | `endsWith` | `cat$` | `cool cat` | `this cat is sick` |
//! | `exact` | `^cat$` | `cat` | `cat litter`, `the cat` |
//!
//! # Hosts
//!
//! The compiler only depends on [`QuerySink`]. Implement it to feed a
//! database driver's query builder; [`Query`] is the in-memory
//! implementation. Malformed input is skipped unless the compiler is
//! configured with [`ValidationMode::Strict`].

mod clause;
mod compiler;
mod config;
mod error;
mod pattern;
mod query;
mod spec;
mod strategy;
mod traits;
mod value;

// Re-export public API
pub use clause::{Clause, Matcher};
pub use compiler::{compile_filter, CompiledFilter, FilterCompiler};
pub use config::{CompilerConfig, ValidationMode};
pub use error::{FilterError, Result};
pub use pattern::{build_matcher, Pattern};
pub use query::Query;
pub use spec::{FilterOptions, FilterSpec, Scope};
pub use strategy::{Strategy, UnknownStrategy};
pub use traits::{Document, QuerySink};
pub use value::{FieldValue, Number, Term};
