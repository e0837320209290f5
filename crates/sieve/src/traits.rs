//! Seams between the compiler and its host.
//!
//! [`QuerySink`] is the accumulation interface the compiler writes
//! predicates into. [`Document`] gives compiled clauses read access to the
//! fields of whatever a host stores.

use crate::clause::{Clause, Matcher};
use crate::error::FilterError;
use crate::value::FieldValue;

/// Accumulates compiled predicates into a host query.
///
/// The compiler only ever calls these two methods. Errors returned by a sink
/// are handed back to the caller of
/// [`FilterCompiler::compile`](crate::FilterCompiler::compile) unchanged;
/// the `From<FilterError>` bound lets strict-mode compile failures travel
/// through the same error type.
///
/// # Example
///
/// ```
/// use sieve::{compile_filter, Clause, FilterError, FilterSpec, Matcher, QuerySink, Strategy};
///
/// #[derive(Default)]
/// struct Recorder {
///     fields: Vec<String>,
///     groups: usize,
/// }
///
/// impl QuerySink for Recorder {
///     type Error = FilterError;
///
///     fn add_conjunctive(&mut self, field: &str, _matcher: Matcher) -> Result<(), FilterError> {
///         self.fields.push(field.to_string());
///         Ok(())
///     }
///
///     fn add_disjunctive_group(&mut self, _clauses: Vec<Clause>) -> Result<(), FilterError> {
///         self.groups += 1;
///         Ok(())
///     }
/// }
///
/// let spec = FilterSpec::new()
///     .mandatory(Strategy::Contains, "name", "cat")
///     .optional(Strategy::Exact, "features.color", "brindle");
///
/// let mut recorder = Recorder::default();
/// compile_filter(Some(&spec), &mut recorder).unwrap();
/// assert_eq!(recorder.fields, ["name"]);
/// assert_eq!(recorder.groups, 1);
/// ```
pub trait QuerySink {
    /// Error raised by the host query.
    type Error: From<FilterError>;

    /// Narrows the query by `field` satisfying `matcher`, ANDed with
    /// everything already present.
    fn add_conjunctive(&mut self, field: &str, matcher: Matcher) -> Result<(), Self::Error>;

    /// Registers one OR group. Its clauses are ORed with each other and the
    /// group as a whole is ANDed with everything else.
    fn add_disjunctive_group(&mut self, clauses: Vec<Clause>) -> Result<(), Self::Error>;
}

/// Read access to document fields by dotted path.
///
/// Implemented for [`serde_json::Value`]. Hosts storing typed records can
/// implement it by hand:
///
/// ```
/// use sieve::{Document, FieldValue, Number};
///
/// struct Kitteh {
///     name: String,
///     id: u64,
/// }
///
/// impl Document for Kitteh {
///     fn field_value(&self, path: &str) -> FieldValue<'_> {
///         match path {
///             "name" => FieldValue::String(&self.name),
///             "id" => FieldValue::Number(Number::U64(self.id)),
///             _ => FieldValue::Null,
///         }
///     }
/// }
/// ```
pub trait Document {
    /// Returns the value at `path`, or [`FieldValue::Null`] when absent.
    fn field_value(&self, path: &str) -> FieldValue<'_>;
}

impl Document for serde_json::Value {
    /// Walks `path` one dot-separated segment at a time.
    ///
    /// A numeric segment indexes into an array. Any other segment applied to
    /// an array is applied to each element, collecting the results into a
    /// [`FieldValue::List`].
    fn field_value(&self, path: &str) -> FieldValue<'_> {
        let segments: Vec<&str> = path.split('.').collect();
        lookup(self, &segments)
    }
}

fn lookup<'a>(value: &'a serde_json::Value, segments: &[&str]) -> FieldValue<'a> {
    let Some((head, rest)) = segments.split_first() else {
        return FieldValue::from_json(value);
    };
    match value {
        serde_json::Value::Object(map) => match map.get(*head) {
            Some(child) => lookup(child, rest),
            None => FieldValue::Null,
        },
        serde_json::Value::Array(items) => match head.parse::<usize>() {
            Ok(index) => items
                .get(index)
                .map_or(FieldValue::Null, |item| lookup(item, rest)),
            Err(_) => FieldValue::List(items.iter().map(|item| lookup(item, segments)).collect()),
        },
        _ => FieldValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    #[test]
    fn document_top_level_fields() {
        let doc = json!({"name": "cat", "id": 12345, "isDead": false});
        assert_eq!(doc.field_value("name"), FieldValue::String("cat"));
        assert_eq!(doc.field_value("id"), FieldValue::Number(Number::I64(12345)));
        assert_eq!(doc.field_value("isDead"), FieldValue::Bool(false));
        assert_eq!(doc.field_value("home"), FieldValue::Null);
    }

    #[test]
    fn document_dotted_paths() {
        let doc = json!({"features": {"color": "brindle", "isFurreh": true}});
        assert_eq!(
            doc.field_value("features.color"),
            FieldValue::String("brindle")
        );
        assert_eq!(doc.field_value("features.isFurreh"), FieldValue::Bool(true));
        assert_eq!(doc.field_value("features.size"), FieldValue::Null);
        assert_eq!(doc.field_value("features.color.hue"), FieldValue::Null);
        assert_eq!(doc.field_value("features"), FieldValue::Other);
    }

    #[test]
    fn document_array_paths() {
        let doc = json!({"owners": [{"name": "ann"}, {"name": "bob"}], "tags": ["a", "b"]});
        assert_eq!(doc.field_value("tags.1"), FieldValue::String("b"));
        assert_eq!(doc.field_value("tags.5"), FieldValue::Null);
        assert_eq!(
            doc.field_value("owners.name"),
            FieldValue::List(vec![FieldValue::String("ann"), FieldValue::String("bob")])
        );
        assert_eq!(doc.field_value("owners.0.name"), FieldValue::String("ann"));
    }

    #[test]
    fn document_non_object_root() {
        assert_eq!(json!("cat").field_value("name"), FieldValue::Null);
    }
}
