//! Term and field value types.
//!
//! A [`Term`] is the owned literal a filter specification carries for a
//! field. A [`FieldValue`] is the runtime value of a field, borrowed from the
//! document a compiled clause is evaluated against.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

/// Literal supplied for a field in a filter specification.
///
/// Text terms are the only terms turned into patterns; everything else is
/// carried through as an equality value.
///
/// # Example
///
/// ```
/// use sieve::{Number, Term};
///
/// assert_eq!(Term::from("cat"), Term::Text("cat".to_string()));
/// assert_eq!(Term::from(12345), Term::Number(Number::I64(12345)));
/// assert!(Term::from(vec!["cat", "Kitteh"]).is_list());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Term {
    /// Absent value.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Numeric literal.
    Number(Number),
    /// Text literal.
    Text(String),
    /// Ordered sequence of scalar terms.
    List(Vec<Term>),
}

impl Term {
    /// Returns `true` if this term is text and will become a pattern.
    pub fn is_text(&self) -> bool {
        matches!(self, Term::Text(_))
    }

    /// Returns `true` if this is a `List` term.
    pub fn is_list(&self) -> bool {
        matches!(self, Term::List(_))
    }

    /// Returns `true` if this is a `Null` term.
    pub fn is_null(&self) -> bool {
        matches!(self, Term::Null)
    }

    /// Extracts the text, if present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Term::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a JSON value into a term.
    ///
    /// Returns `None` for objects and for lists nested inside lists, which
    /// have no meaning as filter terms.
    pub fn from_json(value: &serde_json::Value) -> Option<Term> {
        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    serde_json::Value::Array(_) => None,
                    other => Term::scalar_from_json(other),
                })
                .collect::<Option<Vec<_>>>()
                .map(Term::List),
            other => Term::scalar_from_json(other),
        }
    }

    fn scalar_from_json(value: &serde_json::Value) -> Option<Term> {
        match value {
            serde_json::Value::Null => Some(Term::Null),
            serde_json::Value::Bool(b) => Some(Term::Bool(*b)),
            serde_json::Value::Number(n) => Some(Term::Number(Number::from_json(n))),
            serde_json::Value::String(s) => Some(Term::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// Converts this term back into JSON.
    ///
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Term::Null => serde_json::Value::Null,
            Term::Bool(b) => serde_json::Value::Bool(*b),
            Term::Number(Number::I64(n)) => serde_json::Value::from(*n),
            Term::Number(Number::U64(n)) => serde_json::Value::from(*n),
            Term::Number(Number::F64(n)) => serde_json::Value::from(*n),
            Term::Text(s) => serde_json::Value::String(s.clone()),
            Term::List(items) => serde_json::Value::Array(items.iter().map(Term::to_json).collect()),
        }
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Term::from_json(&value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expected a string, number, boolean, null or array of those, got {}",
                crate::error::json_type_name(&value)
            ))
        })
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Text(s.to_string())
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Text(s)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::Bool(b)
    }
}

impl From<Number> for Term {
    fn from(n: Number) -> Self {
        Term::Number(n)
    }
}

impl<T: Into<Term>> From<Option<T>> for Term {
    fn from(value: Option<T>) -> Self {
        value.map_or(Term::Null, Into::into)
    }
}

impl<T: Into<Term>> From<Vec<T>> for Term {
    fn from(items: Vec<T>) -> Self {
        Term::List(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! term_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Term {
                fn from(n: $ty) -> Self {
                    Term::Number(Number::from(n))
                }
            }
        )*
    };
}

term_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision.
/// Comparisons between different variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Converts a JSON number, preferring integer variants.
    pub fn from_json(n: &serde_json::Number) -> Number {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Runtime value of a document field, borrowed from the document.
///
/// [`Document`](crate::Document) implementations return this type for a
/// dotted field path.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// String value.
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Array value; clauses match when any element matches.
    List(Vec<FieldValue<'a>>),
    /// Field absent or explicitly null.
    Null,
    /// Value with no filter semantics, such as a nested object.
    Other,
}

impl<'a> FieldValue<'a> {
    /// Borrows a JSON value as a field value.
    pub fn from_json(value: &'a serde_json::Value) -> FieldValue<'a> {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => FieldValue::Number(Number::from_json(n)),
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Array(items) => {
                FieldValue::List(items.iter().map(FieldValue::from_json).collect())
            }
            serde_json::Value::Object(_) => FieldValue::Other,
        }
    }

    /// Returns `true` if the field is absent or null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn term_from_json_scalars() {
        assert_eq!(Term::from_json(&json!(null)), Some(Term::Null));
        assert_eq!(Term::from_json(&json!(false)), Some(Term::Bool(false)));
        assert_eq!(
            Term::from_json(&json!(12345)),
            Some(Term::Number(Number::I64(12345)))
        );
        assert_eq!(
            Term::from_json(&json!(2.5)),
            Some(Term::Number(Number::F64(2.5)))
        );
        assert_eq!(
            Term::from_json(&json!("brindle")),
            Some(Term::Text("brindle".to_string()))
        );
    }

    #[test]
    fn term_from_json_list() {
        assert_eq!(
            Term::from_json(&json!(["cat", 1, true])),
            Some(Term::List(vec![
                Term::Text("cat".to_string()),
                Term::Number(Number::I64(1)),
                Term::Bool(true),
            ]))
        );
        assert_eq!(Term::from_json(&json!([])), Some(Term::List(vec![])));
    }

    #[test]
    fn term_from_json_rejects_objects_and_nesting() {
        assert_eq!(Term::from_json(&json!({"a": 1})), None);
        assert_eq!(Term::from_json(&json!([["a"]])), None);
        assert_eq!(Term::from_json(&json!(["a", {"b": 1}])), None);
    }

    #[test]
    fn term_json_round_trip() {
        let value = json!(["cat", 42, -1, 1.5, false, null]);
        let term = Term::from_json(&value).unwrap();
        assert_eq!(term.to_json(), value);
    }

    #[test]
    fn term_serde() {
        let term: Term = serde_json::from_str(r#"["a", 1]"#).unwrap();
        assert_eq!(term, Term::from(vec![Term::from("a"), Term::from(1)]));
        assert_eq!(serde_json::to_string(&term).unwrap(), r#"["a",1]"#);

        let err = serde_json::from_str::<Term>(r#"{"a": 1}"#).unwrap_err();
        assert!(err.to_string().contains("got object"));
    }

    #[test]
    fn term_conversions() {
        assert_eq!(Term::from("x"), Term::Text("x".to_string()));
        assert_eq!(Term::from(String::from("x")), Term::Text("x".to_string()));
        assert_eq!(Term::from(true), Term::Bool(true));
        assert_eq!(Term::from(7u8), Term::Number(Number::U64(7)));
        assert_eq!(Term::from(None::<&str>), Term::Null);
        assert_eq!(Term::from(Some("x")), Term::Text("x".to_string()));
        assert!(Term::from("x").is_text());
        assert!(!Term::from(1).is_text());
        assert!(Term::Null.is_null());
        assert_eq!(Term::from("x").as_text(), Some("x"));
    }

    #[test]
    fn term_display() {
        assert_eq!(Term::from("cat").to_string(), "\"cat\"");
        assert_eq!(Term::from(12345).to_string(), "12345");
        assert_eq!(Term::from(vec![1, 2]).to_string(), "[1,2]");
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_from_json_prefers_integers() {
        assert_eq!(Number::from_json(&(-3i64).into()), Number::I64(-3));
        assert_eq!(Number::from_json(&u64::MAX.into()), Number::U64(u64::MAX));
        let float = serde_json::Number::from_f64(0.5).unwrap();
        assert_eq!(Number::from_json(&float), Number::F64(0.5));
    }

    #[test]
    fn field_value_from_json() {
        let doc = json!({"name": "cat", "tags": ["a", 1], "nested": {"x": 1}});
        assert_eq!(FieldValue::from_json(&doc["name"]), FieldValue::String("cat"));
        assert_eq!(
            FieldValue::from_json(&doc["tags"]),
            FieldValue::List(vec![
                FieldValue::String("a"),
                FieldValue::Number(Number::I64(1))
            ])
        );
        assert_eq!(FieldValue::from_json(&doc["nested"]), FieldValue::Other);
        assert!(FieldValue::from_json(&doc["missing"]).is_null());
        assert_eq!(FieldValue::String("cat").as_str(), Some("cat"));
    }
}
