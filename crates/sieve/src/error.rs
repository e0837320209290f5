//! Error types for the sieve crate.

use thiserror::Error;

/// Errors that can occur when decoding or compiling a filter specification.
///
/// With [`ValidationMode::Lenient`](crate::ValidationMode::Lenient) the
/// compiler skips the offending entry instead of returning any of the
/// malformed-input variants.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The regex engine refused a compiled pattern.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A strategy name outside `contains`, `startsWith`, `endsWith`, `exact`.
    #[error("unknown strategy '{name}' in {scope} filters")]
    UnknownStrategy { scope: &'static str, name: String },

    /// A scope that is present but not an object.
    #[error("{scope} filters must be an object, got {found}")]
    MalformedScope {
        scope: &'static str,
        found: &'static str,
    },

    /// A strategy group that is not an object of field terms.
    #[error("{scope}.{strategy} must be an object of field terms, got {found}")]
    MalformedGroup {
        scope: &'static str,
        strategy: String,
        found: &'static str,
    },

    /// A term that is neither a scalar nor a list of scalars.
    #[error("term for field '{field}' must be a string, number, boolean or array of those, got {found}")]
    MalformedTerm { field: String, found: &'static str },

    /// The filter document itself is not valid JSON.
    #[error("invalid filter JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Result type for sieve operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Names the JSON type of a value for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_strategy_display() {
        let err = FilterError::UnknownStrategy {
            scope: "mandatory",
            name: "fuzzy".to_string(),
        };
        assert_eq!(err.to_string(), "unknown strategy 'fuzzy' in mandatory filters");
    }

    #[test]
    fn malformed_group_display() {
        let err = FilterError::MalformedGroup {
            scope: "optional",
            strategy: "exact".to_string(),
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "optional.exact must be an object of field terms, got string"
        );
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FilterError = json_err.into();
        assert!(matches!(err, FilterError::InvalidJson(_)));
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
