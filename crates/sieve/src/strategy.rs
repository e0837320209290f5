//! Text matching strategies.
//!
//! A [`Strategy`] decides how a text term is turned into a pattern. The
//! strategy names double as the keys of a filter scope on the wire.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matching strategy applied to a term.
///
/// Only text terms are affected by the strategy. Numbers, booleans, null and
/// lists are compared by equality whatever strategy they appear under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// The field value contains the term anywhere.
    #[serde(rename = "contains")]
    Contains,
    /// The field value begins with the term.
    #[serde(rename = "startsWith")]
    StartsWith,
    /// The field value ends with the term.
    #[serde(rename = "endsWith")]
    EndsWith,
    /// The field value is exactly the term.
    #[serde(rename = "exact")]
    Exact,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Contains,
        Strategy::StartsWith,
        Strategy::EndsWith,
        Strategy::Exact,
    ];

    /// Returns `true` if the pattern is anchored at the start of the value.
    pub fn anchors_start(self) -> bool {
        matches!(self, Strategy::StartsWith | Strategy::Exact)
    }

    /// Returns `true` if the pattern is anchored at the end of the value.
    pub fn anchors_end(self) -> bool {
        matches!(self, Strategy::EndsWith | Strategy::Exact)
    }

    /// Returns the wire name of this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Contains => "contains",
            Strategy::StartsWith => "startsWith",
            Strategy::EndsWith => "endsWith",
            Strategy::Exact => "exact",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognised strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}'")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    /// Parses a wire name. Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_anchoring() {
        assert!(!Strategy::Contains.anchors_start());
        assert!(!Strategy::Contains.anchors_end());

        assert!(Strategy::StartsWith.anchors_start());
        assert!(!Strategy::StartsWith.anchors_end());

        assert!(!Strategy::EndsWith.anchors_start());
        assert!(Strategy::EndsWith.anchors_end());

        assert!(Strategy::Exact.anchors_start());
        assert!(Strategy::Exact.anchors_end());
    }

    #[test]
    fn strategy_parse() {
        assert_eq!("contains".parse(), Ok(Strategy::Contains));
        assert_eq!("startsWith".parse(), Ok(Strategy::StartsWith));
        assert_eq!("endsWith".parse(), Ok(Strategy::EndsWith));
        assert_eq!("exact".parse(), Ok(Strategy::Exact));
    }

    #[test]
    fn strategy_parse_is_case_sensitive() {
        assert_eq!(
            "startswith".parse::<Strategy>(),
            Err(UnknownStrategy("startswith".to_string()))
        );
        assert!("Exact".parse::<Strategy>().is_err());
        assert!("".parse::<Strategy>().is_err());
    }

    #[test]
    fn unknown_strategy_display() {
        let err = "fuzzy".parse::<Strategy>().unwrap_err();
        assert_eq!(err.to_string(), "unknown strategy 'fuzzy'");
    }

    #[test]
    fn strategy_display_round_trips() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
        }
    }

    #[test]
    fn strategy_serde_uses_wire_names() {
        let json = serde_json::to_string(&Strategy::StartsWith).unwrap();
        assert_eq!(json, "\"startsWith\"");

        let parsed: Strategy = serde_json::from_str("\"endsWith\"").unwrap();
        assert_eq!(parsed, Strategy::EndsWith);
    }
}
