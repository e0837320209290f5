//! Pattern construction.
//!
//! [`build_matcher`] turns a `(strategy, term)` pair into a [`Matcher`]. Text
//! terms are escaped so that regex metacharacters match literally, then
//! anchored according to the strategy. Every other term passes through
//! unchanged as an equality value.

use regex::{Regex, RegexBuilder};

use crate::clause::Matcher;
use crate::error::Result;
use crate::strategy::Strategy;
use crate::value::Term;

/// Size limit the regex crate applies by default.
const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiled program bytes budgeted per byte of pattern source.
const BYTES_PER_SOURCE_BYTE: usize = 256;

/// Compiled, case-sensitive text pattern.
///
/// # Example
///
/// ```
/// use sieve::{Pattern, Strategy};
///
/// let pattern = Pattern::new(Strategy::StartsWith, "cat").unwrap();
/// assert!(pattern.is_match("cat exists"));
/// assert!(!pattern.is_match("this cat is sick"));
/// assert_eq!(pattern.as_str(), "^cat");
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    strategy: Strategy,
    literal: String,
    regex: Regex,
}

impl Pattern {
    /// Escapes `literal` and anchors it according to `strategy`.
    pub fn new(strategy: Strategy, literal: &str) -> Result<Self> {
        let mut source = String::with_capacity(literal.len() + 2);
        if strategy.anchors_start() {
            source.push('^');
        }
        source.push_str(&regex::escape(literal));
        if strategy.anchors_end() {
            source.push('$');
        }
        // Compiled size of an escaped literal grows linearly with its source.
        let size_limit =
            DEFAULT_SIZE_LIMIT.max(source.len().saturating_mul(BYTES_PER_SOURCE_BYTE));
        let regex = RegexBuilder::new(&source).size_limit(size_limit).build()?;
        Ok(Pattern {
            strategy,
            literal: literal.to_string(),
            regex,
        })
    }

    /// Returns `true` if `candidate` satisfies the pattern.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Returns the strategy the pattern was built with.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the unescaped term.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns the regex source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the compiled regex, for hosts that push patterns down to a
    /// database driver.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.strategy == other.strategy && self.as_str() == other.as_str()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

/// Builds the matcher for a term under a strategy.
///
/// Text terms become [`Matcher::Pattern`]; any other term, including a list,
/// is returned unchanged as [`Matcher::Value`].
pub fn build_matcher(strategy: Strategy, term: &Term) -> Result<Matcher> {
    let matcher = match term {
        Term::Text(literal) => Matcher::Pattern(Pattern::new(strategy, literal)?),
        other => Matcher::Value(other.clone()),
    };
    tracing::trace!(%strategy, %term, %matcher, "built matcher");
    Ok(matcher)
}
