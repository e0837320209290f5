//! Compiler configuration.

use serde::{Deserialize, Serialize};

/// How the compiler treats input it cannot use.
///
/// Covers unknown strategy names, scopes or groups that are not objects, and
/// terms that are objects or nested lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Skip the offending entry and keep compiling.
    #[default]
    Lenient,
    /// Abort the compile with a [`FilterError`](crate::FilterError).
    Strict,
}

/// Configuration for a [`FilterCompiler`](crate::FilterCompiler).
///
/// # Example
///
/// ```
/// use sieve::{CompilerConfig, ValidationMode};
///
/// let config: CompilerConfig = serde_json::from_str(r#"{"mode": "strict"}"#).unwrap();
/// assert_eq!(config, CompilerConfig::strict());
/// assert_eq!(CompilerConfig::default().mode, ValidationMode::Lenient);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Validation mode; lenient unless set.
    pub mode: ValidationMode,
}

impl CompilerConfig {
    /// Lenient configuration.
    pub fn lenient() -> Self {
        CompilerConfig {
            mode: ValidationMode::Lenient,
        }
    }

    /// Strict configuration.
    pub fn strict() -> Self {
        CompilerConfig {
            mode: ValidationMode::Strict,
        }
    }

    /// Sets the validation mode.
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns `true` in strict mode.
    pub fn is_strict(&self) -> bool {
        self.mode == ValidationMode::Strict
    }
}
