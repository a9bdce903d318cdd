//! Error types for the threshold grammar.
//!
//! The default decoder is lenient and never fails; these errors are only
//! produced by the strict entry points used by tooling that wants to
//! surface malformed input instead of silently degrading it.

use thiserror::Error;

/// A structural defect in a compact thresholds string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A space-separated token did not have the `label=value...` shape
    /// (no `=`, or more than one).
    #[error("token {index} (`{token}`) is not a single `label=value` pair")]
    MalformedToken { index: usize, token: String },
}

impl GrammarError {
    /// Zero-based position of the offending token within the input string.
    pub fn token_index(&self) -> usize {
        match self {
            Self::MalformedToken { index, .. } => *index,
        }
    }
}
