//! Error type shared by every parsing entry point

use thiserror::Error;

/// Error produced when a version or a range formula cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that starts no token of the range grammar
    #[error("Unexpected character '{ch}' at offset {offset} in \"{input}\"")]
    UnexpectedCharacter { input: String, ch: char, offset: usize },
    /// Tokens are valid on their own but do not form a range formula
    #[error("Invalid formula \"{input}\": {reason}")]
    InvalidFormula { input: String, reason: String },
    /// A version or version pattern that does not match the grammar
    #[error("Invalid version \"{input}\": {reason}")]
    InvalidVersion { input: String, reason: String },
}

impl SyntaxError {
    pub(crate) fn formula(input: &str, reason: impl Into<String>) -> Self {
        SyntaxError::InvalidFormula {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn version(input: &str, reason: impl Into<String>) -> Self {
        SyntaxError::InvalidVersion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The text that failed to parse
    pub fn input(&self) -> &str {
        match self {
            SyntaxError::UnexpectedCharacter { input, .. }
            | SyntaxError::InvalidFormula { input, .. }
            | SyntaxError::InvalidVersion { input, .. } => input,
        }
    }

    /// Whether the failure happened while splitting the input into tokens
    pub fn is_lexical(&self) -> bool {
        matches!(self, SyntaxError::UnexpectedCharacter { .. })
    }
}
