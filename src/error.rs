//! Error types for the charfuscator library.
//!
//! Only construction and resource loading can fail; the transform
//! algorithms themselves are total and non-throwing.

use thiserror::Error;

/// Errors produced by the charfuscator library.
#[derive(Debug, Error)]
pub enum ObfuscationError {
    /// A rule set was constructed from zero rules.
    #[error("rule set must contain at least one rule")]
    EmptyRules,
    /// A key/text shorter than one character was supplied.
    #[error("key must be at least 1 character long")]
    EmptyKey,
    /// A rule set failed invertibility validation.
    #[error("rule set is not losslessly invertible: operated character '{operated}' of rule '{character}' collides with another rule's source key")]
    NotInvertible {
        /// Source character of the colliding rule.
        character: char,
        /// Its operated character, which is another rule's key.
        operated: char,
    },
    /// A rule resource could not be deserialized.
    #[error("malformed rule resource: {0}")]
    InvalidRuleResource(#[from] serde_json::Error),
}
