//! CharacterObfuscator: rule set plus secret, behind one façade.

use log::debug;

use crate::engine;
use crate::error::ObfuscationError;
use crate::rule_set::RuleSet;

/// Combines a rule set with a secret key/text and exposes the forward and
/// inverse transforms over that secret.
///
/// The façade always disentangles its *own* freshly obfuscated output;
/// externally supplied obfuscated text goes through the free
/// [`disentangle`](crate::disentangle) function instead.
///
/// # Examples
///
/// ```
/// use charfuscator::{CharacterObfuscator, ObfuscationOperationRule, Operation, RuleSet};
///
/// let rules = RuleSet::new([
///     ObfuscationOperationRule::with_operation('a', 'b', Operation::UpperCase, [0, 2]),
///     ObfuscationOperationRule::new('b', 'c'),
///     ObfuscationOperationRule::with_operation('c', 'd', Operation::UpperCase, [3]),
/// ]).unwrap();
///
/// let obfuscator = CharacterObfuscator::validated(rules, "abac").unwrap();
/// assert_eq!(obfuscator.is_disentanglable(), Some(true));
/// assert_eq!(obfuscator.obfuscate(), "AcAC");
/// assert_eq!(obfuscator.disentangle(), "abac");
/// ```
pub struct CharacterObfuscator {
    rules: RuleSet,
    key: String,
    disentanglable: Option<bool>,
}

impl CharacterObfuscator {
    /// Creates an obfuscator without running validation.
    ///
    /// # Parameters
    /// - `rules`: The rule set (non-empty by construction).
    /// - `key`: The secret text to obfuscate.
    ///
    /// # Errors
    /// Returns [`ObfuscationError::EmptyKey`] if `key` is empty.
    pub fn new(rules: RuleSet, key: impl Into<String>) -> Result<Self, ObfuscationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ObfuscationError::EmptyKey);
        }
        Ok(CharacterObfuscator {
            rules,
            key,
            disentanglable: None,
        })
    }

    /// Creates an obfuscator and runs invertibility validation up front.
    ///
    /// The result is recorded and reported by
    /// [`is_disentanglable`](Self::is_disentanglable); it is informational
    /// only and never blocks later calls.
    ///
    /// # Errors
    /// Returns [`ObfuscationError::EmptyKey`] if `key` is empty.
    pub fn validated(rules: RuleSet, key: impl Into<String>) -> Result<Self, ObfuscationError> {
        let mut obfuscator = Self::new(rules, key)?;
        let valid = obfuscator.rules.validate();
        debug!("rule set validated at construction: invertible = {}", valid);
        obfuscator.disentanglable = Some(valid);
        Ok(obfuscator)
    }

    /// Returns the validation verdict, or `None` when the obfuscator was
    /// built without validation.
    pub fn is_disentanglable(&self) -> Option<bool> {
        self.disentanglable
    }

    /// Obfuscates the stored key.
    pub fn obfuscate(&self) -> String {
        engine::obfuscate(&self.rules, &self.key)
    }

    /// Obfuscates the stored key, then recovers it from that output.
    pub fn disentangle(&self) -> String {
        engine::disentangle(&self.rules, &self.obfuscate())
    }
}
