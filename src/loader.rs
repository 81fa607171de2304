//! Loading rule sets from configuration resources.
//!
//! A rule resource is a JSON array of rule records:
//!
//! ```json
//! [
//!   { "character": "a", "replace_with": "b", "operation": "uppercase", "indexes": [0, 2] },
//!   { "character": "b", "replace_with": "c" }
//! ]
//! ```
//!
//! `operation` and `indexes` are optional; records keep the order they
//! appear in, which becomes the rule set's iteration order.

use std::io::Read;

use crate::error::ObfuscationError;
use crate::rule::ObfuscationOperationRule;
use crate::rule_set::RuleSet;

/// Deserializes a rule set from a JSON string.
///
/// # Errors
/// [`ObfuscationError::InvalidRuleResource`] for malformed JSON,
/// [`ObfuscationError::EmptyRules`] for an empty rule array.
///
/// # Examples
///
/// ```
/// use charfuscator::loader;
///
/// let rules = loader::from_json_str(
///     r#"[{ "character": "a", "replace_with": "b" }]"#,
/// ).unwrap();
/// assert_eq!(rules.len(), 1);
/// ```
pub fn from_json_str(json: &str) -> Result<RuleSet, ObfuscationError> {
    let rules: Vec<ObfuscationOperationRule> = serde_json::from_str(json)?;
    RuleSet::new(rules)
}

/// Deserializes a rule set from a reader yielding JSON.
///
/// # Errors
/// Same as [`from_json_str`]; I/O failures surface as
/// [`ObfuscationError::InvalidRuleResource`].
pub fn from_reader<R: Read>(reader: R) -> Result<RuleSet, ObfuscationError> {
    let rules: Vec<ObfuscationOperationRule> = serde_json::from_reader(reader)?;
    RuleSet::new(rules)
}

/// Serializes a rule set back to its JSON resource form.
///
/// Operated characters and inversion flags are derived state and are not
/// part of the resource.
///
/// # Errors
/// [`ObfuscationError::InvalidRuleResource`] if serialization fails.
pub fn to_json_string(rules: &RuleSet) -> Result<String, ObfuscationError> {
    let records: Vec<&ObfuscationOperationRule> = rules.iter().collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
