//! Obfuscation rules: the atomic mapping units of the engine.
//!
//! An [`ObfuscationRule`] maps one source character to one replacement
//! character. An [`ObfuscationOperationRule`] refines it with a set of
//! string positions and an optional [`Operation`] that applies at those
//! positions instead of the flat replacement.
//!
//! Rules are immutable value types. The operated character (the result of
//! applying the operation to the source character) is computed once when a
//! rule enters a [`RuleSet`](crate::RuleSet), never lazily mutated afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// A single source-character to replacement-character mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationRule {
    character: char,
    replace_with: char,
}

impl ObfuscationRule {
    /// Creates a new rule mapping `character` to `replace_with`.
    pub fn new(character: char, replace_with: char) -> Self {
        ObfuscationRule {
            character,
            replace_with,
        }
    }

    /// Returns the canonical source character.
    pub fn character(&self) -> char {
        self.character
    }

    /// Returns the default substitution character.
    pub fn replace_with(&self) -> char {
        self.replace_with
    }
}

/// A position- and operation-aware obfuscation rule.
///
/// At the string positions listed in `indexes`, the rule's [`Operation`]
/// (when present) governs the substitution; everywhere else the flat
/// `replace_with` character is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationOperationRule {
    character: char,
    replace_with: char,
    #[serde(default)]
    indexes: BTreeSet<usize>,
    #[serde(default)]
    operation: Option<Operation>,
    /// Result of applying `operation` to `character`; filled when the rule
    /// is sealed into a rule set, skipped on (de)serialization.
    #[serde(skip)]
    operated: Option<char>,
    /// Flips the meaning of `character`/`replace_with` after an explicit
    /// inversion. Tooling-only; never consulted by the engine itself.
    #[serde(skip)]
    inverted: bool,
}

impl ObfuscationOperationRule {
    /// Creates a rule with a flat replacement and no position-bound behavior.
    ///
    /// # Parameters
    /// - `character`: The source character.
    /// - `replace_with`: The substitution used at every position.
    pub fn new(character: char, replace_with: char) -> Self {
        ObfuscationOperationRule {
            character,
            replace_with,
            indexes: BTreeSet::new(),
            operation: None,
            operated: Some(character),
            inverted: false,
        }
    }

    /// Creates a rule whose operation applies at the given 0-based positions.
    ///
    /// At positions in `indexes` the operated character (the operation
    /// applied to `character`) is substituted; everywhere else
    /// `replace_with` is used.
    ///
    /// # Parameters
    /// - `character`: The source character.
    /// - `replace_with`: The substitution used at positions not in `indexes`.
    /// - `operation`: The transform applied at the listed positions.
    /// - `indexes`: 0-based string positions bound to the operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use charfuscator::{ObfuscationOperationRule, Operation};
    ///
    /// let rule = ObfuscationOperationRule::with_operation('a', 'b', Operation::UpperCase, [0, 2]);
    /// assert_eq!(rule.operated_character(), Some('A'));
    /// ```
    pub fn with_operation(
        character: char,
        replace_with: char,
        operation: Operation,
        indexes: impl IntoIterator<Item = usize>,
    ) -> Self {
        ObfuscationOperationRule {
            character,
            replace_with,
            indexes: indexes.into_iter().collect(),
            operation: Some(operation),
            operated: Some(operation.apply(character)),
            inverted: false,
        }
    }

    /// Returns the canonical source character.
    pub fn character(&self) -> char {
        self.character
    }

    /// Returns the default substitution character.
    pub fn replace_with(&self) -> char {
        self.replace_with
    }

    /// Returns the 0-based positions at which the operation applies.
    ///
    /// An empty set means the rule has no index-bound behavior and
    /// `replace_with` is used everywhere.
    pub fn indexes(&self) -> &BTreeSet<usize> {
        &self.indexes
    }

    /// Returns the operation bound to this rule, if any.
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Returns the precomputed operated character.
    ///
    /// `None` only for rules deserialized but not yet sealed into a rule
    /// set; sealed rules always carry the value.
    pub fn operated_character(&self) -> Option<char> {
        self.operated
    }

    /// Returns whether this rule has been inverted.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Returns the inverse rule: source and replacement swapped.
    ///
    /// The operation and indexes carry over unchanged and the operated
    /// character is recomputed for the new source. Used by tooling that
    /// needs the reverse rule set; the engine never inverts rules itself.
    pub fn invert(self) -> Self {
        let operated = Some(
            self.operation
                .map_or(self.replace_with, |op| op.apply(self.replace_with)),
        );
        ObfuscationOperationRule {
            character: self.replace_with,
            replace_with: self.character,
            indexes: self.indexes,
            operation: self.operation,
            operated,
            inverted: !self.inverted,
        }
    }

    /// Fills the operated-character slot. Idempotent; called once per rule
    /// when a rule set is constructed, so deserialized rules behave the
    /// same as hand-built ones.
    pub(crate) fn seal(&mut self) {
        self.operated = Some(
            self.operation
                .map_or(self.character, |op| op.apply(self.character)),
        );
    }
}

impl From<ObfuscationRule> for ObfuscationOperationRule {
    fn from(rule: ObfuscationRule) -> Self {
        ObfuscationOperationRule::new(rule.character(), rule.replace_with())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rule_accessors() {
        let rule = ObfuscationRule::new('a', 'b');
        assert_eq!(rule.character(), 'a');
        assert_eq!(rule.replace_with(), 'b');
    }

    #[test]
    fn test_new_has_no_index_behavior() {
        let rule = ObfuscationOperationRule::new('a', 'b');
        assert!(rule.indexes().is_empty());
        assert_eq!(rule.operation(), None);
        assert_eq!(rule.operated_character(), Some('a'));
        assert!(!rule.is_inverted());
    }

    #[test]
    fn test_with_operation_precomputes_operated() {
        let rule =
            ObfuscationOperationRule::with_operation('a', 'b', Operation::UpperCase, [0, 2]);
        assert_eq!(rule.operated_character(), Some('A'));
        assert!(rule.indexes().contains(&0));
        assert!(rule.indexes().contains(&2));
        assert!(!rule.indexes().contains(&1));
    }

    #[test]
    fn test_invert_swaps_and_flags() {
        let rule =
            ObfuscationOperationRule::with_operation('a', 'b', Operation::UpperCase, [1]);
        let inverted = rule.invert();
        assert_eq!(inverted.character(), 'b');
        assert_eq!(inverted.replace_with(), 'a');
        assert_eq!(inverted.operated_character(), Some('B'));
        assert!(inverted.is_inverted());
        // Inverting twice restores the original mapping.
        let restored = inverted.invert();
        assert_eq!(restored.character(), 'a');
        assert!(!restored.is_inverted());
    }

    #[test]
    fn test_from_plain_rule() {
        let rule: ObfuscationOperationRule = ObfuscationRule::new('x', 'y').into();
        assert_eq!(rule.character(), 'x');
        assert_eq!(rule.replace_with(), 'y');
        assert_eq!(rule.operation(), None);
    }

    #[test]
    fn test_seal_after_deserialization() {
        let json = r#"{"character":"a","replace_with":"b","indexes":[0],"operation":"uppercase"}"#;
        let mut rule: ObfuscationOperationRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.operated_character(), None);
        rule.seal();
        assert_eq!(rule.operated_character(), Some('A'));
    }

    #[test]
    fn test_deserialization_defaults() {
        let json = r#"{"character":"a","replace_with":"b"}"#;
        let rule: ObfuscationOperationRule = serde_json::from_str(json).unwrap();
        assert!(rule.indexes().is_empty());
        assert_eq!(rule.operation(), None);
    }
}
