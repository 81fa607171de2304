//! Rule sets: ordered collections of obfuscation rules.
//!
//! A [`RuleSet`] maps each source character to its
//! [`ObfuscationOperationRule`]. Iteration order is insertion order
//! (backed by [`IndexMap`]), which makes the first-match policy of
//! disentanglement explicit instead of container-dependent.
//!
//! [`RuleSet::into_validated`] proves a rule set losslessly invertible and
//! returns a [`ValidatedRuleSet`], which carries a derived reverse index so
//! disentangling is a per-character lookup instead of a scan over all rules.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use crate::engine::{self, recover_operated};
use crate::error::ObfuscationError;
use crate::operation::Operation;
use crate::rule::ObfuscationOperationRule;

/// An insertion-ordered set of obfuscation rules, keyed by source character.
///
/// Construction requires at least one rule and eagerly computes every
/// rule's operated character; rules are immutable afterwards, so a
/// `RuleSet` can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: IndexMap<char, ObfuscationOperationRule>,
}

impl RuleSet {
    /// Builds a rule set from the given rules.
    ///
    /// Keys are unique source characters; when two rules share a source
    /// character, the first one wins. Each rule is sealed (its operated
    /// character computed) on entry.
    ///
    /// # Errors
    /// Returns [`ObfuscationError::EmptyRules`] if `rules` yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use charfuscator::{ObfuscationOperationRule, RuleSet};
    ///
    /// let rules = RuleSet::new([
    ///     ObfuscationOperationRule::new('a', 'b'),
    ///     ObfuscationOperationRule::new('b', 'c'),
    /// ]).unwrap();
    /// assert_eq!(rules.len(), 2);
    /// ```
    pub fn new(
        rules: impl IntoIterator<Item = ObfuscationOperationRule>,
    ) -> Result<Self, ObfuscationError> {
        let mut map = IndexMap::new();
        for mut rule in rules {
            rule.seal();
            map.entry(rule.character()).or_insert(rule);
        }
        if map.is_empty() {
            return Err(ObfuscationError::EmptyRules);
        }
        Ok(RuleSet { rules: map })
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`; a rule set cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule for a source character, if any.
    pub fn get(&self, character: char) -> Option<&ObfuscationOperationRule> {
        self.rules.get(&character)
    }

    /// Returns whether a character is a source key of this rule set.
    pub fn contains(&self, character: char) -> bool {
        self.rules.contains_key(&character)
    }

    /// Iterates the rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ObfuscationOperationRule> {
        self.rules.values()
    }

    /// Builds the reverse rule set: every rule inverted, in the same order.
    ///
    /// When two rules map to the same replacement, the first inverted rule
    /// wins, mirroring construction. Intended for tooling that needs the
    /// reverse mapping; obfuscate/disentangle never use it.
    ///
    /// # Errors
    /// Never fails in practice (`self` is non-empty), but reports
    /// [`ObfuscationError::EmptyRules`] like any construction.
    pub fn inverted(&self) -> Result<RuleSet, ObfuscationError> {
        RuleSet::new(self.rules.values().cloned().map(ObfuscationOperationRule::invert))
    }

    /// Statically checks that this rule set is losslessly invertible.
    ///
    /// For every rule the operated character (`operation` applied to the
    /// source, `None` treated as identity) must not equal a *different*
    /// rule's source key; such a collision means two source characters can
    /// produce the same obfuscated character through different paths.
    ///
    /// This is a necessary, not sufficient, check; see
    /// [`is_obfuscable_and_disentanglable`](crate::is_obfuscable_and_disentanglable)
    /// for the stronger, input-specific round-trip guarantee.
    pub fn validate(&self) -> bool {
        self.find_collision().is_none()
    }

    /// Returns the first operated-character/source-key collision, if any.
    fn find_collision(&self) -> Option<(char, char)> {
        for rule in self.rules.values() {
            let operated = rule
                .operation()
                .unwrap_or(Operation::None)
                .apply(rule.character());
            if operated != rule.character() && self.rules.contains_key(&operated) {
                debug!(
                    "rule '{}' operates to '{}', colliding with another source key",
                    rule.character(),
                    operated
                );
                return Some((rule.character(), operated));
            }
        }
        None
    }

    /// Validates the rule set and, on success, derives the reverse index.
    ///
    /// # Errors
    /// Returns [`ObfuscationError::NotInvertible`] naming the first
    /// colliding rule when validation fails.
    pub fn into_validated(self) -> Result<ValidatedRuleSet, ObfuscationError> {
        if let Some((character, operated)) = self.find_collision() {
            return Err(ObfuscationError::NotInvertible {
                character,
                operated,
            });
        }
        let reverse = build_reverse_index(&self);
        Ok(ValidatedRuleSet {
            rules: self,
            reverse,
        })
    }
}

/// One way an obfuscated character can map back to a source character.
///
/// Candidates for the same obfuscated character are stored in rule
/// insertion order, so lookup reproduces the first-match policy of the
/// scanning disentangler exactly.
#[derive(Debug, Clone)]
enum ReverseMatch {
    /// The obfuscated character is the rule's operated character; applies
    /// only at the rule's bound positions.
    Operated {
        source: char,
        operation: Operation,
        indexes: Vec<usize>,
    },
    /// The obfuscated character is the rule's replacement.
    Replacement {
        source: char,
        /// Positions where the rule's operation path is live; the
        /// replacement also matches there even when unchained.
        indexes: Vec<usize>,
        /// The replacement is itself a source key, so the plain path
        /// applies at every position.
        chained: bool,
    },
}

impl ReverseMatch {
    /// Resolves this candidate at position `i`, if it applies there.
    fn resolve(&self, c: char, i: usize) -> Option<char> {
        match self {
            ReverseMatch::Operated {
                operation, indexes, ..
            } => indexes
                .contains(&i)
                .then(|| recover_operated(c, *operation)),
            ReverseMatch::Replacement {
                source,
                indexes,
                chained,
            } => (*chained || indexes.contains(&i)).then_some(*source),
        }
    }
}

fn build_reverse_index(rules: &RuleSet) -> HashMap<char, Vec<ReverseMatch>> {
    let mut reverse: HashMap<char, Vec<ReverseMatch>> = HashMap::new();
    for rule in rules.iter() {
        let op_indexes: Vec<usize> = if rule.operation().is_some() {
            rule.indexes().iter().copied().collect()
        } else {
            Vec::new()
        };
        // Operated candidate first: within a rule the operated character
        // is checked before the replacement.
        if let (Some(operation), false) = (rule.operation(), op_indexes.is_empty()) {
            let operated = operation.apply(rule.character());
            reverse.entry(operated).or_default().push(ReverseMatch::Operated {
                source: rule.character(),
                operation,
                indexes: op_indexes.clone(),
            });
        }
        let chained = rules.contains(rule.replace_with());
        if chained || !op_indexes.is_empty() {
            reverse
                .entry(rule.replace_with())
                .or_default()
                .push(ReverseMatch::Replacement {
                    source: rule.character(),
                    indexes: op_indexes,
                    chained,
                });
        }
    }
    reverse
}

/// A rule set that has passed invertibility validation.
///
/// Carries a derived reverse index built once at validation time, so
/// [`disentangle`](Self::disentangle) resolves each character with a map
/// lookup instead of scanning every rule. Holding this type is the
/// type-level proof that [`RuleSet::validate`] succeeded.
#[derive(Debug, Clone)]
pub struct ValidatedRuleSet {
    rules: RuleSet,
    reverse: HashMap<char, Vec<ReverseMatch>>,
}

impl ValidatedRuleSet {
    /// Returns the underlying rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Obfuscates `input` under this rule set.
    ///
    /// Identical to [`obfuscate`](crate::obfuscate) on the underlying rules.
    pub fn obfuscate(&self, input: &str) -> String {
        engine::obfuscate(&self.rules, input)
    }

    /// Recovers the original string from `obfuscated`.
    ///
    /// Observably identical to [`disentangle`](crate::disentangle) on the
    /// underlying rules, but each character resolves through the reverse
    /// index in O(1) expected time.
    pub fn disentangle(&self, obfuscated: &str) -> String {
        let mut recovered = String::with_capacity(obfuscated.len());
        for (i, c) in obfuscated.chars().enumerate() {
            let resolved = self
                .reverse
                .get(&c)
                .and_then(|candidates| candidates.iter().find_map(|m| m.resolve(c, i)));
            recovered.push(resolved.unwrap_or(c));
        }
        recovered
    }
}
