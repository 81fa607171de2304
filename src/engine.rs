//! The obfuscation and disentanglement algorithms.
//!
//! Both transforms are pure, deterministic and total over any input
//! string: characters without a rule pass through untouched and the empty
//! string maps to the empty string. Disentangling is the intricate half —
//! the forward map is position- and case-sensitive, so recovery walks the
//! rules in insertion order and applies the first match per character.

use crate::operation::Operation;
use crate::rule_set::RuleSet;

/// Applies the rule set to `input`, producing the obfuscated string.
///
/// For each character `c` at position `i`:
/// 1. no rule for `c`: `c` passes through;
/// 2. `i` is one of the rule's bound positions and the rule carries an
///    operated character: the operated character is emitted;
/// 3. otherwise the rule's flat replacement is emitted.
///
/// # Parameters
/// - `rules`: The rule set to apply.
/// - `input`: The text to obfuscate.
///
/// # Returns
/// The obfuscated string.
///
/// # Examples
///
/// ```
/// use charfuscator::{obfuscate, ObfuscationOperationRule, Operation, RuleSet};
///
/// let rules = RuleSet::new([
///     ObfuscationOperationRule::with_operation('a', 'b', Operation::UpperCase, [0, 2]),
///     ObfuscationOperationRule::new('b', 'c'),
///     ObfuscationOperationRule::with_operation('c', 'd', Operation::UpperCase, [3]),
/// ]).unwrap();
///
/// assert_eq!(obfuscate(&rules, "abac"), "AcAC");
/// ```
pub fn obfuscate(rules: &RuleSet, input: &str) -> String {
    let mut obfuscated = String::with_capacity(input.len());
    for (i, c) in input.chars().enumerate() {
        match rules.get(c) {
            None => obfuscated.push(c),
            Some(rule) => match rule.operated_character() {
                Some(operated) if rule.operation().is_some() && rule.indexes().contains(&i) => {
                    obfuscated.push(operated)
                }
                _ => obfuscated.push(rule.replace_with()),
            },
        }
    }
    obfuscated
}

/// Recovers the original string from `obfuscated` under the same rules.
///
/// For each character `c` at position `i`, the rules are tried in
/// insertion order and the first match wins:
/// 1. index + operation path: when the rule binds position `i` and
///    carries an operation, `c` is matched against the rule's operated
///    character (recovered by undoing the operation, unless the forward
///    operation left the character's case untouched) and then against the
///    rule's replacement (recovered as the rule's source character);
/// 2. plain replacement path: `c` equals the rule's replacement and that
///    replacement is itself a rule key, i.e. the substitution chains
///    through another rule;
/// 3. no rule matches: `c` passes through, it was never substituted.
///
/// An obfuscated character that is a valid replacement for two different
/// rules resolves to the earlier rule; rule sets that pass
/// [`RuleSet::validate`] do not produce such ambiguity through the
/// operation path.
///
/// # Parameters
/// - `rules`: The rule set the text was obfuscated under.
/// - `obfuscated`: The obfuscated text.
///
/// # Returns
/// The recovered string.
pub fn disentangle(rules: &RuleSet, obfuscated: &str) -> String {
    let mut recovered = String::with_capacity(obfuscated.len());
    for (i, c) in obfuscated.chars().enumerate() {
        recovered.push(disentangle_char(rules, c, i));
    }
    recovered
}

/// Resolves one obfuscated character at position `i`.
fn disentangle_char(rules: &RuleSet, c: char, i: usize) -> char {
    for rule in rules.iter() {
        if let Some(operation) = rule.operation() {
            if !rule.indexes().is_empty() && rule.indexes().contains(&i) {
                if let Some(operated) = rule.operated_character() {
                    if c == operated {
                        return recover_operated(c, operation);
                    }
                }
                if c == rule.replace_with() {
                    return rule.character();
                }
            }
        }
        if c == rule.replace_with() && rules.contains(rule.replace_with()) {
            return rule.character();
        }
    }
    c
}

/// Undoes an operation applied to `c` during obfuscation.
///
/// The operation is inverted only when it actually changed the
/// character's case; a character the forward fold left alone (a digit,
/// or a source already in the target case) is preserved as-is.
pub(crate) fn recover_operated(c: char, operation: Operation) -> char {
    let preserve_case = match operation {
        Operation::None => true,
        Operation::UpperCase => !c.is_uppercase(),
        Operation::LowerCase => !c.is_lowercase(),
    };
    operation.apply_with_case(c, preserve_case)
}

/// Round-trip self-check: the strong, input-specific invertibility test.
///
/// `true` when the rule set passes [`RuleSet::validate`] **and**
/// disentangling the obfuscation of `sample` yields `sample` again.
/// Unlike `validate` alone this exercises the full forward and inverse
/// paths for one concrete input.
pub fn is_obfuscable_and_disentanglable(rules: &RuleSet, sample: &str) -> bool {
    rules.validate() && disentangle(rules, &obfuscate(rules, sample)) == sample
}
