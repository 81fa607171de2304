//! charfuscator: rule-based reversible character obfuscation engine.
//!
//! charfuscator reversibly scrambles short secrets (embedded configuration
//! keys, identifiers) through a bidirectional, per-position,
//! operation-aware character substitution. It is **not** cryptography and
//! offers no confidentiality against anyone holding the rule set; its one
//! guarantee is a pure, deterministic, per-position bijective transform on
//! validated rule sets.
//!
//! # Architecture
//!
//! ```text
//! Operation    (atomic unit — named single-character transform)
//!     ↕ bound to positions by
//! ObfuscationOperationRule   (source char → replacement, position-aware)
//!     ↕ collected, ordered and sealed into
//! RuleSet / ValidatedRuleSet (char → rule map + derived reverse index)
//!     ↕ driven by
//! obfuscate / disentangle    (forward and inverse per-position transforms)
//! ```
//!
//! # Examples
//!
//! Obfuscate a secret and recover it:
//!
//! ```
//! use charfuscator::{disentangle, obfuscate, ObfuscationOperationRule, Operation, RuleSet};
//!
//! let rules = RuleSet::new([
//!     ObfuscationOperationRule::with_operation('a', 'b', Operation::UpperCase, [0, 2]),
//!     ObfuscationOperationRule::new('b', 'c'),
//!     ObfuscationOperationRule::with_operation('c', 'd', Operation::UpperCase, [3]),
//! ]).unwrap();
//!
//! let public = obfuscate(&rules, "abac");
//! assert_eq!(public, "AcAC");
//! assert_eq!(disentangle(&rules, &public), "abac");
//! ```
//!
//! Make invertibility a type-level guarantee:
//!
//! ```
//! use charfuscator::{ObfuscationOperationRule, Operation, RuleSet};
//!
//! let rules = RuleSet::new([
//!     ObfuscationOperationRule::with_operation('a', 'b', Operation::UpperCase, [0]),
//!     ObfuscationOperationRule::new('b', 'a'),
//! ]).unwrap();
//!
//! let validated = rules.into_validated().unwrap();
//! assert_eq!(validated.obfuscate("abba"), "Aaab");
//! assert_eq!(validated.disentangle("Aaab"), "abba");
//! ```

#![deny(clippy::all)]

pub mod error;
pub mod loader;

mod engine;
mod obfuscator;
mod operation;
mod rule;
mod rule_set;

pub use engine::{disentangle, is_obfuscable_and_disentanglable, obfuscate};
pub use obfuscator::CharacterObfuscator;
pub use operation::Operation;
pub use rule::{ObfuscationOperationRule, ObfuscationRule};
pub use rule_set::{RuleSet, ValidatedRuleSet};
