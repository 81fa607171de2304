//! Operation: named single-character transforms.
//!
//! An [`Operation`] is a small semantic transform applied to one character
//! at a time. During obfuscation an operation is applied at the string
//! positions a rule names; during disentanglement the same operation is
//! either re-applied or inverted depending on the case of the character
//! being recovered.

use serde::{Deserialize, Serialize};

/// A named single-character transform.
///
/// Closed enumeration: further single-character transforms can be added
/// as variants without changing the engine, as long as each variant has
/// a well-defined opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Identity; leaves the character unchanged.
    None,
    /// Case-folds the character to upper case.
    UpperCase,
    /// Case-folds the character to lower case.
    LowerCase,
}

impl Operation {
    /// Applies the operation to a single character.
    ///
    /// Total over all Unicode scalar values. Case folds that expand to
    /// multiple scalars (e.g. `'ß'`) keep the first scalar of the fold,
    /// matching single-`char` semantics.
    ///
    /// # Parameters
    /// - `c`: The character to transform.
    ///
    /// # Returns
    /// The transformed character.
    ///
    /// # Examples
    ///
    /// ```
    /// use charfuscator::Operation;
    ///
    /// assert_eq!(Operation::UpperCase.apply('a'), 'A');
    /// assert_eq!(Operation::LowerCase.apply('A'), 'a');
    /// assert_eq!(Operation::None.apply('x'), 'x');
    /// ```
    pub fn apply(self, c: char) -> char {
        match self {
            Operation::None => c,
            Operation::UpperCase => c.to_uppercase().next().unwrap_or(c),
            Operation::LowerCase => c.to_lowercase().next().unwrap_or(c),
        }
    }

    /// Applies the operation forward or inverted, controlled by `preserve_case`.
    ///
    /// Used only during disentanglement: with `preserve_case == true` the
    /// operation is re-applied as in [`apply`](Self::apply); with `false`
    /// the opposite case fold is applied, undoing the forward transform.
    /// [`Operation::None`] is the identity either way.
    ///
    /// # Parameters
    /// - `c`: The character to transform.
    /// - `preserve_case`: Whether to re-apply the operation instead of
    ///   inverting it.
    ///
    /// # Returns
    /// The transformed character.
    pub fn apply_with_case(self, c: char, preserve_case: bool) -> char {
        if preserve_case {
            self.apply(c)
        } else {
            self.opposite().apply(c)
        }
    }

    /// Returns the operation that undoes `self`.
    fn opposite(self) -> Operation {
        match self {
            Operation::None => Operation::None,
            Operation::UpperCase => Operation::LowerCase,
            Operation::LowerCase => Operation::UpperCase,
        }
    }
}
