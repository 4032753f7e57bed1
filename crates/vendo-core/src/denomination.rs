//! # Denominations
//!
//! The closed set of coin types a machine accepts and pays out.
//!
//! ## Ordering
//! ```text
//! Declaration order (how the set was built):   HALF  ONE  TWO  FIVE  TEN
//! Dispensing order (descending face value):    TEN   FIVE TWO  ONE   HALF
//! ```
//! The change loop always walks [`DenominationSet::descending`]. Two coins with
//! the same face value keep their declaration order, so the outcome never
//! depends on hash order or sort instability.

use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_denomination_code, validate_face_value, ValidationResult, MAX_DENOMINATIONS,
};

// =============================================================================
// Denomination
// =============================================================================

/// A coin type: an identity (`code`) plus a positive face value.
///
/// Denominations are immutable value objects; the machine's full set is fixed
/// when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Denomination {
    code: &'static str,
    face_value: Money,
}

impl Denomination {
    /// Half unit coin (50 cents).
    pub const HALF: Denomination = Denomination::new_unchecked("HALF", 50);
    /// One unit coin (100 cents).
    pub const ONE: Denomination = Denomination::new_unchecked("ONE", 100);
    /// Two unit coin (200 cents).
    pub const TWO: Denomination = Denomination::new_unchecked("TWO", 200);
    /// Five unit coin (500 cents).
    pub const FIVE: Denomination = Denomination::new_unchecked("FIVE", 500);
    /// Ten unit coin (1000 cents).
    pub const TEN: Denomination = Denomination::new_unchecked("TEN", 1000);

    /// Creates a denomination, validating the code and face value.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::Denomination;
    ///
    /// let quarter = Denomination::new("QUARTER", 25).unwrap();
    /// assert_eq!(quarter.face_value().cents(), 25);
    /// assert!(Denomination::new("FREE", 0).is_err());
    /// ```
    pub fn new(code: &'static str, face_value_cents: i64) -> ValidationResult<Self> {
        validate_denomination_code(code)?;
        validate_face_value(face_value_cents)?;
        Ok(Denomination::new_unchecked(code, face_value_cents))
    }

    const fn new_unchecked(code: &'static str, face_value_cents: i64) -> Self {
        Denomination {
            code,
            face_value: Money::from_cents(face_value_cents),
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    #[inline]
    pub const fn face_value(&self) -> Money {
        self.face_value
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

// =============================================================================
// Denomination Set
// =============================================================================

/// The fixed, validated set of denominations a machine works with.
///
/// ## Invariants
/// - Non-empty, at most `MAX_DENOMINATIONS` entries
/// - Codes are unique
/// - Every face value is positive and at most `MAX_FACE_VALUE_CENTS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenominationSet {
    denominations: Vec<Denomination>,
}

impl DenominationSet {
    /// Builds a set from denominations in declaration order.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::{Denomination, DenominationSet};
    ///
    /// let set = DenominationSet::new(vec![Denomination::ONE, Denomination::TWO]).unwrap();
    /// assert_eq!(set.len(), 2);
    ///
    /// // Duplicate codes are rejected
    /// assert!(DenominationSet::new(vec![Denomination::ONE, Denomination::ONE]).is_err());
    /// ```
    pub fn new(denominations: Vec<Denomination>) -> ValidationResult<Self> {
        if denominations.is_empty() {
            return Err(ValidationError::Required {
                field: "denominations".to_string(),
            });
        }

        if denominations.len() > MAX_DENOMINATIONS {
            return Err(ValidationError::TooLong {
                field: "denominations".to_string(),
                max: MAX_DENOMINATIONS,
            });
        }

        for (i, denomination) in denominations.iter().enumerate() {
            validate_denomination_code(denomination.code)?;
            validate_face_value(denomination.face_value.cents())?;

            if denominations[..i].iter().any(|d| d.code == denomination.code) {
                return Err(ValidationError::Duplicate {
                    field: "denomination".to_string(),
                    value: denomination.code.to_string(),
                });
            }
        }

        Ok(DenominationSet { denominations })
    }

    /// The five-coin set: HALF, ONE, TWO, FIVE, TEN.
    pub fn standard() -> Self {
        DenominationSet {
            denominations: vec![
                Denomination::HALF,
                Denomination::ONE,
                Denomination::TWO,
                Denomination::FIVE,
                Denomination::TEN,
            ],
        }
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Denomination> {
        self.denominations.iter()
    }

    /// Returns the denominations in dispensing order: descending face value,
    /// ties kept in declaration order.
    pub fn descending(&self) -> Vec<Denomination> {
        let mut ordered = self.denominations.clone();
        // sort_by is stable
        ordered.sort_by(|a, b| b.face_value.cmp(&a.face_value));
        ordered
    }

    /// Position of `denomination` in declaration order.
    pub fn position(&self, denomination: &Denomination) -> Option<usize> {
        self.denominations.iter().position(|d| d == denomination)
    }

    pub fn contains(&self, denomination: &Denomination) -> bool {
        self.position(denomination).is_some()
    }

    /// Case-insensitive lookup by code.
    pub fn by_code(&self, code: &str) -> Option<Denomination> {
        let code = code.trim();
        self.denominations
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }
}

impl Default for DenominationSet {
    fn default() -> Self {
        DenominationSet::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_declaration_order() {
        let set = DenominationSet::standard();
        let codes: Vec<_> = set.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec!["HALF", "ONE", "TWO", "FIVE", "TEN"]);
    }

    #[test]
    fn test_descending_order() {
        let set = DenominationSet::standard();
        let values: Vec<_> = set.descending().iter().map(|d| d.face_value().cents()).collect();
        assert_eq!(values, vec![1000, 500, 200, 100, 50]);
    }

    #[test]
    fn test_descending_is_stable_for_equal_values() {
        let token = Denomination::new("TOKEN", 100).unwrap();
        let set = DenominationSet::new(vec![
            Denomination::HALF,
            Denomination::ONE,
            token,
            Denomination::TWO,
        ])
        .unwrap();

        let codes: Vec<_> = set.descending().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec!["TWO", "ONE", "TOKEN", "HALF"]);
    }

    #[test]
    fn test_huge_face_value_rejected() {
        assert!(matches!(
            Denomination::new("BIG", i64::MAX / 2),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_new_rejects_too_many_denominations() {
        let coins: Vec<Denomination> = (0..=MAX_DENOMINATIONS)
            .map(|i| {
                let code: &'static str = Box::leak(format!("C{i}").into_boxed_str());
                Denomination::new(code, 100).unwrap()
            })
            .collect();

        assert!(matches!(
            DenominationSet::new(coins),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_new_rejects_empty_and_duplicates() {
        assert!(matches!(
            DenominationSet::new(vec![]),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            DenominationSet::new(vec![Denomination::TEN, Denomination::TEN]),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_denomination_rejects_non_positive_value() {
        assert!(Denomination::new("ZERO", 0).is_err());
        assert!(Denomination::new("NEG", -50).is_err());
        assert!(Denomination::new("", 50).is_err());
    }

    #[test]
    fn test_by_code_is_case_insensitive() {
        let set = DenominationSet::standard();
        assert_eq!(set.by_code("five"), Some(Denomination::FIVE));
        assert_eq!(set.by_code(" Half "), Some(Denomination::HALF));
        assert_eq!(set.by_code("twenty"), None);
    }

    #[test]
    fn test_contains() {
        let set = DenominationSet::new(vec![Denomination::ONE]).unwrap();
        assert!(set.contains(&Denomination::ONE));
        assert!(!set.contains(&Denomination::TEN));
    }
}
