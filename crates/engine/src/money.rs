use std::fmt;

use crate::{FieldError, Rule};

const AMOUNT: &str = "amount";

/// Expense amount in major units, kept exactly as received.
///
/// Any finite number is a valid `Money`; positivity is an expense rule and is
/// checked by the caller.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::from_major(12.345).unwrap();
/// assert_eq!(amount.to_major(), 12.345);
/// assert!(amount.is_positive());
/// assert!(Money::from_major(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    /// Converts a decimal number as received on the wire.
    ///
    /// Rejects NaN and infinities. The sign is preserved.
    pub fn from_major(value: f64) -> Result<Self, FieldError> {
        if !value.is_finite() {
            return Err(FieldError::new(
                AMOUNT,
                Rule::InvalidNumber,
                "amount must be a valid number",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the amount as a decimal number for the wire.
    #[must_use]
    pub const fn to_major(self) -> f64 {
        self.0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
