//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning checked operations of
//! [`Amount`] and [`Shares`] into `Result`s carrying a specific
//! [`TrackerError`] variant, so call sites can use `?` and callers can tell
//! overflow from underflow from division by zero.
//!
//! ```
//! use hydra_tracker::domain::{Amount, Rounding};
//! use hydra_tracker::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! assert!(a.safe_sub(&Amount::new(101)).is_err());
//! assert_eq!(a.safe_div(&Amount::new(3), Rounding::Down), Ok(Amount::new(33)));
//! ```

use crate::domain::{Amount, Rounding, Shares};
use crate::error::TrackerError;

/// Fallible arithmetic for domain wrapper types.
///
/// No method panics and none saturates: every failure becomes an `Err`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Overflow`].
    fn safe_add(&self, other: &Self) -> Result<Self, TrackerError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Underflow`].
    fn safe_sub(&self, other: &Self) -> Result<Self, TrackerError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Overflow`].
    fn safe_mul(&self, other: &Self) -> Result<Self, TrackerError>;

    /// Checked division with explicit [`Rounding`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, TrackerError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, TrackerError> {
        self.checked_add(other)
            .ok_or(TrackerError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, TrackerError> {
        self.checked_sub(other)
            .ok_or(TrackerError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, TrackerError> {
        self.checked_mul(other)
            .ok_or(TrackerError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, TrackerError> {
        self.checked_div(other, rounding)
            .ok_or(TrackerError::DivisionByZero("amount divisor is zero"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, TrackerError> {
        self.checked_add(other)
            .ok_or(TrackerError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, TrackerError> {
        self.checked_sub(other)
            .ok_or(TrackerError::Underflow("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, TrackerError> {
        self.get()
            .checked_mul(other.get())
            .map(Shares::new)
            .ok_or(TrackerError::Overflow("share multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, TrackerError> {
        Amount::new(self.get())
            .checked_div(&Amount::new(other.get()), rounding)
            .map(|q| Shares::new(q.get()))
            .ok_or(TrackerError::DivisionByZero("share divisor is zero"))
    }
}

/// Computes `a × b / denominator` with explicit rounding.
///
/// `context` names the denominator in the error, so a zero total value
/// locked and a zero reserve report differently.
///
/// # Errors
///
/// - [`TrackerError::Overflow`] if `a × b` overflows `u128`.
/// - [`TrackerError::DivisionByZero`] if `denominator` is zero.
pub fn mul_div(
    a: Amount,
    b: Amount,
    denominator: Amount,
    rounding: Rounding,
    context: &'static str,
) -> Result<Amount, TrackerError> {
    if denominator.is_zero() {
        return Err(TrackerError::DivisionByZero(context));
    }
    let product = a.safe_mul(&b)?;
    product.safe_div(&denominator, rounding)
}
