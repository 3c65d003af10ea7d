//! Fixed-precision decimal shapes.
//!
//! Every monetary or quantity column has a declared precision (total digits)
//! and scale (digits after the point). Values are carried as
//! [`rust_decimal::Decimal`] and never pass through floating point.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::MONEY;
use crate::error::{DomainError, DomainResult};

/// Precision and scale of a `decimal(p, s)` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalSpec {
    pub precision: u32,
    pub scale: u32,
}

impl DecimalSpec {
    pub const fn new(precision: u32, scale: u32) -> Self {
        Self { precision, scale }
    }

    /// Digits allowed before the decimal point.
    pub const fn integer_digits(&self) -> u32 {
        self.precision - self.scale
    }

    /// Whether `value` can be stored without rounding or overflow.
    pub fn fits(&self, value: &Decimal) -> bool {
        let normalized = value.normalize();
        if normalized.scale() > self.scale {
            return false;
        }
        integer_digit_count(&normalized) <= self.integer_digits()
    }

    /// Validate `value` for a named field and rescale it to the declared scale.
    ///
    /// `"7.5"` becomes `"7.50"` for a scale of 2; `"7.505"` is rejected.
    pub fn check(&self, field: &str, value: Decimal) -> DomainResult<Decimal> {
        if !self.fits(&value) {
            return Err(DomainError::precision(field, *self, value));
        }
        let mut rescaled = value;
        rescaled.rescale(self.scale);
        Ok(rescaled)
    }
}

impl std::fmt::Display for DecimalSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "decimal({}, {})", self.precision, self.scale)
    }
}

fn integer_digit_count(value: &Decimal) -> u32 {
    let mut whole = value.trunc().abs();
    let mut digits = 0;
    let ten = Decimal::TEN;
    while !whole.is_zero() {
        whole = (whole / ten).trunc();
        digits += 1;
    }
    digits
}

/// Amount of a line item: quantity times unit price, rounded half away from
/// zero to the money scale.
pub fn line_amount(quantity: Decimal, unit_price: Decimal) -> DomainResult<Decimal> {
    let amount = quantity
        .checked_mul(unit_price)
        .ok_or_else(|| DomainError::validation("line item amount overflows"))?
        .round_dp_with_strategy(MONEY.scale, RoundingStrategy::MidpointAwayFromZero);
    MONEY.check("amount", amount)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::constants::{HOURS, TAX_RATE};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fits_within_declared_shape() {
        assert!(MONEY.fits(&dec("1234567890.12")));
        assert!(MONEY.fits(&dec("-1234567890.12")));
        assert!(MONEY.fits(&dec("0")));
        assert!(TAX_RATE.fits(&dec("999.99")));
        assert!(HOURS.fits(&dec("7.5")));
    }

    #[test]
    fn test_rejects_overflow_and_extra_scale() {
        assert!(!MONEY.fits(&dec("12345678901.00")));
        assert!(!MONEY.fits(&dec("1.005")));
        assert!(!TAX_RATE.fits(&dec("1000")));
    }

    #[test]
    fn test_trailing_zeros_do_not_count_against_scale() {
        assert!(MONEY.fits(&dec("1.5000")));
    }

    #[test]
    fn test_check_rescales_to_declared_scale() {
        let checked = TAX_RATE.check("tax_rate", dec("7.5")).unwrap();
        assert_eq!(checked.to_string(), "7.50");
        assert_eq!(checked.scale(), 2);
    }

    #[test]
    fn test_check_names_the_field() {
        let err = MONEY.check("subtotal", dec("0.001")).unwrap_err();
        assert!(err.to_string().contains("subtotal"));
        assert!(err.to_string().contains("decimal(12, 2)"));
    }

    #[test]
    fn test_line_amount_rounds_half_away_from_zero() {
        let amount = line_amount(dec("1.5"), dec("0.25")).unwrap();
        assert_eq!(amount.to_string(), "0.38");
        let amount = line_amount(dec("3"), dec("33.33")).unwrap();
        assert_eq!(amount.to_string(), "99.99");
    }

    #[test]
    fn test_display() {
        assert_eq!(MONEY.to_string(), "decimal(12, 2)");
        assert_eq!(HOURS.integer_digits(), 6);
    }
}
