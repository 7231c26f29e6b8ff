use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Monetary amount held in integer minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a major-unit amount (e.g. `1200.00`) rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinite input, or amounts whose cents do not fit in an `i64`.
    pub fn from_major(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        // i64::MAX is not representable as f64; the cast rounds up to 2^63
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Price of `quantity` units at this unit price, saturating at the `i64` range
    pub fn times(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates instead of overflowing
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_string();
        let fraction = abs % 100;

        // Group the whole part in thousands
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}${}.{:02}", sign, grouped, fraction);
        f.pad(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(1200.0).unwrap().cents(), 120000);
        assert_eq!(Money::from_major(0.125).unwrap().cents(), 13);
        assert_eq!(Money::from_major(29.999).unwrap().cents(), 3000);
        assert!(Money::from_major(f64::NAN).is_none());
        assert!(Money::from_major(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(120000).to_string(), "$1,200.00");
        assert_eq!(Money::from_cents(366000).to_string(), "$3,660.00");
        assert_eq!(Money::from_cents(123456789).to_string(), "$1,234,567.89");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>10}", Money::from_cents(3000)), "    $30.00");
    }

    #[test]
    fn test_arithmetic() {
        let price = Money::from_major(1200.0).unwrap();
        let total: Money = [price.times(3), Money::from_major(30.0).unwrap().times(2)]
            .into_iter()
            .sum();

        assert_eq!(total, Money::from_major(3660.0).unwrap());
        assert!((total.as_major() - 3660.0).abs() < f64::EPSILON);
        assert!(!total.is_negative());
    }

    #[test]
    fn test_from_major_rejects_amounts_beyond_cent_range() {
        assert!(Money::from_major(1e30).is_none());
        assert!(Money::from_major(-1e30).is_none());
        assert!(Money::from_major(1e17).is_none());

        let big = Money::from_major(9_000_000_000_000_000.0).unwrap();
        assert_eq!(big.cents(), 900_000_000_000_000_000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.times(3), Money::from_cents(i64::MAX));
        assert_eq!(huge.times(u32::MAX), Money::from_cents(i64::MAX));

        let mut total = huge + huge + huge;
        assert_eq!(total, Money::from_cents(i64::MAX));
        total += Money::from_cents(1);
        assert_eq!(total, Money::from_cents(i64::MAX));

        let sum: Money = vec![huge; 4].into_iter().sum();
        assert_eq!(sum, Money::from_cents(i64::MAX));
    }
}
