use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (prices, shares,
/// totals) to avoid floating-point drift. Rounding happens exactly once per
/// division or percentage step, to the nearest cent, so figures printed along
/// the way always agree with the figures that get summed.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a major-unit value (e.g. `10.55` from a JSON payload) into
    /// cents, rounding half-up to the nearest cent.
    pub fn try_from_major(value: f64) -> Result<Money, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(
                "amount is not a finite number".to_string(),
            ));
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Money(cents as i64))
    }

    /// Returns the value in major units, for wire formats that carry plain
    /// JSON numbers.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Splits the amount evenly `ways` ways, rounding the share half-up to
    /// the nearest cent.
    ///
    /// Splitting zero ways yields zero: an amount nobody takes part in has no
    /// per-person share.
    #[must_use]
    pub fn split(self, ways: usize) -> Money {
        if ways == 0 {
            return Money::ZERO;
        }
        let n = ways as i64;
        if self.0 >= 0 {
            Money((self.0 + n / 2) / n)
        } else {
            Money(-((-self.0 + n / 2) / n))
        }
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Multiplies a per-unit price by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Money {
        Money(self.0 * i64::from(quantity))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| invalid())?;

        let cents: i64 = match cents_str {
            None => 0,
            Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_two_decimals() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<Money>().is_err());
        assert!("0.001".parse::<Money>().is_err());
    }

    #[test]
    fn split_rounds_half_up() {
        // 1.00 three ways: 33 + 33 + 33 leaves a cent on the table.
        assert_eq!(Money::new(100).split(3).cents(), 33);
        // 0.05 two ways: 2.5 cents rounds up to 3.
        assert_eq!(Money::new(5).split(2).cents(), 3);
        assert_eq!(Money::new(9000).split(2).cents(), 4500);
        assert_eq!(Money::new(100).split(0), Money::ZERO);
    }

    #[test]
    fn major_round_trip() {
        assert_eq!(Money::try_from_major(10.55).unwrap().cents(), 1055);
        assert_eq!(Money::try_from_major(0.0).unwrap(), Money::ZERO);
        assert!(Money::try_from_major(f64::NAN).is_err());
        assert!(Money::try_from_major(f64::INFINITY).is_err());
        assert_eq!(Money::new(1055).to_major(), 10.55);
    }
}
