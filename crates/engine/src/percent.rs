use std::{fmt, str::FromStr};

use crate::{EngineError, Money};

/// Non-negative percentage stored as **integer basis points**
/// (1 bp = 0.01 %), so a `7.5 %` tax is `750`.
///
/// Surcharges are entered with at most two fractional digits, which basis
/// points represent exactly. Applying a percentage to a [`Money`] amount
/// rounds half-up to the nearest cent, the same rounding every other step of
/// the bill arithmetic uses.
///
/// ```rust
/// use engine::{Money, Percent};
///
/// let service: Percent = "10".parse().unwrap();
/// assert_eq!(service.of(Money::new(100_00)), Money::new(10_00));
///
/// let tax: Percent = "7.5".parse().unwrap();
/// assert_eq!(tax.to_string(), "7.5");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Percent(u32);

impl Percent {
    pub const ZERO: Percent = Percent(0);

    /// Creates a percentage from integer basis points.
    #[must_use]
    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// Returns the raw value in basis points.
    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Converts a plain JSON number (e.g. `7.5`) into basis points.
    ///
    /// Rejects negative and non-finite values; rounds anything finer than a
    /// hundredth of a percent to the nearest basis point.
    pub fn try_from_f64(value: f64) -> Result<Percent, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(
                "percentage is not a finite number".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(EngineError::InvalidAmount(
                "percentage must be >= 0".to_string(),
            ));
        }
        let bp = (value * 100.0).round();
        if bp > f64::from(u32::MAX) {
            return Err(EngineError::InvalidAmount(
                "percentage too large".to_string(),
            ));
        }
        Ok(Percent(bp as u32))
    }

    /// Returns the percentage as a plain number in percent units.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Applies the percentage to an amount, rounding half-up to the cent.
    #[must_use]
    pub fn of(self, amount: Money) -> Money {
        let num = i128::from(amount.cents()) * i128::from(self.0);
        let rounded = if num >= 0 {
            (num + 5_000) / 10_000
        } else {
            -((-num + 5_000) / 10_000)
        };
        Money::new(rounded as i64)
    }
}

impl fmt::Display for Percent {
    /// Prints the shortest exact decimal form: `10`, `7.5`, `7.25`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{units}")
        } else if frac % 10 == 0 {
            write!(f, "{units}.{}", frac / 10)
        } else {
            write!(f, "{units}.{frac:02}")
        }
    }
}

impl FromStr for Percent {
    type Err = EngineError;

    /// Parses a percentage with at most two fractional digits, `.` or `,` as
    /// the decimal separator. Signs are rejected: surcharges never run
    /// backwards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount("invalid percentage".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty percentage".to_string()));
        }
        if trimmed.starts_with('-') || trimmed.starts_with('+') {
            return Err(EngineError::InvalidAmount(
                "percentage must be >= 0".to_string(),
            ));
        }

        let rest = trimmed.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let units: u32 = units_str.parse().map_err(|_| invalid())?;

        let frac: u32 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<u32>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<u32>().map_err(|_| invalid())?,
                    _ => {
                        return Err(EngineError::InvalidAmount(
                            "too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let bp = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(|| EngineError::InvalidAmount("percentage too large".to_string()))?;
        Ok(Percent(bp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basis_points() {
        assert_eq!("10".parse::<Percent>().unwrap().basis_points(), 1000);
        assert_eq!("7.5".parse::<Percent>().unwrap().basis_points(), 750);
        assert_eq!("7,25".parse::<Percent>().unwrap().basis_points(), 725);
        assert_eq!("0".parse::<Percent>().unwrap(), Percent::ZERO);
        assert!("-1".parse::<Percent>().is_err());
        assert!("1.234".parse::<Percent>().is_err());
        assert!("abc".parse::<Percent>().is_err());
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Percent::from_basis_points(1000).to_string(), "10");
        assert_eq!(Percent::from_basis_points(750).to_string(), "7.5");
        assert_eq!(Percent::from_basis_points(725).to_string(), "7.25");
        assert_eq!(Percent::ZERO.to_string(), "0");
    }

    #[test]
    fn of_rounds_half_up() {
        // 10% of 100.00
        assert_eq!(
            Percent::from_basis_points(1000).of(Money::new(10_000)),
            Money::new(1_000)
        );
        // 7% of 110.00 = 7.70
        assert_eq!(
            Percent::from_basis_points(700).of(Money::new(11_000)),
            Money::new(770)
        );
        // 5% of 0.10 = 0.005 -> rounds up to a cent
        assert_eq!(Percent::from_basis_points(500).of(Money::new(10)), Money::new(1));
        assert_eq!(Percent::ZERO.of(Money::new(12_34)), Money::ZERO);
    }

    #[test]
    fn f64_round_trip() {
        let p = Percent::try_from_f64(7.5).unwrap();
        assert_eq!(p.basis_points(), 750);
        assert_eq!(p.as_f64(), 7.5);
        assert!(Percent::try_from_f64(-1.0).is_err());
        assert!(Percent::try_from_f64(f64::NAN).is_err());
    }
}
