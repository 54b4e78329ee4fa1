//! Sequential surcharge arithmetic.
//!
//! The service charge applies to the subtotal; the tax applies to the
//! *post-service-charge* amount. The two percentages compound, they are not
//! independent fractions of the same base. The same computation runs at the
//! bill level and per participant (each participant's own subtotal as the
//! base), which is what lets the per-person figures sum back to the bill
//! grand total without a correction term.

use crate::{Money, Percent};

/// The full set of figures produced by one surcharge pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Money,
    pub service_charge: Money,
    pub after_service_charge: Money,
    pub tax: Money,
    pub grand_total: Money,
}

impl Totals {
    /// Applies the service charge, then the tax, to the given base amount.
    /// Every derived figure is rounded to the cent as it is computed.
    #[must_use]
    pub fn compute(subtotal: Money, service_charge: Percent, tax: Percent) -> Self {
        let service_amount = service_charge.of(subtotal);
        let after_service_charge = subtotal + service_amount;
        let tax_amount = tax.of(after_service_charge);
        Self {
            subtotal,
            service_charge: service_amount,
            after_service_charge,
            tax: tax_amount,
            grand_total: after_service_charge + tax_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_then_tax() {
        let totals = Totals::compute(
            Money::new(100_00),
            Percent::from_basis_points(1000),
            Percent::from_basis_points(700),
        );
        assert_eq!(totals.service_charge, Money::new(10_00));
        assert_eq!(totals.after_service_charge, Money::new(110_00));
        assert_eq!(totals.tax, Money::new(7_70));
        assert_eq!(totals.grand_total, Money::new(117_70));
    }

    #[test]
    fn tax_compounds_on_service_charge() {
        // 7% of 110.00, not 7% of 100.00.
        let totals = Totals::compute(
            Money::new(100_00),
            Percent::from_basis_points(1000),
            Percent::from_basis_points(700),
        );
        assert_ne!(totals.tax, Money::new(7_00));
    }

    #[test]
    fn zero_percentages_leave_subtotal_alone() {
        let totals = Totals::compute(Money::new(42_00), Percent::ZERO, Percent::ZERO);
        assert_eq!(totals.grand_total, Money::new(42_00));
        assert_eq!(totals.service_charge, Money::ZERO);
        assert_eq!(totals.tax, Money::ZERO);
    }
}
