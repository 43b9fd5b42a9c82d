use super::main_tax::standard_rate_tax;
use crate::core::{round_down_to_ten, RateSchedule, SubUnit, Trace};
use rust_decimal::Decimal;

/// Exact tax of one division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTax {
    pub id: u32,
    pub standard: Decimal,
    pub schedule: RateSchedule,
    pub exact: Decimal,
}

/// Division taxes of a multi-unit property, summed before rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiUnitTax {
    pub units: Vec<UnitTax>,
    pub exact_total: Decimal,
}

impl MultiUnitTax {
    /// Sum floored to 10 won. Divisions are never rounded individually.
    pub fn rounded(&self) -> Decimal {
        round_down_to_ten(self.exact_total)
    }

    pub(crate) fn trace(&self, trace: &mut Trace) {
        for unit in &self.units {
            trace.line(format!(
                "unit {}: standard {} on {} schedule = {:.3}",
                unit.id,
                unit.standard.normalize(),
                unit.schedule,
                unit.exact
            ));
        }
        trace.line(format!("sum {:.3}", self.exact_total));
        trace.line(format!("floored to 10 won: {}", self.rounded()));
    }
}

/// Tax every division on its own standard, each division's standard doubling as the
/// special-schedule price gate.
pub fn aggregate_units(units: &[SubUnit], single_household: bool) -> MultiUnitTax {
    let units: Vec<UnitTax> = units
        .iter()
        .map(|unit| {
            let schedule = RateSchedule::for_household(single_household, unit.taxable_standard);
            UnitTax {
                id: unit.id,
                standard: unit.taxable_standard,
                schedule,
                exact: schedule.apply(unit.taxable_standard).amount,
            }
        })
        .collect();
    let exact_total: Decimal = units.iter().map(|u| u.exact).sum();
    MultiUnitTax { units, exact_total }
}

/// Exact standard-schedule total over all divisions, for comparison reporting.
pub fn standard_rate_total(units: &[SubUnit]) -> Decimal {
    units.iter().map(|u| standard_rate_tax(u.taxable_standard)).sum()
}
