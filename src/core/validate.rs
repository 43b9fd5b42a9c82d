use super::property::{HouseKind, PropertyInput, SubUnit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// An input field rejected before calculation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("invalid input `{field}`: {reason}")]
pub struct InvalidInput {
    /// Path of the offending field, e.g. `sub_units[2].taxable_standard`
    pub field: String,
    pub reason: Reason,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Reason {
    #[error("must not be negative (got {0})")]
    Negative(Decimal),
    #[error("must be greater than zero")]
    NotPositive,
    #[error("must be between {min} and {max} (got {value})")]
    OutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("must be at least {min} (got {value})")]
    BelowMinimum { value: Decimal, min: Decimal },
    #[error("must be at most {max} (got {value})")]
    AboveMaximum { value: Decimal, max: Decimal },
    #[error("multi-unit property requires at least one sub-unit")]
    NoSubUnits,
    #[error("single-unit property must not list sub-units")]
    UnexpectedSubUnits,
    #[error("duplicate sub-unit id {0}")]
    DuplicateId(u32),
}

const MIN_BURDEN_CAP_RATE: Decimal = dec!(100);
/// Keeps every product of an amount and a rate inside `Decimal` range.
const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000_000);
const MAX_CAP_RATE: Decimal = dec!(1_000);

/// Reject the first invalid field, if any.
pub fn validate(input: &PropertyInput) -> Result<(), InvalidInput> {
    match check(input).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

/// Every invalid field of the input, in field order.
pub fn check(input: &PropertyInput) -> Vec<InvalidInput> {
    let mut issues = Issues::default();

    match input.kind {
        HouseKind::SingleUnit => {
            if input.public_price <= Decimal::ZERO {
                issues.push("public_price", Reason::NotPositive);
            } else {
                issues.amount("public_price", input.public_price);
            }
            if !input.sub_units.is_empty() {
                issues.push("sub_units", Reason::UnexpectedSubUnits);
            }
        }
        HouseKind::MultiUnit => {
            issues.amount("public_price", input.public_price);
            if input.sub_units.is_empty() {
                issues.push("sub_units", Reason::NoSubUnits);
            }
        }
    }
    issues.percentage("ownership_ratio", input.ownership_ratio);
    if let Some(standard) = input.resource_tax_standard {
        issues.amount("resource_tax_standard", standard);
    }
    issues.sub_units("sub_units", &input.sub_units);
    issues.percentage("reduction_rate", input.reduction_rate);
    issues.cap_rate("burden_cap_rate", input.burden_cap_rate, MIN_BURDEN_CAP_RATE);
    issues.cap_rate("standard_cap_rate", input.standard_cap_rate, Decimal::ZERO);

    let prior = &input.previous_year;
    issues.amount("previous_year.public_price", prior.public_price);
    issues.amount("previous_year.taxable_standard", prior.taxable_standard);
    issues.amount("previous_year.actual_paid_tax", prior.actual_paid_tax);
    issues.percentage("previous_year.reduction_rate", prior.reduction_rate);
    issues.amount("previous_year.resource_tax_standard", prior.resource_tax_standard);
    issues.sub_units("previous_year.sub_units", &prior.sub_units);
    issues.amount("previous_year.urban_area_tax", prior.urban_area_tax);

    issues.0
}

#[derive(Default)]
struct Issues(Vec<InvalidInput>);

impl Issues {
    fn push(&mut self, field: impl Into<String>, reason: Reason) {
        self.0.push(InvalidInput {
            field: field.into(),
            reason,
        });
    }

    fn amount(&mut self, field: &str, value: Decimal) {
        if value < Decimal::ZERO {
            self.push(field, Reason::Negative(value));
        } else if value > MAX_AMOUNT {
            let max = MAX_AMOUNT;
            self.push(field, Reason::AboveMaximum { value, max });
        }
    }

    fn cap_rate(&mut self, field: &str, value: Decimal, min: Decimal) {
        if value < min {
            self.push(field, Reason::BelowMinimum { value, min });
        } else if value > MAX_CAP_RATE {
            let max = MAX_CAP_RATE;
            self.push(field, Reason::AboveMaximum { value, max });
        }
    }

    fn percentage(&mut self, field: &str, value: Decimal) {
        let (min, max) = (Decimal::ZERO, dec!(100));
        if value < min || value > max {
            self.push(field, Reason::OutOfRange { value, min, max });
        }
    }

    fn sub_units(&mut self, field: &str, units: &[SubUnit]) {
        let mut seen = HashSet::new();
        for (i, unit) in units.iter().enumerate() {
            if !seen.insert(unit.id) {
                self.push(format!("{field}[{i}].id"), Reason::DuplicateId(unit.id));
            }
            self.amount(&format!("{field}[{i}].taxable_standard"), unit.taxable_standard);
            if let Some(standard) = unit.resource_tax_standard {
                self.amount(&format!("{field}[{i}].resource_tax_standard"), standard);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::property::PropertyInput;

    fn fields(input: &PropertyInput) -> Vec<String> {
        check(input).into_iter().map(|i| i.field).collect()
    }

    #[test]
    fn accepts_plain_single_unit() {
        let input = PropertyInput::single_unit(dec!(300_000_000), true);
        assert_eq!(validate(&input), Ok(()));
    }

    #[test]
    fn rejects_missing_public_price() {
        let input = PropertyInput::single_unit(Decimal::ZERO, false);
        let err = validate(&input).unwrap_err();
        assert_eq!(err.field, "public_price");
        assert_eq!(err.reason, Reason::NotPositive);
    }

    #[test]
    fn rejects_multi_unit_without_units() {
        let input = PropertyInput::multi_unit(Vec::new(), false);
        assert_eq!(
            validate(&input).unwrap_err(),
            InvalidInput {
                field: "sub_units".to_string(),
                reason: Reason::NoSubUnits,
            }
        );
    }

    #[test]
    fn rejects_single_unit_with_units() {
        let mut input = PropertyInput::single_unit(dec!(100_000_000), false);
        input.sub_units.push(SubUnit::new(1, dec!(1_000_000)));
        assert_eq!(fields(&input), vec!["sub_units"]);
    }

    #[test]
    fn rejects_rates_out_of_range() {
        let mut input = PropertyInput::single_unit(dec!(100_000_000), false);
        input.ownership_ratio = dec!(120);
        input.reduction_rate = dec!(-1);
        input.burden_cap_rate = dec!(99);
        input.standard_cap_rate = dec!(-5);
        assert_eq!(
            fields(&input),
            vec![
                "ownership_ratio",
                "reduction_rate",
                "burden_cap_rate",
                "standard_cap_rate"
            ]
        );
    }

    #[test]
    fn rejects_negative_prior_amounts_and_duplicate_ids() {
        let mut input = PropertyInput::multi_unit(
            vec![
                SubUnit::new(1, dec!(10_000_000)),
                SubUnit::new(1, dec!(-5)),
            ],
            false,
        );
        input.previous_year.actual_paid_tax = dec!(-100);
        assert_eq!(
            fields(&input),
            vec![
                "sub_units[1].id",
                "sub_units[1].taxable_standard",
                "previous_year.actual_paid_tax"
            ]
        );
    }

    #[test]
    fn rejects_amounts_beyond_decimal_headroom() {
        let mut input = PropertyInput::single_unit(dec!(300_000_000), true);
        input.previous_year.actual_paid_tax = dec!(1_000_000_000_000_000_000_000_000_000);
        input.previous_year.urban_area_tax = dec!(1_000_000_000_000_000_001);
        input.burden_cap_rate = dec!(1_000_000);
        assert_eq!(
            fields(&input),
            vec![
                "burden_cap_rate",
                "previous_year.actual_paid_tax",
                "previous_year.urban_area_tax"
            ]
        );
        assert_eq!(
            validate(&input).unwrap_err().reason,
            Reason::AboveMaximum {
                value: dec!(1_000_000),
                max: MAX_CAP_RATE,
            }
        );
    }

    #[test]
    fn message_names_field() {
        let input = PropertyInput::multi_unit(Vec::new(), false);
        let err = validate(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input `sub_units`: multi-unit property requires at least one sub-unit"
        );
    }
}
