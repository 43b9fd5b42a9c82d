use super::rates::EDUCATION_RATE;
use crate::core::round_down_to_ten;
use rust_decimal::Decimal;

/// Local education tax (지방교육세): 20% of the ownership-adjusted main tax.
pub fn local_education_tax(property_tax: Decimal) -> Decimal {
    round_down_to_ten(property_tax * EDUCATION_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn twenty_percent_floored() {
        assert_eq!(local_education_tax(dec!(99_000)), dec!(19_800));
        assert_eq!(local_education_tax(dec!(88_040)), dec!(17_600));
        assert_eq!(local_education_tax(dec!(0)), dec!(0));
    }
}
