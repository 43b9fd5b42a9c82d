//! Statutory ratios and progressive rate tables (지방세법 제111조, 제146조, 시행령 제109조).

use crate::core::RateSchedule;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One progressive tier: `standard × rate − deduction` for standards up to `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    /// Inclusive upper bound; `None` for the top tier
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
}

impl Bracket {
    const fn new(upper: Option<Decimal>, rate: Decimal, deduction: Decimal) -> Self {
        Bracket {
            upper,
            rate,
            deduction,
        }
    }

    pub fn tax(&self, standard: Decimal) -> Decimal {
        standard * self.rate - self.deduction
    }

    fn contains(&self, standard: Decimal) -> bool {
        self.upper.is_none_or(|upper| standard <= upper)
    }
}

const SPECIAL_BRACKETS: [Bracket; 4] = [
    Bracket::new(Some(dec!(60_000_000)), dec!(0.0005), dec!(0)),
    Bracket::new(Some(dec!(150_000_000)), dec!(0.001), dec!(30_000)),
    Bracket::new(Some(dec!(300_000_000)), dec!(0.002), dec!(180_000)),
    Bracket::new(None, dec!(0.0035), dec!(630_000)),
];

const STANDARD_BRACKETS: [Bracket; 4] = [
    Bracket::new(Some(dec!(60_000_000)), dec!(0.001), dec!(0)),
    Bracket::new(Some(dec!(150_000_000)), dec!(0.0015), dec!(30_000)),
    Bracket::new(Some(dec!(300_000_000)), dec!(0.0025), dec!(180_000)),
    Bracket::new(None, dec!(0.004), dec!(630_000)),
];

/// Regional resource & facility tax on buildings.
pub const RESOURCE_BRACKETS: [Bracket; 6] = [
    Bracket::new(Some(dec!(6_000_000)), dec!(0.0004), dec!(0)),
    Bracket::new(Some(dec!(13_000_000)), dec!(0.0005), dec!(600)),
    Bracket::new(Some(dec!(26_000_000)), dec!(0.0006), dec!(1_900)),
    Bracket::new(Some(dec!(39_000_000)), dec!(0.0008), dec!(7_100)),
    Bracket::new(Some(dec!(64_000_000)), dec!(0.001), dec!(14_900)),
    Bracket::new(None, dec!(0.0012), dec!(27_700)),
];

/// Highest public price still eligible for the special schedule.
pub const SPECIAL_RATE_PRICE_LIMIT: Decimal = dec!(900_000_000);

pub const URBAN_AREA_RATE: Decimal = dec!(0.0014);
pub const EDUCATION_RATE: Decimal = dec!(0.2);

/// Growth allowed on last year's urban-area tax.
pub const URBAN_AREA_CAP_FACTOR: Decimal = dec!(1.1);

/// Position and value of the tier that applied to a standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierTax {
    /// 1-based tier number
    pub tier: usize,
    pub bracket: Bracket,
    /// Unrounded amount
    pub amount: Decimal,
}

/// Apply a progressive table to a standard.
pub fn progressive(brackets: &[Bracket], standard: Decimal) -> TierTax {
    let (index, bracket) = brackets
        .iter()
        .enumerate()
        .find(|(_, b)| b.contains(standard))
        .unwrap_or((brackets.len() - 1, &brackets[brackets.len() - 1]));
    TierTax {
        tier: index + 1,
        bracket: *bracket,
        amount: bracket.tax(standard),
    }
}

/// Fair market value ratio (공정시장가액비율) applied to the public price.
pub fn market_value_ratio(public_price: Decimal, single_household: bool) -> Decimal {
    if !single_household {
        return dec!(0.60);
    }
    if public_price <= dec!(300_000_000) {
        dec!(0.43)
    } else if public_price <= dec!(600_000_000) {
        dec!(0.44)
    } else {
        dec!(0.45)
    }
}

impl RateSchedule {
    /// Schedule for an owner: special only for a single household at or under the price limit.
    pub fn for_household(single_household: bool, gate_price: Decimal) -> Self {
        if single_household && gate_price <= SPECIAL_RATE_PRICE_LIMIT {
            RateSchedule::Special
        } else {
            RateSchedule::Standard
        }
    }

    pub fn brackets(&self) -> &'static [Bracket] {
        match self {
            RateSchedule::Standard => &STANDARD_BRACKETS,
            RateSchedule::Special => &SPECIAL_BRACKETS,
        }
    }

    pub fn apply(&self, standard: Decimal) -> TierTax {
        progressive(self.brackets(), standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lower tier formula and upper tier formula agree at every boundary.
    fn assert_continuous(brackets: &[Bracket]) {
        for pair in brackets.windows(2) {
            let boundary = pair[0].upper.unwrap();
            assert_eq!(
                pair[0].tax(boundary),
                pair[1].tax(boundary),
                "discontinuity at {boundary}"
            );
        }
    }

    #[test]
    fn schedules_are_continuous() {
        assert_continuous(&SPECIAL_BRACKETS);
        assert_continuous(&STANDARD_BRACKETS);
        assert_continuous(&RESOURCE_BRACKETS);
    }

    #[test]
    fn boundary_belongs_to_lower_tier() {
        let at = RateSchedule::Special.apply(dec!(60_000_000));
        assert_eq!(at.tier, 1);
        assert_eq!(at.amount, dec!(30_000));
        let above = RateSchedule::Special.apply(dec!(60_000_001));
        assert_eq!(above.tier, 2);
    }

    #[test]
    fn market_value_ratio_steps() {
        assert_eq!(market_value_ratio(dec!(300_000_000), true), dec!(0.43));
        assert_eq!(market_value_ratio(dec!(300_000_001), true), dec!(0.44));
        assert_eq!(market_value_ratio(dec!(600_000_000), true), dec!(0.44));
        assert_eq!(market_value_ratio(dec!(600_000_001), true), dec!(0.45));
        assert_eq!(market_value_ratio(dec!(2_000_000_000), true), dec!(0.45));
        for price in [dec!(1), dec!(300_000_000), dec!(700_000_000)] {
            assert_eq!(market_value_ratio(price, false), dec!(0.60));
        }
    }

    #[test]
    fn special_schedule_price_gate() {
        assert_eq!(
            RateSchedule::for_household(true, dec!(900_000_000)),
            RateSchedule::Special
        );
        assert_eq!(
            RateSchedule::for_household(true, dec!(900_000_001)),
            RateSchedule::Standard
        );
        assert_eq!(
            RateSchedule::for_household(false, dec!(100_000_000)),
            RateSchedule::Standard
        );
    }

    #[test]
    fn schedule_tiers() {
        assert_eq!(RateSchedule::Special.apply(dec!(129_000_000)).amount, dec!(99_000));
        assert_eq!(RateSchedule::Standard.apply(dec!(129_000_000)).amount, dec!(163_500));
        assert_eq!(RateSchedule::Standard.apply(dec!(200_000_000)).amount, dec!(320_000));
        assert_eq!(RateSchedule::Special.apply(dec!(400_000_000)).amount, dec!(770_000));
        assert_eq!(RateSchedule::Standard.apply(dec!(400_000_000)).tier, 4);
    }

    #[test]
    fn main_tax_is_monotonic() {
        for schedule in [RateSchedule::Standard, RateSchedule::Special] {
            let mut previous = Decimal::MIN;
            let mut standard = Decimal::ZERO;
            while standard <= dec!(500_000_000) {
                let tax = schedule.apply(standard).amount;
                assert!(tax >= previous, "{schedule} decreased at {standard}");
                previous = tax;
                standard += dec!(7_500_000);
            }
        }
    }

    #[test]
    fn resource_tiers() {
        assert_eq!(progressive(&RESOURCE_BRACKETS, dec!(5_000_000)).amount, dec!(2_000));
        let tier3 = progressive(&RESOURCE_BRACKETS, dec!(15_000_000));
        assert_eq!(tier3.tier, 3);
        assert_eq!(tier3.amount, dec!(7_100));
        assert_eq!(progressive(&RESOURCE_BRACKETS, dec!(100_000_000)).amount, dec!(92_300));
    }
}
