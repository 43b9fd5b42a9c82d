use super::rates::{progressive, RESOURCE_BRACKETS};
use crate::core::{percent_of, round_down_to_ten, SubUnit, Trace};
use rust_decimal::Decimal;

/// Regional resource & facility tax (지역자원시설세).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTax {
    /// Standards the schedule was applied to, one per division for multi-unit properties
    pub standards: Vec<Decimal>,
    pub exact_total: Decimal,
    /// Whole-property amount floored to 10 won, before the ownership share
    pub computed: Decimal,
    /// Ownership-adjusted, floored again
    pub value: Decimal,
}

/// Single-unit resource tax on one standard.
pub fn resource_tax(standard: Decimal, ownership_ratio: Decimal) -> ResourceTax {
    from_standards(vec![standard], ownership_ratio)
}

/// Multi-unit resource tax: division amounts are summed exactly, then floored once.
pub fn multi_unit_resource_tax(units: &[SubUnit], ownership_ratio: Decimal) -> ResourceTax {
    from_standards(
        units.iter().map(SubUnit::resource_standard).collect(),
        ownership_ratio,
    )
}

fn from_standards(standards: Vec<Decimal>, ownership_ratio: Decimal) -> ResourceTax {
    let exact_total: Decimal = standards
        .iter()
        .map(|s| progressive(&RESOURCE_BRACKETS, *s).amount)
        .sum();
    let computed = round_down_to_ten(exact_total);
    ResourceTax {
        standards,
        exact_total,
        computed,
        value: round_down_to_ten(percent_of(computed, ownership_ratio)),
    }
}

impl ResourceTax {
    pub(crate) fn trace(&self, trace: &mut Trace, ownership: Decimal) {
        trace.section("Regional resource tax");
        if let [standard] = self.standards.as_slice() {
            trace.line(format!("resource tax standard {}", standard.normalize()));
        } else {
            for (i, standard) in self.standards.iter().enumerate() {
                let tier = progressive(&RESOURCE_BRACKETS, *standard);
                trace.line(format!(
                    "unit {}: standard {} = {:.3}",
                    i + 1,
                    standard.normalize(),
                    tier.amount
                ));
            }
            trace.line(format!("sum {:.3}", self.exact_total));
        }
        trace.line(format!("computed {}", self.computed));
        trace.line(format!(
            "after ownership {}%: {}",
            ownership.normalize(),
            self.value
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tier_three_standard() {
        let tax = resource_tax(dec!(15_000_000), dec!(100));
        assert_eq!(tax.computed, dec!(7_100));
        assert_eq!(tax.value, dec!(7_100));
    }

    #[test]
    fn ownership_applied_after_rounding() {
        // 129M: 154,800 - 27,700 = 127,100; 30% = 38,130
        let tax = resource_tax(dec!(129_000_000), dec!(30));
        assert_eq!(tax.computed, dec!(127_100));
        assert_eq!(tax.value, dec!(38_130));

        // 33.3% of 7,100 = 2,364.3
        assert_eq!(resource_tax(dec!(15_000_000), dec!(33.3)).value, dec!(2_360));
    }

    #[test]
    fn multi_unit_defers_rounding() {
        let units = vec![
            SubUnit::new(1, dec!(12_345)),
            SubUnit::new(2, dec!(12_345)),
        ];
        // 4.938 each, 9.876 total -> 0
        let tax = multi_unit_resource_tax(&units, dec!(100));
        assert_eq!(tax.exact_total, dec!(9.876));
        assert_eq!(tax.computed, dec!(0));

        let units = vec![
            SubUnit::new(1, dec!(13_000)),
            SubUnit::new(2, dec!(13_000)),
        ];
        // 5.2 each, 10.4 total -> 10, per-unit rounding would give 0
        assert_eq!(multi_unit_resource_tax(&units, dec!(100)).value, dec!(10));
    }

    #[test]
    fn multi_unit_prefers_unit_resource_standard() {
        let mut unit = SubUnit::new(1, dec!(50_000_000));
        unit.resource_tax_standard = Some(dec!(15_000_000));
        let tax = multi_unit_resource_tax(&[unit], dec!(100));
        assert_eq!(tax.standards, vec![dec!(15_000_000)]);
        assert_eq!(tax.value, dec!(7_100));
    }
}
