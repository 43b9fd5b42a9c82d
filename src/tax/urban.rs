use super::rates::{URBAN_AREA_CAP_FACTOR, URBAN_AREA_RATE};
use crate::core::{percent_of, round_down_to_ten, Trace};
use rust_decimal::Decimal;

/// Urban-area levy (도시지역분).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrbanAreaTax {
    pub base: Decimal,
    pub cap: Option<Decimal>,
    pub value: Decimal,
}

/// `floor10(standard × 0.14% × ownership%)`, capped at 110% of last year's levy.
///
/// Unlike the main tax, the ownership share is applied inside the formula.
pub fn urban_area_tax(
    taxable_standard: Decimal,
    ownership_ratio: Decimal,
    prior_urban_area_tax: Decimal,
) -> UrbanAreaTax {
    let base = round_down_to_ten(percent_of(
        taxable_standard * URBAN_AREA_RATE,
        ownership_ratio,
    ));
    let cap = (prior_urban_area_tax > Decimal::ZERO)
        .then(|| round_down_to_ten(prior_urban_area_tax * URBAN_AREA_CAP_FACTOR));
    UrbanAreaTax {
        base,
        cap,
        value: cap.map_or(base, |cap| base.min(cap)),
    }
}

impl UrbanAreaTax {
    pub(crate) fn trace(&self, trace: &mut Trace, taxable_standard: Decimal, ownership: Decimal) {
        trace.section("Urban-area tax");
        trace.line(format!(
            "{} x 0.14% x {}% = {}",
            taxable_standard.normalize(),
            ownership.normalize(),
            self.base
        ));
        if let Some(cap) = self.cap {
            trace.line(format!("cap at 110% of prior year: {cap}"));
            trace.line(format!("urban-area tax {}", self.value));
        }
    }
}
