use super::rates::market_value_ratio;
use crate::core::{percent_of, SubUnit, Trace};
use rust_decimal::Decimal;

/// Taxable standard (과세표준) with the figures that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxableStandard {
    pub value: Decimal,
    pub before_cap: Decimal,
    /// Taxable-standard cap (과표상한액); zero when no cap applied
    pub cap: Decimal,
}

impl TaxableStandard {
    pub fn is_capped(&self) -> bool {
        self.value != self.before_cap
    }
}

/// Resolve the single-unit taxable standard, capping growth against last year's public price.
pub fn resolve_taxable_standard(
    public_price: Decimal,
    single_household: bool,
    prior_public_price: Decimal,
    cap_rate: Decimal,
) -> TaxableStandard {
    let ratio = market_value_ratio(public_price, single_household);
    let base = public_price * ratio;

    if prior_public_price > Decimal::ZERO {
        // Prior price is valued at this year's ratio.
        let prior_equivalent = prior_public_price * ratio;
        let cap = prior_equivalent + percent_of(base, cap_rate);
        TaxableStandard {
            value: base.min(cap),
            before_cap: base,
            cap,
        }
    } else {
        TaxableStandard {
            value: base,
            before_cap: base,
            cap: Decimal::ZERO,
        }
    }
}

/// Multi-unit standard: plain sum of the divisions, never capped.
pub fn sum_sub_unit_standards(units: &[SubUnit]) -> TaxableStandard {
    let total: Decimal = units.iter().map(|u| u.taxable_standard).sum();
    TaxableStandard {
        value: total,
        before_cap: total,
        cap: total,
    }
}

pub(crate) fn trace_single_unit(
    trace: &mut Trace,
    standard: &TaxableStandard,
    public_price: Decimal,
    single_household: bool,
    prior_public_price: Decimal,
) {
    let ratio = market_value_ratio(public_price, single_household);
    trace.section("Taxable standard");
    trace.line(format!(
        "public price {} x market value ratio {}% = {}",
        public_price,
        (ratio * Decimal::ONE_HUNDRED).normalize(),
        standard.before_cap.normalize()
    ));
    if prior_public_price > Decimal::ZERO {
        trace.line(format!(
            "prior-year equivalent standard {} x {}% = {}",
            prior_public_price,
            (ratio * Decimal::ONE_HUNDRED).normalize(),
            (prior_public_price * ratio).normalize()
        ));
        trace.line(format!("standard cap {}", standard.cap.normalize()));
        if standard.is_capped() {
            trace.line(format!(
                "final standard {} (capped)",
                standard.value.normalize()
            ));
        } else {
            trace.line(format!(
                "final standard {} (below cap)",
                standard.value.normalize()
            ));
        }
    }
}
