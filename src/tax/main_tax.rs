use super::rates::TierTax;
use crate::core::{percent_of, round_down_to_ten, RateSchedule, Trace};
use rust_decimal::Decimal;

/// Main property tax (재산세 본세) before the ownership share is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainTax {
    /// Schedule amount floored to 10 won
    pub computed: Decimal,
    /// Tax-burden cap (세부담상한액), when a prior-year baseline existed
    pub burden_cap: Option<Decimal>,
    /// Lesser of `computed` and `burden_cap`
    pub value: Decimal,
}

impl MainTax {
    /// Round the exact amount and cap it against the prior-year baseline.
    pub fn capped(exact: Decimal, baseline: Option<Decimal>, burden_cap_rate: Decimal) -> Self {
        let computed = round_down_to_ten(exact);
        let burden_cap = baseline
            .filter(|b| *b > Decimal::ZERO)
            .map(|b| burden_cap(b, burden_cap_rate));
        let value = match burden_cap {
            Some(cap) => computed.min(cap),
            None => computed,
        };
        MainTax {
            computed,
            burden_cap,
            value,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.value < self.computed
    }

    pub(crate) fn trace_cap(&self, trace: &mut Trace, baseline: Option<Decimal>, rate: Decimal) {
        if let (Some(cap), Some(baseline)) = (self.burden_cap, baseline) {
            trace.line(format!(
                "tax-burden cap {} x {}% = {}",
                baseline.normalize(),
                rate.normalize(),
                cap
            ));
            let outcome = if self.is_capped() { "capped" } else { "below cap" };
            trace.line(format!(
                "main tax {} (computed {}, {outcome})",
                self.value, self.computed
            ));
        }
    }
}

/// `floor10(baseline × rate%)`
pub fn burden_cap(baseline: Decimal, burden_cap_rate: Decimal) -> Decimal {
    round_down_to_ten(percent_of(baseline, burden_cap_rate))
}

/// Exact single-unit tax on the schedule the household qualifies for.
pub fn single_unit_tax(
    standard: Decimal,
    single_household: bool,
    public_price: Decimal,
) -> (RateSchedule, TierTax) {
    let schedule = RateSchedule::for_household(single_household, public_price);
    (schedule, schedule.apply(standard))
}

/// Exact tax under the standard schedule regardless of eligibility.
pub fn standard_rate_tax(standard: Decimal) -> Decimal {
    RateSchedule::Standard.apply(standard).amount
}

pub(crate) fn trace_schedule(
    trace: &mut Trace,
    standard: Decimal,
    schedule: RateSchedule,
    tier: &TierTax,
) {
    let bracket = &tier.bracket;
    let formula = if bracket.deduction.is_zero() {
        format!("{} x {}", standard.normalize(), bracket.rate.normalize())
    } else {
        format!(
            "{} x {} - {}",
            standard.normalize(),
            bracket.rate.normalize(),
            bracket.deduction.normalize()
        )
    };
    trace.line(format!(
        "{} schedule tier {}: {} = {:.3}",
        schedule, tier.tier, formula, tier.amount
    ));
}
