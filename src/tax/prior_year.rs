use super::multi_unit::aggregate_units;
use crate::core::{round_down_to_ten, HouseKind, PropertyInput, RateSchedule, Trace};
use rust_decimal::Decimal;

/// Where the prior-year baseline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivalentSource {
    /// Tax actually levied last year (실부과액)
    ActualPaid,
    /// Recomputed from last year's divisions
    PriorSubUnits,
    /// Recomputed from last year's taxable standard and applied schedule
    PriorStandard,
}

/// Prior-year tax equivalent (전년도 상당세액) used as the tax-burden baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorYearEquivalent {
    pub source: EquivalentSource,
    pub without_reduction: Decimal,
    /// Currently always equal to `without_reduction`
    pub with_reduction: Decimal,
}

impl PriorYearEquivalent {
    fn new(source: EquivalentSource, amount: Decimal) -> Self {
        PriorYearEquivalent {
            source,
            without_reduction: amount,
            with_reduction: amount,
        }
    }
}

/// Resolve the prior-year equivalent, or `None` when no prior-year tax data exists.
///
/// An actual paid amount always wins. Otherwise multi-unit properties with prior divisions
/// are recomputed per division, and everything else from the prior taxable standard.
pub fn resolve_prior_year(input: &PropertyInput) -> Option<PriorYearEquivalent> {
    let prior = &input.previous_year;

    if prior.actual_paid_tax > Decimal::ZERO {
        return Some(PriorYearEquivalent::new(
            EquivalentSource::ActualPaid,
            prior.actual_paid_tax,
        ));
    }

    if input.kind == HouseKind::MultiUnit && !prior.sub_units.is_empty() {
        let tax = aggregate_units(&prior.sub_units, input.single_household);
        return Some(PriorYearEquivalent::new(
            EquivalentSource::PriorSubUnits,
            tax.rounded(),
        ));
    }

    if prior.taxable_standard > Decimal::ZERO {
        let tax = prior_schedule(input).apply(prior.taxable_standard);
        return Some(PriorYearEquivalent::new(
            EquivalentSource::PriorStandard,
            round_down_to_ten(tax.amount),
        ));
    }

    None
}

/// Schedule for the prior taxable standard. A special selector only holds while the owner still
/// qualifies this year.
fn prior_schedule(input: &PropertyInput) -> RateSchedule {
    match input.previous_year.applied_rate {
        RateSchedule::Special => {
            RateSchedule::for_household(input.single_household, input.public_price)
        }
        RateSchedule::Standard => RateSchedule::Standard,
    }
}

impl PriorYearEquivalent {
    pub(crate) fn trace(&self, trace: &mut Trace, input: &PropertyInput) {
        let prior = &input.previous_year;
        let source = match self.source {
            EquivalentSource::ActualPaid => "actual paid tax".to_string(),
            EquivalentSource::PriorSubUnits => {
                format!("recomputed from {} prior units", prior.sub_units.len())
            }
            EquivalentSource::PriorStandard => format!(
                "recomputed from prior standard {} on {} schedule",
                prior.taxable_standard.normalize(),
                prior_schedule(input)
            ),
        };
        trace.line(format!(
            "prior-year equivalent {} ({source})",
            self.without_reduction.normalize()
        ));
        if prior.has_changes() {
            let flags = [
                ("ownership", prior.ownership_changed),
                ("area", prior.area_changed),
                ("usage", prior.usage_changed),
            ];
            let changed: Vec<&str> = flags
                .iter()
                .filter(|(_, set)| *set)
                .map(|(name, _)| *name)
                .collect();
            let note = match self.source {
                EquivalentSource::ActualPaid => "; actual paid tax still used",
                _ => "",
            };
            trace.line(format!("{} change flagged{note}", changed.join("/")));
        }
    }
}
