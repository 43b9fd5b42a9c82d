use super::education::local_education_tax;
use super::main_tax::{burden_cap, single_unit_tax, standard_rate_tax, trace_schedule, MainTax};
use super::multi_unit::{aggregate_units, standard_rate_total};
use super::prior_year::{resolve_prior_year, PriorYearEquivalent};
use super::resource::{multi_unit_resource_tax, resource_tax, ResourceTax};
use super::standard::{
    resolve_taxable_standard, sum_sub_unit_standards, trace_single_unit, TaxableStandard,
};
use super::urban::urban_area_tax;
use crate::core::property::non_zero;
use crate::core::{
    percent_of, round_down_to_ten, validate, CalculationResult, HouseKind, InvalidInput,
    PropertyInput, RateSchedule, Trace,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Validate the input, then assess the bill.
pub fn calculate(input: &PropertyInput) -> Result<CalculationResult, InvalidInput> {
    validate(input)?;
    Ok(assess(input))
}

/// Per-path figures before the ownership share is applied.
struct Assessed {
    standard: TaxableStandard,
    main: MainTax,
    standard_rate_exact: Decimal,
    resource: ResourceTax,
}

/// Run the full pipeline. Total for any input; use [`calculate`] to reject invalid input first.
pub fn assess(input: &PropertyInput) -> CalculationResult {
    let mut trace = Trace::new();
    let prior_equivalent = resolve_prior_year(input);

    let assessed = match input.kind {
        HouseKind::SingleUnit => assess_single_unit(input, prior_equivalent.as_ref(), &mut trace),
        HouseKind::MultiUnit => assess_multi_unit(input, prior_equivalent.as_ref(), &mut trace),
    };
    let Assessed {
        standard,
        main,
        standard_rate_exact,
        resource,
    } = assessed;

    let ownership = input.ownership_ratio;
    let property_tax = round_down_to_ten(percent_of(main.value, ownership));
    let standard_rate_amount = round_down_to_ten(percent_of(standard_rate_exact, ownership));
    trace.line(format!(
        "after ownership {}%: {}",
        ownership.normalize(),
        property_tax
    ));

    let urban = urban_area_tax(standard.value, ownership, input.previous_year.urban_area_tax);
    urban.trace(&mut trace, standard.value, ownership);

    let local_education_tax = local_education_tax(property_tax);
    trace.section("Local education tax");
    trace.line(format!("{property_tax} x 20% = {local_education_tax}"));

    resource.trace(&mut trace, ownership);

    let property_tax_total = property_tax + urban.value + local_education_tax;
    let half_year = round_down_to_ten(property_tax_total * dec!(0.5));
    let year_total = property_tax_total + resource.value;

    let tax_burden_cap_amount = prior_equivalent
        .map(|eq| burden_cap(eq.without_reduction, input.burden_cap_rate))
        .unwrap_or(Decimal::ZERO);
    let reduction_applied_amount = if input.reduction_rate > Decimal::ZERO {
        round_down_to_ten(percent_of(property_tax, input.reduction_rate))
    } else {
        Decimal::ZERO
    };

    trace.section("Total");
    trace.line(format!(
        "property tax {} + urban-area {} + education {} = {}",
        property_tax, urban.value, local_education_tax, property_tax_total
    ));
    trace.line(format!(
        "first half {half_year}, second half {} (incl. resource tax {})",
        half_year + resource.value,
        resource.value
    ));
    trace.line(format!("year total {year_total}"));

    CalculationResult {
        taxable_standard: standard.value.normalize(),
        taxable_standard_before_cap: standard.before_cap.normalize(),
        taxable_standard_cap: standard.cap.normalize(),
        property_tax,
        urban_area_tax: urban.value,
        local_education_tax,
        regional_resource_tax: resource.value,
        first_half_total: half_year,
        second_half_total: half_year + resource.value,
        year_total,
        details: trace.render(),
        standard_rate_amount,
        special_rate_amount: property_tax,
        previous_year_equivalent: prior_equivalent
            .map_or(Decimal::ZERO, |eq| eq.without_reduction),
        previous_year_equivalent_with_reduction: prior_equivalent
            .map_or(Decimal::ZERO, |eq| eq.with_reduction),
        tax_burden_cap_amount,
        final_tax_amount: property_tax,
        reduction_applied_amount,
    }
}

fn assess_single_unit(
    input: &PropertyInput,
    prior_equivalent: Option<&PriorYearEquivalent>,
    trace: &mut Trace,
) -> Assessed {
    let prior_price = input.previous_year.public_price;
    let standard = resolve_taxable_standard(
        input.public_price,
        input.single_household,
        prior_price,
        input.standard_cap_rate,
    );
    trace_single_unit(
        trace,
        &standard,
        input.public_price,
        input.single_household,
        prior_price,
    );

    let (schedule, tier) =
        single_unit_tax(standard.value, input.single_household, input.public_price);
    trace.section("Property tax");
    trace_schedule(trace, standard.value, schedule, &tier);
    let main = cap_main_tax(tier.amount, input, prior_equivalent, trace);
    if schedule == RateSchedule::Special {
        trace.line("single-household special rate applied");
    }

    let resource_standard = non_zero(input.resource_tax_standard).unwrap_or(standard.value);
    Assessed {
        standard,
        main,
        standard_rate_exact: standard_rate_tax(standard.value),
        resource: resource_tax(resource_standard, input.ownership_ratio),
    }
}

fn assess_multi_unit(
    input: &PropertyInput,
    prior_equivalent: Option<&PriorYearEquivalent>,
    trace: &mut Trace,
) -> Assessed {
    let standard = sum_sub_unit_standards(&input.sub_units);
    trace.section("Taxable standard");
    trace.line(format!(
        "sum of {} units = {}",
        input.sub_units.len(),
        standard.value.normalize()
    ));

    let units = aggregate_units(&input.sub_units, input.single_household);
    trace.section("Property tax");
    units.trace(trace);
    let main = cap_main_tax(units.exact_total, input, prior_equivalent, trace);

    Assessed {
        standard,
        main,
        standard_rate_exact: standard_rate_total(&input.sub_units),
        resource: multi_unit_resource_tax(&input.sub_units, input.ownership_ratio),
    }
}

fn cap_main_tax(
    exact: Decimal,
    input: &PropertyInput,
    prior_equivalent: Option<&PriorYearEquivalent>,
    trace: &mut Trace,
) -> MainTax {
    // Only a levied prior-year tax caps the bill; derived equivalents are reported.
    let actual_paid = input.previous_year.actual_paid_tax;
    let baseline = (actual_paid > Decimal::ZERO).then_some(actual_paid);
    let main = MainTax::capped(exact, baseline, input.burden_cap_rate);
    if input.kind == HouseKind::SingleUnit {
        trace.line(format!("computed tax {}", main.computed));
    }
    if let Some(eq) = prior_equivalent {
        eq.trace(trace, input);
        if baseline.is_none() {
            trace.line(format!(
                "no actual paid tax; cap {} reported only",
                burden_cap(eq.without_reduction, input.burden_cap_rate)
            ));
        }
    }
    main.trace_cap(trace, baseline, input.burden_cap_rate);
    main
}
