use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

/// Itemized bill for one property.
///
/// Monetary fields are whole won, ownership-adjusted and floored to 10 won. The three
/// taxable-standard fields are left unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CalculationResult {
    #[schemars(with = "f64")]
    pub taxable_standard: Decimal,
    #[schemars(with = "f64")]
    pub taxable_standard_before_cap: Decimal,
    /// Taxable-standard cap (0 when no prior public price was given)
    #[schemars(with = "f64")]
    pub taxable_standard_cap: Decimal,
    #[schemars(with = "f64")]
    pub property_tax: Decimal,
    #[schemars(with = "f64")]
    pub urban_area_tax: Decimal,
    #[schemars(with = "f64")]
    pub local_education_tax: Decimal,
    #[schemars(with = "f64")]
    pub regional_resource_tax: Decimal,
    /// July installment
    #[schemars(with = "f64")]
    pub first_half_total: Decimal,
    /// September installment, including the resource tax
    #[schemars(with = "f64")]
    pub second_half_total: Decimal,
    #[schemars(with = "f64")]
    pub year_total: Decimal,
    /// Rendered calculation trace
    pub details: String,
    /// Main tax under the standard schedule, for comparison only
    #[schemars(with = "f64")]
    pub standard_rate_amount: Decimal,
    #[schemars(with = "f64")]
    pub special_rate_amount: Decimal,
    #[schemars(with = "f64")]
    pub previous_year_equivalent: Decimal,
    #[schemars(with = "f64")]
    pub previous_year_equivalent_with_reduction: Decimal,
    #[schemars(with = "f64")]
    pub tax_burden_cap_amount: Decimal,
    #[schemars(with = "f64")]
    pub final_tax_amount: Decimal,
    #[schemars(with = "f64")]
    pub reduction_applied_amount: Decimal,
}

impl CalculationResult {
    /// Main tax, urban-area tax and education tax; the part split across both installments.
    pub fn property_tax_total(&self) -> Decimal {
        self.property_tax + self.urban_area_tax + self.local_education_tax
    }

    /// Every levied amount, by label, in bill order.
    pub fn line_items(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Property tax", self.property_tax),
            ("Urban-area tax", self.urban_area_tax),
            ("Local education tax", self.local_education_tax),
            ("Regional resource tax", self.regional_resource_tax),
        ]
    }
}
