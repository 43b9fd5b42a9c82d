use crate::core::CsvField;
use proptax_derive::CsvSchema;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Category of the taxed dwelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum HouseKind {
    /// Ordinary house or apartment taxed on its public price (단독/공동주택)
    #[default]
    SingleUnit,
    /// Multi-household house taxed per division (다가구주택)
    MultiUnit,
}

impl HouseKind {
    pub fn display(&self) -> &'static str {
        match self {
            HouseKind::SingleUnit => "single-unit",
            HouseKind::MultiUnit => "multi-unit",
        }
    }
}

/// Which progressive rate table a year was taxed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum RateSchedule {
    #[default]
    Standard,
    /// Reduced table for a qualifying single-household owner
    Special,
}

impl RateSchedule {
    pub fn display(&self) -> &'static str {
        match self {
            RateSchedule::Standard => "standard",
            RateSchedule::Special => "special",
        }
    }
}

impl std::fmt::Display for RateSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// One division (구) of a multi-unit property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, CsvSchema)]
pub struct SubUnit {
    /// Division number, unique within the property
    pub id: u32,
    /// Taxable standard of this division
    #[schemars(with = "f64")]
    pub taxable_standard: Decimal,
    /// Resource tax standard (falls back to taxable_standard when empty or 0)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub resource_tax_standard: Option<Decimal>,
}

impl SubUnit {
    #[allow(dead_code)]
    pub fn new(id: u32, taxable_standard: Decimal) -> Self {
        SubUnit {
            id,
            taxable_standard,
            resource_tax_standard: None,
        }
    }

    /// Standard the resource tax schedule is applied to.
    pub fn resource_standard(&self) -> Decimal {
        non_zero(self.resource_tax_standard).unwrap_or(self.taxable_standard)
    }
}

/// Comparison figures from the previous tax year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PriorYearInput {
    #[schemars(with = "f64")]
    pub public_price: Decimal,
    #[schemars(with = "f64")]
    pub taxable_standard: Decimal,
    /// Tax actually levied last year. Authoritative when greater than 0.
    #[schemars(with = "f64")]
    pub actual_paid_tax: Decimal,
    pub applied_rate: RateSchedule,
    #[schemars(with = "f64")]
    pub reduction_rate: Decimal,
    #[schemars(with = "f64")]
    pub resource_tax_standard: Decimal,
    pub sub_units: Vec<SubUnit>,
    pub ownership_changed: bool,
    pub area_changed: bool,
    pub usage_changed: bool,
    /// Urban-area tax levied last year (전년도 도시지역분 결정세액)
    #[schemars(with = "f64")]
    pub urban_area_tax: Decimal,
}

impl PriorYearInput {
    pub fn has_changes(&self) -> bool {
        self.ownership_changed || self.area_changed || self.usage_changed
    }
}

/// The subject of taxation for the current year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PropertyInput {
    #[serde(default)]
    pub kind: HouseKind,
    /// Assessed public price (공시가격). Unused for multi-unit properties.
    #[serde(default)]
    #[schemars(with = "f64")]
    pub public_price: Decimal,
    /// Ownership share in percent
    #[serde(default = "full_ownership")]
    #[schemars(with = "f64")]
    pub ownership_ratio: Decimal,
    /// One house per household owner (1세대 1주택)
    #[serde(default)]
    pub single_household: bool,
    /// Resource tax standard when it differs from the taxable standard
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub resource_tax_standard: Option<Decimal>,
    #[serde(default)]
    pub sub_units: Vec<SubUnit>,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub reduction_rate: Decimal,
    /// Tax-burden cap rate in percent
    #[serde(default = "default_burden_cap_rate")]
    #[schemars(with = "f64")]
    pub burden_cap_rate: Decimal,
    /// Taxable-standard cap rate in percent
    #[serde(default = "default_standard_cap_rate")]
    #[schemars(with = "f64")]
    pub standard_cap_rate: Decimal,
    #[serde(default)]
    pub previous_year: PriorYearInput,
}

fn full_ownership() -> Decimal {
    dec!(100)
}

fn default_burden_cap_rate() -> Decimal {
    dec!(110)
}

fn default_standard_cap_rate() -> Decimal {
    dec!(5)
}

impl Default for PropertyInput {
    fn default() -> Self {
        PropertyInput {
            kind: HouseKind::SingleUnit,
            public_price: Decimal::ZERO,
            ownership_ratio: full_ownership(),
            single_household: false,
            resource_tax_standard: None,
            sub_units: Vec::new(),
            reduction_rate: Decimal::ZERO,
            burden_cap_rate: default_burden_cap_rate(),
            standard_cap_rate: default_standard_cap_rate(),
            previous_year: PriorYearInput::default(),
        }
    }
}

#[allow(dead_code)]
impl PropertyInput {
    pub fn single_unit(public_price: Decimal, single_household: bool) -> Self {
        PropertyInput {
            public_price,
            single_household,
            ..Default::default()
        }
    }

    pub fn multi_unit(sub_units: Vec<SubUnit>, single_household: bool) -> Self {
        PropertyInput {
            kind: HouseKind::MultiUnit,
            single_household,
            sub_units,
            ..Default::default()
        }
    }
}

/// `None` for absent or zero amounts.
pub(crate) fn non_zero(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|a| !a.is_zero())
}

/// Read a property description from JSON.
pub fn read_property_json<R: Read>(reader: R) -> anyhow::Result<PropertyInput> {
    let input = serde_json::from_reader(reader)?;
    Ok(input)
}

/// Read sub-unit rows (`id,taxable_standard,resource_tax_standard`) from CSV.
pub fn read_sub_units_csv<R: Read>(reader: R) -> anyhow::Result<Vec<SubUnit>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut units = Vec::new();
    for record in rdr.deserialize() {
        let unit: SubUnit = record?;
        units.push(unit);
    }
    Ok(units)
}
