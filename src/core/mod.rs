pub mod money;
pub mod property;
pub mod result;
pub mod trace;
pub mod validate;

// Flat public surface for domain types and functions.
pub use money::{format_won, percent_of, round_down_to_ten};
pub use property::{
    read_property_json, read_sub_units_csv, HouseKind, PropertyInput, RateSchedule, SubUnit,
};
pub use result::CalculationResult;
pub use trace::Trace;
pub use validate::{check, validate, InvalidInput};

/// Column description emitted by `#[derive(CsvSchema)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}
