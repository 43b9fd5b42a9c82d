pub mod bill;
pub mod education;
pub mod main_tax;
pub mod multi_unit;
pub mod prior_year;
pub mod rates;
pub mod resource;
pub mod standard;
pub mod urban;

pub use bill::calculate;
