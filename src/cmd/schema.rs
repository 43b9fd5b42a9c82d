//! Schema command - print expected input formats

use crate::core::{CalculationResult, PropertyInput, SubUnit};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the property input
    JsonSchema,
    /// JSON Schema for the calculation result
    ResultSchema,
    /// Sub-unit CSV header row
    CsvHeader,
    /// Sub-unit CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(PropertyInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::ResultSchema => {
                let schema = schema_for!(CalculationResult);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", SubUnit::csv_header().join(",")),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
        Ok(())
    }

    fn print_csv_fields(&self) {
        println!("Sub-unit CSV Format");
        println!("===================");
        println!();
        for field in SubUnit::csv_schema() {
            let req = if field.required { "required" } else { "optional" };
            println!("{:24} ({:8})  {}", field.name, req, field.description);
        }
        println!();
        println!(
            "Amounts are whole won; leave resource_tax_standard empty to reuse taxable_standard"
        );
    }
}
