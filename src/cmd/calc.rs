//! Calc command - itemized property tax bill

use crate::cmd::read_property;
use crate::core::{format_won, CalculationResult};
use crate::tax;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Property JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// CSV file of sub-units (id,taxable_standard,resource_tax_standard)
    #[arg(short, long)]
    units: Option<PathBuf>,

    /// Output the full result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Print the step-by-step calculation trace
    #[arg(short, long)]
    details: bool,
}

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Amount (KRW)")]
    amount: String,
}

impl BillRow {
    fn new(item: &'static str, amount: Decimal) -> Self {
        BillRow {
            item,
            amount: format_won(amount),
        }
    }
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_property(&self.file, self.units.as_deref())?;
        let result = tax::calculate(&input)?;
        log::info!(
            "Year total {} (property tax {}, resource tax {})",
            result.year_total,
            result.property_tax,
            result.regional_resource_tax
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        self.print_bill(&result);
        if self.details {
            println!();
            print!("{}", result.details);
        }
        Ok(())
    }

    fn print_bill(&self, result: &CalculationResult) {
        println!();
        println!(
            "TAXABLE STANDARD: {} (before cap {})",
            format_won(result.taxable_standard),
            format_won(result.taxable_standard_before_cap)
        );
        println!();

        let mut rows: Vec<BillRow> = result
            .line_items()
            .into_iter()
            .map(|(item, amount)| BillRow::new(item, amount))
            .collect();
        rows.push(BillRow::new("Subtotal (split in halves)", result.property_tax_total()));
        rows.push(BillRow::new("First half (July)", result.first_half_total));
        rows.push(BillRow::new("Second half (September)", result.second_half_total));
        rows.push(BillRow::new("Year total", result.year_total));

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        println!();
        println!(
            "Standard-rate amount: {} | Special-rate amount: {}",
            format_won(result.standard_rate_amount),
            format_won(result.special_rate_amount)
        );
        if result.previous_year_equivalent > Decimal::ZERO {
            println!(
                "Prior-year equivalent: {} | Tax-burden cap: {}",
                format_won(result.previous_year_equivalent),
                format_won(result.tax_burden_cap_amount)
            );
        }
        if result.reduction_applied_amount > Decimal::ZERO {
            println!(
                "Reduction: {}",
                format_won(result.reduction_applied_amount)
            );
        }
    }
}
