use clap::{Parser, Subcommand};

mod cmd;
mod core;
mod tax;

#[derive(Parser, Debug)]
#[command(version, about = "Calculate the annual Korean residential property tax bill")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the itemized tax bill for a property
    Calc(cmd::calc::CalcCommand),
    /// Check a property file for invalid fields
    Validate(cmd::validate::ValidateCommand),
    /// Print the expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calc(calc) => calc.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
