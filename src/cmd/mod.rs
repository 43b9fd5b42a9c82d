pub mod calc;
pub mod schema;
pub mod validate;

use crate::core::{self, PropertyInput};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a property description (JSON) from a file, or stdin with "-".
/// Sub-units listed in `units_csv` replace any given in the JSON.
pub fn read_property(path: &Path, units_csv: Option<&Path>) -> anyhow::Result<PropertyInput> {
    let mut input = if path.as_os_str() == "-" {
        read_from_stdin()?
    } else {
        let file = File::open(path)?;
        core::read_property_json(BufReader::new(file))?
    };

    if let Some(units_path) = units_csv {
        let file = File::open(units_path)?;
        let units = core::read_sub_units_csv(BufReader::new(file))?;
        log::info!(
            "Read {} sub-units from {}",
            units.len(),
            units_path.display()
        );
        input.sub_units = units;
    }

    log::info!(
        "Loaded {} property, {} sub-units",
        input.kind.display(),
        input.sub_units.len()
    );
    log::debug!("Property input: {:?}", input);
    Ok(input)
}

fn read_from_stdin() -> anyhow::Result<PropertyInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    core::read_property_json(io::Cursor::new(buffer))
}
