//! E2E tests for the calc, validate and schema commands

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Single-household house with no prior-year data
#[test]
fn calc_single_household() {
    let output = run(&["calc", "tests/data/single_household.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("TAXABLE STANDARD: 129,000,000"));
    assert!(stdout.contains("Property tax"));
    assert!(stdout.contains("99,000"));
    assert!(stdout.contains("180,600"));
    assert!(stdout.contains("19,800"));
    assert!(stdout.contains("127,100"));
    assert!(stdout.contains("426,500"));
}

/// Tax-burden cap from the prior year's actual paid tax
#[test]
fn calc_burden_capped_json() {
    let output = run(&["calc", "tests/data/burden_capped.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"property_tax\": \"88000\""));
    assert!(stdout.contains("\"tax_burden_cap_amount\": \"88000\""));
    assert!(stdout.contains("\"previous_year_equivalent\": \"80000\""));
    assert!(stdout.contains("\"details\""));
}

/// Multi-unit property with divisions in the JSON
#[test]
fn calc_multi_unit() {
    let output = run(&["calc", "tests/data/multi_unit.json", "--details"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("30,000"));
    assert!(stdout.contains("92,500"));
    assert!(stdout.contains("unit 1: standard 10000000 on standard schedule"));
    assert!(stdout.contains("floored to 10 won: 30000"));
}

/// Divisions supplied as a CSV file
#[test]
fn calc_multi_unit_from_csv() {
    let output = run(&[
        "calc",
        "tests/data/multi_unit_shell.json",
        "--units",
        "tests/data/units.csv",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"taxable_standard\": \"30000000\""));
    assert!(stdout.contains("\"property_tax\": \"30000\""));
    assert!(stdout.contains("\"regional_resource_tax\": \"14500\""));
}

/// A multi-unit property without divisions is rejected by calc
#[test]
fn calc_rejects_invalid_input() {
    let output = run(&["calc", "tests/data/multi_unit_shell.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid input `sub_units`"));
}

#[test]
fn validate_lists_every_issue() {
    let output = run(&["validate", "tests/data/invalid.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("\"issue_count\": 4"));
    assert!(stdout.contains("\"field\": \"sub_units\""));
    assert!(stdout.contains("\"field\": \"ownership_ratio\""));
    assert!(stdout.contains("\"field\": \"burden_cap_rate\""));
    assert!(stdout.contains("\"field\": \"previous_year.actual_paid_tax\""));
}

#[test]
fn validate_accepts_valid_input() {
    let output = run(&["validate", "tests/data/single_household.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("No issues found"));
}

#[test]
fn schema_csv_header() {
    let output = run(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(stdout.trim(), "id,taxable_standard,resource_tax_standard");
}

#[test]
fn schema_json() {
    let output = run(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("PropertyInput"));
    assert!(stdout.contains("burden_cap_rate"));
}
