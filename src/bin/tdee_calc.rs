//! Command-line calculator
//!
//! Reads a form submission as JSON from a file (or stdin) and prints the
//! results. Usage:
//!
//!   tdee_calc [input.json | -] [--markdown]
//!   tdee_calc --link '/results?data=...' [--markdown]

use std::io::Read;

use tdee::models::RawInput;
use tdee::tools::{calculator, reports};

fn read_input(path: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let mut input = String::new();
    match path {
        Some(p) if p != "-" => input = std::fs::read_to_string(p)?,
        _ => {
            std::io::stdin().read_to_string(&mut input)?;
        }
    }
    Ok(input)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let markdown = args.iter().any(|a| a == "--markdown");

    let link = args
        .iter()
        .position(|a| a == "--link")
        .map(|i| args.get(i + 1).cloned().ok_or("--link needs a value"))
        .transpose()?;

    let response = match link {
        Some(link) => calculator::calculate_from_link(&link)?,
        None => {
            let path = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);
            let raw: RawInput = serde_json::from_str(&read_input(path)?)?;
            calculator::calculate_metrics(&raw)?
        }
    };

    if !response.success {
        eprintln!("Invalid measurements:");
        for violation in &response.errors {
            eprintln!("  {}", violation);
        }
        std::process::exit(1);
    }

    match (markdown, &response.measurement, &response.results) {
        (true, Some(measurement), Some(results)) => {
            print!("{}", reports::results_markdown(measurement, results));
        }
        _ => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}
