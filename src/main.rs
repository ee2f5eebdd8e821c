mod config;
mod output;
mod query;
mod storage;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;

use config::{Cli, Config};
use query::FilterOutcome;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from(Cli::parse());
    match run(&config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Load -> filter -> aggregate -> format, strictly in that order.
fn run(config: &Config) -> Result<ExitCode, Box<dyn Error>> {
    let table = storage::load(&config.input, config.datetime_format.as_deref())?;

    let table = match query::filter(
        &table,
        config.time_from_ms,
        config.time_to_ms,
        config.columns.as_deref(),
    )? {
        FilterOutcome::Filtered(table) => table,
        FilterOutcome::MissingColumns(missing) => {
            eprintln!("ERROR: The following columns were not found: {:?}", missing.missing);
            eprintln!("Available columns are: {:?}", missing.available);
            return Ok(ExitCode::FAILURE);
        }
    };

    let result = query::aggregate(&table, &config.bucket_width, &config.statistics)?;
    let flat = output::format(&result)?;

    println!("{}", output::preview(&flat, config.preview_rows)?);
    output::write_csv(&flat, &config.output)?;
    println!("Aggregated data saved to {}", config.output.display());

    Ok(ExitCode::SUCCESS)
}
