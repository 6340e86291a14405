mod cli;
mod report;

use std::error::Error;
use std::fs;

use clap::Parser;
use cli::{Args, OutputFormat};
use netsafe::{analyze, ReportData, ResultProjection};
use report::{render_catalog, render_summary};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        print!("{}", render_catalog());
        return Ok(());
    }

    // Resolve the configuration from a preset or document, then apply command line
    // overrides on top of it.
    let config = args.load_config()?;
    if let Some(path) = &args.save_config {
        fs::write(path, config.to_json()?)?;
        log::info!("configuration written to {}", path.display());
    }

    // Validation failures carry every violated constraint in their message.
    let result = analyze(&config)?;

    // The stress scatter is random; log the seed so a run can be repeated.
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("stress scatter seed {seed}");
    let projection = ResultProjection::seeded(&result, seed);

    match args.format {
        OutputFormat::Text => println!("{}", render_summary(&result, &projection)),
        OutputFormat::Json => {
            let report = ReportData::new(result, projection);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
