mod contact;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fieldguard::{get_logger, Config, Environment, Logger, Record};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::contact::CONTACT_SCHEMA;
use crate::report::CheckReport;

#[derive(Parser)]
#[command(name = "fieldguard")]
#[command(version, about = "Validate contact records against UK field rules", long_about = None)]
struct Cli {
    /// TOML file with logging overrides (ignored if missing)
    #[arg(long, default_value = "fieldguard.toml")]
    config: PathBuf,

    /// Validate a JSON contact record and report field errors
    #[arg(long, value_name = "FILE")]
    check: Option<PathBuf>,

    /// Print the error map as JSON instead of a field listing
    #[arg(long, requires = "check")]
    json: bool,
}

fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::load(&cli.config, Environment::from_env()).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {:#}, using defaults", e);
        Config::from_env()
    });

    let logger = match get_logger("main", &config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to set up logging:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    execute(&cli, &config, &logger)
}

/// Log the application lifecycle around `run`, mapping faults to a failure code
fn execute(cli: &Cli, config: &Config, logger: &Logger) -> ExitCode {
    logger.info("Starting application");
    logger.debug(format!("Environment: {}", config.environment.as_str()));

    let code = match run(cli, logger) {
        Ok(code) => code,
        Err(e) => {
            logger.error(format!("Application error: {:#}", e));
            ExitCode::FAILURE
        }
    };

    logger.info("Application shutting down");
    code
}

fn run(cli: &Cli, logger: &Logger) -> Result<ExitCode> {
    logger.info("Application initialized successfully");
    logger.info("Application running...");

    let Some(path) = &cli.check else {
        return Ok(ExitCode::SUCCESS);
    };

    let outcome = check_record(path, cli.json, logger)?;
    println!("{}", outcome.output);

    Ok(if outcome.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Result of `--check`: whether the record passed, and what to print
struct CheckOutcome {
    valid: bool,
    output: String,
}

fn check_record(path: &Path, json: bool, logger: &Logger) -> Result<CheckOutcome> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {:?}", path))?;

    let mut record = Record::from_json(CONTACT_SCHEMA, &content)
        .with_context(|| format!("Failed to load record from {:?}", path))?;

    let valid = logger.in_scope(|| record.is_valid())?;
    let report = CheckReport::from_record(&record);

    let output = if json {
        serde_json::to_string_pretty(&report.errors_json())?
    } else {
        report.render(&record)
    };

    if valid {
        logger.info(format!("{:?} is valid", path));
    } else {
        logger.warn(format!(
            "{:?} failed validation on {} field(s)",
            path,
            report.errors.len()
        ));
    }

    Ok(CheckOutcome { valid, output })
}
