//! Batch commands: calculate, add, update, delete and show

use super::render;
use super::shared::{load_configuration, print_json, read_batch_input};
use crate::app::models::{BatchRecord, CalculationResult};
use crate::app::services::{calculator, ledger, validation};
use crate::cli::args::{BatchIdArgs, GlobalArgs, InputArgs, OutputFormat, UpdateArgs};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// A stored batch together with its freshly computed result
#[derive(Debug, Serialize)]
struct StoredBatch<'a> {
    record: &'a BatchRecord,
    result: &'a CalculationResult,
}

fn report_stored(global: &GlobalArgs, record: &BatchRecord, verb: &str) -> Result<()> {
    let result = calculator::calculate(&record.input);
    match global.output_format {
        OutputFormat::Json => print_json(&StoredBatch {
            record,
            result: &result,
        }),
        OutputFormat::Human => {
            render::print_record(record, &result);
            println!(
                "\n{} {}",
                format!("Batch {}", verb).bright_green().bold(),
                record.input.batch_id.bright_white().bold()
            );
            Ok(())
        }
    }
}

/// Validate and calculate without touching the ledger
pub async fn run_calculate(global: &GlobalArgs, args: &InputArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let input = read_batch_input(args).await?;
    validation::validate(&input, &config.validation)?;

    let result = calculator::calculate(&input);
    info!("Calculated batch {}", result.batch_id);

    match global.output_format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Human => {
            render::print_result(&result);
            Ok(())
        }
    }
}

pub async fn run_add(global: &GlobalArgs, args: &InputArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let input = read_batch_input(args).await?;

    let (store, mut ledger) = ledger::open(&config).await?;
    let record = ledger.create(input)?.clone();
    store.save(&ledger).await?;

    report_stored(global, &record, "saved")
}

pub async fn run_update(global: &GlobalArgs, args: &UpdateArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let input = read_batch_input(&args.input).await?;

    let (store, mut ledger) = ledger::open(&config).await?;
    let record = ledger.update(&args.batch_id, input)?.clone();
    store.save(&ledger).await?;

    report_stored(global, &record, "updated")
}

pub async fn run_delete(global: &GlobalArgs, args: &BatchIdArgs) -> Result<()> {
    let config = load_configuration(global)?;

    let (store, mut ledger) = ledger::open(&config).await?;
    let record = ledger.delete(&args.batch_id)?;
    store.save(&ledger).await?;

    match global.output_format {
        OutputFormat::Json => print_json(&json!({ "deleted": record.input.batch_id })),
        OutputFormat::Human => {
            println!(
                "{} {}",
                "Deleted batch".bright_green().bold(),
                record.input.batch_id.bright_white().bold()
            );
            Ok(())
        }
    }
}

pub async fn run_show(global: &GlobalArgs, args: &BatchIdArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let (_, ledger) = ledger::open(&config).await?;

    let record = ledger.get(&args.batch_id)?;
    let result = calculator::calculate(&record.input);

    match global.output_format {
        OutputFormat::Json => print_json(&StoredBatch {
            record,
            result: &result,
        }),
        OutputFormat::Human => {
            render::print_record(record, &result);
            Ok(())
        }
    }
}
