//! History and ranking reports

use super::render;
use super::shared::{load_configuration, print_json};
use crate::app::models::HandlerPerformance;
use crate::app::services::ledger;
use crate::app::services::ranking::with_ranks;
use crate::cli::args::{GlobalArgs, HandlerArgs, ListArgs, OutputFormat};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RankedHandler<'a> {
    rank: usize,
    #[serde(flatten)]
    performance: &'a HandlerPerformance,
}

pub async fn run_list(global: &GlobalArgs, args: &ListArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let (_, ledger) = ledger::open(&config).await?;

    let summaries = ledger.summaries(args.handler.as_deref(), args.shed.as_deref());
    match global.output_format {
        OutputFormat::Json => print_json(&summaries),
        OutputFormat::Human => {
            render::print_summaries(&summaries);
            Ok(())
        }
    }
}

pub async fn run_rank(global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let (_, ledger) = ledger::open(&config).await?;

    let ranked = ledger.rank_handlers();
    match global.output_format {
        OutputFormat::Json => {
            let rows: Vec<RankedHandler> = with_ranks(&ranked)
                .map(|(rank, performance)| RankedHandler { rank, performance })
                .collect();
            print_json(&rows)
        }
        OutputFormat::Human => {
            render::print_leaderboard(&ranked);
            Ok(())
        }
    }
}

pub async fn run_handler(global: &GlobalArgs, args: &HandlerArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let (_, ledger) = ledger::open(&config).await?;

    let performance = ledger.handler_performance(&args.name)?;
    match global.output_format {
        OutputFormat::Json => print_json(&performance),
        OutputFormat::Human => {
            render::print_performance(&performance);
            Ok(())
        }
    }
}
