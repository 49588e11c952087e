//! Command implementations for the broiler ledger CLI
//!
//! Every command loads the ledger file, applies one operation and, when it
//! changed anything, writes the file back before printing. Nothing is cached
//! between invocations.

pub mod batch;
pub mod registry;
pub mod render;
pub mod report;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Main command runner
///
/// Dispatches to the handler for the parsed subcommand. Logging is set up
/// here, once, before anything else runs.
pub async fn run(args: Args) -> Result<()> {
    let Args { command, global } = args;
    shared::setup_logging(&global)?;

    let Some(command) = command else {
        return Ok(());
    };

    match &command {
        Commands::Calculate(input) => batch::run_calculate(&global, input).await,
        Commands::Add(input) => batch::run_add(&global, input).await,
        Commands::Update(update) => batch::run_update(&global, update).await,
        Commands::Delete(target) => batch::run_delete(&global, target).await,
        Commands::Show(target) => batch::run_show(&global, target).await,
        Commands::List(list) => report::run_list(&global, list).await,
        Commands::Rank => report::run_rank(&global).await,
        Commands::Handler(handler) => report::run_handler(&global, handler).await,
        Commands::Handlers(handlers) => registry::run_handlers(&global, handlers).await,
        Commands::Sheds(sheds) => registry::run_sheds(&global, sheds).await,
    }
}
