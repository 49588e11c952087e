use broiler_ledger::LedgerError;
use broiler_ledger::cli::{args::Args, commands};
use clap::{CommandFactory, Parser};
use std::process;

/// Exit code for input the ledger rejected, as opposed to a failure
const EXIT_REJECTED: i32 = 2;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and exit
    if args.command.is_none() {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            let rejected = error
                .downcast_ref::<LedgerError>()
                .is_some_and(LedgerError::is_rejected_input);
            process::exit(if rejected { EXIT_REJECTED } else { 1 });
        }
    }
}
