//! Command-line argument definitions for the broiler ledger
//!
//! The complete CLI surface, declared with the clap derive API.

use crate::app::models::ShedStatus;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the broiler ledger
///
/// Calculates the production and cost figures of broiler batches, keeps the
/// batch history and ranks handlers by performance.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "broiler-ledger",
    version,
    about = "Cost accounting and performance ranking for broiler batches",
    long_about = "Records broiler production batches, computes feed conversion, mortality, \
                  daily gain and net cost per kilogram for each one, and ranks handlers by \
                  their performance across the whole batch history."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct GlobalArgs {
    /// Ledger file holding the batch history
    ///
    /// Overrides both the config file and the BROILER_LEDGER_DATA_FILE
    /// environment variable.
    #[arg(long = "data-file", value_name = "PATH", global = true)]
    pub data_file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Calculate a batch from a file without storing it
    Calculate(InputArgs),
    /// Validate, calculate and store a new batch
    Add(InputArgs),
    /// Overwrite a stored batch
    Update(UpdateArgs),
    /// Remove a stored batch
    Delete(BatchIdArgs),
    /// Show the full calculation of a stored batch
    Show(BatchIdArgs),
    /// List the batch history, newest first
    List(ListArgs),
    /// Rank handlers by performance score
    Rank,
    /// Show the aggregate performance of one handler
    Handler(HandlerArgs),
    /// List handlers, or manage the handler registry
    Handlers(HandlersArgs),
    /// List shed numbers, or manage the shed registry
    Sheds(ShedsArgs),
}

/// A batch input file
#[derive(Debug, Clone, ClapArgs)]
pub struct InputArgs {
    /// JSON file with the batch input
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Read the file as a raw form, with every value given as a string
    #[arg(long = "form")]
    pub form: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct UpdateArgs {
    /// Batch to overwrite
    #[arg(value_name = "BATCH_ID")]
    pub batch_id: String,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BatchIdArgs {
    #[arg(value_name = "BATCH_ID")]
    pub batch_id: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ListArgs {
    /// Only batches run by this handler
    #[arg(long = "handler", value_name = "NAME")]
    pub handler: Option<String>,

    /// Only batches raised in this shed
    #[arg(long = "shed", value_name = "NUMBER")]
    pub shed: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct HandlerArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Without an action, lists every handler name known to the ledger
#[derive(Debug, Clone, ClapArgs)]
pub struct HandlersArgs {
    #[command(subcommand)]
    pub action: Option<HandlerAction>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum HandlerAction {
    /// Show the registry entry of one handler
    Show {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Register a handler
    Add {
        #[arg(value_name = "NAME")]
        name: String,
        #[command(flatten)]
        contact: HandlerContactArgs,
    },
    /// Edit a registered handler
    Update {
        #[arg(value_name = "NAME")]
        name: String,
        /// New name; refused while batches name the handler
        #[arg(long = "rename", value_name = "NAME")]
        rename: Option<String>,
        #[command(flatten)]
        contact: HandlerContactArgs,
    },
    /// Remove a handler with no batches on record
    Remove {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct HandlerContactArgs {
    #[arg(long = "email")]
    pub email: Option<String>,

    #[arg(long = "phone")]
    pub phone: Option<String>,

    #[arg(long = "notes")]
    pub notes: Option<String>,
}

/// Without an action, lists every shed number known to the ledger
#[derive(Debug, Clone, ClapArgs)]
pub struct ShedsArgs {
    #[command(subcommand)]
    pub action: Option<ShedAction>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ShedAction {
    /// Show the registry entry of one shed
    Show {
        #[arg(value_name = "NUMBER")]
        number: String,
    },
    /// Register a shed
    Add {
        #[arg(value_name = "NUMBER")]
        number: String,
        #[command(flatten)]
        details: ShedDetailsArgs,
    },
    /// Edit a registered shed
    Update {
        #[arg(value_name = "NUMBER")]
        number: String,
        /// New number; refused while batches name the shed
        #[arg(long = "renumber", value_name = "NUMBER")]
        renumber: Option<String>,
        #[command(flatten)]
        details: ShedDetailsArgs,
    },
    /// Remove a shed with no batches on record
    Remove {
        #[arg(value_name = "NUMBER")]
        number: String,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ShedDetailsArgs {
    /// Bird capacity
    #[arg(long = "capacity")]
    pub capacity: Option<u64>,

    #[arg(long = "location")]
    pub location: Option<String>,

    /// active, maintenance or inactive
    #[arg(long = "status")]
    pub status: Option<ShedStatus>,

    #[arg(long = "notes")]
    pub notes: Option<String>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// Pretty-printed JSON for scripting
    Json,
}
