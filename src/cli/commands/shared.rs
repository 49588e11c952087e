//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, input file reading and JSON output,
//! used by every subcommand.

use crate::app::models::{BatchForm, BatchInput};
use crate::cli::args::{GlobalArgs, InputArgs};
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence; otherwise the level comes from the
/// verbosity flags.
pub fn setup_logging(args: &GlobalArgs) -> crate::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("broiler_ledger={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| LedgerError::configuration(format!("failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build the effective configuration from every layer
///
/// defaults, then the config file (the `--config` flag, or the default
/// location if a file exists there), then the environment, then `--data-file`.
pub fn load_configuration(args: &GlobalArgs) -> crate::Result<LedgerConfig> {
    let config_file = args.config_file.clone().or_else(|| {
        LedgerConfig::default_config_path().filter(|path| path.is_file())
    });
    if let Some(path) = &config_file {
        info!("Using config file: {}", path.display());
    }

    let mut config = LedgerConfig::load_layered(config_file.as_deref())?;
    if let Some(data_file) = &args.data_file {
        config = config.with_data_file(data_file);
    }
    config.validate()?;

    debug!("Ledger file: {}", config.data_file.display());
    Ok(config)
}

/// Read a batch input file, either typed JSON or a raw string form
pub async fn read_batch_input(args: &InputArgs) -> Result<BatchInput> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read input file {}", args.file.display()))?;

    let input = if args.form {
        let form: BatchForm = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse batch form {}", args.file.display()))?;
        form.into_input()?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse batch input {}", args.file.display()))?
    };

    debug!("Read batch input from {}", args.file.display());
    Ok(input)
}

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
