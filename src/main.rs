mod cli;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let command_line_interface = cli::CommandLineInterface::load();
    let config = command_line_interface.load_config()?;
    let found = config.is_some();
    let config = config.unwrap_or_default();

    init_logging(command_line_interface.log_level(&config))?;
    if !found {
        tracing::debug!(
            path = %command_line_interface.config_path().display(),
            "no config file found, using defaults"
        );
    }

    command_line_interface.run(&config)
}

/// Logs go to stderr; stdout is reserved for `inspect` output.
fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("warn,graphql_typegen={level}"))
            .with_context(|| format!("invalid log level '{level}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
