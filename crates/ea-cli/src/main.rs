//! Kubernetes elastic agent settings CLI.
//!
//! Validates plugin settings the way the Go server asks the plugin to, and
//! describes the settings form the plugin exposes.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `validate` - Validate a plugin settings document
//! - `fields` - Print the settings form metadata
//! - `strategies` - List authentication strategies and their required fields
//! - `config` - Manage the CLI configuration file
//!
//! # Examples
//!
//! ```bash
//! # Validate a request body captured from the server
//! elastic-agent-cli validate --settings request.json \
//!     --secure-site-url https://ci.example.com:8154/go
//!
//! # Machine-readable errors
//! elastic-agent-cli --format json validate --settings - < request.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use elastic_agent_cli::ConfigAction;
use elastic_agent_cli::commands::{self, config::Config, validate::ValidateArgs};
use elastic_agent_core::cli::{ExitCode, OutputFormat};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Kubernetes elastic agent plugin settings validator.
#[derive(Parser, Debug)]
#[command(name = "elastic-agent-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty); defaults to the configured format
    #[arg(long = "format", global = true)]
    format: Option<String>,

    /// Configuration file path
    #[arg(long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate plugin settings.
    ///
    /// Accepts either the server's validate request body
    /// (`{"plugin-settings": {"key": {"value": "..."}}}`) or a flat JSON
    /// object of key to value. Exits with 1 when the settings are rejected.
    ///
    /// # Examples
    ///
    /// ```bash
    /// elastic-agent-cli validate --settings settings.json --server-info info.json
    /// ```
    Validate {
        /// Settings file, or `-` to read stdin
        #[arg(short, long)]
        settings: PathBuf,

        /// Server info JSON file (`secure_site_url`, `site_url`, `server_id`)
        #[arg(long = "server-info", value_name = "FILE")]
        server_info: Option<PathBuf>,

        /// Secure site URL of the Go server
        #[arg(long = "secure-site-url", env = "GO_SECURE_SITE_URL", value_name = "URL")]
        secure_site_url: Option<String>,
    },

    /// Print the metadata of every plugin settings field.
    Fields,

    /// List authentication strategies and the fields they require.
    Strategies,

    /// Manage the CLI configuration file.
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::INVALID_INPUT
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = commands::config::config_path(cli.config.as_deref())?;

    // A broken config file must stay fixable through `config set` and `config init`.
    let config = if matches!(cli.command, Commands::Config { .. }) {
        Config::default()
    } else {
        commands::config::load_config(&config_path)?
    };

    init_logging(cli.verbose, &config.general.log_level)?;

    let output_format = match cli.format.as_deref() {
        Some(format) => format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("{e}"))?,
        None => config.output_format(),
    };

    execute_command(cli.command, &config, &config_path, output_format)
}

/// Initializes logging infrastructure.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` wins over the
/// configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
fn init_logging(verbose: bool, configured_level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Routes a command to its handler.
///
/// # Errors
///
/// Returns an error if command execution fails.
fn execute_command(
    command: Commands,
    config: &Config,
    config_path: &Path,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::Validate {
            settings,
            server_info,
            secure_site_url,
        } => {
            let args = ValidateArgs {
                settings,
                server_info,
                secure_site_url,
            };
            commands::validate::run(&args, config, output_format)
        }
        Commands::Fields => commands::fields::run_fields(output_format),
        Commands::Strategies => commands::fields::run_strategies(output_format),
        Commands::Config { action } => commands::config::run(action, config_path, output_format),
    }
}
