//! Validate command implementation.
//!
//! Reads a settings document (the host's validate request body or a flat
//! JSON object), resolves server info, and runs the settings validator with
//! the Kubernetes field catalog.

use crate::commands::config::Config;
use anyhow::{Context, Result};
use elastic_agent_core::cli::{ExitCode, OutputFormat};
use elastic_agent_core::{
    PluginSettings, ServerInfo, SettingsValidator, ValidationResult, is_blank,
};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Inputs of one `validate` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateArgs {
    /// Settings file, or `-` for stdin
    pub settings: PathBuf,
    /// Server info JSON file
    pub server_info: Option<PathBuf>,
    /// Secure site URL overriding every other source
    pub secure_site_url: Option<String>,
}

/// Resolves the server info to validate against.
///
/// Sources in precedence order: explicit secure site URL, server info
/// file, configuration file. A blank secure site URL does not count as
/// provided and falls through to the next source.
///
/// # Errors
///
/// Returns an error if the server info file cannot be read or parsed.
pub fn resolve_server_info(args: &ValidateArgs, config: &Config) -> Result<ServerInfo> {
    if let Some(url) = args
        .secure_site_url
        .as_deref()
        .filter(|url| !is_blank(Some(url)))
    {
        debug!("Using secure site URL from command line");
        return Ok(ServerInfo::with_secure_site_url(url));
    }

    let Some(path) = &args.server_info else {
        return Ok(config.server_info());
    };

    debug!("Reading server info from {}", path.display());
    let body = fs::read_to_string(path)
        .with_context(|| format!("failed to read server info {}", path.display()))?;
    let mut info = ServerInfo::from_json(&body)
        .with_context(|| format!("failed to parse server info {}", path.display()))?;
    if !info.has_secure_site_url() {
        debug!("Server info has no secure site URL, using configured one");
        info.secure_site_url = config.server.secure_site_url.clone();
    }
    Ok(info)
}

/// Loads the inputs described by `args` and validates them.
///
/// # Errors
///
/// Returns an error if the settings or server info cannot be read or parsed.
/// Rejected settings are not an error; they are reported in the result.
pub fn evaluate(args: &ValidateArgs, config: &Config) -> Result<ValidationResult> {
    evaluate_with_stdin(args, config, io::stdin().lock())
}

/// Same as [`evaluate`], reading `-` settings from `stdin`.
///
/// # Errors
///
/// See [`evaluate`].
pub fn evaluate_with_stdin<R: Read>(
    args: &ValidateArgs,
    config: &Config,
    stdin: R,
) -> Result<ValidationResult> {
    let body = read_settings(&args.settings, stdin)?;
    let settings = PluginSettings::from_request_json(&body)
        .with_context(|| format!("failed to parse settings {}", args.settings.display()))?;
    let server_info = resolve_server_info(args, config)?;

    Ok(SettingsValidator::default().validate(&settings, &server_info))
}

/// Runs the validate command.
///
/// Prints the result and returns [`ExitCode::VALIDATION_FAILED`] when the
/// settings are rejected.
///
/// # Errors
///
/// Returns an error if the inputs cannot be read or the output cannot be
/// formatted.
pub fn run(args: &ValidateArgs, config: &Config, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Validating settings from {}", args.settings.display());

    let result = evaluate(args, config)?;
    let formatted = crate::formatters::format_validation(&result, output_format)
        .context("failed to format validation result")?;
    println!("{formatted}");

    Ok(exit_code_for(&result))
}

/// Maps a validation result to the process exit code.
#[must_use]
pub fn exit_code_for(result: &ValidationResult) -> ExitCode {
    if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::VALIDATION_FAILED
    }
}

fn read_settings<R: Read>(path: &Path, mut stdin: R) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        stdin
            .read_to_string(&mut body)
            .context("failed to read settings from stdin")?;
        return Ok(body);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
