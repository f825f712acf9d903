//! Fields and strategies commands.
//!
//! Both print static descriptions of what the plugin accepts: the settings
//! form metadata and the fields each authentication strategy requires.

use anyhow::{Context, Result};
use elastic_agent_core::cli::{ExitCode, OutputFormat};
use elastic_agent_core::{AuthenticationStrategy, FieldCatalog};
use serde::Serialize;
use tracing::info;

/// One authentication strategy and what it requires.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StrategyInfo {
    /// Canonical strategy name
    pub name: &'static str,
    /// Keys that must be non-blank under this strategy
    pub required_fields: Vec<RequiredField>,
}

/// A strategy-dependent required field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequiredField {
    /// Settings key
    pub key: String,
    /// Name shown to operators
    pub display_name: String,
}

/// Describes every supported strategy against `catalog`.
///
/// Keys missing from the catalog are reported with the key as display name.
#[must_use]
pub fn describe_strategies(catalog: &FieldCatalog) -> Vec<StrategyInfo> {
    AuthenticationStrategy::ALL
        .iter()
        .map(|strategy| StrategyInfo {
            name: strategy.name(),
            required_fields: strategy
                .required_fields()
                .iter()
                .map(|key| RequiredField {
                    key: (*key).to_string(),
                    display_name: catalog
                        .get(key)
                        .map_or_else(|| (*key).to_string(), |f| f.display_name().to_string()),
                })
                .collect(),
        })
        .collect()
}

/// Prints the settings form metadata.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn run_fields(output_format: OutputFormat) -> Result<ExitCode> {
    info!("Listing plugin settings fields");
    let metadata = FieldCatalog::kubernetes().metadata();
    let formatted = crate::formatters::format_output(&metadata, output_format)
        .context("failed to format field metadata")?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}

/// Prints supported authentication strategies.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn run_strategies(output_format: OutputFormat) -> Result<ExitCode> {
    info!("Listing authentication strategies");
    let strategies = describe_strategies(&FieldCatalog::kubernetes());
    let formatted = crate::formatters::format_output(&strategies, output_format)
        .context("failed to format strategies")?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}
