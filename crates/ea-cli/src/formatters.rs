//! Output formatters for CLI commands.
//!
//! Every command renders through [`format_output`], so `--format` behaves the
//! same everywhere. Validation results get a dedicated human-readable view in
//! pretty mode via [`format_validation`].

use anyhow::Result;
use colored::Colorize;
use elastic_agent_core::ValidationResult;
use elastic_agent_core::cli::OutputFormat;
use serde::Serialize;

/// Formats data according to the requested output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use elastic_agent_cli::formatters::format_output;
/// use elastic_agent_core::cli::OutputFormat;
///
/// let output = format_output(&vec!["OAUTH_TOKEN"], OutputFormat::Text)?;
/// assert_eq!(output, r#"["OAUTH_TOKEN"]"#);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// Formats a validation result.
///
/// JSON and text modes emit the response array the host expects. Pretty
/// mode prints a status line followed by one line per error.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_validation(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::Text => format_output(result, format),
        OutputFormat::Pretty => Ok(pretty::format_validation(result)),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Formats data as compact single-line JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Formats data as compact JSON, suitable for piping.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Colored, human-readable output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, ValidationResult};
    use serde_json::{Map, Value};
    use std::fmt::Write;

    /// Formats data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        Ok(out)
    }

    /// Renders a validation result as a status line plus one line per error.
    #[must_use]
    pub fn format_validation(result: &ValidationResult) -> String {
        if result.is_valid() {
            return format!("{} plugin settings are valid", "✓".green().bold());
        }

        let noun = if result.len() == 1 { "problem" } else { "problems" };
        let mut out = format!(
            "{} plugin settings rejected ({} {noun})",
            "✗".red().bold(),
            result.len()
        );
        for error in result {
            let _ = write!(out, "\n  {}: {}", error.key.yellow().bold(), error.message);
        }
        out
    }

    fn write_value(out: &mut String, value: &Value, indent: usize) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Null => out.push_str(&"null".dimmed().to_string()),
            Value::Bool(b) => out.push_str(&b.to_string().yellow().to_string()),
            Value::Number(n) => out.push_str(&n.to_string().cyan().to_string()),
            Value::String(s) => {
                let _ = write!(out, "{}", s.green());
            }
            Value::Array(items) if items.is_empty() => out.push_str("[]"),
            Value::Array(items) => {
                for item in items {
                    let _ = write!(out, "\n{pad}- ");
                    match item {
                        Value::Object(map) if !map.is_empty() => {
                            write_entries(out, map, indent + 1, true);
                        }
                        _ => write_value(out, item, indent + 1),
                    }
                }
            }
            Value::Object(map) if map.is_empty() => out.push_str("{}"),
            Value::Object(map) => write_entries(out, map, indent, false),
        }
        if indent == 0 && out.starts_with('\n') {
            out.remove(0);
        }
    }

    /// Writes `key: value` lines; the first one continues the current line
    /// when `inline_first` is set, as for objects listed under `- `.
    fn write_entries(out: &mut String, map: &Map<String, Value>, indent: usize, inline_first: bool) {
        let pad = "  ".repeat(indent);
        for (i, (key, item)) in map.iter().enumerate() {
            if !(inline_first && i == 0) {
                let _ = write!(out, "\n{pad}");
            }
            let _ = write!(out, "{}: ", key.blue().bold());
            write_value(out, item, indent + 1);
        }
    }
}
