//! Action type definitions for CLI commands.

use clap::Subcommand;

/// Configuration file actions.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Create a configuration file with default values
    Init,

    /// Show the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Read one value (e.g. `server.secure_site_url`)
    Get {
        /// Dotted configuration key
        key: String,
    },

    /// Update one value (e.g. `general.default_format json`)
    Set {
        /// Dotted configuration key
        key: String,
        /// New value; `none` clears optional values
        value: String,
    },
}
