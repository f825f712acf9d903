//! Server-level connection info supplied by the host.

use crate::Result;
use crate::settings::is_blank;
use serde::{Deserialize, Serialize};

/// Connection details the host already knows about itself.
///
/// Only the secure site URL takes part in validation: when it is set, agents
/// can register without an explicit Go server URL in the plugin settings.
///
/// # Examples
///
/// ```
/// use elastic_agent_core::ServerInfo;
///
/// let info = ServerInfo::from_json(r#"{"secure_site_url": "https://ci.example.com/go"}"#).unwrap();
/// assert!(info.has_secure_site_url());
///
/// assert!(!ServerInfo::default().has_secure_site_url());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server identifier
    #[serde(default)]
    pub server_id: Option<String>,

    /// Plain HTTP site URL
    #[serde(default)]
    pub site_url: Option<String>,

    /// HTTPS site URL agents register against
    #[serde(default)]
    pub secure_site_url: Option<String>,
}

impl ServerInfo {
    /// Creates server info carrying only a secure site URL.
    #[must_use]
    pub fn with_secure_site_url(url: impl Into<String>) -> Self {
        Self {
            secure_site_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Parses the host's server info document.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not valid JSON of the expected shape.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Returns the secure site URL, if any.
    #[must_use]
    pub fn secure_site_url(&self) -> Option<&str> {
        self.secure_site_url.as_deref()
    }

    /// Returns `true` if a non-blank secure site URL is known.
    #[must_use]
    pub fn has_secure_site_url(&self) -> bool {
        !is_blank(self.secure_site_url())
    }
}
