//! Authentication strategies for reaching the Kubernetes cluster.
//!
//! The plugin talks to the cluster either with a bearer token or with a set
//! of client certificates. Which one is configured decides which other
//! settings become mandatory; [`AuthenticationStrategy::required_fields`]
//! is the single place that mapping lives.
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::AuthenticationStrategy;
//!
//! let strategy: AuthenticationStrategy = "CLUSTER_CERTS".parse().unwrap();
//! assert_eq!(strategy, AuthenticationStrategy::ClusterCerts);
//! assert_eq!(strategy.required_fields().len(), 4);
//! ```

use crate::catalog::keys;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the plugin authenticates against the Kubernetes API server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationStrategy {
    /// Bearer token issued for a service account.
    OauthToken,
    /// Client certificate and key signed by the cluster CA.
    ClusterCerts,
}

impl AuthenticationStrategy {
    /// Every supported strategy, in the order they are presented to operators.
    pub const ALL: [Self; 2] = [Self::OauthToken, Self::ClusterCerts];

    /// Returns the canonical name used in settings and messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastic_agent_core::AuthenticationStrategy;
    ///
    /// assert_eq!(AuthenticationStrategy::OauthToken.name(), "OAUTH_TOKEN");
    /// assert_eq!(AuthenticationStrategy::ClusterCerts.name(), "CLUSTER_CERTS");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OauthToken => "OAUTH_TOKEN",
            Self::ClusterCerts => "CLUSTER_CERTS",
        }
    }

    /// Returns the settings keys that must be non-blank under this strategy.
    ///
    /// Keys are listed in the order they are checked, which is also the
    /// order any resulting errors are reported in.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastic_agent_core::{AuthenticationStrategy, keys};
    ///
    /// assert_eq!(
    ///     AuthenticationStrategy::OauthToken.required_fields(),
    ///     &[keys::OAUTH_TOKEN]
    /// );
    /// ```
    #[must_use]
    pub const fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::OauthToken => &[keys::OAUTH_TOKEN],
            Self::ClusterCerts => &[
                keys::CLUSTER_CA_CERT,
                keys::CLIENT_KEY_DATA,
                keys::CLIENT_CERT_DATA,
                keys::CLUSTER_URL,
            ],
        }
    }

    fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(Self::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AuthenticationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuthenticationStrategy {
    type Err = Error;

    /// Parses a strategy name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let candidate = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(candidate))
            .ok_or_else(|| Error::UnsupportedStrategy {
                value: s.to_string(),
                supported: Self::supported_names(),
            })
    }
}
