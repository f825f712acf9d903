//! Ordered catalog of known plugin settings.
//!
//! The catalog drives both the per-field validation pass (in catalog order)
//! and the settings form metadata the host renders.
//! [`FieldCatalog::kubernetes`] is the catalog the plugin ships with; tests
//! and embedders may build their own with [`FieldCatalog::new`].
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::{FieldCatalog, keys};
//!
//! let catalog = FieldCatalog::kubernetes();
//! let field = catalog.get(keys::CLUSTER_URL).unwrap();
//! assert_eq!(field.display_name(), "Cluster URL");
//! ```

use crate::field::{FieldDescriptor, FieldMetadata, FieldRule};
use crate::{Error, Result};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Settings keys understood by the plugin.
pub mod keys {
    /// Go server URL agents register against.
    pub const GO_SERVER_URL: &str = "go_server_url";
    /// Minutes an agent may take to register before it is killed.
    pub const AUTO_REGISTER_TIMEOUT: &str = "auto_register_timeout";
    /// Cap on pods waiting to be scheduled.
    pub const MAX_PENDING_PODS: &str = "pending_pods_count";
    /// Cluster authentication strategy name.
    pub const AUTHENTICATION_STRATEGY: &str = "authentication_strategy";
    /// Service account bearer token.
    pub const OAUTH_TOKEN: &str = "oauth_token";
    /// Kubernetes API server URL.
    pub const CLUSTER_URL: &str = "kubernetes_cluster_url";
    /// Cluster CA certificate data.
    pub const CLUSTER_CA_CERT: &str = "kubernetes_cluster_ca_cert";
    /// Client private key data.
    pub const CLIENT_KEY_DATA: &str = "client_key_data";
    /// Client certificate data.
    pub const CLIENT_CERT_DATA: &str = "client_cert_data";
    /// Namespace agent pods are created in.
    pub const NAMESPACE: &str = "namespace";
    /// Timeout for calls to the Kubernetes API.
    pub const CLUSTER_REQUEST_TIMEOUT: &str = "cluster_request_timeout";
}

/// Ordered set of field descriptors with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    /// Builds a catalog from descriptors in display order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if two descriptors share a key.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|f| f.key() == field.key()) {
                return Err(Error::InvalidArgument(format!(
                    "duplicate field key '{}' in catalog",
                    field.key()
                )));
            }
        }
        Ok(Self { fields })
    }

    /// The catalog of the Kubernetes elastic agent plugin.
    #[must_use]
    pub fn kubernetes() -> Self {
        Self {
            fields: vec![
                FieldDescriptor::new(keys::GO_SERVER_URL, "Go Server URL", FieldRule::GoServerUrl),
                FieldDescriptor::new(
                    keys::AUTO_REGISTER_TIMEOUT,
                    "Agent auto-register timeout (in minutes)",
                    FieldRule::PositiveInteger { required: true },
                )
                .default_value("10")
                .required(true),
                FieldDescriptor::new(
                    keys::MAX_PENDING_PODS,
                    "Maximum pending pods",
                    FieldRule::PositiveInteger { required: true },
                )
                .default_value("10")
                .required(true),
                FieldDescriptor::new(
                    keys::AUTHENTICATION_STRATEGY,
                    "Authentication strategy",
                    FieldRule::Any,
                )
                .default_value("OAUTH_TOKEN"),
                FieldDescriptor::new(keys::OAUTH_TOKEN, "Oauth token", FieldRule::Any).secure(true),
                FieldDescriptor::new(keys::CLUSTER_URL, "Cluster URL", FieldRule::HttpsUrl),
                FieldDescriptor::new(
                    keys::CLUSTER_CA_CERT,
                    "Cluster ca certificate data",
                    FieldRule::Any,
                )
                .secure(true),
                FieldDescriptor::new(keys::CLIENT_KEY_DATA, "Client key data", FieldRule::Any)
                    .secure(true),
                FieldDescriptor::new(keys::CLIENT_CERT_DATA, "Client cert data", FieldRule::Any)
                    .secure(true),
                FieldDescriptor::new(keys::NAMESPACE, "Namespace", FieldRule::KubernetesName),
                FieldDescriptor::new(
                    keys::CLUSTER_REQUEST_TIMEOUT,
                    "Cluster request timeout (in milliseconds)",
                    FieldRule::PositiveInteger { required: false },
                )
                .default_value("10000"),
            ],
        }
    }

    /// Looks up a descriptor by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key() == key)
    }

    /// Looks up a descriptor that the caller expects to exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if `key` is not in the catalog.
    pub fn require(&self, key: &str) -> Result<&FieldDescriptor> {
        self.get(key).ok_or_else(|| Error::UnknownField {
            key: key.to_string(),
        })
    }

    /// Iterates descriptors in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the catalog has no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Settings form metadata, keyed by field key in catalog order.
    #[must_use]
    pub fn metadata(&self) -> CatalogMetadata {
        CatalogMetadata {
            entries: self
                .fields
                .iter()
                .enumerate()
                .map(|(order, field)| (field.key().to_string(), field.metadata(order)))
                .collect(),
        }
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::kubernetes()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Ordered settings form metadata.
///
/// Serializes as a JSON object whose keys keep catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMetadata {
    entries: Vec<(String, FieldMetadata)>,
}

impl CatalogMetadata {
    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[(String, FieldMetadata)] {
        &self.entries
    }
}

impl Serialize for CatalogMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, metadata) in &self.entries {
            map.serialize_entry(key, metadata)?;
        }
        map.end()
    }
}
