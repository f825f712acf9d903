//! Plugin settings validation for the Kubernetes elastic agent plugin.
//!
//! Operators submit a flat set of key/value settings before they are
//! persisted. This crate checks them and reports every problem at once as
//! an ordered list of field-keyed errors.
//!
//! # Architecture
//!
//! - [`FieldCatalog`] of [`FieldDescriptor`]s, each with a single-field [`FieldRule`]
//! - [`SettingsValidator`] running field rules, then the Go server URL
//!   fallback, then [`AuthenticationStrategy`] dependent required fields
//! - [`ErrorCollector`] producing an immutable [`ValidationResult`]
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::{PluginSettings, ServerInfo, SettingsValidator};
//!
//! let settings = PluginSettings::from_request_json(r#"{
//!     "plugin-settings": {
//!         "go_server_url": {"value": "https://ci.example.com:8154/go"},
//!         "auto_register_timeout": {"value": "10"},
//!         "pending_pods_count": {"value": "10"},
//!         "authentication_strategy": {"value": "CLUSTER_CERTS"}
//!     }
//! }"#).unwrap();
//!
//! let result = SettingsValidator::default().validate(&settings, &ServerInfo::default());
//! assert_eq!(result.len(), 4);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod auth;
mod catalog;
mod error;
mod field;
mod server_info;
mod settings;
mod validation;
mod validator;

pub mod cli;

pub use auth::AuthenticationStrategy;
pub use catalog::{CatalogMetadata, FieldCatalog, keys};
pub use error::{Error, Result};
pub use field::{FieldDescriptor, FieldMetadata, FieldRule};
pub use server_info::ServerInfo;
pub use settings::{PluginSettings, is_blank};
pub use validation::{ErrorCollector, ValidationError, ValidationResult};
pub use validator::{MISSING_SERVER_URL_MESSAGE, SettingsValidator, validate_settings};
