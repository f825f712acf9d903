//! Plugin settings validation.
//!
//! Validation runs in three fixed steps that all append to one
//! [`ErrorCollector`]:
//!
//! 1. every catalog field's own [`FieldRule`](crate::FieldRule), in catalog order
//! 2. the Go server URL fallback against [`ServerInfo`]
//! 3. authentication-strategy dependent required fields
//!
//! The call never fails: every detected problem, including internal lookup
//! failures during step 3, ends up as an entry in the returned
//! [`ValidationResult`].
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::{PluginSettings, ServerInfo, SettingsValidator, keys};
//!
//! let settings = PluginSettings::new()
//!     .with(keys::AUTO_REGISTER_TIMEOUT, "10")
//!     .with(keys::MAX_PENDING_PODS, "10")
//!     .with(keys::AUTHENTICATION_STRATEGY, "OAUTH_TOKEN");
//!
//! let result = SettingsValidator::default().validate(&settings, &ServerInfo::default());
//!
//! let keys: Vec<_> = result.iter().map(|e| e.key.as_str()).collect();
//! assert_eq!(keys, [keys::GO_SERVER_URL, keys::OAUTH_TOKEN]);
//! ```

use crate::catalog::{FieldCatalog, keys};
use crate::validation::{ErrorCollector, ValidationError, ValidationResult};
use crate::{AuthenticationStrategy, PluginSettings, Result, ServerInfo};
use tracing::{debug, trace, warn};

/// Message reported when neither a Go server URL nor a secure site URL is known.
pub const MISSING_SERVER_URL_MESSAGE: &str =
    "Secure site url is not configured. Please specify Go Server Url.";

/// Validates plugin settings against a field catalog.
#[derive(Debug, Clone, Default)]
pub struct SettingsValidator {
    catalog: FieldCatalog,
}

impl SettingsValidator {
    /// Creates a validator over `catalog`.
    #[must_use]
    pub const fn new(catalog: FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Validates one settings snapshot.
    ///
    /// An empty result means the settings are accepted. Results are
    /// deterministic: identical inputs produce identical output, in the
    /// same order.
    #[must_use]
    pub fn validate(&self, settings: &PluginSettings, server_info: &ServerInfo) -> ValidationResult {
        debug!("Validating plugin settings");

        let mut errors = ErrorCollector::new();
        self.check_fields(settings, &mut errors);
        check_server_url(settings, server_info, &mut errors);
        self.check_authentication_strategy(settings, &mut errors);

        let result = errors.finish();
        debug!(errors = result.len(), "Plugin settings validation finished");
        result
    }

    fn check_fields(&self, settings: &PluginSettings, errors: &mut ErrorCollector) {
        for field in &self.catalog {
            errors.push_opt(field.validate(settings.get(field.key())).inspect(|error| {
                trace!(key = %error.key, message = %error.message, "Field rule failed");
            }));
        }
    }

    fn check_authentication_strategy(&self, settings: &PluginSettings, errors: &mut ErrorCollector) {
        if let Err(err) = self.try_check_authentication_strategy(settings, errors) {
            if err.is_unsupported_strategy() {
                debug!(error = %err, "Rejected authentication strategy");
            } else {
                warn!(error = %err, "Authentication strategy check failed");
            }
            errors.push(ValidationError::new(
                keys::AUTHENTICATION_STRATEGY,
                err.to_string(),
            ));
        }
    }

    /// Appends one error per strategy-required field that is blank.
    ///
    /// Errors already appended stay in place if a later lookup fails.
    fn try_check_authentication_strategy(
        &self,
        settings: &PluginSettings,
        errors: &mut ErrorCollector,
    ) -> Result<()> {
        if settings.is_blank(keys::AUTHENTICATION_STRATEGY) {
            return Ok(());
        }
        let raw = settings
            .get(keys::AUTHENTICATION_STRATEGY)
            .unwrap_or_default();
        let strategy: AuthenticationStrategy = raw.parse()?;

        for key in strategy.required_fields() {
            if settings.is_blank(key) {
                let field = self.catalog.require(key)?;
                errors.push(ValidationError::new(
                    *key,
                    format!(
                        "{} is required when authentication strategy is set to {}.",
                        field.display_name(),
                        strategy.name()
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn check_server_url(settings: &PluginSettings, server_info: &ServerInfo, errors: &mut ErrorCollector) {
    if settings.is_blank(keys::GO_SERVER_URL) && !server_info.has_secure_site_url() {
        errors.push(ValidationError::new(
            keys::GO_SERVER_URL,
            MISSING_SERVER_URL_MESSAGE,
        ));
    }
}

/// Validates `settings` with the standard Kubernetes catalog.
///
/// # Examples
///
/// ```
/// use elastic_agent_core::{PluginSettings, ServerInfo, validate_settings};
///
/// let settings = PluginSettings::new()
///     .with("auto_register_timeout", "10")
///     .with("pending_pods_count", "10");
/// let info = ServerInfo::with_secure_site_url("https://ci.example.com:8154/go");
///
/// assert!(validate_settings(&settings, &info).is_valid());
/// ```
#[must_use]
pub fn validate_settings(settings: &PluginSettings, server_info: &ServerInfo) -> ValidationResult {
    SettingsValidator::default().validate(settings, server_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldDescriptor, FieldRule};

    fn base_settings() -> PluginSettings {
        PluginSettings::new()
            .with(keys::GO_SERVER_URL, "https://ci.example.com:8154/go")
            .with(keys::AUTO_REGISTER_TIMEOUT, "10")
            .with(keys::MAX_PENDING_PODS, "10")
    }

    fn keys_of(result: &ValidationResult) -> Vec<&str> {
        result.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_valid_settings_without_strategy() {
        let result = validate_settings(&base_settings(), &ServerInfo::default());
        assert!(result.is_valid(), "{result:?}");
    }

    #[test]
    fn test_server_url_falls_back_to_secure_site_url() {
        let settings = base_settings().with(keys::GO_SERVER_URL, "");
        let info = ServerInfo::with_secure_site_url("https://ci.example.com:8154/go");
        assert!(validate_settings(&settings, &info).is_valid());
    }

    #[test]
    fn test_missing_server_url_and_secure_site_url() {
        let settings = base_settings().with(keys::GO_SERVER_URL, "  ");
        let result = validate_settings(&settings, &ServerInfo::with_secure_site_url(""));

        assert_eq!(result.errors(), &[ValidationError::new(
            keys::GO_SERVER_URL,
            MISSING_SERVER_URL_MESSAGE
        )]);
    }

    #[test]
    fn test_oauth_token_required() {
        let settings = base_settings().with(keys::AUTHENTICATION_STRATEGY, "OAUTH_TOKEN");
        let result = validate_settings(&settings, &ServerInfo::default());

        assert_eq!(result.errors(), &[ValidationError::new(
            keys::OAUTH_TOKEN,
            "Oauth token is required when authentication strategy is set to OAUTH_TOKEN."
        )]);
    }

    #[test]
    fn test_oauth_token_present() {
        let settings = base_settings()
            .with(keys::AUTHENTICATION_STRATEGY, "OAUTH_TOKEN")
            .with(keys::OAUTH_TOKEN, "token");
        assert!(validate_settings(&settings, &ServerInfo::default()).is_valid());
    }

    #[test]
    fn test_cluster_certs_reports_every_missing_field() {
        let settings = base_settings().with(keys::AUTHENTICATION_STRATEGY, "CLUSTER_CERTS");
        let result = validate_settings(&settings, &ServerInfo::default());

        assert_eq!(keys_of(&result), [
            keys::CLUSTER_CA_CERT,
            keys::CLIENT_KEY_DATA,
            keys::CLIENT_CERT_DATA,
            keys::CLUSTER_URL,
        ]);
        assert_eq!(
            result.errors()[3].message,
            "Cluster URL is required when authentication strategy is set to CLUSTER_CERTS."
        );
    }

    #[test]
    fn test_cluster_certs_does_not_require_oauth_token() {
        let settings = base_settings()
            .with(keys::AUTHENTICATION_STRATEGY, "CLUSTER_CERTS")
            .with(keys::CLUSTER_CA_CERT, "ca")
            .with(keys::CLIENT_KEY_DATA, "key")
            .with(keys::CLIENT_CERT_DATA, "cert")
            .with(keys::CLUSTER_URL, "https://10.0.0.1:6443");
        assert!(validate_settings(&settings, &ServerInfo::default()).is_valid());
    }

    #[test]
    fn test_unknown_strategy_short_circuits() {
        let settings = base_settings().with(keys::AUTHENTICATION_STRATEGY, "BASIC_AUTH");
        let result = validate_settings(&settings, &ServerInfo::default());

        assert_eq!(keys_of(&result), [keys::AUTHENTICATION_STRATEGY]);
        assert!(result.errors()[0].message.contains("'BASIC_AUTH'"));
    }

    #[test]
    fn test_lookup_failure_downgraded_after_earlier_errors() {
        let catalog = FieldCatalog::new(vec![FieldDescriptor::new(
            keys::CLUSTER_CA_CERT,
            "Cluster ca certificate data",
            FieldRule::Any,
        )])
        .unwrap();
        let settings = PluginSettings::new()
            .with(keys::GO_SERVER_URL, "https://ci.example.com/go")
            .with(keys::AUTHENTICATION_STRATEGY, "CLUSTER_CERTS");

        let result = SettingsValidator::new(catalog).validate(&settings, &ServerInfo::default());

        assert_eq!(keys_of(&result), [keys::CLUSTER_CA_CERT, keys::AUTHENTICATION_STRATEGY]);
        assert_eq!(
            result.errors()[1].message,
            "Field 'client_key_data' is not defined in the plugin settings catalog"
        );
    }

    #[test]
    fn test_field_errors_precede_cross_field_errors() {
        let settings = PluginSettings::new()
            .with(keys::AUTO_REGISTER_TIMEOUT, "0")
            .with(keys::MAX_PENDING_PODS, "10")
            .with(keys::AUTHENTICATION_STRATEGY, "OAUTH_TOKEN");
        let result = validate_settings(&settings, &ServerInfo::default());

        assert_eq!(keys_of(&result), [
            keys::AUTO_REGISTER_TIMEOUT,
            keys::GO_SERVER_URL,
            keys::OAUTH_TOKEN,
        ]);
    }
}
