//! Advisory configuration checks
//!
//! Nothing here blocks startup on its own. The report is logged, and the
//! binary's `--check` mode turns errors into a failing exit code.

use crate::schema::{DatabaseUriSource, ServerConfig};
use std::fmt;
use tracing::{error, warn};
use types::{ConfigError, FilesAdapterConfig};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &ServerConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_identity(config, &mut report);
        Self::validate_urls(config, &mut report);
        Self::validate_database(config, &mut report);
        Self::validate_files_adapter(config, &mut report);
        Self::validate_push(config, &mut report);
        Self::validate_email(config, &mut report);

        report
    }

    fn validate_identity(config: &ServerConfig, report: &mut ValidationReport) {
        match config.master_key.as_deref() {
            None => report.add_warning(
                "masterKey",
                "No master key configured, the server may refuse to start or run unprotected",
            ),
            Some(key) if key.len() < 16 => {
                report.add_warning("masterKey", "Master key is short, consider using a longer key")
            }
            Some(_) => {}
        }

        if config.app_id == crate::schema::DEFAULT_APP_ID {
            report.add_warning("appId", "Using the default application id");
        }

        if config.allow_client_class_creation {
            report.add_warning(
                "allowClientClassCreation",
                "Clients may create classes, disable this in production",
            );
        }
    }

    fn validate_urls(config: &ServerConfig, report: &mut ValidationReport) {
        if !is_http_url(&config.server_url) {
            report.add_error("serverURL", "Server URL must start with http:// or https://");
        }

        if let Some(public) = config.public_server_url.as_deref() {
            if !is_http_url(public) {
                report.add_error(
                    "publicServerURL",
                    "Public server URL must start with http:// or https://",
                );
            } else if !public.starts_with("https://") {
                report.add_warning("publicServerURL", "Public server URL should use HTTPS");
            }
        }

        if config.port < 1024 {
            report.add_warning("port", "Port is below 1024, may require elevated privileges");
        }
    }

    fn validate_database(config: &ServerConfig, report: &mut ValidationReport) {
        let known_schemes = ["mongodb://", "mongodb+srv://", "postgres://", "postgresql://"];
        if !known_schemes
            .iter()
            .any(|scheme| config.database_uri.starts_with(scheme))
        {
            report.add_error(
                "databaseURI",
                &format!("Unsupported database URI scheme. Supported: {:?}", known_schemes),
            );
        }

        if config.database_uri_source == DatabaseUriSource::Default {
            report.add_warning("databaseURI", "Using the localhost database fallback");
        }
    }

    fn validate_files_adapter(config: &ServerConfig, report: &mut ValidationReport) {
        if let FilesAdapterConfig::Gcs { keyfile_path, .. } = &config.files_adapter {
            if !std::path::Path::new(keyfile_path).is_file() {
                report.add_warning(
                    "filesAdapter.keyfilePath",
                    &format!("GCP keyfile {} does not exist", keyfile_path),
                );
            }
        }

        if config.files_adapter.is_default() {
            report.add_warning(
                "filesAdapter",
                "No files adapter configured, the server default storage applies",
            );
        }
    }

    fn validate_push(config: &ServerConfig, report: &mut ValidationReport) {
        let Some(push) = &config.push else {
            return;
        };

        for bundle in &push.ios {
            if bundle.bundle_id.is_none() {
                let tier = if bundle.production { "production" } else { "development" };
                report.add_warning(
                    "push.ios.bundleId",
                    &format!("iOS {} bundle has no bundle id", tier),
                );
            }
        }
    }

    fn validate_email(config: &ServerConfig, report: &mut ValidationReport) {
        if let Some(adapter) = &config.email_adapter {
            if adapter.options.from_address.is_none() {
                report.add_warning(
                    "emailAdapter.options.fromAddress",
                    &format!("Email module {} has no from address", adapter.module),
                );
            }
        }

        if config.verify_user_emails && config.public_server_url.is_none() {
            report.add_warning(
                "publicServerURL",
                "Email verification links are built from the public server URL, which is unset",
            );
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }

    /// Fail with the first error, if any
    pub fn into_result(self) -> Result<ValidationReport, ConfigError> {
        match self.errors.first() {
            Some(issue) => Err(ConfigError::ValidationError {
                field: issue.field.clone(),
                message: issue.message.clone(),
            }),
            None => Ok(self),
        }
    }

    /// Emit every issue through `tracing`
    pub fn log(&self) {
        for issue in &self.errors {
            error!(field = %issue.field, "{}", issue.message);
        }
        for issue in &self.warnings {
            warn!(field = %issue.field, "{}", issue.message);
        }
    }
}
