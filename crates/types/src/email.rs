//! Email adapter settings

use serde::{Deserialize, Serialize};

/// Options forwarded verbatim to the email module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailOptions {
    pub from_address: Option<String>,
    pub domain: Option<String>,
    pub api_key: Option<String>,
}

/// Email adapter module plus its options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAdapterConfig {
    /// Adapter module name, e.g. `parse-server-simple-mailgun-adapter`
    pub module: String,
    pub options: EmailOptions,
}

/// Result of email resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<EmailAdapterConfig>,
    /// Always false when `adapter` is `None`
    pub verify_user_emails: bool,
}
