//! Push notification settings handed to the Parse Server

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Android (GCM) push credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidPushConfig {
    /// GCM sender id
    pub sender_id: String,
    /// GCM server API key
    pub api_key: String,
}

/// One iOS certificate bundle for a deployment tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosPushBundle {
    /// PKCS#12 certificate bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pfx: Option<PathBuf>,
    /// PEM certificate chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<PathBuf>,
    /// PEM private key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<PathBuf>,
    /// App bundle identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    /// Whether this bundle targets the production APNs gateway
    pub production: bool,
}

impl IosPushBundle {
    /// A bundle is usable with either a pfx, or a cert and key pair.
    pub fn is_usable(&self) -> bool {
        self.pfx.is_some() || (self.cert.is_some() && self.key.is_some())
    }
}

/// Push settings. Only ever constructed when at least one platform qualifies;
/// an absent `PushConfig` means push is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidPushConfig>,
    /// Production bundle first, then development
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ios: Vec<IosPushBundle>,
}

impl PushConfig {
    pub fn has_production_ios(&self) -> bool {
        self.ios.iter().any(|b| b.production)
    }

    pub fn has_development_ios(&self) -> bool {
        self.ios.iter().any(|b| !b.production)
    }
}
