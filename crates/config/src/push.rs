//! Push notification configuration builder

use crate::credentials::CredentialFileResolver;
use crate::env::{vars, EnvironmentMap};
use std::path::PathBuf;
use tracing::{debug, info};
use types::{AndroidPushConfig, ConfigError, IosPushBundle, PushConfig};

/// APNs deployment tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushTier {
    Production,
    Development,
}

impl PushTier {
    /// Default file names, relative to the credential root:
    /// `(pfx, cert, key)`
    fn default_files(self) -> (&'static str, &'static str, &'static str) {
        match self {
            PushTier::Production => (
                "production-pfx",
                "production-pfx-cert.pem",
                "production-pfx-key.pem",
            ),
            PushTier::Development => ("dev-pfx", "dev-pfx-cert.pem", "dev-pfx-key.pem"),
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, PushTier::Production)
    }

    pub fn name(self) -> &'static str {
        match self {
            PushTier::Production => "production",
            PushTier::Development => "development",
        }
    }
}

/// Raw inputs for one tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushTierInputs {
    pub bundle_id: Option<String>,
    pub pfx: Option<String>,
    pub cert: Option<String>,
    pub key: Option<String>,
}

impl PushTierInputs {
    pub fn from_env(env: &EnvironmentMap, tier: PushTier) -> Self {
        let (bundle_id, pfx, cert, key) = match tier {
            PushTier::Production => (
                vars::PRODUCTION_BUNDLE_ID,
                vars::PRODUCTION_PFX,
                vars::PRODUCTION_CERT,
                vars::PRODUCTION_KEY,
            ),
            PushTier::Development => (
                vars::DEV_BUNDLE_ID,
                vars::DEV_PFX,
                vars::DEV_CERT,
                vars::DEV_KEY,
            ),
        };

        Self {
            bundle_id: env.get_owned(bundle_id),
            pfx: env.get_owned(pfx),
            cert: env.get_owned(cert),
            key: env.get_owned(key),
        }
    }
}

/// Builds the push section from Android keys and per-tier iOS credentials
#[derive(Debug, Clone)]
pub struct PushConfigBuilder {
    credential_root: PathBuf,
}

impl Default for PushConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PushConfigBuilder {
    /// Builder looking for default certificate files under `/`
    pub fn new() -> Self {
        Self::with_credential_root("/")
    }

    /// Builder looking for default certificate files under `root`
    pub fn with_credential_root(root: impl Into<PathBuf>) -> Self {
        Self {
            credential_root: root.into(),
        }
    }

    /// Returns `None` when neither Android nor any iOS tier qualifies.
    pub fn build(
        &self,
        production: &PushTierInputs,
        development: &PushTierInputs,
        android_sender_id: Option<&str>,
        android_api_key: Option<&str>,
    ) -> Result<Option<PushConfig>, ConfigError> {
        let android = match (non_empty(android_sender_id), non_empty(android_api_key)) {
            (Some(sender_id), Some(api_key)) => Some(AndroidPushConfig {
                sender_id: sender_id.to_string(),
                api_key: api_key.to_string(),
            }),
            (Some(_), None) | (None, Some(_)) => {
                debug!("Android push needs both GCM_ID and GCM_KEY, skipping");
                None
            }
            (None, None) => None,
        };

        let mut ios = Vec::with_capacity(2);
        for (tier, inputs) in [
            (PushTier::Production, production),
            (PushTier::Development, development),
        ] {
            if let Some(bundle) = self.resolve_tier(tier, inputs)? {
                info!(tier = tier.name(), bundle_id = ?bundle.bundle_id, "iOS push enabled");
                ios.push(bundle);
            }
        }

        if android.is_none() && ios.is_empty() {
            return Ok(None);
        }

        Ok(Some(PushConfig { android, ios }))
    }

    /// Convenience wrapper reading every push input from `env`
    pub fn build_from_env(&self, env: &EnvironmentMap) -> Result<Option<PushConfig>, ConfigError> {
        self.build(
            &PushTierInputs::from_env(env, PushTier::Production),
            &PushTierInputs::from_env(env, PushTier::Development),
            env.get(vars::GCM_ID),
            env.get(vars::GCM_KEY),
        )
    }

    fn resolve_tier(
        &self,
        tier: PushTier,
        inputs: &PushTierInputs,
    ) -> Result<Option<IosPushBundle>, ConfigError> {
        let (pfx_file, cert_file, key_file) = tier.default_files();

        let bundle = IosPushBundle {
            pfx: self.resolve(inputs.pfx.as_deref(), pfx_file)?,
            cert: self.resolve(inputs.cert.as_deref(), cert_file)?,
            key: self.resolve(inputs.key.as_deref(), key_file)?,
            bundle_id: inputs.bundle_id.clone().filter(|s| !s.is_empty()),
            production: tier.is_production(),
        };

        Ok(bundle.is_usable().then_some(bundle))
    }

    fn resolve(&self, explicit: Option<&str>, default_file: &str) -> Result<Option<PathBuf>, ConfigError> {
        let default_path = self.default_path(default_file);
        Ok(CredentialFileResolver::resolve(explicit, &default_path)?.into_path())
    }

    fn default_path(&self, file: &str) -> PathBuf {
        self.credential_root.join(file)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
