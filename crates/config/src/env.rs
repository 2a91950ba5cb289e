//! Environment snapshot and recognized variable names

use std::collections::BTreeMap;

/// Recognized environment variable names
pub mod vars {
    pub const DATABASE_URI: &str = "DATABASE_URI";
    pub const MONGOLAB_URI: &str = "MONGOLAB_URI";
    pub const CLOUD_CODE_MAIN: &str = "CLOUD_CODE_MAIN";

    pub const APP_ID: &str = "APP_ID";
    pub const MASTER_KEY: &str = "MASTER_KEY";
    pub const SERVER_URL: &str = "SERVER_URL";
    pub const PUBLIC_SERVER_URL: &str = "PUBLIC_SERVER_URL";
    pub const PARSE_MOUNT: &str = "PARSE_MOUNT";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const TRUST_PROXY: &str = "TRUST_PROXY";

    pub const COLLECTION_PREFIX: &str = "COLLECTION_PREFIX";
    pub const CLIENT_KEY: &str = "CLIENT_KEY";
    pub const REST_API_KEY: &str = "REST_API_KEY";
    pub const DOTNET_KEY: &str = "DOTNET_KEY";
    pub const JAVASCRIPT_KEY: &str = "JAVASCRIPT_KEY";
    pub const FILE_KEY: &str = "FILE_KEY";
    pub const FACEBOOK_APP_IDS: &str = "FACEBOOK_APP_IDS";
    pub const MAX_UPLOAD_SIZE: &str = "MAX_UPLOAD_SIZE";
    pub const APP_NAME: &str = "APP_NAME";
    pub const ENABLE_ANON_USERS: &str = "ENABLE_ANON_USERS";
    pub const ALLOW_CLIENT_CLASS_CREATION: &str = "ALLOW_CLIENT_CLASS_CREATION";

    pub const S3_ACCESS_KEY: &str = "S3_ACCESS_KEY";
    pub const S3_SECRET_KEY: &str = "S3_SECRET_KEY";
    pub const S3_BUCKET: &str = "S3_BUCKET";
    pub const S3_DIRECT: &str = "S3_DIRECT";
    pub const GCP_PROJECT_ID: &str = "GCP_PROJECT_ID";
    pub const GCP_KEYFILE_PATH: &str = "GCP_KEYFILE_PATH";
    pub const GCS_BUCKET: &str = "GCS_BUCKET";
    pub const GCS_DIRECT: &str = "GCS_DIRECT";

    pub const GCM_ID: &str = "GCM_ID";
    pub const GCM_KEY: &str = "GCM_KEY";
    pub const PRODUCTION_BUNDLE_ID: &str = "PRODUCTION_BUNDLE_ID";
    pub const PRODUCTION_PFX: &str = "PRODUCTION_PFX";
    pub const PRODUCTION_CERT: &str = "PRODUCTION_CERT";
    pub const PRODUCTION_KEY: &str = "PRODUCTION_KEY";
    pub const DEV_BUNDLE_ID: &str = "DEV_BUNDLE_ID";
    pub const DEV_PFX: &str = "DEV_PFX";
    pub const DEV_CERT: &str = "DEV_CERT";
    pub const DEV_KEY: &str = "DEV_KEY";

    pub const EMAIL_MODULE: &str = "EMAIL_MODULE";
    pub const EMAIL_FROM: &str = "EMAIL_FROM";
    pub const EMAIL_DOMAIN: &str = "EMAIL_DOMAIN";
    pub const EMAIL_API_KEY: &str = "EMAIL_API_KEY";
    pub const VERIFY_USER_EMAILS: &str = "VERIFY_USER_EMAILS";
}

/// Read-only snapshot of environment variables.
///
/// Resolution never touches the process environment directly; the binary
/// captures it once with [`EnvironmentMap::from_process`] and tests build
/// literals. Lookups through [`EnvironmentMap::get`] treat an empty value the
/// same as an unset variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMap {
    vars: BTreeMap<String, String>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment. Variables whose name or
    /// value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Builder-style insert, mostly for tests
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Non-empty value of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_raw(name).filter(|v| !v.is_empty())
    }

    /// Value of `name` as set, including the empty string
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn get_owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// `true` only for the literal values `true` and `1`
    pub fn flag(&self, name: &str) -> bool {
        types::utils::parse_flag(self.get_raw(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_reads_as_unset() {
        let env = EnvironmentMap::new().with("APP_ID", "").with("MASTER_KEY", "k");
        assert_eq!(env.get("APP_ID"), None);
        assert_eq!(env.get_raw("APP_ID"), Some(""));
        assert_eq!(env.get("MASTER_KEY"), Some("k"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_flag() {
        let env: EnvironmentMap = [("A", "true"), ("B", "1"), ("C", "True"), ("D", "")]
            .into_iter()
            .collect();
        assert!(env.flag("A"));
        assert!(env.flag("B"));
        assert!(!env.flag("C"));
        assert!(!env.flag("D"));
        assert!(!env.flag("E"));
    }
}
