//! Configuration loader implementation

use crate::email::EmailAdapterConfigBuilder;
use crate::env::{vars, EnvironmentMap};
use crate::links::DockerLinks;
use crate::push::PushConfigBuilder;
use crate::schema::{
    default_cloud, default_host, default_server_url, DatabaseUriSource, ServerConfig,
    DEFAULT_APP_ID, DEFAULT_DATABASE_URI, DEFAULT_MOUNT_PATH, DEFAULT_PORT,
};
use crate::storage::StorageAdapterSelector;
use anyhow::{Context, Result};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use types::utils::{normalize_mount_path, split_list};
use types::ConfigError;

/// Assembles a [`ServerConfig`] from an environment snapshot
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    credential_root: PathBuf,
    links: Option<DockerLinks>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with default certificate locations under `/` and docker links
    /// discovered from the environment being assembled
    pub fn new() -> Self {
        Self {
            credential_root: PathBuf::from("/"),
            links: None,
        }
    }

    /// Look for default push certificate files under `root` instead of `/`
    pub fn with_credential_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.credential_root = root.into();
        self
    }

    /// Use `links` instead of discovering them from the environment
    pub fn with_links(mut self, links: DockerLinks) -> Self {
        self.links = Some(links);
        self
    }

    /// Resolve the full server configuration.
    ///
    /// Incomplete feature inputs disable that feature. The only errors are a
    /// credential path that cannot be inspected, a non-numeric `PORT` and a
    /// `HOST` that is neither an IP address nor a hostname.
    pub fn assemble(&self, env: &EnvironmentMap) -> Result<ServerConfig, ConfigError> {
        let (database_uri, database_uri_source) = self.resolve_database_uri(env);

        let port = match env.get(vars::PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                field: vars::PORT.to_string(),
                value: raw.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let host = match env.get(vars::HOST) {
            Some(raw) => parse_host(raw).ok_or_else(|| ConfigError::InvalidValue {
                field: vars::HOST.to_string(),
                value: raw.to_string(),
            })?,
            None => default_host(),
        };
        let mount_path = normalize_mount_path(env.get(vars::PARSE_MOUNT).unwrap_or(DEFAULT_MOUNT_PATH));
        let server_url = env
            .get_owned(vars::SERVER_URL)
            .unwrap_or_else(|| default_server_url(port, &mount_path));

        let push = PushConfigBuilder::with_credential_root(&self.credential_root)
            .build_from_env(env)?;
        if push.is_none() {
            info!("Push notifications disabled");
        }
        let files_adapter = StorageAdapterSelector::select_from_env(env);
        let email = EmailAdapterConfigBuilder::build_from_env(env);

        Ok(ServerConfig {
            database_uri,
            database_uri_source,
            cloud: env.get_owned(vars::CLOUD_CODE_MAIN).unwrap_or_else(default_cloud),
            app_id: env
                .get_owned(vars::APP_ID)
                .unwrap_or_else(|| DEFAULT_APP_ID.to_string()),
            master_key: env.get_owned(vars::MASTER_KEY),
            server_url,
            public_server_url: env.get_owned(vars::PUBLIC_SERVER_URL),
            mount_path,
            host,
            port,
            trust_proxy: env.get_raw(vars::TRUST_PROXY) != Some("false"),
            collection_prefix: env.get_owned(vars::COLLECTION_PREFIX),
            client_key: env.get_owned(vars::CLIENT_KEY),
            rest_api_key: env.get_owned(vars::REST_API_KEY),
            dot_net_key: env.get_owned(vars::DOTNET_KEY),
            javascript_key: env.get_owned(vars::JAVASCRIPT_KEY),
            file_key: env.get_owned(vars::FILE_KEY),
            facebook_app_ids: env.get(vars::FACEBOOK_APP_IDS).map(split_list),
            max_upload_size: env.get_owned(vars::MAX_UPLOAD_SIZE),
            allow_client_class_creation: env.flag(vars::ALLOW_CLIENT_CLASS_CREATION),
            enable_anonymous_users: env.flag(vars::ENABLE_ANON_USERS),
            app_name: env.get_owned(vars::APP_NAME),
            files_adapter,
            push,
            verify_user_emails: email.verify_user_emails,
            email_adapter: email.adapter,
        })
    }

    /// Capture the process environment and assemble from it
    pub fn load_from_process(&self) -> Result<ServerConfig, ConfigError> {
        self.assemble(&EnvironmentMap::from_process())
    }

    /// `DATABASE_URI`, then `MONGOLAB_URI`, then a linked mongo container,
    /// then localhost
    fn resolve_database_uri(&self, env: &EnvironmentMap) -> (String, DatabaseUriSource) {
        if let Some(uri) = env.get(vars::DATABASE_URI) {
            return (uri.to_string(), DatabaseUriSource::Explicit);
        }
        if let Some(uri) = env.get(vars::MONGOLAB_URI) {
            return (uri.to_string(), DatabaseUriSource::LegacyAlias);
        }

        let discovered;
        let links = match &self.links {
            Some(links) => links,
            None => {
                discovered = DockerLinks::from_env(env);
                &discovered
            }
        };
        if let Some(uri) = links.mongo_uri() {
            warn!(uri = %uri, "DATABASE_URI not specified, using linked mongo container");
            return (uri, DatabaseUriSource::LinkedContainer);
        }

        warn!("DATABASE_URI not specified, falling back to localhost.");
        (DEFAULT_DATABASE_URI.to_string(), DatabaseUriSource::Default)
    }

    /// Serialize a redacted copy of `config` as YAML
    pub fn dump_yaml(config: &ServerConfig) -> Result<String> {
        serde_yaml::to_string(&config.redacted())
            .context("Failed to serialize resolved configuration")
    }
}

/// Accept an IP literal (IPv6 optionally bracketed) or an RFC 1123 hostname
fn parse_host(raw: &str) -> Option<String> {
    let unbracketed = raw
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(raw);
    if let Ok(ip) = unbracketed.parse::<IpAddr>() {
        return Some(ip.to_string());
    }

    let is_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    let name = raw.strip_suffix('.').unwrap_or(raw);
    if name.len() <= 253 && name.split('.').all(is_label) {
        Some(raw.to_string())
    } else {
        None
    }
}
