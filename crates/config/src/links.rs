//! Docker container link discovery
//!
//! Linked containers show up as `<ALIAS>_PORT=tcp://<host>:<port>` in the
//! environment. Only that primary form is read.

use crate::env::EnvironmentMap;
use std::collections::BTreeMap;

/// A single linked container endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLink {
    pub protocol: String,
    pub hostname: String,
    pub port: u16,
}

/// Linked containers keyed by lowercase alias
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockerLinks {
    links: BTreeMap<String, ContainerLink>,
}

impl DockerLinks {
    pub fn from_env(env: &EnvironmentMap) -> Self {
        let links = env
            .iter()
            .filter_map(|(name, value)| {
                let alias = name.strip_suffix("_PORT")?;
                if alias.is_empty() {
                    return None;
                }
                Some((alias.to_lowercase(), parse_link(value)?))
            })
            .collect();

        Self { links }
    }

    pub fn insert(&mut self, alias: impl Into<String>, link: ContainerLink) {
        self.links.insert(alias.into(), link);
    }

    pub fn get(&self, alias: &str) -> Option<&ContainerLink> {
        self.links.get(alias)
    }

    /// Database URI for a linked `mongo` container
    pub fn mongo_uri(&self) -> Option<String> {
        self.get("mongo")
            .map(|link| format!("mongodb://{}:{}/dev", link.hostname, link.port))
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

fn parse_link(value: &str) -> Option<ContainerLink> {
    let (protocol, address) = value.split_once("://")?;
    if protocol != "tcp" && protocol != "udp" {
        return None;
    }
    let (hostname, port) = address.rsplit_once(':')?;
    if hostname.is_empty() {
        return None;
    }

    Some(ContainerLink {
        protocol: protocol.to_string(),
        hostname: hostname.to_string(),
        port: port.parse().ok()?,
    })
}
