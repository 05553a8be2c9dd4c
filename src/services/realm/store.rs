//! Read-only realm configuration: realm name -> `AuthConfig`, plus the default realm.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-realm configuration. Only `service_url` drives routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub service_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl AuthConfig {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            audience: None,
            client_id: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read realm config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid realm config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("realm {0} is configured more than once")]
    DuplicateRealm(String),
    #[error("invalid service_url for realm {realm}: {source}")]
    InvalidServiceUrl {
        realm: String,
        #[source]
        source: url::ParseError,
    },
}

/// On-disk layout of the realm config file.
#[derive(Debug, Deserialize)]
struct RealmConfigFile {
    default_realm: String,
    #[serde(default)]
    realms: Vec<RealmEntry>,
}

#[derive(Debug, Deserialize)]
struct RealmEntry {
    name: String,
    #[serde(flatten)]
    config: AuthConfig,
}

/// Immutable lookup table shared by the inbound resolver and the outbound
/// interceptor.
///
/// Realm names keep their configuration order; that order is what clients see
/// in the `WWW-Authenticate` challenge. The default realm is not required to
/// be one of the configured realms.
#[derive(Debug, Clone)]
pub struct RealmConfigStore {
    default_realm: String,
    realms: Vec<String>,
    configs: HashMap<String, AuthConfig>,
}

impl RealmConfigStore {
    /// Build a store from `(realm, config)` pairs. A repeated realm keeps its
    /// first position and its last config.
    pub fn new<I, K>(default_realm: impl Into<String>, configs: I) -> Self
    where
        I: IntoIterator<Item = (K, AuthConfig)>,
        K: Into<String>,
    {
        let mut realms = Vec::new();
        let mut by_realm = HashMap::new();

        for (realm, config) in configs {
            let realm = realm.into();
            if by_realm.insert(realm.clone(), config).is_none() {
                realms.push(realm);
            }
        }

        Self {
            default_realm: default_realm.into(),
            realms,
            configs: by_realm,
        }
    }

    /// Parse the JSON config format:
    ///
    /// ```json
    /// { "default_realm": "public",
    ///   "realms": [ { "name": "public", "service_url": "http://pub" } ] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let file: RealmConfigFile = serde_json::from_str(json)?;

        let mut seen = HashSet::with_capacity(file.realms.len());
        for entry in &file.realms {
            if !seen.insert(entry.name.as_str()) {
                return Err(StoreError::DuplicateRealm(entry.name.clone()));
            }
            url::Url::parse(&entry.config.service_url).map_err(|source| {
                StoreError::InvalidServiceUrl {
                    realm: entry.name.clone(),
                    source,
                }
            })?;
        }

        Ok(Self::new(
            file.default_realm,
            file.realms.into_iter().map(|e| (e.name, e.config)),
        ))
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Replace the default realm, keeping the configured realms.
    pub fn with_default_realm(mut self, default_realm: impl Into<String>) -> Self {
        self.default_realm = default_realm.into();
        self
    }

    pub fn default_realm(&self) -> &str {
        &self.default_realm
    }

    pub fn get(&self, realm: &str) -> Option<&AuthConfig> {
        self.configs.get(realm)
    }

    pub fn realm_names(&self) -> impl Iterator<Item = &str> {
        self.realms.iter().map(String::as_str)
    }

    pub fn has_default_realm(&self) -> bool {
        self.configs.contains_key(&self.default_realm)
    }

    /// `WWW-Authenticate` value naming every configured realm:
    /// `Bearer realm="r1,r2"`.
    pub fn bearer_challenge(&self) -> String {
        format!("Bearer realm=\"{}\"", self.realms.join(","))
    }
}
