use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::normalize::{EntryType, Visibility};
use crate::path::normalize_root;

pub const DEFAULT_HOST: &str = "http://127.0.0.1:5001/api/v0";
pub const DEFAULT_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Connection settings for an [`Adapter`](crate::Adapter).
///
/// `host` is the RPC base (including `/api/v0`), `root` the MFS directory
/// every logical path lives under, and `gateway` the prefix content hashes
/// are appended to when building public URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: Url,
    #[serde(deserialize_with = "deserialize_root")]
    pub root: String,
    pub gateway: String,
    /// Modes applied by `set_visibility`. Without a table the operation is
    /// refused rather than guessing mode bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionTable>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Url::parse(DEFAULT_HOST).expect("default host is a valid url"),
            root: String::new(),
            gateway: DEFAULT_GATEWAY.to_string(),
            permissions: None,
        }
    }
}

impl Config {
    pub fn new(host: Url, root: &str, gateway: impl Into<String>) -> Self {
        Self {
            host,
            root: normalize_root(root),
            gateway: gateway.into(),
            permissions: None,
        }
    }

    pub fn with_host(mut self, host: Url) -> Self {
        self.host = host;
        self
    }

    pub fn with_root(mut self, root: &str) -> Self {
        self.root = normalize_root(root);
        self
    }

    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = gateway.into();
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionTable) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn deserialize_root<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|root| normalize_root(&root))
}

/// Octal modes for one entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModePair {
    pub public: u32,
    pub private: u32,
}

impl ModePair {
    pub fn mode(&self, visibility: Visibility) -> u32 {
        match visibility {
            Visibility::Public => self.public,
            Visibility::Private => self.private,
        }
    }
}

/// `{type, visibility} -> mode` lookup supplied by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTable {
    pub file: ModePair,
    pub dir: ModePair,
}

impl PermissionTable {
    pub fn mode(&self, entry_type: EntryType, visibility: Visibility) -> u32 {
        match entry_type {
            EntryType::File => self.file.mode(visibility),
            EntryType::Dir => self.dir.mode(visibility),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_stripped_of_slashes() {
        let config = Config::default().with_root("//apps/uploads/");
        assert_eq!(config.root, "apps/uploads");
    }

    #[test]
    fn test_from_toml_normalizes_root() {
        let config = Config::from_toml(
            r#"
            host = "http://10.0.0.2:5001/api/v0"
            root = "/site"
            gateway = "https://ipfs.example/ipfs/"
            "#,
        )
        .unwrap();

        assert_eq!(config.host.as_str(), "http://10.0.0.2:5001/api/v0");
        assert_eq!(config.root, "site");
        assert_eq!(config.gateway, "https://ipfs.example/ipfs/");
        assert!(config.permissions.is_none());
    }

    #[test]
    fn test_from_toml_defaults_missing_fields() {
        let config = Config::from_toml("root = \"data\"").unwrap();
        assert_eq!(config.host.as_str(), DEFAULT_HOST);
        assert_eq!(config.gateway, DEFAULT_GATEWAY);
    }

    #[test]
    fn test_permission_table_lookup() {
        let config = Config::from_toml(
            r#"
            [permissions.file]
            public = 0o644
            private = 0o600

            [permissions.dir]
            public = 0o755
            private = 0o700
            "#,
        )
        .unwrap();

        let table = config.permissions.unwrap();
        assert_eq!(table.mode(EntryType::File, Visibility::Public), 0o644);
        assert_eq!(table.mode(EntryType::Dir, Visibility::Private), 0o700);
    }

    #[test]
    fn test_toml_round_trip_keeps_permissions() {
        let config = Config::default().with_permissions(PermissionTable {
            file: ModePair {
                public: 0o644,
                private: 0o600,
            },
            dir: ModePair {
                public: 0o755,
                private: 0o700,
            },
        });

        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
