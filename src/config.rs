//! Configuration: JSON file, then environment, then CLI flags
//!
//! The default file lives at `~/.config/mintlist/config.json`. Recognised
//! environment variables:
//!
//! - `MINTLIST_ALLOWLIST`: path to the allowlist dataset
//! - `MINTLIST_EXPECTED_ROOT`: pinned merkle root (hex)
//! - `MINTLIST_NETWORK`: default network name
//! - `MINTLIST_DEPLOYMENTS`: path to a Hardhat deployment export

use crate::model::Hash;
use crate::network::{ContractRegistry, Network};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_NETWORK: &str = "rinkeby";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Allowlist dataset (.json or .csv)
    pub allowlist: Option<PathBuf>,
    /// Root the built tree must match before proofs are served
    pub expected_root: Option<Hash>,
    /// Network used when no wallet chain id is known
    pub default_network: String,
    /// Hardhat deployment export for local chains
    pub deployments: Option<PathBuf>,
    /// network name → contract name → address
    pub contracts: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            allowlist: None,
            expected_root: None,
            default_network: DEFAULT_NETWORK.to_string(),
            deployments: None,
            contracts: BTreeMap::new(),
        }
    }
}

impl Config {
    /// `~/.config/mintlist/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("mintlist").join("config.json"))
    }

    /// Read a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load `path` if given (it must exist), otherwise the default file if
    /// present, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Config::load(p),
            None => match Config::default_path() {
                Ok(p) if p.exists() => Config::load(p),
                _ => Ok(Config::default()),
            },
        }
    }

    /// Apply `MINTLIST_*` overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = lookup("MINTLIST_ALLOWLIST") {
            self.allowlist = Some(PathBuf::from(path));
        }
        if let Some(root) = lookup("MINTLIST_EXPECTED_ROOT") {
            self.expected_root = Some(parse_root(&root)?);
        }
        if let Some(network) = lookup("MINTLIST_NETWORK") {
            self.default_network = network;
        }
        if let Some(path) = lookup("MINTLIST_DEPLOYMENTS") {
            self.deployments = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    pub fn network(&self) -> Result<Network> {
        self.default_network.parse()
    }

    /// Allowlist path, or a config error if none was configured
    pub fn allowlist_path(&self) -> Result<&Path> {
        self.allowlist
            .as_deref()
            .ok_or_else(|| Error::Config("No allowlist dataset configured".into()))
    }

    /// Pinned root, or a config error if none was configured
    pub fn pinned_root(&self) -> Result<Hash> {
        self.expected_root
            .ok_or_else(|| Error::Config("No expected merkle root configured".into()))
    }

    /// Contract table from `contracts`, merged with `deployments` if set
    pub fn registry(&self) -> Result<ContractRegistry> {
        let mut registry = ContractRegistry::from_addresses(&self.contracts)?;
        if let Some(path) = &self.deployments {
            registry.load_deployments(path)?;
        }
        Ok(registry)
    }
}

/// Parse a pinned root given as hex
pub fn parse_root(s: &str) -> Result<Hash> {
    Hash::from_hex(s).map_err(|e| Error::Config(format!("Invalid merkle root {:?}: {}", s, e)))
}
