//! Networks and per-network contract addresses
//!
//! Contract addresses are resolved through an explicit `(network, name)`
//! table. Anything that is not in the table is an error, never a silent
//! empty value.

use crate::model::parse_address;
use crate::{Error, Result};
use alloy_primitives::Address;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Networks the mint frontend can be pointed at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Network {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Kovan,
    Sepolia,
    Localhost,
}

impl Network {
    pub const ALL: [Network; 7] = [
        Network::Mainnet,
        Network::Ropsten,
        Network::Rinkeby,
        Network::Goerli,
        Network::Kovan,
        Network::Sepolia,
        Network::Localhost,
    ];

    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Ropsten => 3,
            Network::Rinkeby => 4,
            Network::Goerli => 5,
            Network::Kovan => 42,
            Network::Sepolia => 11155111,
            Network::Localhost => 31337,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Ropsten => "ropsten",
            Network::Rinkeby => "rinkeby",
            Network::Goerli => "goerli",
            Network::Kovan => "kovan",
            Network::Sepolia => "sepolia",
            Network::Localhost => "localhost",
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Result<Self> {
        Network::ALL
            .into_iter()
            .find(|n| n.chain_id() == chain_id)
            .ok_or_else(|| Error::UnknownNetwork(format!("chain id {}", chain_id)))
    }

    /// Local development chain (contracts come from the deployment export)
    pub fn is_local(self) -> bool {
        self == Network::Localhost
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "homestead" | "ethereum" => return Ok(Network::Mainnet),
            "hardhat" => return Ok(Network::Localhost),
            _ => {}
        }
        Network::ALL
            .into_iter()
            .find(|n| n.name() == lowered)
            .ok_or_else(|| Error::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One network entry of a Hardhat `export-all` deployment file
#[derive(Debug, Deserialize)]
pub struct ChainDeployment {
    pub name: String,
    pub contracts: BTreeMap<String, DeployedContract>,
}

/// A deployed contract; the ABI and other fields are ignored
#[derive(Debug, Deserialize)]
pub struct DeployedContract {
    pub address: String,
}

/// The whole export: chain id → deployments on that chain
pub type DeploymentExport = BTreeMap<String, Vec<ChainDeployment>>;

/// Statically validated `(network, contract name) → address` table
#[derive(Clone, Debug, Default)]
pub struct ContractRegistry {
    contracts: BTreeMap<(Network, String), Address>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `network name → contract name → address` strings.
    ///
    /// Every network and every address is validated here, so lookups later
    /// only fail for names that are genuinely absent.
    pub fn from_addresses(table: &BTreeMap<String, BTreeMap<String, String>>) -> Result<Self> {
        let mut registry = ContractRegistry::new();
        for (network_name, contracts) in table {
            let network: Network = network_name.parse()?;
            for (contract, address) in contracts {
                registry.insert(network, contract.clone(), parse_address(address)?);
            }
        }
        Ok(registry)
    }

    pub fn insert(&mut self, network: Network, contract: impl Into<String>, address: Address) {
        self.contracts.insert((network, contract.into()), address);
    }

    /// Merge a Hardhat deployment export read from `path`
    pub fn load_deployments(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let export: DeploymentExport = serde_json::from_str(&content)?;
        let added = self.merge_deployments(&export)?;
        debug!(path = %path.display(), contracts = added, "loaded deployment export");
        Ok(added)
    }

    /// Merge an already parsed deployment export, returning how many
    /// contract addresses were added
    pub fn merge_deployments(&mut self, export: &DeploymentExport) -> Result<usize> {
        let mut added = 0;
        for (chain_id, deployments) in export {
            let id: u64 = chain_id
                .parse()
                .map_err(|_| Error::UnknownNetwork(format!("chain id {:?}", chain_id)))?;
            let network = Network::from_chain_id(id)?;
            for deployment in deployments {
                for (contract, deployed) in &deployment.contracts {
                    self.insert(network, contract.clone(), parse_address(&deployed.address)?);
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    /// Address of `contract` on `network`
    pub fn resolve(&self, contract: &str, network: Network) -> Result<Address> {
        self.contracts
            .get(&(network, contract.to_string()))
            .copied()
            .ok_or_else(|| Error::UnknownContract {
                contract: contract.to_string(),
                network: network.to_string(),
            })
    }

    /// Resolve using the wallet's chain id, or `default` when no wallet is
    /// connected
    pub fn resolve_chain(
        &self,
        contract: &str,
        chain_id: Option<u64>,
        default: Network,
    ) -> Result<Address> {
        let network = match chain_id {
            Some(id) => Network::from_chain_id(id)?,
            None => default,
        };
        self.resolve(contract, network)
    }

    /// All contracts known on `network`, sorted by name
    pub fn contracts_on(&self, network: Network) -> Vec<(&str, Address)> {
        self.contracts
            .iter()
            .filter(|((n, _), _)| *n == network)
            .map(|((_, name), address)| (name.as_str(), *address))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
