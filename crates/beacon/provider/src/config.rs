//! Network registry and TOML configuration.

use crate::ProviderError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Beacon node URI used when neither the config nor the caller names one.
pub const DEFAULT_URI: &str = "http://localhost:5052";

/// Name of the local development network.
pub const LOCAL_NETWORK_NAME: &str = "local";

/// Name of a network created on the fly for an arbitrary URI.
pub const ADHOC_NETWORK_NAME: &str = "adhoc";

/// Suffix of networks forked from a live network.
pub const FORK_SUFFIX: &str = "-fork";

/// Static description of a live network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Network name.
    pub name: &'static str,
    /// Execution chain id.
    pub chain_id: u64,
    /// Network id.
    pub network_id: u64,
}

/// Known live networks.
pub const NETWORKS: &[NetworkInfo] = &[
    NetworkInfo { name: "mainnet", chain_id: 1, network_id: 1 },
    NetworkInfo { name: "goerli", chain_id: 5, network_id: 5 },
];

/// Looks up a live network by name.
pub fn network_info(name: &str) -> Option<&'static NetworkInfo> {
    NETWORKS.iter().find(|info| info.name == name)
}

/// The network a provider is connected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    name: String,
    chain_id: Option<u64>,
}

impl Network {
    /// Creates a network, taking the chain id from [`NETWORKS`] if the name is known.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let chain_id = network_info(&name).map(|info| info.chain_id);
        Self { name, chain_id }
    }

    /// The local development network.
    pub fn local() -> Self {
        Self::new(LOCAL_NETWORK_NAME)
    }

    /// Network name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry chain id, `None` for networks that are not live.
    pub const fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Returns `true` unless this is the local, an adhoc or a forked network.
    pub fn is_live(&self) -> bool {
        self.name != LOCAL_NETWORK_NAME &&
            self.name != ADHOC_NETWORK_NAME &&
            !self.name.ends_with(FORK_SUFFIX)
    }

    /// Checks the chain id reported by a node against the registry.
    ///
    /// Only live networks are checked.
    pub fn verify_chain_id(&self, chain_id: u64) -> Result<(), ProviderError> {
        match self.chain_id {
            Some(expected) if self.is_live() && expected != chain_id => {
                Err(ProviderError::ChainIdMismatch {
                    network: self.name.clone(),
                    expected,
                    actual: chain_id,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Per-network settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Confirmations to wait for before treating a block as final.
    pub required_confirmations: u64,
    /// Expected seconds between blocks.
    pub block_time: u64,
    /// Provider used when none is requested.
    pub default_provider: Option<String>,
    /// Beacon node URI.
    pub uri: Option<String>,
}

impl NetworkConfig {
    /// Defaults for a live network: 7 confirmations, 12 second slots.
    pub const fn live() -> Self {
        Self { required_confirmations: 7, block_time: 12, default_provider: None, uri: None }
    }

    /// Defaults for the local network.
    pub fn local() -> Self {
        Self { default_provider: Some("test".to_owned()), ..Default::default() }
    }
}

/// Beacon configuration, usually read from a TOML file.
///
/// ```toml
/// default_network = "mainnet"
///
/// [mainnet]
/// uri = "http://beacon.example:5052"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    /// Mainnet settings.
    pub mainnet: NetworkConfig,
    /// Goerli settings.
    pub goerli: NetworkConfig,
    /// Local network settings.
    pub local: NetworkConfig,
    /// Network used when none is requested.
    pub default_network: String,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            mainnet: NetworkConfig::live(),
            goerli: NetworkConfig::live(),
            local: NetworkConfig::local(),
            default_network: LOCAL_NETWORK_NAME.to_owned(),
        }
    }
}

impl BeaconConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&contents)
    }

    /// Settings for `name`. Forked networks share the settings of the network they fork.
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        match name.strip_suffix(FORK_SUFFIX).unwrap_or(name) {
            "mainnet" => Some(&self.mainnet),
            "goerli" => Some(&self.goerli),
            LOCAL_NETWORK_NAME => Some(&self.local),
            _ => None,
        }
    }

    /// Beacon node URI configured for `name`, or [`DEFAULT_URI`].
    pub fn uri_for(&self, name: &str) -> &str {
        self.network(name).and_then(|network| network.uri.as_deref()).unwrap_or(DEFAULT_URI)
    }
}

/// Error returned when loading a [`BeaconConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file `{}`: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for a [`BeaconConfig`].
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}
