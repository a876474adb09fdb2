//! Read-only provider on top of a Beacon node.
//!
//! [`BeaconProvider`] talks to a node through a [`BeaconApi`] implementation, by default
//! [`HttpBeaconClient`], and decodes the blocks it serves with a
//! [`BeaconBlockDecoder`](beacon_decoder::BeaconBlockDecoder).
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use beacon_provider::{BeaconConfig, BeaconProvider, HttpBeaconClient, Network};
//!
//! let config = BeaconConfig::default();
//! let mut provider = BeaconProvider::new(Network::local());
//! provider.connect(HttpBeaconClient::new(config.uri_for("local"))?).await?;
//! let block = provider.get_block("latest").await?;
//! # let _ = block;
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::{
    block_path, clean_uri, validator_path, BeaconApi, BeaconApiError, HttpBeaconClient,
    DEFAULT_TIMEOUT, DEPOSIT_CONTRACT_PATH, HEALTH_PATH, VERSION_PATH,
};

mod config;
pub use config::{
    network_info, BeaconConfig, ConfigError, Network, NetworkConfig, NetworkInfo,
    ADHOC_NETWORK_NAME, DEFAULT_URI, FORK_SUFFIX, LOCAL_NETWORK_NAME, NETWORKS,
};

mod error;
pub use error::ProviderError;

mod provider;
pub use provider::{BeaconProvider, BlockRanges, DEFAULT_BLOCK_PAGE_SIZE};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
