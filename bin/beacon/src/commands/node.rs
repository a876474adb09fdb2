//! Commands that talk to a beacon node: `beacon block`, `beacon balance` and `beacon chain-id`.

use super::print_json;
use beacon_primitives::BlockId;
use beacon_provider::{BeaconConfig, BeaconProvider, HttpBeaconClient, Network};
use clap::{Args, Parser};
use core::str::FromStr;
use std::path::PathBuf;
use tracing::info;

/// Connection flags shared by the node commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
#[command(next_help_heading = "Connection")]
pub(crate) struct ConnectArgs {
    /// Beacon node URI. Overrides the URI configured for the network.
    #[arg(long, value_name = "URI")]
    pub(crate) uri: Option<String>,

    /// Network name, e.g. `mainnet`, `goerli`, `local` or `mainnet-fork`.
    ///
    /// Defaults to the configured default network.
    #[arg(long, value_name = "NAME")]
    pub(crate) network: Option<String>,

    /// TOML config file.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
}

impl ConnectArgs {
    /// Resolves the network and node URI from the flags and the config file.
    pub(crate) fn resolve(&self) -> eyre::Result<(Network, String)> {
        let config = match &self.config {
            Some(path) => BeaconConfig::load(path)?,
            None => BeaconConfig::default(),
        };
        let name = self.network.clone().unwrap_or_else(|| config.default_network.clone());
        let uri = self.uri.clone().unwrap_or_else(|| config.uri_for(&name).to_owned());
        Ok((Network::new(name), uri))
    }

    /// Connects a provider to the resolved node.
    pub(crate) async fn connect(&self) -> eyre::Result<BeaconProvider<HttpBeaconClient>> {
        let (network, uri) = self.resolve()?;
        let client = HttpBeaconClient::new(&uri)?;
        info!(target: "beacon::cli", network = network.name(), "Connecting");

        let mut provider = BeaconProvider::new(network);
        provider.connect(client).await?;
        Ok(provider)
    }
}

/// Fetches a block and prints it as JSON.
#[derive(Debug, Parser)]
pub(crate) struct BlockCommand {
    /// Slot, block root, or tag (`head`, `finalized`, `genesis`, `latest`, `earliest`, `pending`).
    #[arg(value_name = "ID", value_parser = BlockId::from_str)]
    pub(crate) block_id: BlockId,

    #[command(flatten)]
    pub(crate) connect: ConnectArgs,
}

impl BlockCommand {
    pub(crate) async fn execute(self) -> eyre::Result<()> {
        let provider = self.connect.connect().await?;
        let block = provider.get_block(self.block_id).await?;
        print_json(&block)
    }
}

/// Prints the balance of a validator in Gwei.
#[derive(Debug, Parser)]
pub(crate) struct BalanceCommand {
    /// Validator public key or index.
    #[arg(value_name = "VALIDATOR")]
    pub(crate) validator: String,

    #[command(flatten)]
    pub(crate) connect: ConnectArgs,
}

impl BalanceCommand {
    pub(crate) async fn execute(self) -> eyre::Result<()> {
        let provider = self.connect.connect().await?;
        println!("{}", provider.get_balance(&self.validator).await?);
        Ok(())
    }
}

/// Prints the chain id reported by the node.
#[derive(Debug, Parser)]
pub(crate) struct ChainIdCommand {
    #[command(flatten)]
    pub(crate) connect: ConnectArgs,
}

impl ChainIdCommand {
    pub(crate) async fn execute(self) -> eyre::Result<()> {
        let provider = self.connect.connect().await?;
        println!("{}", provider.chain_id().await?);
        Ok(())
    }
}
