use crate::{BeaconApi, Network, ProviderError};
use beacon_decoder::{BeaconBlockDecoder, EthereumBlockDecoder, ExecutionBlockDecoder};
use beacon_primitives::{quantity, to_beacon_identifier, BeaconBlock, BlockId};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Page size of [`BeaconProvider::block_ranges`] when none is given.
pub const DEFAULT_BLOCK_PAGE_SIZE: u64 = 100;

/// Consensus clients recognised from their version string.
const KNOWN_CLIENTS: [(&str, &str); 5] = [
    ("lighthouse", "Lighthouse"),
    ("prysm", "Prysm"),
    ("lodestar", "Lodestar"),
    ("nimbus", "Nimbus"),
    ("teku", "Teku"),
];

const CHAIN_ID_ERROR: &str = "Error getting chain id.";

/// Read-only provider on top of a Beacon node.
///
/// Blocks are decoded with a [`BeaconBlockDecoder`]; slots play the role of block numbers.
#[derive(Debug)]
pub struct BeaconProvider<C, D = EthereumBlockDecoder> {
    network: Network,
    client: Option<C>,
    decoder: BeaconBlockDecoder<D>,
    /// Cleared on connect and disconnect.
    client_version: Mutex<Option<String>>,
    /// Only used for networks that are not live.
    cached_chain_id: Mutex<Option<u64>>,
    block_page_size: u64,
}

impl<C> BeaconProvider<C> {
    /// Creates a disconnected provider for `network` decoding Ethereum payloads.
    pub fn new(network: Network) -> Self {
        Self::with_decoder(network, BeaconBlockDecoder::ethereum())
    }
}

impl<C, D> BeaconProvider<C, D> {
    /// Creates a disconnected provider using `decoder`.
    pub fn with_decoder(network: Network, decoder: BeaconBlockDecoder<D>) -> Self {
        Self {
            network,
            client: None,
            decoder,
            client_version: Mutex::new(None),
            cached_chain_id: Mutex::new(None),
            block_page_size: DEFAULT_BLOCK_PAGE_SIZE,
        }
    }

    /// Sets the default page size of [`Self::block_ranges`].
    pub const fn with_block_page_size(mut self, block_page_size: u64) -> Self {
        self.block_page_size = block_page_size;
        self
    }

    /// The network this provider serves.
    pub const fn network(&self) -> &Network {
        &self.network
    }

    /// The connected client.
    pub fn beacon(&self) -> Result<&C, ProviderError> {
        self.client.as_ref().ok_or(ProviderError::NotConnected)
    }

    /// Drops the client and every cached value.
    pub fn disconnect(&mut self) {
        self.client = None;
        *self.client_version.get_mut() = None;
        *self.cached_chain_id.get_mut() = None;
    }

    /// Splits the inclusive slot range `start..=stop` into pages of at most `page` slots,
    /// defaulting to the provider's page size.
    pub fn block_ranges(&self, start: u64, stop: u64, page: Option<u64>) -> BlockRanges {
        BlockRanges::new(start, stop, page.unwrap_or(self.block_page_size))
    }
}

impl<C, D> BeaconProvider<C, D>
where
    C: BeaconApi,
    D: ExecutionBlockDecoder,
{
    /// Connects to the node behind `client`.
    ///
    /// Fails if the node is not healthy or its chain id cannot be read or does not match a live
    /// network. The provider is left disconnected on failure.
    pub async fn connect(&mut self, client: C) -> Result<(), ProviderError> {
        *self.client_version.get_mut() = None;
        self.client = Some(client);
        if let Err(err) = self.check_connection().await {
            self.disconnect();
            return Err(err)
        }
        Ok(())
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        let client = self.beacon()?;
        let endpoint = client.endpoint();
        if !self.is_connected().await {
            return Err(ProviderError::NoNodeFound(endpoint))
        }

        let version = self.client_version().await;
        let lowercase = version.to_lowercase();
        match KNOWN_CLIENTS.iter().find(|(id, _)| lowercase.contains(id)) {
            Some((_, name)) => {
                info!(
                    target: "beacon::provider",
                    uri = %endpoint,
                    "Connecting to existing {name} node"
                );
            }
            None => {
                let name = version.split('/').next().unwrap_or_default();
                warn!(
                    target: "beacon::provider",
                    uri = %endpoint,
                    "Connecting to non-Lighthouse client '{name}'"
                );
            }
        }

        let response = client.get_deposit_contract().await.map_err(|err| {
            ProviderError::ChainId(err.node_message().unwrap_or(CHAIN_ID_ERROR).to_owned())
        })?;
        let chain_id = deposit_chain_id(&response)
            .ok_or_else(|| ProviderError::ChainId(CHAIN_ID_ERROR.to_owned()))?;
        debug!(
            target: "beacon::provider",
            chain_id,
            network = self.network.name(),
            "Read chain id"
        );
        self.network.verify_chain_id(chain_id)
    }

    /// Client name and version as reported by the node, cached until the next connect.
    ///
    /// Empty if disconnected or the node does not report a version.
    pub async fn client_version(&self) -> String {
        let Some(client) = self.client.as_ref() else { return String::new() };
        if let Some(version) = self.client_version.lock().clone() {
            return version
        }

        let version = match client.get_version().await {
            Ok(response) => {
                response.pointer("/data/version").and_then(Value::as_str).map(str::to_owned)
            }
            Err(err) => {
                debug!(target: "beacon::provider", %err, "Failed to read client version");
                None
            }
        };
        let Some(version) = version else { return String::new() };
        *self.client_version.lock() = Some(version.clone());
        version
    }

    /// Returns `true` if a client is connected and its node is synced (200) or syncing (206).
    pub async fn is_connected(&self) -> bool {
        let Some(client) = self.client.as_ref() else { return false };
        matches!(client.get_health().await, Ok(200 | 206))
    }

    /// Chain id of the connected node.
    ///
    /// The deposit contract's chain id is preferred. Live networks fall back to the registry
    /// chain id if the node cannot answer; other networks cache the first answer.
    pub async fn chain_id(&self) -> Result<u64, ProviderError> {
        let client = self.beacon()?;
        let fallback = if self.network.is_live() {
            self.network.chain_id()
        } else if let Some(chain_id) = *self.cached_chain_id.lock() {
            return Ok(chain_id)
        } else {
            None
        };

        match client.get_deposit_contract().await {
            Ok(response) => {
                if let Some(chain_id) = deposit_chain_id(&response) {
                    *self.cached_chain_id.lock() = Some(chain_id);
                    return Ok(chain_id)
                }
            }
            Err(err) => return fallback.ok_or(ProviderError::Api(err)),
        }
        fallback.ok_or(ProviderError::NotConnected)
    }

    /// Fetches and decodes a block.
    ///
    /// Execution-style tags are translated first, so `latest` fetches the head block.
    pub async fn get_block(
        &self,
        block_id: impl Into<BlockId>,
    ) -> Result<BeaconBlock, ProviderError> {
        let block_id = block_id.into();
        let client = self.beacon()?;
        let beacon_id = to_beacon_identifier(block_id.clone());
        debug!(target: "beacon::provider", %block_id, %beacon_id, "Fetching block");

        let response = match client.get_block(&beacon_id).await {
            Ok(response) => response,
            Err(source) => {
                return Err(ProviderError::BlockNotFound { block_id, source: Some(source) })
            }
        };
        if response.pointer("/data/message").is_none_or(Value::is_null) {
            return Err(ProviderError::BlockNotFound { block_id, source: None })
        }
        Ok(self.decoder.decode_block_response(response)?)
    }

    /// Balance in Gwei of the validator with the given public key or index.
    pub async fn get_balance(&self, validator: &str) -> Result<u64, ProviderError> {
        let not_found = |source| ProviderError::ValidatorNotFound {
            address: validator.to_owned(),
            source,
        };
        let response =
            self.beacon()?.get_validator(validator).await.map_err(|err| not_found(Some(err)))?;
        let balance = response.pointer("/data/balance").ok_or_else(|| not_found(None))?;
        Ok(quantity::parse_u64("data.balance", balance)?)
    }
}

/// Reads `data.chain_id` of a deposit contract response.
fn deposit_chain_id(response: &Value) -> Option<u64> {
    let chain_id = response.pointer("/data/chain_id")?;
    quantity::parse_u64("data.chain_id", chain_id).ok()
}

/// Iterator over inclusive `(start, stop)` slot pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRanges {
    next: Option<u64>,
    stop: u64,
    page: u64,
}

impl BlockRanges {
    /// Pages of `page` slots over `start..=stop`. A zero page size is treated as one.
    pub fn new(start: u64, stop: u64, page: u64) -> Self {
        Self { next: Some(start), stop, page: page.max(1) }
    }
}

impl Iterator for BlockRanges {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next.filter(|start| *start <= self.stop)?;
        let end = start.saturating_add(self.page - 1).min(self.stop);
        self.next = end.checked_add(1);
        Some((start, end))
    }
}
