//! In-memory Beacon API for tests.

use crate::{
    client::{block_path, validator_path, DEPOSIT_CONTRACT_PATH, HEALTH_PATH, VERSION_PATH},
    BeaconApi, BeaconApiError, DEFAULT_URI,
};
use async_trait::async_trait;
use beacon_decoder::test_utils::{block_message, signed_block_response};
use beacon_primitives::BeaconBlockId;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::{collections::HashMap, sync::Arc};

/// Chain id reported by [`MockBeaconApi::lighthouse`].
pub const MOCK_CHAIN_ID: u64 = 131_277_322_940_537;

/// Deposit contract address reported by [`MockBeaconApi::lighthouse`].
pub const MOCK_DEPOSIT_CONTRACT: &str = "0x1Db3439a222C519ab44bb1144fC28167b4Fa6EE6";

#[derive(Debug)]
struct MockState {
    version: Value,
    health: u16,
    deposit_contract: Result<Value, (u16, Option<String>)>,
    blocks: HashMap<String, Value>,
    validators: HashMap<String, Value>,
    requests: Vec<String>,
}

/// Canned Beacon API responses.
///
/// Clones share their state, so responses can be changed after handing a clone to a provider.
#[derive(Debug, Clone)]
pub struct MockBeaconApi {
    endpoint: String,
    state: Arc<Mutex<MockState>>,
}

impl MockBeaconApi {
    /// A healthy Lighthouse node serving the slot 1 block under `1` and `0x1`.
    pub fn lighthouse() -> Self {
        let block = signed_block_response(block_message());
        let state = MockState {
            version: json!({"data": {"version": "Lighthouse/v0.1.5 (Linux x86_64)"}}),
            health: 200,
            deposit_contract: Ok(json!({
                "data": {"chain_id": MOCK_CHAIN_ID.to_string(), "address": MOCK_DEPOSIT_CONTRACT}
            })),
            blocks: HashMap::from([("1".to_owned(), block.clone()), ("0x1".to_owned(), block)]),
            validators: HashMap::new(),
            requests: Vec::new(),
        };
        Self { endpoint: DEFAULT_URI.to_owned(), state: Arc::new(Mutex::new(state)) }
    }

    /// Reports `version` as the client version.
    pub fn with_version(self, version: &str) -> Self {
        self.state.lock().version = json!({"data": {"version": version}});
        self
    }

    /// Answers the health endpoint with `status`.
    pub fn with_health(self, status: u16) -> Self {
        self.state.lock().health = status;
        self
    }

    /// Reports `chain_id` from the deposit contract endpoint.
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.state.lock().deposit_contract = Ok(json!({
            "data": {"chain_id": chain_id.to_string(), "address": MOCK_DEPOSIT_CONTRACT}
        }));
        self
    }

    /// Serves `response` for `GET /eth/v2/beacon/blocks/{block_id}`.
    pub fn with_block(self, block_id: &str, response: Value) -> Self {
        self.state.lock().blocks.insert(block_id.to_owned(), response);
        self
    }

    /// Serves a validator with the given balance.
    pub fn with_validator(self, validator_id: &str, balance: &str) -> Self {
        self.state.lock().validators.insert(
            validator_id.to_owned(),
            json!({"data": {"index": "1", "balance": balance, "status": "active_ongoing"}}),
        );
        self
    }

    /// Makes the deposit contract endpoint fail with `status` and an optional error message.
    pub fn set_deposit_contract_error(&self, status: u16, message: Option<&str>) {
        self.state.lock().deposit_contract = Err((status, message.map(str::to_owned)));
    }

    /// Every request path received so far.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    /// Number of requests received for `path`.
    pub fn count_requests(&self, path: &str) -> usize {
        self.state.lock().requests.iter().filter(|request| *request == path).count()
    }

    fn record(&self, path: &str) -> parking_lot::MutexGuard<'_, MockState> {
        let mut state = self.state.lock();
        state.requests.push(path.to_owned());
        state
    }
}

fn not_found(path: String) -> BeaconApiError {
    BeaconApiError::Status { path, status: 404, message: Some("NOT_FOUND".to_owned()) }
}

#[async_trait]
impl BeaconApi for MockBeaconApi {
    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    async fn get_version(&self) -> Result<Value, BeaconApiError> {
        Ok(self.record(VERSION_PATH).version.clone())
    }

    async fn get_health(&self) -> Result<u16, BeaconApiError> {
        Ok(self.record(HEALTH_PATH).health)
    }

    async fn get_deposit_contract(&self) -> Result<Value, BeaconApiError> {
        match &self.record(DEPOSIT_CONTRACT_PATH).deposit_contract {
            Ok(response) => Ok(response.clone()),
            Err((status, message)) => Err(BeaconApiError::Status {
                path: DEPOSIT_CONTRACT_PATH.to_owned(),
                status: *status,
                message: message.clone(),
            }),
        }
    }

    async fn get_block(&self, block_id: &BeaconBlockId) -> Result<Value, BeaconApiError> {
        let path = block_path(block_id);
        let state = self.record(&path);
        state.blocks.get(&block_id.to_string()).cloned().ok_or_else(|| not_found(path))
    }

    async fn get_validator(&self, validator_id: &str) -> Result<Value, BeaconApiError> {
        let path = validator_path(validator_id);
        let state = self.record(&path);
        state.validators.get(validator_id).cloned().ok_or_else(|| not_found(path))
    }
}
