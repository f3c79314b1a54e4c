//! Remote contract client seam.
//!
//! The dispatcher never talks to a chain directly. It is handed something
//! implementing [`ContractClient`], which owns transport, signing, gas
//! pricing and timeouts. Production code plugs a chain SDK in here; tests
//! plug in a recording mock.

#[cfg(test)]
pub(crate) mod mock;
pub mod preview;

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Coin;

pub use preview::{PlannedCall, PreviewClient};

/// Address and code hash identifying a deployed contract
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractRef {
    /// Bech32 contract address
    pub address: String,
    /// Hex hash of the contract's wasm code
    pub code_hash: String,
}

impl ContractRef {
    /// Create a contract reference
    #[must_use]
    pub fn new(address: impl Into<String>, code_hash: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            code_hash: code_hash.into(),
        }
    }
}

/// A state-changing contract execution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Target contract
    pub contract: ContractRef,
    /// Signing wallet address
    pub sender: String,
    /// Execute message
    pub msg: Value,
    /// Funds transferred with the message
    pub sent_funds: Vec<Coin>,
    /// Gas ceiling for the transaction
    pub gas_limit: u64,
}

/// Result of a broadcast transaction.
///
/// A transaction that was included but failed on-chain still produces a
/// response, with a non-zero `code` and the reason in `raw_log`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TxResponse {
    /// Result code, 0 on success
    pub code: u32,
    /// Module that produced a non-zero code
    #[serde(default)]
    pub codespace: String,
    /// Transaction hash (hex)
    #[serde(default)]
    pub tx_hash: String,
    /// Block height the transaction was included at
    #[serde(default)]
    pub height: u64,
    /// Raw log or error text
    #[serde(default)]
    pub raw_log: String,
    /// Gas requested
    #[serde(default)]
    pub gas_wanted: u64,
    /// Gas consumed
    #[serde(default)]
    pub gas_used: u64,
    /// Decoded contract response data, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TxResponse {
    /// Whether the transaction executed successfully
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Errors raised by a contract client.
///
/// Each variant displays only the underlying message, so a failure
/// surfaced to a caller reads exactly as the client reported it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network or node unreachable
    #[error("{0}")]
    Transport(String),
    /// Node or contract refused the request
    #[error("{0}")]
    Rejected(String),
    /// Response could not be decoded
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// Capability to query and execute a remote contract
pub trait ContractClient: Send + Sync {
    /// Run a read-only query. No gas, no sender.
    fn query(
        &self,
        contract: &ContractRef,
        payload: &Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    /// Sign and broadcast an execute message
    fn execute(
        &self,
        request: ExecuteRequest,
    ) -> impl Future<Output = Result<TxResponse, ClientError>> + Send;
}

impl<C: ContractClient> ContractClient for &C {
    fn query(
        &self,
        contract: &ContractRef,
        payload: &Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send {
        (**self).query(contract, payload)
    }

    fn execute(
        &self,
        request: ExecuteRequest,
    ) -> impl Future<Output = Result<TxResponse, ClientError>> + Send {
        (**self).execute(request)
    }
}

impl<C: ContractClient> ContractClient for Arc<C> {
    fn query(
        &self,
        contract: &ContractRef,
        payload: &Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send {
        (**self).query(contract, payload)
    }

    fn execute(
        &self,
        request: ExecuteRequest,
    ) -> impl Future<Output = Result<TxResponse, ClientError>> + Send {
        (**self).execute(request)
    }
}
