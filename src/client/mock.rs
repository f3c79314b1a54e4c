//! Recording mock client for tests.

use std::sync::Mutex;

use serde_json::Value;

use super::{ClientError, ContractClient, ContractRef, ExecuteRequest, TxResponse};

/// A call observed by [`MockClient`]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RecordedCall {
    Query { contract: ContractRef, payload: Value },
    Execute(ExecuteRequest),
}

/// Deterministic client returning canned responses and recording every call
#[derive(Debug, Default)]
pub(crate) struct MockClient {
    query_response: Value,
    tx_response: TxResponse,
    failure: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_query_response(response: Value) -> Self {
        Self {
            query_response: response,
            ..Self::default()
        }
    }

    pub(crate) fn with_tx_response(response: TxResponse) -> Self {
        Self {
            tx_response: response,
            ..Self::default()
        }
    }

    /// Every call fails with a transport error carrying `message`
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn last_execute(&self) -> Option<ExecuteRequest> {
        self.calls().into_iter().rev().find_map(|c| match c {
            RecordedCall::Execute(req) => Some(req),
            RecordedCall::Query { .. } => None,
        })
    }

    pub(crate) fn last_query(&self) -> Option<Value> {
        self.calls().into_iter().rev().find_map(|c| match c {
            RecordedCall::Query { payload, .. } => Some(payload),
            RecordedCall::Execute(_) => None,
        })
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ContractClient for MockClient {
    async fn query(&self, contract: &ContractRef, payload: &Value) -> Result<Value, ClientError> {
        self.record(RecordedCall::Query {
            contract: contract.clone(),
            payload: payload.clone(),
        });
        match &self.failure {
            Some(message) => Err(ClientError::Transport(message.clone())),
            None => Ok(self.query_response.clone()),
        }
    }

    async fn execute(&self, request: ExecuteRequest) -> Result<TxResponse, ClientError> {
        self.record(RecordedCall::Execute(request));
        match &self.failure {
            Some(message) => Err(ClientError::Transport(message.clone())),
            None => Ok(self.tx_response.clone()),
        }
    }
}
