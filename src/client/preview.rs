//! Offline client that records calls instead of sending them.
//!
//! Used by the `plan` command to show exactly what a dispatch would send,
//! after validation and with the configured gas ceiling applied.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use super::{ClientError, ContractClient, ContractRef, ExecuteRequest, TxResponse};

/// A call captured by [`PreviewClient`]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedCall {
    /// Read-only query
    Query {
        /// Target contract
        contract: ContractRef,
        /// Query message
        payload: Value,
    },
    /// Transaction
    Execute(ExecuteRequest),
}

/// Client that accepts every call and remembers it
#[derive(Debug, Default)]
pub struct PreviewClient {
    planned: Mutex<Vec<PlannedCall>>,
}

impl PreviewClient {
    /// Create an empty preview client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the calls captured so far
    #[must_use]
    pub fn take(&self) -> Vec<PlannedCall> {
        match self.planned.lock() {
            Ok(mut planned) => std::mem::take(&mut *planned),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn push(&self, call: PlannedCall) {
        match self.planned.lock() {
            Ok(mut planned) => planned.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
    }
}

impl ContractClient for PreviewClient {
    async fn query(&self, contract: &ContractRef, payload: &Value) -> Result<Value, ClientError> {
        self.push(PlannedCall::Query {
            contract: contract.clone(),
            payload: payload.clone(),
        });
        Ok(Value::Null)
    }

    async fn execute(&self, request: ExecuteRequest) -> Result<TxResponse, ClientError> {
        let gas_wanted = request.gas_limit;
        self.push(PlannedCall::Execute(request));
        Ok(TxResponse {
            gas_wanted,
            ..TxResponse::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionKind, ActionRequest};
    use crate::dispatch::Dispatcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_preview_captures_execute() {
        let client = PreviewClient::new();
        let contract = ContractRef::new("secret1contract", "9a8b7c");
        let request = ActionRequest::new(&contract).sender("secret1abc").code("MYKEY");

        let outcome = Dispatcher::new(&client)
            .with_gas_limit(120_000)
            .dispatch(&request, ActionKind::TryBuyCode)
            .await;
        assert!(outcome.tx_succeeded());

        let planned = client.take();
        assert_eq!(planned.len(), 1);
        let value = serde_json::to_value(&planned[0]).unwrap();
        assert_eq!(value["kind"], "execute");
        assert_eq!(value["gas_limit"], 120_000);
        assert_eq!(value["msg"], json!({ "try_buy_the_code": { "code": "MYKEY" } }));

        assert!(client.take().is_empty());
    }

    #[tokio::test]
    async fn test_preview_skips_invalid_requests() {
        let client = PreviewClient::new();
        let request = ActionRequest::default().code("MYKEY");

        let outcome = Dispatcher::new(&client)
            .dispatch(&request, ActionKind::QueryRecognition)
            .await;

        assert_eq!(outcome.failure(), Some("Contract address is required"));
        assert!(client.take().is_empty());
    }
}
