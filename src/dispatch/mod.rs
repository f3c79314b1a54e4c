//! Request dispatch.
//!
//! The dispatcher turns an [`ActionRequest`] into a typed [`Action`], sends
//! the resulting call through a [`ContractClient`] and folds every failure
//! into an [`Outcome`]. It never panics or returns an error to the caller.
//!
//! Each dispatch awaits exactly one remote call. Nothing is retried and no
//! timeout is applied here; both belong to the client or the caller.

mod outcome;

pub use outcome::{DispatchError, Outcome};

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::actions::{Action, ActionKind, ActionRequest, RemoteCall};
use crate::client::{ContractClient, ContractRef, ExecuteRequest};

/// Gas ceiling attached to every transaction
pub const GAS_LIMIT: u64 = 100_000;

/// Dispatches actions through a borrowed client
#[derive(Debug)]
pub struct Dispatcher<'a, C> {
    client: &'a C,
    gas_limit: u64,
}

impl<'a, C: ContractClient> Dispatcher<'a, C> {
    /// Create a dispatcher using the default gas ceiling
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            gas_limit: GAS_LIMIT,
        }
    }

    /// Override the gas ceiling
    #[must_use]
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Gas ceiling attached to transactions
    #[must_use]
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Validate `request` for `kind`, run it and normalize the result
    pub async fn dispatch(&self, request: &ActionRequest, kind: ActionKind) -> Outcome {
        let result = match Action::from_request(kind, request) {
            Ok(action) => self.run(request.contract(), action).await,
            Err(e) => Err(e.into()),
        };
        Self::finish(kind.tag(), result)
    }

    /// Dispatch by wire tag, e.g. `"sent_pix"`
    pub async fn dispatch_tag(&self, request: &ActionRequest, tag: &str) -> Outcome {
        match tag.parse::<ActionKind>() {
            Ok(kind) => self.dispatch(request, kind).await,
            Err(e) => Self::finish(tag, Err(e.into())),
        }
    }

    /// Check and run a hand-built action against `contract`
    pub async fn dispatch_action(&self, contract: ContractRef, action: Action) -> Outcome {
        let kind = action.kind();
        let result = match action.validate(&contract) {
            Ok(()) => self.run(contract, action).await,
            Err(e) => Err(e.into()),
        };
        Self::finish(kind.tag(), result)
    }

    async fn run(&self, contract: ContractRef, action: Action) -> Result<Value, DispatchError> {
        let kind = action.kind();
        debug!(action = %kind, contract = %contract.address, "dispatching");

        match action.into_call(contract)? {
            RemoteCall::Query { contract, payload } => {
                let response = self.client.query(&contract, &payload).await?;
                if kind == ActionKind::QueryRecognition {
                    return Ok(json!({ "recognition": response }));
                }
                Ok(response)
            }
            RemoteCall::Execute {
                contract,
                sender,
                payload,
                sent_funds,
            } => {
                let request = ExecuteRequest {
                    contract,
                    sender,
                    msg: payload,
                    sent_funds,
                    gas_limit: self.gas_limit,
                };
                let response = self.client.execute(request).await?;
                debug!(
                    action = %kind,
                    code = response.code,
                    gas_used = response.gas_used,
                    "transaction broadcast"
                );

                if kind == ActionKind::ChangeMarketValue && !response.is_success() {
                    return Err(DispatchError::MarketValueRejected {
                        code: response.code,
                        raw_log: response.raw_log,
                    });
                }
                Ok(serde_json::to_value(response)?)
            }
        }
    }

    fn finish(action: &str, result: Result<Value, DispatchError>) -> Outcome {
        if let Err(e) = &result {
            match e {
                DispatchError::MarketValueRejected { code, raw_log } => {
                    warn!(action, code, raw_log = %raw_log, "{}", e);
                }
                _ => warn!(action, "{}", e),
            }
        }
        Outcome::from(result)
    }
}

/// Dispatch `request` as `kind` through `client` with the default gas ceiling
pub async fn dispatch<C: ContractClient>(
    client: &C,
    request: &ActionRequest,
    kind: ActionKind,
) -> Outcome {
    Dispatcher::new(client).dispatch(request, kind).await
}
