//! Typed actions and the calls they build.
//!
//! Each [`Action`] variant holds exactly the data its kind needs, so once an
//! action exists it can always be turned into a [`RemoteCall`].

use serde::Serialize;
use serde_json::Value;

use super::{ActionError, ActionKind, ActionRequest, Field};
use crate::client::ContractRef;
use crate::msg::{ExecuteMsg, QueryMsg};
use crate::types::{Code, Coin, Permit};

/// A validated action
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Forward a caller-built query as is
    QueryExistence {
        /// Raw query payload
        query: Value,
    },
    /// Look up a full key record with a permit
    QueryCode {
        /// Signed permit
        permit: Permit,
        /// Wallet that signed the permit
        wallet: String,
        /// Target key
        code: String,
    },
    /// Look up a key's identity label
    QueryRecognition {
        /// Target key
        code: String,
    },
    /// Register a key owned by `sender`
    CreateCode {
        /// Owner and signer
        sender: String,
        /// New key
        code: String,
        /// Identity label
        recognition: String,
        /// Registration fee
        sent_funds: Vec<Coin>,
    },
    /// Pay the owner of `code`
    SendFunds {
        /// Payer
        sender: String,
        /// Target key
        code: String,
        /// Optional note
        memo: Option<String>,
        /// Payment
        sent_funds: Vec<Coin>,
    },
    /// Set the asking price of `code`
    ChangeMarketValue {
        /// Owner
        sender: String,
        /// Target key
        code: String,
        /// New price, smallest unit
        market_value: u128,
        /// Attached funds (normally none)
        sent_funds: Vec<Coin>,
    },
    /// Buy `code` at its asking price
    TryBuyCode {
        /// Buyer
        sender: String,
        /// Target key
        code: String,
        /// Payment matching the asking price
        sent_funds: Vec<Coin>,
    },
}

/// A call ready to be sent to a contract client
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoteCall {
    /// Read-only query
    Query {
        /// Target contract
        contract: ContractRef,
        /// Query message
        payload: Value,
    },
    /// Gas-metered execution
    Execute {
        /// Target contract
        contract: ContractRef,
        /// Signer
        sender: String,
        /// Execute message
        payload: Value,
        /// Attached funds
        sent_funds: Vec<Coin>,
    },
}

impl RemoteCall {
    /// Message payload, regardless of call type
    #[must_use]
    pub fn payload(&self) -> &Value {
        match self {
            Self::Query { payload, .. } | Self::Execute { payload, .. } => payload,
        }
    }
}

impl Action {
    /// Validate `request` for `kind` and extract the typed action.
    ///
    /// Fields are checked in the order of [`ActionKind::required_fields`];
    /// the first one missing is reported.
    pub fn from_request(kind: ActionKind, request: &ActionRequest) -> Result<Self, ActionError> {
        if let Some(field) = request.first_missing(kind) {
            return Err(ActionError::MissingField(field));
        }

        let sent_funds = request.sent_funds.clone();
        let action = match kind {
            ActionKind::QueryExistence => Self::QueryExistence {
                query: require(Field::Query, request.query.clone())?,
            },
            ActionKind::QueryCode => Self::QueryCode {
                permit: require(Field::Permit, request.permit.clone())?,
                wallet: require(Field::Sender, request.sender.clone())?,
                code: require(Field::Code, request.code.clone())?,
            },
            ActionKind::QueryRecognition => Self::QueryRecognition {
                code: require(Field::Code, request.code.clone())?,
            },
            ActionKind::CreateCode => Self::CreateCode {
                sender: require(Field::Sender, request.sender.clone())?,
                code: require(Field::Code, request.code.clone())?,
                recognition: require(Field::Recognition, request.recognition.clone())?,
                sent_funds,
            },
            ActionKind::SendFunds => Self::SendFunds {
                sender: require(Field::Sender, request.sender.clone())?,
                code: require(Field::Code, request.code.clone())?,
                memo: request.memo.clone(),
                sent_funds,
            },
            ActionKind::ChangeMarketValue => Self::ChangeMarketValue {
                sender: require(Field::Sender, request.sender.clone())?,
                code: require(Field::Code, request.code.clone())?,
                market_value: require(Field::MarketValue, request.market_value)?,
                sent_funds,
            },
            ActionKind::TryBuyCode => Self::TryBuyCode {
                sender: require(Field::Sender, request.sender.clone())?,
                code: require(Field::Code, request.code.clone())?,
                sent_funds,
            },
        };
        Ok(action)
    }

    /// Kind of this action
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::QueryExistence { .. } => ActionKind::QueryExistence,
            Self::QueryCode { .. } => ActionKind::QueryCode,
            Self::QueryRecognition { .. } => ActionKind::QueryRecognition,
            Self::CreateCode { .. } => ActionKind::CreateCode,
            Self::SendFunds { .. } => ActionKind::SendFunds,
            Self::ChangeMarketValue { .. } => ActionKind::ChangeMarketValue,
            Self::TryBuyCode { .. } => ActionKind::TryBuyCode,
        }
    }

    /// Check a hand-built action the same way [`Action::from_request`]
    /// checks a request: empty strings, a null query and a zero market value
    /// count as missing, reported in table order.
    pub fn validate(&self, contract: &ContractRef) -> Result<(), ActionError> {
        match self
            .kind()
            .required_fields()
            .iter()
            .copied()
            .find(|field| !self.holds(*field, contract))
        {
            Some(field) => Err(ActionError::MissingField(field)),
            None => Ok(()),
        }
    }

    fn holds(&self, field: Field, contract: &ContractRef) -> bool {
        match field {
            Field::ContractAddress => !contract.address.is_empty(),
            Field::CodeHash => !contract.code_hash.is_empty(),
            Field::Query => !matches!(self, Self::QueryExistence { query } if query.is_null()),
            Field::Permit => true,
            Field::MarketValue => !matches!(self, Self::ChangeMarketValue { market_value: 0, .. }),
            Field::Sender | Field::Code | Field::Recognition => {
                self.text(field).is_some_and(|s| !s.is_empty())
            }
        }
    }

    fn text(&self, field: Field) -> Option<&str> {
        match (self, field) {
            (Self::QueryCode { wallet, .. }, Field::Sender) => Some(wallet),
            (
                Self::CreateCode { sender, .. }
                | Self::SendFunds { sender, .. }
                | Self::ChangeMarketValue { sender, .. }
                | Self::TryBuyCode { sender, .. },
                Field::Sender,
            ) => Some(sender),
            (
                Self::QueryCode { code, .. }
                | Self::QueryRecognition { code }
                | Self::CreateCode { code, .. }
                | Self::SendFunds { code, .. }
                | Self::ChangeMarketValue { code, .. }
                | Self::TryBuyCode { code, .. },
                Field::Code,
            ) => Some(code),
            (Self::CreateCode { recognition, .. }, Field::Recognition) => Some(recognition),
            _ => None,
        }
    }

    /// Build the call for `contract`
    pub fn into_call(self, contract: ContractRef) -> serde_json::Result<RemoteCall> {
        let call = match self {
            Self::QueryExistence { query } => RemoteCall::Query {
                contract,
                payload: query,
            },
            Self::QueryCode {
                permit,
                wallet,
                code,
            } => RemoteCall::Query {
                contract,
                payload: QueryMsg::InfoCode {
                    permit,
                    wallet,
                    code,
                }
                .to_value()?,
            },
            Self::QueryRecognition { code } => RemoteCall::Query {
                contract,
                payload: QueryMsg::CodeRecognition { code }.to_value()?,
            },
            Self::CreateCode {
                sender,
                code,
                recognition,
                sent_funds,
            } => RemoteCall::Execute {
                payload: ExecuteMsg::CreateCode {
                    code: Code::register(sender.clone(), code, recognition),
                }
                .to_value()?,
                contract,
                sender,
                sent_funds,
            },
            Self::SendFunds {
                sender,
                code,
                memo,
                sent_funds,
            } => RemoteCall::Execute {
                contract,
                sender,
                payload: ExecuteMsg::SentPix { code, memo }.to_value()?,
                sent_funds,
            },
            Self::ChangeMarketValue {
                sender,
                code,
                market_value,
                sent_funds,
            } => RemoteCall::Execute {
                contract,
                sender,
                payload: ExecuteMsg::ChangeMarketValueCode {
                    code,
                    market_value: market_value.to_string(),
                }
                .to_value()?,
                sent_funds,
            },
            Self::TryBuyCode {
                sender,
                code,
                sent_funds,
            } => RemoteCall::Execute {
                contract,
                sender,
                payload: ExecuteMsg::TryBuyTheCode { code }.to_value()?,
                sent_funds,
            },
        };
        Ok(call)
    }
}

fn require<T>(field: Field, value: Option<T>) -> Result<T, ActionError> {
    value.ok_or(ActionError::MissingField(field))
}
