//! Action catalog.
//!
//! Every user intent the front-end supports is one [`ActionKind`]. A flat
//! [`ActionRequest`] envelope carries whatever the form collected; turning it
//! into a typed [`Action`] checks the kind's required fields in a fixed
//! order and fails on the first one missing.

pub mod registry;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ContractRef;
use crate::types::{Coin, Permit};

pub use registry::{Action, RemoteCall};

/// Supported actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Raw existence check with a caller-supplied query
    QueryExistence,
    /// Register a new key
    CreateCode,
    /// Permit-authorized lookup of a full key record
    QueryCode,
    /// Public identity label of a key
    QueryRecognition,
    /// Pay a key's owner
    #[serde(rename = "sent_pix")]
    SendFunds,
    /// List a key for sale
    #[serde(rename = "change_market_value_code")]
    ChangeMarketValue,
    /// Buy a listed key
    #[serde(rename = "try_buy_the_code")]
    TryBuyCode,
}

impl ActionKind {
    /// All kinds, in catalog order
    pub const ALL: [Self; 7] = [
        Self::QueryExistence,
        Self::CreateCode,
        Self::QueryCode,
        Self::QueryRecognition,
        Self::SendFunds,
        Self::ChangeMarketValue,
        Self::TryBuyCode,
    ];

    /// Wire tag used by front-ends and the command line
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::QueryExistence => "query_existence",
            Self::CreateCode => "create_code",
            Self::QueryCode => "query_code",
            Self::QueryRecognition => "query_recognition",
            Self::SendFunds => "sent_pix",
            Self::ChangeMarketValue => "change_market_value_code",
            Self::TryBuyCode => "try_buy_the_code",
        }
    }

    /// Whether this kind is a read-only query
    #[must_use]
    pub const fn is_query(self) -> bool {
        matches!(
            self,
            Self::QueryExistence | Self::QueryCode | Self::QueryRecognition
        )
    }

    /// Fields that must be present, in the order they are checked
    #[must_use]
    pub const fn required_fields(self) -> &'static [Field] {
        match self {
            Self::QueryExistence => &[Field::ContractAddress, Field::CodeHash, Field::Query],
            Self::QueryCode => &[
                Field::ContractAddress,
                Field::CodeHash,
                Field::Permit,
                Field::Sender,
                Field::Code,
            ],
            Self::QueryRecognition => &[Field::ContractAddress, Field::CodeHash, Field::Code],
            Self::CreateCode => &[Field::Sender, Field::Code, Field::Recognition],
            Self::SendFunds | Self::TryBuyCode => &[Field::Sender, Field::Code],
            Self::ChangeMarketValue => &[Field::Sender, Field::Code, Field::MarketValue],
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ActionError::UnknownAction(s.to_string()))
    }
}

/// A validated field of [`ActionRequest`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// `contract_address`
    ContractAddress,
    /// `code_hash`
    CodeHash,
    /// `query`
    Query,
    /// `permit`
    Permit,
    /// `sender`
    Sender,
    /// `code`
    Code,
    /// `recognition`
    Recognition,
    /// `market_value`
    MarketValue,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ContractAddress => "Contract address",
            Self::CodeHash => "Code hash",
            Self::Query => "Query",
            Self::Permit => "Permit",
            Self::Sender => "Sender",
            Self::Code => "Code",
            Self::Recognition => "Recognition",
            Self::MarketValue => "Market value",
        })
    }
}

/// Errors turning a request into an action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// A required field is absent or empty
    #[error("{0} is required")]
    MissingField(Field),
    /// The action tag is not in the catalog
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// Flat request envelope, as collected from a form.
///
/// Which fields matter depends on the action; see
/// [`ActionKind::required_fields`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Target contract address
    pub contract_address: String,
    /// Target contract code hash
    pub code_hash: String,
    /// Funds attached to transactions
    #[serde(default)]
    pub sent_funds: Vec<Coin>,
    /// Signing wallet
    #[serde(default)]
    pub sender: Option<String>,
    /// Key the action is about
    #[serde(default)]
    pub code: Option<String>,
    /// Asking price in the smallest unit
    #[serde(default)]
    pub market_value: Option<u128>,
    /// Payer note
    #[serde(default)]
    pub memo: Option<String>,
    /// Identity label for a new key
    #[serde(default)]
    pub recognition: Option<String>,
    /// Query permit
    #[serde(default)]
    pub permit: Option<Permit>,
    /// Raw query for existence checks
    #[serde(default)]
    pub query: Option<Value>,
}

impl ActionRequest {
    /// Start a request against `contract`
    #[must_use]
    pub fn new(contract: &ContractRef) -> Self {
        Self {
            contract_address: contract.address.clone(),
            code_hash: contract.code_hash.clone(),
            ..Self::default()
        }
    }

    /// Target contract of this request
    #[must_use]
    pub fn contract(&self) -> ContractRef {
        ContractRef::new(self.contract_address.clone(), self.code_hash.clone())
    }

    /// Set the sender
    #[must_use]
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Set the key
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the asking price
    #[must_use]
    pub fn market_value(mut self, market_value: u128) -> Self {
        self.market_value = Some(market_value);
        self
    }

    /// Set the payer note
    #[must_use]
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Set the identity label
    #[must_use]
    pub fn recognition(mut self, recognition: impl Into<String>) -> Self {
        self.recognition = Some(recognition.into());
        self
    }

    /// Set the query permit
    #[must_use]
    pub fn permit(mut self, permit: Permit) -> Self {
        self.permit = Some(permit);
        self
    }

    /// Set the raw existence query
    #[must_use]
    pub fn query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Attach funds
    #[must_use]
    pub fn funds(mut self, coin: Coin) -> Self {
        self.sent_funds.push(coin);
        self
    }

    /// Whether `field` carries a usable value.
    ///
    /// Empty strings, a JSON `null` query and a zero market value count as
    /// missing.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::ContractAddress => !self.contract_address.is_empty(),
            Field::CodeHash => !self.code_hash.is_empty(),
            Field::Query => self.query.as_ref().is_some_and(|q| !q.is_null()),
            Field::Permit => self.permit.is_some(),
            Field::Sender => non_empty(self.sender.as_deref()).is_some(),
            Field::Code => non_empty(self.code.as_deref()).is_some(),
            Field::Recognition => non_empty(self.recognition.as_deref()).is_some(),
            Field::MarketValue => self.market_value.is_some_and(|v| v != 0),
        }
    }

    /// First required field of `kind` that is missing
    #[must_use]
    pub fn first_missing(&self, kind: ActionKind) -> Option<Field> {
        kind.required_fields()
            .iter()
            .copied()
            .find(|field| !self.has(*field))
    }

    /// Clear `field`, as if the form never supplied it
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::ContractAddress => self.contract_address.clear(),
            Field::CodeHash => self.code_hash.clear(),
            Field::Query => self.query = None,
            Field::Permit => self.permit = None,
            Field::Sender => self.sender = None,
            Field::Code => self.code = None,
            Field::Recognition => self.recognition = None,
            Field::MarketValue => self.market_value = None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
