//! Dispatch errors and the uniform outcome callers receive.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::actions::ActionError;
use crate::client::ClientError;

/// Everything that can go wrong during a dispatch
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Required field missing or unknown action tag
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The client call itself failed
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// Payload or response could not be encoded
    #[error("{0}")]
    Encode(#[from] serde_json::Error),

    /// The price change was broadcast but the chain reported failure
    #[error("Error while changing market value")]
    MarketValueRejected {
        /// Non-zero result code
        code: u32,
        /// Chain log explaining the failure
        raw_log: String,
    },
}

/// Result of a dispatch: the remote response, or a failure message.
///
/// Serializes untagged, so a success is the bare response and a failure is
/// a bare string.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// Remote response, passed through
    Success(Value),
    /// Human-readable failure
    Failure(String),
}

impl Outcome {
    /// Whether the dispatch produced a response
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Response value, if any
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Failure message, if any
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    /// Convert into a plain result
    pub fn into_result(self) -> Result<Value, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(message) => Err(message),
        }
    }

    /// Decode the response into a typed value
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, String> {
        let value = self.into_result()?;
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// Result code of a transaction response
    #[must_use]
    pub fn tx_code(&self) -> Option<u32> {
        self.value()?
            .get("code")?
            .as_u64()
            .and_then(|c| u32::try_from(c).ok())
    }

    /// Raw log of a transaction response
    #[must_use]
    pub fn raw_log(&self) -> Option<&str> {
        self.value()?.get("raw_log")?.as_str()
    }

    /// Whether this is a transaction response with result code 0
    #[must_use]
    pub fn tx_succeeded(&self) -> bool {
        self.tx_code() == Some(0)
    }
}

impl From<Result<Value, DispatchError>> for Outcome {
    fn from(result: Result<Value, DispatchError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::from(e),
        }
    }
}

impl From<DispatchError> for Outcome {
    fn from(error: DispatchError) -> Self {
        Self::Failure(error.to_string())
    }
}

impl From<ActionError> for Outcome {
    fn from(error: ActionError) -> Self {
        Self::from(DispatchError::from(error))
    }
}
