//! Funds attached to contract executions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Native staking denomination of the chain
pub const NATIVE_DENOM: &str = "uscrt";

/// Fee attached to a key registration (5 SCRT in uscrt)
pub const REGISTRATION_FEE_USCRT: u128 = 5_000_000;

/// A single coin: an amount in the smallest unit of `denom`.
///
/// The amount stays a decimal string, matching the chain's JSON encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Decimal amount in the smallest unit
    pub amount: String,
    /// Denomination, e.g. `uscrt`
    pub denom: String,
}

impl Coin {
    /// Create a coin of an arbitrary denomination
    #[must_use]
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            amount: amount.to_string(),
            denom: denom.into(),
        }
    }

    /// Create a coin in the native denomination
    #[must_use]
    pub fn uscrt(amount: u128) -> Self {
        Self::new(amount, NATIVE_DENOM)
    }

    /// The registration fee required by `create_code`
    #[must_use]
    pub fn registration_fee() -> Self {
        Self::uscrt(REGISTRATION_FEE_USCRT)
    }

    /// Parse the amount, if it is a valid decimal integer
    #[must_use]
    pub fn amount_u128(&self) -> Option<u128> {
        self.amount.parse().ok()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
