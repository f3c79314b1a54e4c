//! Execute and query messages understood by the `PixSecret` contract.
//!
//! Both enums are externally tagged in `snake_case`, so `ExecuteMsg::SentPix`
//! serializes as `{"sent_pix": {...}}`.

use serde::{Deserialize, Serialize};

use crate::types::{Code, Permit};

/// State-changing messages
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Register a new key
    CreateCode {
        /// Full key record
        code: Code,
    },
    /// Pay the owner (and partners) of a key
    SentPix {
        /// Target key
        code: String,
        /// Optional payer note
        #[serde(default, skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
    },
    /// List a key for sale at a new price
    ChangeMarketValueCode {
        /// Target key
        code: String,
        /// Price in the smallest unit, as a decimal string
        market_value: String,
    },
    /// Buy a listed key, paying its market value
    TryBuyTheCode {
        /// Target key
        code: String,
    },
}

/// Read-only queries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Full key record; requires a permit for `wallet`
    InfoCode {
        /// Signed permit
        permit: Permit,
        /// Wallet the permit was signed by
        wallet: String,
        /// Target key
        code: String,
    },
    /// Whether a key exists and its asking price
    CodeExists {
        /// Target key
        code: String,
    },
    /// Public identity label of a key
    CodeRecognition {
        /// Target key
        code: String,
    },
}

impl QueryMsg {
    /// Payload for a raw existence check
    #[must_use]
    pub fn code_exists(code: impl Into<String>) -> Self {
        Self::CodeExists { code: code.into() }
    }

    /// Encode as a JSON value
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl ExecuteMsg {
    /// Encode as a JSON value
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execute_tags() {
        let msg = ExecuteMsg::TryBuyTheCode {
            code: "MYKEY".to_string(),
        };
        assert_eq!(
            msg.to_value().unwrap(),
            json!({ "try_buy_the_code": { "code": "MYKEY" } })
        );

        let msg = ExecuteMsg::ChangeMarketValueCode {
            code: "MYKEY".to_string(),
            market_value: "1200".to_string(),
        };
        assert_eq!(
            msg.to_value().unwrap(),
            json!({ "change_market_value_code": { "code": "MYKEY", "market_value": "1200" } })
        );
    }

    #[test]
    fn test_sent_pix_memo_omitted() {
        let msg = ExecuteMsg::SentPix {
            code: "MYKEY".to_string(),
            memo: None,
        };
        assert_eq!(
            msg.to_value().unwrap(),
            json!({ "sent_pix": { "code": "MYKEY" } })
        );

        let msg = ExecuteMsg::SentPix {
            code: "MYKEY".to_string(),
            memo: Some("lunch".to_string()),
        };
        assert_eq!(
            msg.to_value().unwrap(),
            json!({ "sent_pix": { "code": "MYKEY", "memo": "lunch" } })
        );
    }

    #[test]
    fn test_code_exists_query() {
        assert_eq!(
            QueryMsg::code_exists("ABC123").to_value().unwrap(),
            json!({ "code_exists": { "code": "ABC123" } })
        );
    }
}
