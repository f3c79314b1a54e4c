//! Registered keys ("codes") and the contract's responses about them.

use serde::{Deserialize, Serialize};

use super::u128_string;

/// A registered key: an alias that routes payments to its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    /// Owner wallet address
    pub owner: String,
    /// The key itself
    pub code: String,
    /// Free-form identity label shown to payers
    pub recognition: String,
    /// Addresses allowed to query the key's private data
    pub whitelist: Vec<String>,
    /// Revenue-sharing partners
    pub partners: Vec<Partner>,
    /// Payment history
    pub transactions: Vec<Transaction>,
    /// Asking price when the key is for sale
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "u128_string::option"
    )]
    pub market_value: Option<u128>,
}

impl Code {
    /// Build the record submitted when `owner` registers `code`.
    ///
    /// The owner is the only whitelisted address and there are no partners,
    /// transactions or asking price yet.
    #[must_use]
    pub fn register(
        owner: impl Into<String>,
        code: impl Into<String>,
        recognition: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        Self {
            whitelist: vec![owner.clone()],
            owner,
            code: code.into(),
            recognition: recognition.into(),
            partners: Vec::new(),
            transactions: Vec::new(),
            market_value: None,
        }
    }

    /// Whether the key is listed for sale
    #[must_use]
    pub fn is_for_sale(&self) -> bool {
        self.market_value.is_some()
    }

    /// Percentage of each payment that stays with the owner
    #[must_use]
    pub fn owner_share(&self) -> u16 {
        100u16.saturating_sub(self.partners.iter().map(|p| p.percent_share).sum())
    }
}

/// A partner receiving a fixed share of each payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    /// Partner wallet address
    pub addr: String,
    /// Share in percent (1-100)
    pub percent_share: u16,
}

/// A payment recorded against a key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount paid, smallest unit
    #[serde(with = "u128_string")]
    pub amount: u128,
    /// Optional payer note
    pub memo: Option<String>,
}

/// Response to an `info_code` query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoCodeResponse {
    /// Full key record
    pub code: Code,
}

/// Response to a `code_exists` query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExistenceResponse {
    /// Whether the key is registered
    pub exists: bool,
    /// Asking price, if listed
    #[serde(default, with = "u128_string::option")]
    pub market_value: Option<u128>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_shape() {
        let code = Code::register("secret1abc", "MYKEY", "Alice");
        assert_eq!(
            serde_json::to_value(&code).unwrap(),
            json!({
                "owner": "secret1abc",
                "code": "MYKEY",
                "recognition": "Alice",
                "whitelist": ["secret1abc"],
                "partners": [],
                "transactions": []
            })
        );
    }

    #[test]
    fn test_existence_accepts_string_and_number() {
        let a: CodeExistenceResponse =
            serde_json::from_value(json!({ "exists": true, "market_value": "250" })).unwrap();
        let b: CodeExistenceResponse =
            serde_json::from_value(json!({ "exists": true, "market_value": 250 })).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.market_value, Some(250));

        let missing: CodeExistenceResponse =
            serde_json::from_value(json!({ "exists": false, "market_value": null })).unwrap();
        assert_eq!(missing.market_value, None);
    }

    #[test]
    fn test_transaction_amount_as_number() {
        let tx: Transaction = serde_json::from_str(r#"{ "amount": 1000 }"#).unwrap();
        assert_eq!(tx.amount, 1000);

        let tx: Transaction = serde_json::from_value(json!({ "amount": 1000 })).unwrap();
        assert_eq!(tx.amount, 1000);
        assert_eq!(serde_json::to_value(&tx).unwrap()["amount"], json!("1000"));

        assert!(serde_json::from_value::<Transaction>(json!({ "amount": -1 })).is_err());
        assert!(serde_json::from_value::<Transaction>(json!({ "amount": "ten" })).is_err());
    }

    #[test]
    fn test_owner_share() {
        let mut code = Code::register("secret1abc", "MYKEY", "Alice");
        assert_eq!(code.owner_share(), 100);

        code.partners.push(Partner {
            addr: "secret1partner".to_string(),
            percent_share: 30,
        });
        assert_eq!(code.owner_share(), 70);
        assert!(!code.is_for_sale());
    }

    #[test]
    fn test_info_code_roundtrip() {
        let raw = json!({
            "code": {
                "owner": "secret1abc",
                "code": "MYKEY",
                "recognition": "Alice",
                "whitelist": ["secret1abc"],
                "partners": [],
                "transactions": [{ "amount": "1000", "memo": "coffee" }],
                "market_value": "5000000"
            }
        });
        let info: InfoCodeResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(info.code.transactions[0].amount, 1000);
        assert_eq!(info.code.market_value, Some(5_000_000));
        assert!(info.code.is_for_sale());
    }
}
