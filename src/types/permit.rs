//! Query permits.
//!
//! A permit is an offline-signed capability that authorizes a wallet's
//! private queries. This crate only carries permits; signing and
//! verification belong to the wallet.

use serde::{Deserialize, Serialize};

/// A signed query permit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permit {
    /// What the permit grants
    pub params: PermitParams,
    /// Signature over `params`
    pub signature: PermitSignature,
}

/// Parameters covered by the permit signature
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitParams {
    /// Name used to revoke the permit later
    pub permit_name: String,
    /// Contract addresses this permit is valid for
    pub allowed_tokens: Vec<String>,
    /// Chain the permit was signed for
    pub chain_id: String,
    /// Granted permissions, e.g. `owner`, `balance`
    pub permissions: Vec<String>,
}

/// Permit signature with the signer's public key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSignature {
    /// Signer public key
    pub pub_key: PubKey,
    /// Base64 signature
    pub signature: String,
}

/// Amino-style typed public key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    /// Key type tag, e.g. `tendermint/PubKeySecp256k1`
    #[serde(rename = "type")]
    pub key_type: String,
    /// Base64 key bytes
    pub value: String,
}

impl Permit {
    /// Whether the permit names `contract_address` among its allowed tokens
    #[must_use]
    pub fn allows(&self, contract_address: &str) -> bool {
        self.params
            .allowed_tokens
            .iter()
            .any(|t| t == contract_address)
    }
}

#[cfg(test)]
pub(crate) fn sample_permit(contract_address: &str) -> Permit {
    Permit {
        params: PermitParams {
            permit_name: "permit".to_string(),
            allowed_tokens: vec![contract_address.to_string()],
            chain_id: "pulsar-2".to_string(),
            permissions: vec!["owner".to_string(), "balance".to_string()],
        },
        signature: PermitSignature {
            pub_key: PubKey {
                key_type: "tendermint/PubKeySecp256k1".to_string(),
                value: "A5M49l32ZrV+SDsPnoRv8fH7ivNC4gEX9prvd4RwvRaL".to_string(),
            },
            signature: "hL8gNhmiD4Y8yEDh5SVJJJ8xmEXxNYaNKYvHrIuwEYM=".to_string(),
        },
    }
}
