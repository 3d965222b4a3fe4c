//! # Transaction Data Transfer Objects
//!
//! JSON-RPC shapes exchanged with an EIP-1193 wallet provider. Numeric fields
//! travel as `0x`-prefixed hex quantities, handled by [`quantity`] and
//! [`quantity_opt`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read a hex quantity such as `"0x1bc16d674ec80000"`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is missing the 0x prefix: {0}")]
    MissingPrefix(String),
    #[error("quantity has no digits")]
    Empty,
    #[error("invalid hex quantity {0}")]
    Invalid(String),
}

/// Parse a JSON-RPC hex quantity into an integer.
///
/// # Examples
///
/// ```rust
/// use shared::dto::transaction::parse_quantity;
///
/// assert_eq!(parse_quantity("0x0").unwrap(), 0);
/// assert_eq!(parse_quantity("0xc350").unwrap(), 50_000);
/// ```
pub fn parse_quantity(raw: &str) -> Result<u128, QuantityError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| QuantityError::MissingPrefix(raw.to_string()))?;

    if digits.is_empty() {
        return Err(QuantityError::Empty);
    }

    u128::from_str_radix(digits, 16).map_err(|_| QuantityError::Invalid(raw.to_string()))
}

/// Encode an integer as a JSON-RPC hex quantity (`0` → `"0x0"`).
pub fn to_quantity(value: impl Into<u128>) -> String {
    format!("{:#x}", value.into())
}

/// Serde adapter for required quantity fields
pub mod quantity {
    use super::{parse_quantity, to_quantity};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Copy + Into<u128>,
    {
        serializer.serialize_str(&to_quantity(*value))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u128>,
    {
        let raw = String::deserialize(deserializer)?;
        let value = parse_quantity(&raw).map_err(de::Error::custom)?;
        T::try_from(value).map_err(|_| de::Error::custom(format!("quantity {} out of range", raw)))
    }
}

/// Serde adapter for optional quantity fields (`null` or absent → `None`)
pub mod quantity_opt {
    use super::{parse_quantity, to_quantity};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Copy + Into<u128>,
    {
        match value {
            Some(v) => serializer.serialize_str(&to_quantity(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u128>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(raw) => {
                let value = parse_quantity(&raw).map_err(de::Error::custom)?;
                T::try_from(value)
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("quantity {} out of range", raw)))
            }
            None => Ok(None),
        }
    }
}

/// Transaction parameters for `eth_signTransaction` / `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    #[serde(with = "quantity")]
    pub value: u128,
    #[serde(with = "quantity")]
    pub gas_price: u128,
    /// Serialized under the JSON-RPC name `gas`
    #[serde(rename = "gas", with = "quantity")]
    pub gas_limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "quantity_opt")]
    pub nonce: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "quantity_opt")]
    pub chain_id: Option<u64>,
}

/// Receipt returned by `eth_getTransactionReceipt` once a transaction is mined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(with = "quantity")]
    pub block_number: u64,
    /// `Some(1)` on success, `Some(0)` on revert; pre-Byzantium receipts omit it
    #[serde(default, skip_serializing_if = "Option::is_none", with = "quantity_opt")]
    pub status: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "quantity_opt")]
    pub gas_used: Option<u64>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == Some(1)
    }
}
