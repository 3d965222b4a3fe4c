//! # Runtime Configuration
//!
//! [`DappConfig`] bundles the demo constants used by the actions. Defaults come
//! from [`crate::utils::constants`]; a few can be overridden through the page
//! URL, e.g. `/?recipient=0x...&value=0.02&confirmations=3`.

use std::collections::HashMap;

use shared::dto::transaction::TransactionRequest;

use crate::utils::constants::*;
use crate::utils::format::parse_ether;
use crate::utils::url::get_query_params;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DappConfig {
    pub recipient: String,
    pub value_wei: u128,
    pub gas_price_wei: u128,
    pub gas_limit: u64,
    pub sign_message: String,
    pub native_symbol: String,
    pub confirmations: u64,
    pub injection_grace_ms: u32,
    pub receipt_poll_ms: u32,
    pub receipt_max_polls: u32,
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            recipient: DEMO_RECIPIENT.to_string(),
            value_wei: DEMO_VALUE_WEI,
            gas_price_wei: DEMO_GAS_PRICE_WEI,
            gas_limit: DEMO_GAS_LIMIT,
            sign_message: SIGN_MESSAGE.to_string(),
            native_symbol: NATIVE_SYMBOL.to_string(),
            confirmations: CONFIRMATIONS,
            injection_grace_ms: INJECTION_GRACE_MS,
            receipt_poll_ms: RECEIPT_POLL_MS,
            receipt_max_polls: RECEIPT_MAX_POLLS,
        }
    }
}

impl DappConfig {
    /// Defaults plus any overrides found in the current page URL
    pub fn from_location() -> Self {
        Self::default().with_overrides(&get_query_params())
    }

    /// Apply `recipient`, `value`, `message` and `confirmations` overrides.
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, params: &HashMap<String, String>) -> Self {
        if let Some(recipient) = params.get("recipient").filter(|r| !r.is_empty()) {
            self.recipient = recipient.clone();
        }

        if let Some(value) = params.get("value") {
            match parse_ether(value) {
                Ok(wei) => self.value_wei = wei,
                Err(e) => log::warn!("Ignoring value override: {}", e),
            }
        }

        if let Some(message) = params.get("message").filter(|m| !m.is_empty()) {
            self.sign_message = message.clone();
        }

        if let Some(confirmations) = params.get("confirmations") {
            match confirmations.parse::<u64>() {
                Ok(n) if n > 0 => self.confirmations = n,
                _ => log::warn!("Ignoring confirmations override: {}", confirmations),
            }
        }

        self
    }

    /// The fixed transfer used by Send Transaction and Sign Transaction
    pub fn demo_transaction(&self, from: Option<String>, nonce: Option<u64>) -> TransactionRequest {
        TransactionRequest {
            from,
            to: self.recipient.clone(),
            value: self.value_wei,
            gas_price: self.gas_price_wei,
            gas_limit: self.gas_limit,
            nonce,
            data: None,
            chain_id: None,
        }
    }
}
