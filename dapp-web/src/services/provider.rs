//! # Wallet Provider Boundary
//!
//! Abstractions over an EIP-1193 wallet provider. The rest of the app only
//! talks to [`Web3Provider`] and [`ProviderLocator`], so tests can swap the
//! injected `window.ethereum` binding for a scripted fake.
//!
//! ## Architecture
//!
//! ```text
//! ActionDispatcher ─┐
//!                   ├─→ Web3Provider::request ─→ window.ethereum.request
//! EventBridge ──────┘        ↑ signer helpers (default methods)
//!      ↑
//!      └── Web3Provider::subscribe ←─ connect / disconnect / accountsChanged
//! ```
//!
//! Signer-style operations (balance, nonce, signing, sending) are default
//! methods layered over the generic [`Web3Provider::request`] dispatcher, so
//! an implementation only has to provide `request`, `wait_for_transaction`
//! and `subscribe`.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use shared::dto::transaction::{parse_quantity, QuantityError, TransactionReceipt, TransactionRequest};
use thiserror::Error;

/// Errors surfaced by wallet provider calls.
///
/// `Rejected` displays only the provider's own message so it can be shown to
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider rejected the request (user denial, RPC failure, bad params)
    #[error("{message}")]
    Rejected { code: Option<i64>, message: String },

    /// An operation needed the active account but none is authorized
    #[error("no connected account")]
    NoAccount,

    /// The provider answered with something we could not decode
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// The provider object is missing or unusable
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Gave up polling for a receipt
    #[error("timed out waiting for transaction {0}")]
    Timeout(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(err.to_string())
    }
}

impl From<QuantityError> for ProviderError {
    fn from(err: QuantityError) -> Self {
        ProviderError::InvalidResponse(err.to_string())
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider lifecycle events the app listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEventKind {
    Connect,
    Disconnect,
    AccountsChanged,
}

impl ProviderEventKind {
    pub const ALL: [ProviderEventKind; 3] = [
        ProviderEventKind::Connect,
        ProviderEventKind::Disconnect,
        ProviderEventKind::AccountsChanged,
    ];

    /// EIP-1193 event name
    pub fn name(&self) -> &'static str {
        match self {
            ProviderEventKind::Connect => "connect",
            ProviderEventKind::Disconnect => "disconnect",
            ProviderEventKind::AccountsChanged => "accountsChanged",
        }
    }
}

impl fmt::Display for ProviderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded provider event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    Connect { chain_id: String },
    Disconnect { message: Option<String> },
    AccountsChanged(Vec<String>),
}

#[derive(Deserialize)]
struct ConnectInfo {
    #[serde(rename = "chainId")]
    chain_id: String,
}

impl ProviderEvent {
    pub fn kind(&self) -> ProviderEventKind {
        match self {
            ProviderEvent::Connect { .. } => ProviderEventKind::Connect,
            ProviderEvent::Disconnect { .. } => ProviderEventKind::Disconnect,
            ProviderEvent::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
        }
    }

    /// Decode the JSON payload a provider passes to an event listener.
    ///
    /// `accountsChanged` with a `null` payload is read as an empty list.
    pub fn from_payload(kind: ProviderEventKind, payload: Value) -> ProviderResult<Self> {
        match kind {
            ProviderEventKind::Connect => {
                let info: ConnectInfo = serde_json::from_value(payload)?;
                Ok(ProviderEvent::Connect {
                    chain_id: info.chain_id,
                })
            }
            ProviderEventKind::Disconnect => Ok(ProviderEvent::Disconnect {
                message: payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            ProviderEventKind::AccountsChanged => {
                let accounts: Option<Vec<String>> = serde_json::from_value(payload)?;
                Ok(ProviderEvent::AccountsChanged(accounts.unwrap_or_default()))
            }
        }
    }
}

/// Listener invoked for every provider event
pub type EventHandler = Rc<dyn Fn(ProviderEvent)>;

/// Handle to a set of registered event listeners.
///
/// [`Subscription::cancel`] removes them. Dropping an active subscription
/// also removes them, since the listener closures die with it.
pub struct Subscription {
    canceller: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(canceller: impl FnOnce() + 'static) -> Self {
        Self {
            canceller: Some(Box::new(canceller)),
        }
    }

    /// Remove every listener registered by this subscription
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(canceller) = self.canceller.take() {
            canceller();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.canceller.is_some())
            .finish()
    }
}

/// Number of confirmations a receipt has at chain height `head`.
///
/// A transaction mined in the head block has one confirmation.
pub fn confirmations_at(receipt: &TransactionReceipt, head: u64) -> u64 {
    if head < receipt.block_number {
        return 0;
    }
    head - receipt.block_number + 1
}

/// Decode an `eth_getTransactionReceipt` result.
///
/// `None` while the transaction is pending: a `null` result, or a receipt
/// whose `blockNumber` is still `null`.
pub fn mined_receipt(raw: Value) -> ProviderResult<Option<TransactionReceipt>> {
    if raw.is_null() || raw.get("blockNumber").map_or(true, Value::is_null) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(raw)?))
}

fn quantity_from(value: &Value) -> ProviderResult<u128> {
    let raw = value
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse(format!("expected hex quantity, got {}", value)))?;
    Ok(parse_quantity(raw)?)
}

fn string_from(value: Value) -> ProviderResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ProviderError::InvalidResponse(format!("expected string, got {}", other))),
    }
}

/// An EIP-1193 wallet provider plus the signer operations the app needs.
#[async_trait(?Send)]
pub trait Web3Provider {
    /// Generic JSON-RPC dispatcher (`provider.request({ method, params })`)
    async fn request(&self, method: &str, params: Value) -> ProviderResult<Value>;

    /// Wait until `hash` is mined with at least `confirmations` confirmations
    async fn wait_for_transaction(
        &self,
        hash: &str,
        confirmations: u64,
    ) -> ProviderResult<TransactionReceipt>;

    /// Register `handler` for connect, disconnect and accountsChanged
    fn subscribe(&self, handler: EventHandler) -> ProviderResult<Subscription>;

    /// Ask the wallet to authorize accounts (`eth_requestAccounts`)
    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        let result = self.request("eth_requestAccounts", json!([])).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Next nonce for `address`, counting pending transactions
    async fn get_transaction_count(&self, address: &str) -> ProviderResult<u64> {
        let result = self
            .request("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        let count = quantity_from(&result)?;
        u64::try_from(count).map_err(|_| ProviderError::InvalidResponse(format!("nonce {} out of range", count)))
    }

    /// Balance of `address` in wei
    async fn get_balance(&self, address: &str) -> ProviderResult<u128> {
        let result = self.request("eth_getBalance", json!([address, "latest"])).await?;
        quantity_from(&result)
    }

    /// `personal_sign` over the UTF-8 bytes of `message`
    async fn sign_message(&self, address: &str, message: &str) -> ProviderResult<String> {
        let payload = format!("0x{}", hex::encode(message.as_bytes()));
        let result = self.request("personal_sign", json!([payload, address])).await?;
        string_from(result)
    }

    /// Sign without broadcasting; returns the raw signed transaction
    async fn sign_transaction(&self, tx: &TransactionRequest) -> ProviderResult<String> {
        let result = self.request("eth_signTransaction", json!([tx])).await?;
        string_from(result)
    }

    /// Sign and broadcast; returns the transaction hash
    async fn send_transaction(&self, tx: &TransactionRequest) -> ProviderResult<String> {
        let result = self.request("eth_sendTransaction", json!([tx])).await?;
        string_from(result)
    }
}

/// Finds the injected provider, if any
#[async_trait(?Send)]
pub trait ProviderLocator {
    async fn locate(&self) -> Option<Rc<dyn Web3Provider>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockProvider;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_rejected_displays_provider_message() {
        let err = ProviderError::Rejected {
            code: Some(4001),
            message: "User rejected the request.".to_string(),
        };
        assert_eq!(err.to_string(), "User rejected the request.");
        assert_eq!(ProviderError::NoAccount.to_string(), "no connected account");
    }

    #[test]
    fn test_event_from_payload() {
        let connect =
            ProviderEvent::from_payload(ProviderEventKind::Connect, json!({ "chainId": "0x38" })).unwrap();
        assert_eq!(connect, ProviderEvent::Connect { chain_id: "0x38".to_string() });

        let disconnect = ProviderEvent::from_payload(
            ProviderEventKind::Disconnect,
            json!({ "code": 4900, "message": "Disconnected" }),
        )
        .unwrap();
        assert_eq!(
            disconnect,
            ProviderEvent::Disconnect { message: Some("Disconnected".to_string()) }
        );

        let accounts =
            ProviderEvent::from_payload(ProviderEventKind::AccountsChanged, json!(["0xabc"])).unwrap();
        assert_eq!(accounts, ProviderEvent::AccountsChanged(vec!["0xabc".to_string()]));
        assert_eq!(accounts.kind(), ProviderEventKind::AccountsChanged);
    }

    #[test]
    fn test_null_accounts_payload_is_empty() {
        let event = ProviderEvent::from_payload(ProviderEventKind::AccountsChanged, Value::Null).unwrap();
        assert_eq!(event, ProviderEvent::AccountsChanged(vec![]));
    }

    #[test]
    fn test_bad_connect_payload() {
        let result = ProviderEvent::from_payload(ProviderEventKind::Connect, json!({}));
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_subscription_cancels_once() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));

        subscription.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dropping_subscription_releases_listeners() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        drop(Subscription::new(move || counter.set(counter.get() + 1)));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_confirmations_at() {
        let receipt = TransactionReceipt {
            transaction_hash: "0xfeed".to_string(),
            block_number: 100,
            status: Some(1),
            gas_used: None,
        };
        assert_eq!(confirmations_at(&receipt, 99), 0);
        assert_eq!(confirmations_at(&receipt, 100), 1);
        assert_eq!(confirmations_at(&receipt, 102), 3);
    }

    #[test]
    fn test_mined_receipt_pending_states() {
        assert_eq!(mined_receipt(Value::Null).unwrap(), None);

        let unmined = json!({ "transactionHash": "0xfeed", "blockNumber": null, "status": null });
        assert_eq!(mined_receipt(unmined).unwrap(), None);

        let mined = json!({ "transactionHash": "0xfeed", "blockNumber": "0x64", "status": "0x1" });
        let receipt = mined_receipt(mined).unwrap().unwrap();
        assert_eq!(receipt.block_number, 100);
        assert!(receipt.is_success());
    }

    #[test]
    fn test_mined_receipt_rejects_garbage() {
        let result = mined_receipt(json!({ "transactionHash": "0xfeed", "blockNumber": "100" }));
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_signer_helpers_use_rpc_methods() {
        let provider = MockProvider::new();
        provider.respond("eth_getTransactionCount", json!("0x1a"));
        provider.respond("eth_getBalance", json!("0xde0b6b3a7640000"));
        provider.respond("personal_sign", json!("0xsig"));

        block_on(async {
            assert_eq!(provider.get_transaction_count("0xabc").await.unwrap(), 26);
            assert_eq!(provider.get_balance("0xabc").await.unwrap(), 1_000_000_000_000_000_000);
            assert_eq!(provider.sign_message("0xabc", "hi").await.unwrap(), "0xsig");
        });

        let calls = provider.calls();
        assert_eq!(calls[0].1, json!(["0xabc", "pending"]));
        assert_eq!(calls[2].1, json!(["0x6869", "0xabc"]));
    }

    #[test]
    fn test_non_string_signature_is_invalid() {
        let provider = MockProvider::new();
        provider.respond("personal_sign", json!({ "signature": "0xsig" }));

        let result = block_on(provider.sign_message("0xabc", "hi"));
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }
}
