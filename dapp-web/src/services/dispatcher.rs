//! # Action Dispatcher
//!
//! The user-triggered wallet actions. Each action:
//!
//! 1. Does nothing at all when no provider was injected
//! 2. Calls into the provider, suspending until it resolves or rejects
//! 3. Records its outcome in the session log
//!
//! Provider failures never escape an action: each becomes exactly one
//! `error` entry carrying the provider's message. Progress entries already
//! written by Send Transaction stay in place when a later stage fails.
//!
//! Actions are independent tasks. Two actions started together interleave
//! their log entries in completion order; nothing serializes them.

use std::fmt;
use std::rc::Rc;

use shared::dto::log::{LogEntry, LogMethod};
use shared::dto::transaction::TransactionRequest;

use crate::services::provider::{ProviderError, ProviderResult, Web3Provider};
use crate::state::session::SessionStore;
use crate::utils::config::DappConfig;
use crate::utils::format::format_ether;

/// The actions a user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Connect,
    GetBalance,
    SignMessage,
    SignTransaction,
    SendTransaction,
}

impl ActionKind {
    pub fn method(&self) -> LogMethod {
        match self {
            ActionKind::Connect => LogMethod::Connect,
            ActionKind::GetBalance => LogMethod::GetBalance,
            ActionKind::SignMessage => LogMethod::SignMessage,
            ActionKind::SignTransaction => LogMethod::SignTransaction,
            ActionKind::SendTransaction => LogMethod::EthSendTransaction,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// A labelled action button shown once an account is connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectedAction {
    pub name: &'static str,
    pub action: ActionKind,
}

impl ConnectedAction {
    pub const ALL: [ConnectedAction; 5] = [
        ConnectedAction { name: "Send Transaction", action: ActionKind::SendTransaction },
        ConnectedAction { name: "Sign Message", action: ActionKind::SignMessage },
        ConnectedAction { name: "Sign Transaction", action: ActionKind::SignTransaction },
        ConnectedAction { name: "Get Balance", action: ActionKind::GetBalance },
        ConnectedAction { name: "Reconnect", action: ActionKind::Connect },
    ];
}

pub struct ActionDispatcher<S: SessionStore> {
    provider: Option<Rc<dyn Web3Provider>>,
    session: S,
    config: DappConfig,
}

impl<S: SessionStore> ActionDispatcher<S> {
    pub fn new(provider: Option<Rc<dyn Web3Provider>>, session: S, config: DappConfig) -> Self {
        Self {
            provider,
            session,
            config,
        }
    }

    pub fn provider(&self) -> Option<&Rc<dyn Web3Provider>> {
        self.provider.as_ref()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Action buttons available right now; none without a provider
    pub fn connected_actions(&self) -> &'static [ConnectedAction] {
        if self.provider.is_some() {
            &ConnectedAction::ALL
        } else {
            &[]
        }
    }

    /// Run an action by kind. Sign Transaction signs the demo transfer.
    pub async fn run(&self, action: ActionKind) {
        match action {
            ActionKind::Connect => self.connect().await,
            ActionKind::GetBalance => self.get_balance().await,
            ActionKind::SignMessage => {
                self.sign_message().await;
            }
            ActionKind::SignTransaction => {
                let tx = self.config.demo_transaction(self.session.active_account(), None);
                self.sign_transaction(tx).await;
            }
            ActionKind::SendTransaction => self.send_transaction().await,
        }
    }

    fn fail(&self, method: LogMethod, err: ProviderError) {
        log::warn!("{} failed: {}", method, err);
        self.session.log(LogEntry::error(method, err.to_string()));
    }

    /// Request account access and store the returned accounts
    pub async fn connect(&self) {
        let Some(provider) = self.provider.as_ref() else { return };

        match provider.request_accounts().await {
            Ok(accounts) if !accounts.is_empty() => {
                let first = accounts[0].clone();
                log::info!("Connected to account {}", first);
                self.session.update_session(|s| s.set_accounts(accounts));
                self.session.log(LogEntry::success(
                    LogMethod::Connect,
                    format!("connected to account: {}", first),
                ));
            }
            Ok(_) => self.fail(LogMethod::Connect, ProviderError::NoAccount),
            Err(e) => self.fail(LogMethod::Connect, e),
        }
    }

    /// Refresh the balance of the active account
    pub async fn get_balance(&self) {
        let Some(provider) = self.provider.as_ref() else { return };

        let result = async {
            let account = self.session.active_account().ok_or(ProviderError::NoAccount)?;
            provider.get_balance(&account).await
        }
        .await;

        match result {
            Ok(wei) => {
                let balance = format_ether(wei);
                self.session.log(LogEntry::success(
                    LogMethod::GetBalance,
                    format!("Balance: {} {}", balance, self.config.native_symbol),
                ));
                self.session.update_session(|s| s.set_balance(balance));
            }
            Err(e) => self.fail(LogMethod::GetBalance, e),
        }
    }

    /// Sign the configured message; returns the signature on success
    pub async fn sign_message(&self) -> Option<String> {
        let provider = self.provider.as_ref()?;

        let result = async {
            let account = self.session.active_account().ok_or(ProviderError::NoAccount)?;
            provider.sign_message(&account, &self.config.sign_message).await
        }
        .await;

        match result {
            Ok(signature) => {
                self.session.log(LogEntry::success(
                    LogMethod::SignMessage,
                    format!("Message signed: {}", signature),
                ));
                Some(signature)
            }
            Err(e) => {
                self.fail(LogMethod::SignMessage, e);
                None
            }
        }
    }

    /// Ask the wallet to sign `tx` without broadcasting it
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> Option<String> {
        let provider = self.provider.as_ref()?;

        match provider.sign_transaction(&tx).await {
            Ok(signed) => {
                self.session.log(LogEntry::success(
                    LogMethod::SignTransaction,
                    format!("Transaction signed: {}", signed),
                ));
                Some(signed)
            }
            Err(e) => {
                self.fail(LogMethod::SignTransaction, e);
                None
            }
        }
    }

    /// Send the demo transfer: nonce, sign, submit, inclusion, confirmation
    pub async fn send_transaction(&self) {
        let Some(provider) = self.provider.as_ref() else { return };

        if let Err(e) = self.try_send_transaction(provider.as_ref()).await {
            self.fail(LogMethod::EthSendTransaction, e);
        }
    }

    async fn try_send_transaction(&self, provider: &dyn Web3Provider) -> ProviderResult<()> {
        let method = LogMethod::EthSendTransaction;
        let from = self.session.active_account().ok_or(ProviderError::NoAccount)?;

        let nonce = provider.get_transaction_count(&from).await?;
        let tx = self.config.demo_transaction(Some(from), Some(nonce));
        log::debug!("Prepared transaction with nonce {}", nonce);

        // Pre-flight: the wallet has to accept the exact payload before we broadcast it
        provider.sign_transaction(&tx).await?;

        let hash = provider.send_transaction(&tx).await?;
        log::info!("Transaction submitted: {}", hash);
        self.session
            .log(LogEntry::info(method, format!("Transaction submitted: {}", hash)));

        let receipt = provider.wait_for_transaction(&hash, 1).await?;
        let outcome = if receipt.is_success() { "success" } else { "failed" };
        let mut included = LogEntry::info(
            method,
            format!("Transaction included in block {}: {}", receipt.block_number, outcome),
        );
        if let Ok(raw) = serde_json::to_string(&receipt) {
            included = included.with_secondary(raw);
        }
        self.session.log(included);

        let confirmations = self.config.confirmations;
        let confirmed = provider.wait_for_transaction(&hash, confirmations).await?;
        let message = format!(
            "TX confirmed after {} confirmation(s) in block {}: {}",
            confirmations, confirmed.block_number, confirmed.transaction_hash
        );
        if confirmed.is_success() {
            self.session.log(LogEntry::success(method, message));
        } else {
            self.session.log(LogEntry::warning(method, format!("{} (reverted)", message)));
        }

        Ok(())
    }
}
