//! # Event Bridge
//!
//! Turns provider lifecycle events into log entries and session updates:
//!
//! | Event                         | Effect                                             |
//! |-------------------------------|----------------------------------------------------|
//! | `connect {chainId}`           | success entry, then a balance refresh              |
//! | `disconnect`                  | warning entry; the address is kept                 |
//! | `accountsChanged [..]`        | accounts replaced, info entry                      |
//! | `accountsChanged []`          | one re-authorization attempt, success or error     |

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use shared::dto::log::{LogEntry, LogMethod};

use crate::services::dispatcher::ActionDispatcher;
use crate::services::provider::{EventHandler, ProviderError, ProviderEvent, ProviderResult, Subscription};
use crate::state::session::SessionStore;

pub struct EventBridge<S: SessionStore> {
    dispatcher: Rc<ActionDispatcher<S>>,
}

impl<S: SessionStore> EventBridge<S> {
    pub fn new(dispatcher: Rc<ActionDispatcher<S>>) -> Self {
        Self { dispatcher }
    }

    /// Subscribe to the dispatcher's provider.
    ///
    /// Each event is handled on its own task handed to `spawn`. The returned
    /// subscription must be kept alive; cancelling or dropping it removes the
    /// listeners.
    pub fn attach<F>(self: &Rc<Self>, spawn: F) -> ProviderResult<Subscription>
    where
        F: Fn(LocalBoxFuture<'static, ()>) + 'static,
    {
        let provider = self
            .dispatcher
            .provider()
            .cloned()
            .ok_or_else(|| ProviderError::Unavailable("no injected provider".to_string()))?;

        let bridge = Rc::clone(self);
        let handler: EventHandler = Rc::new(move |event: ProviderEvent| {
            log::debug!("Provider event: {}", event.kind());
            let bridge = Rc::clone(&bridge);
            spawn(async move { bridge.handle(event).await }.boxed_local());
        });

        provider.subscribe(handler)
    }

    pub async fn handle(&self, event: ProviderEvent) {
        let session = self.dispatcher.session();

        match event {
            ProviderEvent::Connect { chain_id } => {
                session.log(LogEntry::success(
                    LogMethod::Connect,
                    format!("Connected to chain: {}", chain_id),
                ));
                self.dispatcher.get_balance().await;
            }
            ProviderEvent::Disconnect { message } => {
                // Keeps the last known address; the wallet may come back
                let mut entry = LogEntry::warning(LogMethod::Disconnect, "lost connection to the rpc");
                if let Some(message) = message {
                    entry = entry.with_secondary(message);
                }
                session.log(entry);
            }
            ProviderEvent::AccountsChanged(accounts) if !accounts.is_empty() => {
                let message = format!("Switched to account: {}", accounts.join(","));
                session.update_session(|s| s.set_accounts(accounts));
                session.log(LogEntry::info(LogMethod::AccountChanged, message));
            }
            ProviderEvent::AccountsChanged(_) => self.reauthorize().await,
        }
    }

    async fn reauthorize(&self) {
        let Some(provider) = self.dispatcher.provider() else { return };
        let session = self.dispatcher.session();

        session.log(LogEntry::info(
            LogMethod::AccountChanged,
            "Attempting to switch accounts.",
        ));

        match provider.request_accounts().await {
            Ok(accounts) if !accounts.is_empty() => {
                let message = format!("Re-connected to account: {}", accounts[0]);
                session.update_session(|s| s.set_accounts(accounts));
                session.log(LogEntry::success(LogMethod::AccountChanged, message));
            }
            Ok(_) => self.reconnect_failed(ProviderError::NoAccount),
            Err(e) => self.reconnect_failed(e),
        }
    }

    fn reconnect_failed(&self, err: ProviderError) {
        log::warn!("Re-authorization failed: {}", err);
        self.dispatcher.session().log(LogEntry::error(
            LogMethod::AccountChanged,
            format!("Failed to re-connect: {}", err),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockProvider;
    use crate::services::provider::Web3Provider;
    use crate::state::session::Session;
    use crate::utils::config::DappConfig;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::json;
    use shared::dto::log::LogStatus;
    use std::cell::RefCell;

    type TestStore = Rc<RefCell<Session>>;

    fn setup(provider: &Rc<MockProvider>) -> Rc<EventBridge<TestStore>> {
        let store: TestStore = Rc::new(RefCell::new(Session::default()));
        let provider: Rc<dyn Web3Provider> = provider.clone();
        let dispatcher = Rc::new(ActionDispatcher::new(Some(provider), store, DappConfig::default()));
        Rc::new(EventBridge::new(dispatcher))
    }

    fn logs(bridge: &EventBridge<TestStore>) -> Vec<LogEntry> {
        bridge.dispatcher.session().with_session(|s| s.logs().entries().to_vec())
    }

    fn address(bridge: &EventBridge<TestStore>) -> Option<String> {
        bridge.dispatcher.session().active_account()
    }

    #[test]
    fn test_connect_event_logs_then_refreshes_balance() {
        let provider = Rc::new(MockProvider::new());
        provider.respond("eth_getBalance", json!("0xde0b6b3a7640000"));
        let bridge = setup(&provider);
        bridge
            .dispatcher
            .session()
            .update_session(|s| s.set_accounts(vec!["0xABC".to_string()]));

        block_on(bridge.handle(ProviderEvent::Connect { chain_id: "0x38".to_string() }));

        let logs = logs(&bridge);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, LogStatus::Success);
        assert_eq!(logs[0].message, "Connected to chain: 0x38");
        assert_eq!(logs[1].method, LogMethod::GetBalance);
        assert_eq!(bridge.dispatcher.session().with_session(|s| s.balance().to_string()), "1.0");
    }

    #[test]
    fn test_disconnect_keeps_address() {
        let provider = Rc::new(MockProvider::new());
        provider.respond("eth_requestAccounts", json!(["0xABC"]));
        let bridge = setup(&provider);
        block_on(bridge.dispatcher.connect());

        block_on(bridge.handle(ProviderEvent::Disconnect { message: Some("Disconnected".to_string()) }));

        let logs = logs(&bridge);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].status, LogStatus::Warning);
        assert_eq!(logs[1].method, LogMethod::Disconnect);
        assert_eq!(logs[1].message, "lost connection to the rpc");
        assert_eq!(logs[1].secondary_message.as_deref(), Some("Disconnected"));
        assert_eq!(address(&bridge).as_deref(), Some("0xABC"));
    }

    #[test]
    fn test_connect_disconnect_connect_tracks_latest_account() {
        let provider = Rc::new(MockProvider::new());
        provider.respond("eth_requestAccounts", json!(["0xAAA"]));
        provider.respond("eth_requestAccounts", json!(["0xBBB", "0xAAA"]));
        let bridge = setup(&provider);

        block_on(async {
            bridge.dispatcher.connect().await;
            bridge.handle(ProviderEvent::Disconnect { message: None }).await;
            bridge.dispatcher.connect().await;
        });

        assert_eq!(address(&bridge).as_deref(), Some("0xBBB"));
        assert_eq!(logs(&bridge).len(), 3);
    }

    #[test]
    fn test_accounts_changed_replaces_accounts() {
        let provider = Rc::new(MockProvider::new());
        let bridge = setup(&provider);

        block_on(bridge.handle(ProviderEvent::AccountsChanged(vec![
            "0xNEW".to_string(),
            "0xOLD".to_string(),
        ])));

        let logs = logs(&bridge);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, LogStatus::Info);
        assert_eq!(logs[0].method, LogMethod::AccountChanged);
        assert_eq!(logs[0].message, "Switched to account: 0xNEW,0xOLD");
        assert_eq!(address(&bridge).as_deref(), Some("0xNEW"));
        assert!(provider.calls().is_empty());
    }

    #[test]
    fn test_empty_accounts_reauthorization_denied() {
        let provider = Rc::new(MockProvider::new());
        provider.respond("eth_requestAccounts", json!(["0xABC"]));
        provider.fail("eth_requestAccounts", "denied");
        let bridge = setup(&provider);
        block_on(bridge.dispatcher.connect());

        block_on(bridge.handle(ProviderEvent::AccountsChanged(vec![])));

        let logs = logs(&bridge);
        let last = logs.last().unwrap();
        assert_eq!(last.status, LogStatus::Error);
        assert_eq!(last.method, LogMethod::AccountChanged);
        assert_eq!(last.message, "Failed to re-connect: denied");
        assert_eq!(logs[1].message, "Attempting to switch accounts.");
        assert_eq!(address(&bridge).as_deref(), Some("0xABC"));
        assert_eq!(provider.methods(), vec!["eth_requestAccounts", "eth_requestAccounts"]);
    }

    #[test]
    fn test_empty_accounts_reauthorization_succeeds() {
        let provider = Rc::new(MockProvider::new());
        provider.respond("eth_requestAccounts", json!(["0xZZZ"]));
        let bridge = setup(&provider);

        block_on(bridge.handle(ProviderEvent::AccountsChanged(vec![])));

        let logs = logs(&bridge);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].status, LogStatus::Success);
        assert_eq!(address(&bridge).as_deref(), Some("0xZZZ"));
    }

    #[test]
    fn test_attach_routes_events_until_cancelled() {
        let provider = Rc::new(MockProvider::new());
        let bridge = setup(&provider);
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let subscription = bridge
            .attach(move |task| spawner.spawn_local(task).expect("spawn event task"))
            .unwrap();
        assert!(provider.is_subscribed());

        provider.emit(ProviderEvent::Disconnect { message: None });
        provider.emit(ProviderEvent::AccountsChanged(vec!["0xABC".to_string()]));
        pool.run_until_stalled();

        let statuses: Vec<LogStatus> = logs(&bridge).iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![LogStatus::Warning, LogStatus::Info]);

        subscription.cancel();
        assert!(!provider.is_subscribed());

        provider.emit(ProviderEvent::Disconnect { message: None });
        pool.run_until_stalled();
        assert_eq!(logs(&bridge).len(), 2);
    }

    #[test]
    fn test_attach_without_provider() {
        let store: TestStore = Rc::new(RefCell::new(Session::default()));
        let dispatcher = Rc::new(ActionDispatcher::new(None, store, DappConfig::default()));
        let bridge = Rc::new(EventBridge::new(dispatcher));

        let result = bridge.attach(|_| {});
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }
}
