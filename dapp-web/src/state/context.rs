//! Dapp context: reactive session plus the provider wiring behind it

use std::rc::Rc;

use leptos::prelude::*;

use crate::services::dispatcher::{ActionDispatcher, ActionKind, ConnectedAction};
use crate::services::events::EventBridge;
use crate::services::provider::{Subscription, Web3Provider};
use crate::state::session::Session;
use crate::utils::config::DappConfig;

/// Result of looking for an injected provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPresence {
    Locating,
    Absent,
    Present,
}

type SignalDispatcher = ActionDispatcher<RwSignal<Session>>;

/// Global dapp context
#[derive(Clone, Copy)]
pub struct DappContext {
    pub session: RwSignal<Session>,
    pub presence: RwSignal<ProviderPresence>,
    config: StoredValue<DappConfig>,
    dispatcher: StoredValue<Option<Rc<SignalDispatcher>>, LocalStorage>,
    subscription: StoredValue<Option<Subscription>, LocalStorage>,
}

impl DappContext {
    pub fn new(config: DappConfig) -> Self {
        Self {
            session: RwSignal::new(Session::default()),
            presence: RwSignal::new(ProviderPresence::Locating),
            config: StoredValue::new(config),
            dispatcher: StoredValue::new_local(None),
            subscription: StoredValue::new_local(None),
        }
    }

    pub fn config(&self) -> DappConfig {
        self.config.get_value()
    }

    /// Wire up the located provider, or record that there is none.
    ///
    /// Replacing a previous provider drops its subscription, which removes
    /// the old listeners.
    pub fn install(&self, provider: Option<Rc<dyn Web3Provider>>) {
        let Some(provider) = provider else {
            self.presence.set(ProviderPresence::Absent);
            return;
        };

        let dispatcher = Rc::new(ActionDispatcher::new(Some(provider), self.session, self.config()));
        let bridge = Rc::new(EventBridge::new(Rc::clone(&dispatcher)));

        match bridge.attach(|task| leptos::task::spawn_local(task)) {
            Ok(subscription) => self.subscription.set_value(Some(subscription)),
            Err(e) => log::warn!("Could not subscribe to provider events: {}", e),
        }

        self.dispatcher.set_value(Some(dispatcher));
        self.presence.set(ProviderPresence::Present);
    }

    /// Remove provider listeners (page teardown)
    pub fn release(&self) {
        if let Some(Some(subscription)) = self.subscription.try_update_value(Option::take) {
            subscription.cancel();
        }
    }

    pub fn connected_actions(&self) -> &'static [ConnectedAction] {
        self.dispatcher
            .with_value(|d| d.as_ref().map(|d| d.connected_actions()))
            .unwrap_or(&[])
    }

    /// Start an action on its own task; a no-op before a provider is installed
    pub fn dispatch(&self, action: ActionKind) {
        let Some(dispatcher) = self.dispatcher.with_value(Clone::clone) else {
            log::debug!("Ignoring {} without a provider", action);
            return;
        };

        leptos::task::spawn_local(async move {
            dispatcher.run(action).await;
        });
    }

    pub fn clear_logs(&self) {
        self.session.update(|s| s.clear_logs());
    }
}

pub fn provide_dapp_context(config: DappConfig) -> DappContext {
    let context = DappContext::new(config);
    provide_context(context);
    context
}

pub fn use_dapp_context() -> DappContext {
    expect_context::<DappContext>()
}
