//! Wallet services: provider boundary, injected binding, actions and events

pub mod dispatcher;
pub mod ethereum;
pub mod events;
pub mod provider;

#[cfg(test)]
pub(crate) mod mock;

pub use dispatcher::{ActionDispatcher, ActionKind, ConnectedAction};
pub use events::EventBridge;
pub use provider::{ProviderError, ProviderEvent, ProviderLocator, Subscription, Web3Provider};
