//! Application state

pub mod context;
pub mod session;

pub use context::{provide_dapp_context, use_dapp_context, DappContext, ProviderPresence};
pub use session::{LogStore, Session, SessionStore};
