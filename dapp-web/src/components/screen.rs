//! Which top-level view to show

use shared::utils::truncate_address;

use crate::state::context::ProviderPresence;
use crate::state::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Still inside the injection grace delay
    Locating,
    NoProvider,
    Disconnected,
    Connected { address: String, balance: String },
}

pub fn screen(presence: ProviderPresence, session: &Session) -> Screen {
    match presence {
        ProviderPresence::Locating => Screen::Locating,
        ProviderPresence::Absent => Screen::NoProvider,
        ProviderPresence::Present => match session.address() {
            Some(address) => Screen::Connected {
                address: address.to_string(),
                balance: session.balance().to_string(),
            },
            None => Screen::Disconnected,
        },
    }
}

/// Header text for the log panel
pub fn log_header(session: &Session) -> String {
    match session.address() {
        Some(address) => format!("Logs for {}", truncate_address(address)),
        None => "Logs".to_string(),
    }
}
