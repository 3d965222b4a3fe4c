//! Session state: authorized accounts, balance and the activity log

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use shared::dto::log::LogEntry;

/// Append-only ordered log; only a full clear removes entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStore {
    entries: Vec<LogEntry>,
}

impl LogStore {
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the actions and events mutate.
///
/// The account list is only replaced wholesale: by a successful connect or
/// by an `accountsChanged` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    accounts: Vec<String>,
    balance: String,
    logs: LogStore,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            balance: "0".to_string(),
            logs: LogStore::default(),
        }
    }
}

impl Session {
    /// The active (first) account, if any
    pub fn address(&self) -> Option<&str> {
        self.accounts.first().map(String::as_str).filter(|a| !a.is_empty())
    }

    pub fn set_accounts(&mut self, accounts: Vec<String>) {
        self.accounts = accounts;
    }

    pub fn balance(&self) -> &str {
        &self.balance
    }

    pub fn set_balance(&mut self, balance: String) {
        self.balance = balance;
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    pub fn append_log(&mut self, entry: LogEntry) {
        self.logs.append(entry);
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }
}

/// Shared handle to a [`Session`].
///
/// The app uses an `RwSignal<Session>` so every update re-renders the view;
/// tests use a plain `Rc<RefCell<Session>>`.
pub trait SessionStore: Clone + 'static {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R;

    fn update_session(&self, f: impl FnOnce(&mut Session));

    fn log(&self, entry: LogEntry) {
        log::debug!("[{}] {}: {}", entry.status, entry.method, entry.message);
        self.update_session(|session| session.append_log(entry));
    }

    fn active_account(&self) -> Option<String> {
        self.with_session(|session| session.address().map(str::to_string))
    }
}

impl SessionStore for RwSignal<Session> {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.with_untracked(f)
    }

    fn update_session(&self, f: impl FnOnce(&mut Session)) {
        self.update(f);
    }
}

impl SessionStore for Rc<RefCell<Session>> {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.borrow())
    }

    fn update_session(&self, f: impl FnOnce(&mut Session)) {
        f(&mut self.borrow_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::log::LogMethod;

    #[test]
    fn test_log_store_keeps_append_order() {
        let mut store = LogStore::default();
        store.append(LogEntry::info(LogMethod::Connect, "first"));
        store.append(LogEntry::warning(LogMethod::Disconnect, "second"));
        store.append(LogEntry::error(LogMethod::GetBalance, "third"));

        let messages: Vec<&str> = store.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(store.last().map(|e| e.method), Some(LogMethod::GetBalance));
    }

    #[test]
    fn test_clear_always_empties() {
        let mut store = LogStore::default();
        store.clear();
        assert!(store.is_empty());

        for i in 0..50 {
            store.append(LogEntry::info(LogMethod::Connect, format!("entry {}", i)));
        }
        assert_eq!(store.len(), 50);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_session_defaults() {
        let session = Session::default();
        assert_eq!(session.address(), None);
        assert_eq!(session.balance(), "0");
        assert!(session.logs().is_empty());
    }

    #[test]
    fn test_address_is_first_account() {
        let mut session = Session::default();
        session.set_accounts(vec!["0xaaa".to_string(), "0xbbb".to_string()]);
        assert_eq!(session.address(), Some("0xaaa"));

        session.set_accounts(vec![]);
        assert_eq!(session.address(), None);
    }

    #[test]
    fn test_rc_store_shares_state() {
        let store = Rc::new(RefCell::new(Session::default()));
        let other = store.clone();

        store.update_session(|s| s.set_accounts(vec!["0xabc".to_string()]));
        store.log(LogEntry::success(LogMethod::Connect, "ok"));

        assert_eq!(other.active_account().as_deref(), Some("0xabc"));
        assert_eq!(other.with_session(|s| s.logs().len()), 1);
    }
}
