//! # Activity Log Data Transfer Objects
//!
//! Records shown in the dApp's log panel. Every wallet action and provider
//! event produces one or more [`LogEntry`] values.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Outcome category of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Warning,
    Error,
    Info,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Success => "success",
            LogStatus::Warning => "warning",
            LogStatus::Error => "error",
            LogStatus::Info => "info",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action or provider event a log entry originates from.
///
/// Serialized names follow the wallet RPC vocabulary, so `EthSendTransaction`
/// is written as `eth_sendTransaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogMethod {
    #[serde(rename = "connect")]
    Connect,
    #[serde(rename = "disconnect")]
    Disconnect,
    #[serde(rename = "accountChanged")]
    AccountChanged,
    #[serde(rename = "eth_sendTransaction")]
    EthSendTransaction,
    #[serde(rename = "signMessage")]
    SignMessage,
    #[serde(rename = "signTransaction")]
    SignTransaction,
    #[serde(rename = "getBalance")]
    GetBalance,
}

impl LogMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogMethod::Connect => "connect",
            LogMethod::Disconnect => "disconnect",
            LogMethod::AccountChanged => "accountChanged",
            LogMethod::EthSendTransaction => "eth_sendTransaction",
            LogMethod::SignMessage => "signMessage",
            LogMethod::SignTransaction => "signTransaction",
            LogMethod::GetBalance => "getBalance",
        }
    }
}

impl fmt::Display for LogMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable log record.
///
/// `id` exists only so the log panel can key rendered rows; two entries with
/// identical content still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub status: LogStatus,
    pub method: LogMethod,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_message: Option<String>,
}

impl LogEntry {
    pub fn new(status: LogStatus, method: LogMethod, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status,
            method,
            message: message.into(),
            secondary_message: None,
        }
    }

    pub fn success(method: LogMethod, message: impl Into<String>) -> Self {
        Self::new(LogStatus::Success, method, message)
    }

    pub fn info(method: LogMethod, message: impl Into<String>) -> Self {
        Self::new(LogStatus::Info, method, message)
    }

    pub fn warning(method: LogMethod, message: impl Into<String>) -> Self {
        Self::new(LogStatus::Warning, method, message)
    }

    pub fn error(method: LogMethod, message: impl Into<String>) -> Self {
        Self::new(LogStatus::Error, method, message)
    }

    /// Attach a second line of detail (e.g. a raw receipt).
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary_message = Some(secondary.into());
        self
    }
}
