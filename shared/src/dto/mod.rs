//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged between the dApp and the injected wallet
//! provider, plus the records rendered in the activity log.
//!
//! ## Module Organization
//!
//! - [`log`] - Activity log entries, statuses and originating methods
//! - [`transaction`] - Transaction requests, receipts and hex quantities
//!
//! ## Serialization Format
//!
//! - **Log DTOs**: snake_case fields (default serde behavior), lowercase
//!   status strings, wallet RPC names for methods
//! - **Transaction DTOs**: camelCase fields with `0x` hex quantities, as
//!   Ethereum JSON-RPC expects
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "from": "0x5a0b54d5dc17e0aadc383d2db43b0a0d3e029c4c",
//!   "to": "0xFA449279c2B0521574DAb9ffB4F2Ab41B5083585",
//!   "value": "0x2386f26fc10000",
//!   "gasPrice": "0x174876e800",
//!   "gas": "0xc350",
//!   "nonce": "0x3"
//! }
//! ```

pub mod log;
pub mod transaction;

pub use log::*;
pub use transaction::*;
