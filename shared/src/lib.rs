//! # Shared Data Types for the Panda dApp
//!
//! Plain data types used by the browser front-end and its tests. Nothing in
//! this crate touches the browser; it compiles and tests natively.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::log`]**: Activity log entries shown in the log panel
//!   - **[`dto::transaction`]**: JSON-RPC transaction requests and receipts
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Shorten account addresses for display
//!   - **[`utils::truncate_address`]**: Shorten with the default widths
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::log::{LogEntry, LogMethod, LogStatus};
//! use shared::utils::truncate_address;
//!
//! let account = "0xFA449279c2B0521574DAb9ffB4F2Ab41B5083585";
//! let entry = LogEntry::success(
//!     LogMethod::Connect,
//!     format!("connected to account: {}", account),
//! );
//!
//! assert_eq!(entry.status, LogStatus::Success);
//! assert_eq!(truncate_address(account), "0xFA44...3585");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
