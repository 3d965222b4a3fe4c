//! Application constants

/// Recipient of the demo transfer
pub const DEMO_RECIPIENT: &str = "0xFA449279c2B0521574DAb9ffB4F2Ab41B5083585";

/// 0.01 native units, in wei
pub const DEMO_VALUE_WEI: u128 = 10_000_000_000_000_000;

/// 0.0000001 native units (100 gwei), in wei
pub const DEMO_GAS_PRICE_WEI: u128 = 100_000_000_000;

pub const DEMO_GAS_LIMIT: u64 = 50_000;

/// Text signed by the Sign Message action
pub const SIGN_MESSAGE: &str =
    "To avoid digital dognappers, sign below to authenticate with CryptoCorgis.";

pub const NATIVE_SYMBOL: &str = "BNB";
pub const NATIVE_DECIMALS: u32 = 18;

/// Blocks required before Send Transaction reports final confirmation
pub const CONFIRMATIONS: u64 = 1;

// Timing (milliseconds)
pub const INJECTION_GRACE_MS: u32 = 100;
pub const RECEIPT_POLL_MS: u32 = 1_500;
pub const RECEIPT_MAX_POLLS: u32 = 120;

pub const WALLET_INSTALL_URL: &str = "https://phantom.app/";
