//! # Shared Utility Functions
//!
//! ## Address Formatting
//!
//! Functions for shortening `0x` account addresses for display:
//! - [`format_address`] - Keep the first N and last M characters
//! - [`truncate_address`] - `format_address` with the widths used in the UI
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0xFA449279c2B0521574DAb9ffB4F2Ab41B5083585";
//! assert_eq!(format_address(address, 6, 4), "0xFA44...3585");
//! ```

/// Format an address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is not longer than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0xFA449279c2B0521574DAb9ffB4F2Ab41B5083585";
/// assert_eq!(format_address(addr, 6, 4), "0xFA44...3585");
/// assert_eq!(format_address(addr, 10, 8), "0xFA449279...B5083585");
/// assert_eq!(format_address("0x1234", 6, 4), "0x1234");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Hex addresses are ASCII, but guard the byte slicing anyway
    if address_len <= prefix_len + suffix_len
        || !address.is_char_boundary(prefix_len)
        || !address.is_char_boundary(address_len - suffix_len)
    {
        return address.to_string();
    }

    format!(
        "{}...{}",
        &address[..prefix_len],
        &address[address_len - suffix_len..]
    )
}

/// Format an address keeping `0x` plus four hex digits and the last four digits.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// assert_eq!(truncate_address("0xFA449279c2B0521574DAb9ffB4F2Ab41B5083585"), "0xFA44...3585");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}
