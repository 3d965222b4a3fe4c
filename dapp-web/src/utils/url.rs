//! URL utility functions for reading query parameters

use std::collections::HashMap;
use web_sys::window;

/// Parse a `?key=value&flag` query string into a map.
///
/// Values are URL-decoded; a key without `=` maps to an empty string. Later
/// duplicates win.
pub fn parse_query(search: &str) -> HashMap<String, String> {
    let query_string = search.strip_prefix('?').unwrap_or(search);

    query_string
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => {
                let decoded = urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string());
                (key.to_string(), decoded)
            }
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Get all query parameters of the current page URL
pub fn get_query_params() -> HashMap<String, String> {
    window()
        .and_then(|w| w.location().search().ok())
        .map(|search| parse_query(&search))
        .unwrap_or_default()
}
