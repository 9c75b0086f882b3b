//! Query-string codec: ordered pair parsing and component encoding.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left unescaped in a query component: ASCII alphanumerics and `_.-~`.
/// Space is escaped as `%20`, never `+`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Parses a query string into ordered `(key, value)` pairs.
///
/// Duplicate keys and blank values are kept; `+` decodes to a space and
/// `%XX` escapes are decoded (invalid UTF-8 is replaced). Empty segments such
/// as the middle of `a=1&&b=2` are skipped.
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Percent-decodes `value` once. `+` is left alone.
pub fn decode_once(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Encodes a single key or value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Encodes pairs as `k=v` joined by `&`.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}
