//! EZproxy login URL normalization.
//!
//! Proxy-wrapped links look like `https://proxy.example.edu/login?url=<target>`.
//! The canonical form carries the destination under `qurl`, encoded as a single
//! query component, as the last parameter:
//!
//! - `http://x.ezproxy.lib/login?url=http://a.com/b%20c`
//!   becomes `http://x.ezproxy.lib/login?qurl=http%3A%2F%2Fa.com%2Fb%20c`
//! - `http://x.ezproxy.lib/login?foo=1&url=http://a.com&bar=2`
//!   becomes `http://x.ezproxy.lib/login?foo=1&bar=2&qurl=http%3A%2F%2Fa.com`

mod query;
mod split;

pub use query::{decode_once, encode_component, encode_pairs, parse_pairs};
pub use split::{SplitError, UrlParts};

/// Path substring that marks a proxy login URL.
pub const LOGIN_MARKER: &str = "/login";
/// Canonical key for the proxied destination.
pub const QURL_KEY: &str = "qurl";
/// Legacy key that is always renamed to [`QURL_KEY`].
pub const URL_KEY: &str = "url";

/// Result of normalizing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub url: String,
    /// True when the URL text changed or a `url` key was renamed to `qurl`.
    pub changed: bool,
}

impl Normalized {
    fn unchanged(url: &str) -> Self {
        Self {
            url: url.to_string(),
            changed: false,
        }
    }
}

fn is_destination_key(key: &str) -> bool {
    key == URL_KEY || key == QURL_KEY
}

/// Rewrites an EZproxy login URL to the canonical `qurl` form.
///
/// Only URLs whose path contains `/login` and whose query is non-empty are
/// considered. The first `url` or `qurl` parameter supplies the destination;
/// every other `url`/`qurl` parameter is dropped, the remaining parameters keep
/// their order, and the destination is decoded once and appended as `qurl`.
/// Anything that cannot be split as a URL comes back unchanged.
pub fn normalize(url: &str) -> Normalized {
    let parts = match UrlParts::split(url) {
        Ok(parts) => parts,
        Err(err) => {
            tracing::trace!(%err, url, "left unparseable URL unchanged");
            return Normalized::unchanged(url);
        }
    };

    if !parts.path.contains(LOGIN_MARKER) || parts.query.is_empty() {
        return Normalized::unchanged(url);
    }

    let pairs = parse_pairs(&parts.query);
    let Some((found_key, destination)) = pairs
        .iter()
        .find(|(key, _)| is_destination_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
    else {
        return Normalized::unchanged(url);
    };

    let mut rebuilt: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(key, _)| !is_destination_key(key))
        .collect();
    rebuilt.push((QURL_KEY.to_string(), decode_once(&destination)));

    let fixed = parts.with_query(encode_pairs(&rebuilt)).to_string();
    let changed = fixed != url || found_key == URL_KEY;
    Normalized { url: fixed, changed }
}
