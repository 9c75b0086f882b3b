//! Non-normalizing URL splitter.
//!
//! Splits a URL into scheme, authority, path, query and fragment while keeping
//! each component as written, so the URL can be put back together with only the
//! query replaced. Host case, path encoding and default ports are never touched.

use std::fmt;
use thiserror::Error;

/// Characters allowed in a scheme after the leading letter.
fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Error returned when a URL cannot be split into components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Authority has a `[` without `]` (or the reverse).
    #[error("invalid IPv6 authority: {0}")]
    UnbalancedBrackets(String),
}

/// Components of a URL as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// Lower-cased scheme, empty for relative references.
    pub scheme: String,
    /// Authority (`host[:port]` with optional userinfo); `None` when there was no `//`.
    pub netloc: Option<String>,
    pub path: String,
    /// Query without the leading `?`.
    pub query: String,
    /// Fragment without the leading `#`.
    pub fragment: String,
}

impl UrlParts {
    /// Splits `url` into its components.
    ///
    /// Leading control characters and spaces are stripped and embedded tab, CR
    /// and LF characters removed before splitting.
    pub fn split(url: &str) -> Result<Self, SplitError> {
        let cleaned: String = url
            .trim_start_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();
        let mut rest = cleaned.as_str();

        let mut scheme = String::new();
        if let Some(colon) = rest.find(':') {
            let candidate = &rest[..colon];
            let mut chars = candidate.chars();
            let starts_alpha = chars.next().map_or(false, |c| c.is_ascii_alphabetic());
            if starts_alpha && chars.all(is_scheme_char) {
                scheme = candidate.to_ascii_lowercase();
                rest = &rest[colon + 1..];
            }
        }

        let mut netloc = None;
        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(&['/', '?', '#'][..]).unwrap_or(after.len());
            let authority = &after[..end];
            if authority.contains('[') != authority.contains(']') {
                return Err(SplitError::UnbalancedBrackets(authority.to_string()));
            }
            netloc = Some(authority.to_string());
            rest = &after[end..];
        }

        let (rest, fragment) = match rest.split_once('#') {
            Some((head, frag)) => (head, frag),
            None => (rest, ""),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        Ok(Self {
            scheme,
            netloc,
            path: path.to_string(),
            query: query.to_string(),
            fragment: fragment.to_string(),
        })
    }

    /// Returns the same URL with its query replaced.
    pub fn with_query(self, query: String) -> Self {
        Self { query, ..self }
    }
}

impl fmt::Display for UrlParts {
    /// Reassembles the URL. An empty query or fragment is omitted entirely.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}:", self.scheme)?;
        }
        if let Some(netloc) = &self.netloc {
            write!(f, "//{}", netloc)?;
        }
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}
