//! ezfix core: repairs EZproxy login URLs in the 856$u links of MARC records.
//!
//! - [`ezproxy`]: single-URL normalization.
//! - [`rewriter`]: record-stream pass applying it to every 856$u value.
//! - [`marc`]: ISO 2709 reader and writer.
//! - [`job`]: file-to-file run with a CSV [`changelog`].

pub mod config;
pub mod logging;

pub mod changelog;
pub mod ezproxy;
pub mod job;
pub mod marc;
pub mod paths;
pub mod rewriter;
