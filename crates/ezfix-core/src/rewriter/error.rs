//! Fatal errors of a rewrite pass.

use thiserror::Error;

use crate::marc::MarcError;

/// Positions are 1-based record counts within the pass.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("failed to read record {position}: {source}")]
    Read {
        position: u64,
        #[source]
        source: MarcError,
    },

    #[error("failed to write record {position}: {source}")]
    Write {
        position: u64,
        #[source]
        source: MarcError,
    },
}

impl RewriteError {
    pub fn position(&self) -> u64 {
        match self {
            RewriteError::Read { position, .. } | RewriteError::Write { position, .. } => *position,
        }
    }
}
