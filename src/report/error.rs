use thiserror::Error;

use crate::domain::{ChainError, Family};

/// Fatal report-building failures; no partial report is produced
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot resolve chain family for selector {selector}: {source}")]
    UnknownFamily {
        selector: u64,
        #[source]
        source: ChainError,
    },

    #[error("failed to decode {family} transaction to {address} on chain {selector}: {reason}")]
    Decode {
        family: Family,
        selector: u64,
        address: String,
        reason: String,
    },
}
